//! References: branches and HEAD
//!
//! References are human-readable names pointing to commits, stored as text
//! files under `.nit`:
//! - a 40-character hex object ID (direct reference), or
//! - `ref: <path>` (symbolic reference, e.g. HEAD -> refs/heads/master)
//!
//! Branch heads live under `refs/heads/*`. Writes go through exclusive file
//! locks so concurrent invocations cannot interleave ref updates.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::Path;
use walkdir::WalkDir;

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: (.+)$";

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

const HEADS_PREFIX: &str = "refs/heads/";

/// What HEAD currently points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Head {
    /// HEAD names a branch; commits and merges move the branch.
    Symbolic(BranchName),
    /// HEAD holds a bare commit ID (detached).
    Detached(ObjectId),
}

/// Reference manager rooted at the `.nit` directory.
#[derive(Debug, new)]
pub struct Refs {
    path: Box<Path>,
}

/// A reference file's raw content: symbolic or direct.
#[derive(Debug, Clone)]
enum SymRefOrOid {
    SymRef(String),
    Oid(ObjectId),
}

impl SymRefOrOid {
    fn read_from(path: &Path) -> anyhow::Result<Option<SymRefOrOid>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)?;
        let content = content.trim();

        if content.is_empty() {
            return Ok(None);
        }

        let symref_match = regex::Regex::new(SYMREF_REGEX)?.captures(content);
        if let Some(symref_match) = symref_match {
            Ok(Some(SymRefOrOid::SymRef(symref_match[1].to_string())))
        } else {
            Ok(Some(SymRefOrOid::Oid(ObjectId::try_parse(
                content.to_string(),
            )?)))
        }
    }
}

impl Refs {
    /// Read HEAD's state: the branch it names, or the commit it is detached
    /// at. `None` when HEAD is missing or empty.
    pub fn read_head_state(&self) -> anyhow::Result<Option<Head>> {
        match SymRefOrOid::read_from(&self.head_path())? {
            Some(SymRefOrOid::SymRef(ref_path)) => {
                let branch_name = ref_path
                    .strip_prefix(HEADS_PREFIX)
                    .with_context(|| format!("HEAD points outside {HEADS_PREFIX}: {ref_path}"))?;
                Ok(Some(Head::Symbolic(BranchName::try_parse(
                    branch_name.to_string(),
                )?)))
            }
            Some(SymRefOrOid::Oid(oid)) => Ok(Some(Head::Detached(oid))),
            None => Ok(None),
        }
    }

    /// Read the commit HEAD resolves to, following symbolic indirection.
    /// `None` on an unborn branch.
    pub fn read_head(&self) -> anyhow::Result<Option<ObjectId>> {
        self.read_symref(&self.head_path())
    }

    /// Point HEAD at a branch.
    pub fn set_head_to_branch(&self, branch_name: &BranchName) -> anyhow::Result<()> {
        self.update_ref_file(
            self.head_path(),
            format!("ref: {}{}", HEADS_PREFIX, branch_name),
        )
    }

    /// Detach HEAD at a commit.
    pub fn set_head_detached(&self, oid: &ObjectId) -> anyhow::Result<()> {
        self.update_ref_file(self.head_path(), oid.as_ref().to_string())
    }

    /// Advance whatever HEAD resolves to. On a symbolic HEAD this moves the
    /// branch; on a detached HEAD it rewrites HEAD itself.
    pub fn update_head(&self, oid: ObjectId) -> anyhow::Result<()> {
        self.update_symref(self.head_path().as_ref(), oid)
    }

    /// Read a branch's tip commit. `None` when the branch does not exist.
    pub fn read_branch(&self, branch_name: &BranchName) -> anyhow::Result<Option<ObjectId>> {
        let branch_path = self.heads_path().join(branch_name.as_ref());
        self.read_symref(&branch_path)
    }

    pub fn create_branch(&self, name: &BranchName, source_oid: ObjectId) -> anyhow::Result<()> {
        let branch_path = self.heads_path().join(name.as_ref()).into_boxed_path();

        if branch_path.exists() {
            anyhow::bail!("branch {} already exists", name);
        }

        self.update_ref_file(branch_path, source_oid.as_ref().into())
    }

    /// Move a branch to a new commit, creating it if necessary.
    pub fn move_branch(&self, name: &BranchName, oid: ObjectId) -> anyhow::Result<()> {
        let branch_path = self.heads_path().join(name.as_ref()).into_boxed_path();
        self.update_ref_file(branch_path, oid.as_ref().into())
    }

    pub fn list_branches(&self) -> anyhow::Result<Vec<BranchName>> {
        let heads_path = self.heads_path();

        Ok(WalkDir::new(heads_path.as_ref())
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| {
                let relative_path = entry.path().strip_prefix(heads_path.as_ref()).ok()?;
                BranchName::try_parse(relative_path.to_string_lossy().to_string()).ok()
            })
            .collect::<Vec<_>>())
    }

    fn read_symref(&self, path: &Path) -> anyhow::Result<Option<ObjectId>> {
        match SymRefOrOid::read_from(path)? {
            Some(SymRefOrOid::SymRef(ref_path)) => {
                self.read_symref(self.path.join(ref_path).as_path())
            }
            Some(SymRefOrOid::Oid(oid)) => Ok(Some(oid)),
            None => Ok(None),
        }
    }

    /// Follow symbolic indirection and write the new commit ID at the final
    /// target, under an exclusive lock.
    fn update_symref(&self, path: &Path, oid: ObjectId) -> anyhow::Result<()> {
        if !path.exists() {
            // unborn branch: nothing to follow, just create the ref file
            return self.update_ref_file(path.into(), oid.as_ref().into());
        }

        let mut ref_file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .with_context(|| format!("failed to open ref file at {:?}", path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;

        match SymRefOrOid::read_from(path)? {
            Some(SymRefOrOid::SymRef(ref_path)) => {
                let target_path = self.path.join(ref_path);
                self.update_symref(target_path.as_path(), oid)
            }
            Some(SymRefOrOid::Oid(_)) | None => {
                lock.deref_mut().write_all(oid.as_ref().as_bytes())?;
                Ok(())
            }
        }
    }

    fn update_ref_file(&self, path: Box<Path>, raw_ref: String) -> anyhow::Result<()> {
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!(
                "failed to create parent directories for ref file at {:?}",
                path
            )
        })?)?;

        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path.clone())
            .with_context(|| format!("failed to open ref file at {:?}", path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;

        Ok(())
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_REF_NAME).into_boxed_path()
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.path.join("refs").into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.refs_path().join("heads").into_boxed_path()
    }
}
