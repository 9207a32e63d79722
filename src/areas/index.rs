//! Staging area
//!
//! The index records, for every tracked path, the blob the next commit will
//! capture. It is a plain text file at `.nit/index`, one `<oid>\t<path>` line
//! per entry, sorted by path. Mutations happen in memory; `write_updates`
//! persists the whole file under an exclusive lock.

use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use file_guard::Lock;
use std::collections::BTreeMap;
use std::io::Write;
use std::ops::DerefMut;
use std::path::Path;

#[derive(Debug)]
pub struct Index {
    path: Box<Path>,
    entries: BTreeMap<String, ObjectId>,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            entries: BTreeMap::new(),
        }
    }

    /// Reload the entries from disk, replacing the in-memory state. A missing
    /// index file means an empty staging area.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.entries.clear();

        if !self.path.exists() {
            return Ok(());
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read index file at {:?}", self.path))?;

        for line in content.lines().filter(|line| !line.is_empty()) {
            let (oid, path) = line
                .split_once('\t')
                .context("Invalid index entry: missing separator")?;
            self.entries
                .insert(path.to_string(), ObjectId::try_parse(oid.to_string())?);
        }

        Ok(())
    }

    /// Persist the in-memory entries, replacing the index file atomically
    /// under an exclusive lock.
    pub fn write_updates(&self) -> anyhow::Result<()> {
        let content = self
            .entries
            .iter()
            .map(|(path, oid)| format!("{}\t{}", oid.as_ref(), path))
            .collect::<Vec<_>>()
            .join("\n");

        let mut index_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open index file at {:?}", self.path))?;
        let mut lock = file_guard::lock(&mut index_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(content.as_bytes())?;

        Ok(())
    }

    pub fn add(&mut self, path: String, oid: ObjectId) {
        self.entries.insert(path, oid);
    }

    pub fn remove(&mut self, path: &str) {
        self.entries.remove(path);
    }

    /// Replace every entry, e.g. after a checkout or merge rewrote the
    /// worktree from a tree object.
    pub fn set_all(&mut self, entries: BTreeMap<String, ObjectId>) {
        self.entries = entries;
    }

    pub fn entries(&self) -> &BTreeMap<String, ObjectId> {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
