use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use crate::errors::RepoError;
use anyhow::Context;
use std::io::Write;

impl Repository {
    /// Switch to a branch, or detach HEAD at a commit when `target` names a
    /// commit rather than a branch.
    pub fn checkout(&self, target: &str) -> anyhow::Result<()> {
        let branch = BranchName::try_parse(target.to_string())
            .ok()
            .filter(|name| {
                matches!(self.refs().read_branch(name), Ok(Some(_)))
            });

        match branch {
            Some(branch_name) => {
                let oid = self
                    .refs()
                    .read_branch(&branch_name)?
                    .context("branch has no commits")?;

                self.sync_to_commit(&oid)?;
                self.refs().set_head_to_branch(&branch_name)?;

                writeln!(self.writer(), "Switched to branch '{}'", branch_name)?;
            }
            None => {
                let oid = Revision::parse(target)
                    .resolve(self)?
                    .ok_or_else(|| RepoError::UnresolvableReference(target.to_string()))?;

                self.sync_to_commit(&oid)?;
                self.refs().set_head_detached(&oid)?;

                writeln!(self.writer(), "HEAD is now at {}", oid.to_short_oid())?;
            }
        }

        Ok(())
    }

    /// Rewrite the worktree and index to match the tree of the given commit.
    pub(crate) fn sync_to_commit(&self, oid: &ObjectId) -> anyhow::Result<()> {
        let commit = self
            .database()
            .parse_object_as_commit(oid)?
            .with_context(|| format!("object {} is not a commit", oid.as_ref()))?;
        let tree = self
            .database()
            .parse_object_as_tree(commit.tree_oid())?
            .with_context(|| format!("object {} is not a tree", commit.tree_oid().as_ref()))?;

        self.sync_to_tree(&tree)
    }

    /// Make the worktree and index match `tree`: delete tracked files the
    /// tree lacks, write out every file it has, then replace the index.
    pub(crate) fn sync_to_tree(&self, tree: &Tree) -> anyhow::Result<()> {
        let mut index = self.index();
        index.rehydrate()?;

        let stale_paths: Vec<String> = index
            .entries()
            .keys()
            .filter(|path| tree.get(path).is_none())
            .cloned()
            .collect();
        for path in stale_paths {
            self.workspace().remove_file(path.as_ref())?;
        }

        for (path, blob_oid) in tree.entries() {
            let blob = self
                .database()
                .parse_object_as_blob(blob_oid)?
                .with_context(|| format!("object {} is not a blob", blob_oid.as_ref()))?;
            self.workspace().write_file(path.as_ref(), blob.content())?;
        }

        index.set_all(tree.entries().clone());
        index.write_updates()?;

        Ok(())
    }
}
