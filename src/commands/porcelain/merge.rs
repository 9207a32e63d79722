use crate::areas::refs::Head;
use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::merge::ancestor::CommonAncestorFinder;
use crate::artifacts::merge::reconcile::merge_file;
use crate::artifacts::merge::MergeOutcome;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use crate::errors::RepoError;
use anyhow::Context;
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;

impl Repository {
    /// Merge `target` into the current branch.
    ///
    /// Proceeds through a fixed pipeline: resolve the target, check it
    /// dereferences to a commit, check HEAD is on a branch, classify against
    /// the common ancestor, and only then reconcile trees and commit. An
    /// up-to-date merge changes nothing; a fast-forward moves the branch
    /// without creating a commit; a true merge writes a two-parent commit
    /// even when conflict markers were left in the worktree.
    pub fn merge(&self, target: &str, message: Option<&str>) -> anyhow::Result<MergeOutcome> {
        let target_oid = Revision::parse(target)
            .resolve(self)?
            .ok_or_else(|| RepoError::UnresolvableReference(target.to_string()))?;

        let target_type = self.database().get_object_type(&target_oid)?;
        if target_type != ObjectType::Commit {
            return Err(RepoError::WrongObjectType {
                oid: target.to_string(),
                actual: target_type.to_string(),
            }
            .into());
        }

        let current_branch = match self.refs().read_head_state()? {
            Some(Head::Symbolic(branch_name)) => branch_name,
            Some(Head::Detached(_)) => {
                return Err(
                    RepoError::UnsupportedOperation("merge with detached HEAD".to_string()).into(),
                )
            }
            None => anyhow::bail!("no HEAD to merge into"),
        };
        let head_oid = self
            .refs()
            .read_head()?
            .context("current branch has no commits to merge into")?;

        let database = self.database();
        let finder = CommonAncestorFinder::new(|oid: &ObjectId| database.load_commit_node(oid));
        let base_oid = finder.find(&head_oid, &target_oid)?;

        if base_oid.as_ref() == Some(&target_oid) {
            write!(self.writer(), "Already up-to-date.")?;
            return Ok(MergeOutcome::UpToDate);
        }

        if base_oid.as_ref() == Some(&head_oid) {
            self.sync_to_commit(&target_oid)?;
            self.refs().move_branch(&current_branch, target_oid.clone())?;

            write!(
                self.writer(),
                "Updating {}..{}\nFast-forward",
                head_oid.to_short_oid(),
                target_oid.to_short_oid()
            )?;
            return Ok(MergeOutcome::FastForward(target_oid));
        }

        let base_tree = match &base_oid {
            Some(oid) => self.tree_of_commit(oid)?,
            // unrelated histories reconcile against an empty base
            None => Tree::default(),
        };
        let head_tree = self.tree_of_commit(&head_oid)?;
        let target_tree = self.tree_of_commit(&target_oid)?;

        let (merged_tree, conflicted) =
            self.reconcile_trees(&base_tree, &head_tree, &target_tree, target)?;
        self.sync_to_tree(&merged_tree)?;

        let message = match message {
            Some(message) => message.to_string(),
            None => format!("Merge {} into {}", target, current_branch),
        };
        let commit_id = self.write_commit(vec![head_oid, target_oid], message)?;

        if conflicted {
            write!(
                self.writer(),
                "Merge committed with conflicts; fix conflict markers in the worktree."
            )?;
        } else {
            write!(self.writer(), "Merge made by the three-way strategy.")?;
        }

        Ok(MergeOutcome::TrueMerge {
            oid: commit_id,
            conflicted,
        })
    }

    /// Three-way reconciliation over the union of paths in both trees.
    ///
    /// A path changed on one side only takes that side's blob; a path changed
    /// identically on both takes it once; a path changed differently on both
    /// goes through line-level merging, possibly leaving conflict markers.
    fn reconcile_trees(
        &self,
        base_tree: &Tree,
        head_tree: &Tree,
        target_tree: &Tree,
        target_label: &str,
    ) -> anyhow::Result<(Tree, bool)> {
        let mut merged_entries = BTreeMap::new();
        let mut conflicted = false;

        let paths: BTreeSet<&String> = head_tree.paths().chain(target_tree.paths()).collect();

        for path in paths {
            let ours = head_tree.get(path);
            let theirs = target_tree.get(path);
            let base = base_tree.get(path);

            let resolved = if ours == theirs || theirs == base {
                ours.cloned()
            } else if ours == base {
                theirs.cloned()
            } else {
                // both sides changed the path differently
                let ours_content = self.blob_content(ours)?;
                let theirs_content = self.blob_content(theirs)?;
                let merged = merge_file(&ours_content, &theirs_content, target_label);

                if merged.conflicted {
                    conflicted = true;
                }

                let blob = Blob::new(merged.content);
                let blob_id = blob.object_id()?;
                self.database().store(blob)?;
                Some(blob_id)
            };

            if let Some(oid) = resolved {
                merged_entries.insert(path.clone(), oid);
            }
        }

        Ok((Tree::from_entries(merged_entries), conflicted))
    }

    fn tree_of_commit(&self, oid: &ObjectId) -> anyhow::Result<Tree> {
        let commit = self
            .database()
            .parse_object_as_commit(oid)?
            .with_context(|| format!("object {} is not a commit", oid.as_ref()))?;

        self.database()
            .parse_object_as_tree(commit.tree_oid())?
            .with_context(|| format!("object {} is not a tree", commit.tree_oid().as_ref()))
    }

    /// A side that deleted or never had the file participates as empty
    /// content.
    fn blob_content(&self, oid: Option<&ObjectId>) -> anyhow::Result<String> {
        match oid {
            Some(oid) => {
                let blob = self
                    .database()
                    .parse_object_as_blob(oid)?
                    .with_context(|| format!("object {} is not a blob", oid.as_ref()))?;
                Ok(blob.content().to_string())
            }
            None => Ok(String::new()),
        }
    }
}
