use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::{Author, Commit};
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;

impl Repository {
    /// Snapshot the index as a tree and record a commit on top of whatever
    /// HEAD resolves to. Shared by `commit` and `merge`.
    pub(crate) fn write_commit(
        &self,
        parents: Vec<ObjectId>,
        message: String,
    ) -> anyhow::Result<ObjectId> {
        let mut index = self.index();
        index.rehydrate()?;

        let tree = Tree::from_entries(index.entries().clone());
        let tree_id = tree.object_id()?;
        self.database().store(tree)?;

        let author = Author::load_from_env()?;
        let commit = Commit::new(parents, tree_id, author, message.trim().to_string());
        let commit_id = commit.object_id()?;

        self.database().store(commit)?;
        self.refs().update_head(commit_id.clone())?;

        Ok(commit_id)
    }
}
