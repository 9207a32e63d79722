use crate::areas::repository::Repository;
use std::io::Write;

impl Repository {
    pub fn commit(&self, message: &str) -> anyhow::Result<()> {
        let parent = self.refs().read_head()?;
        let is_root = match parent {
            Some(_) => "",
            None => "(root-commit) ",
        };
        let parents = parent.into_iter().collect();

        let commit_id = self.write_commit(parents, message.to_string())?;

        write!(
            self.writer(),
            "[{}{}] {}",
            is_root,
            commit_id.to_short_oid(),
            message.trim().lines().next().unwrap_or("")
        )?;

        Ok(())
    }
}
