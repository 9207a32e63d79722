use crate::areas::refs::Head;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::revision::Revision;
use std::io::Write;

impl Repository {
    /// Create a branch, or list existing branches when no name is given.
    pub fn branch(&self, branch_name: Option<&str>, source: Option<&str>) -> anyhow::Result<()> {
        match branch_name {
            Some(name) => self.create_branch(name, source),
            None => self.list_branches(),
        }
    }

    fn create_branch(&self, name: &str, source: Option<&str>) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(name.to_string())?;

        let source_oid = match source {
            Some(source) => Revision::parse(source).resolve(self)?,
            None => self.refs().read_head()?,
        }
        .ok_or_else(|| anyhow::anyhow!("no current HEAD to branch from"))?;

        self.refs().create_branch(&branch_name, source_oid)?;

        Ok(())
    }

    fn list_branches(&self) -> anyhow::Result<()> {
        let current = match self.refs().read_head_state()? {
            Some(Head::Symbolic(branch_name)) => Some(branch_name),
            _ => None,
        };

        let mut branches = self.refs().list_branches()?;
        branches.sort();

        for branch in branches {
            let marker = if Some(&branch) == current.as_ref() {
                "* "
            } else {
                "  "
            };
            writeln!(self.writer(), "{}{}", marker, branch)?;
        }

        Ok(())
    }
}
