use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::Revision;
use crate::errors::RepoError;
use std::io::Write;

impl Repository {
    /// Print the pretty-printed content of the object a revision resolves to.
    pub fn cat_file(&self, revision: &str) -> anyhow::Result<()> {
        let oid = Revision::parse(revision)
            .resolve(self)?
            .ok_or_else(|| RepoError::UnresolvableReference(revision.to_string()))?;

        let object = self.database().parse_object(&oid)?;
        write!(self.writer(), "{}", object.display())?;

        Ok(())
    }
}
