use crate::areas::repository::Repository;
use anyhow::Context;
use std::fs;
use std::io::Write;

const DEFAULT_BRANCH: &str = "master";

impl Repository {
    pub fn init(&self) -> anyhow::Result<()> {
        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .nit/objects directory")?;

        fs::create_dir_all(self.refs().refs_path())
            .context("Failed to create .nit/refs directory")?;

        fs::create_dir_all(self.refs().heads_path())
            .context("Failed to create .nit/refs/heads directory")?;

        fs::write(
            self.refs().head_path(),
            format!("ref: refs/heads/{DEFAULT_BRANCH}"),
        )
        .context("Failed to create initial HEAD reference")?;

        // make sure the default branch file exists, even if unborn
        let head_ref_path = self.refs().heads_path().join(DEFAULT_BRANCH);
        if !head_ref_path.exists() {
            fs::write(&head_ref_path, b"").context("Failed to create default branch file")?;
        }

        write!(
            self.writer(),
            "Initialized empty nit repository in {}",
            self.path().display()
        )?;

        Ok(())
    }
}
