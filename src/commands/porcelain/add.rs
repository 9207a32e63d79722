use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use std::path::Path;

impl Repository {
    pub fn add(&self, paths: &[String]) -> anyhow::Result<()> {
        let mut index = self.index();
        index.rehydrate()?;

        // Expand each provided path: a directory stages everything under it
        let paths = paths
            .iter()
            .map(|path| {
                let absolute_path = Path::new(path).canonicalize()?;
                self.workspace().list_files(Some(absolute_path))
            })
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .flatten();

        for path in paths {
            let data = self.workspace().read_file(&path)?;

            let blob = Blob::new(data);
            let blob_id = blob.object_id()?;

            self.database().store(blob)?;
            index.add(path.to_string_lossy().to_string(), blob_id);
        }

        index.write_updates()?;

        Ok(())
    }
}
