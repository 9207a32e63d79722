use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::errors::RepoError;
use std::cell::{RefCell, RefMut};
use std::path::Path;

pub const REPOSITORY_DIR: &str = ".nit";

/// A repository ties the four areas together: the object database, the
/// staging index, the refs and the workspace, all rooted at one directory.
/// Command implementations hang off this type as methods.
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: RefCell<Index>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    pub fn new(path: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        if !path.exists() {
            std::fs::create_dir_all(path)?;
        }
        let path = path.canonicalize()?;

        let repo_dir = path.join(REPOSITORY_DIR);
        let index = Index::new(repo_dir.join("index").into_boxed_path());
        let database = Database::new(repo_dir.join("objects").into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(repo_dir.into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            index: RefCell::new(index),
            database,
            workspace,
            refs,
        })
    }

    /// Locate the repository root by walking up from `start` until a
    /// directory containing `.nit` is found.
    pub fn discover(start: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let start = start.canonicalize()?;

        let mut candidate = Some(start.as_path());
        while let Some(dir) = candidate {
            if dir.join(REPOSITORY_DIR).is_dir() {
                return Repository::new(dir, writer);
            }
            candidate = dir.parent();
        }

        Err(RepoError::NotARepository.into())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&'_ self) -> RefMut<'_, Index> {
        self.index.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }
}
