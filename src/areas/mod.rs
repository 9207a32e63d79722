//! Core repository areas
//!
//! The fundamental building blocks of a repository:
//!
//! - `database`: object database storing blobs, trees, and commits
//! - `index`: staging area tracking what the next commit will capture
//! - `refs`: reference management (branches, HEAD)
//! - `repository`: high-level coordination of the areas
//! - `workspace`: working directory file system operations

pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
