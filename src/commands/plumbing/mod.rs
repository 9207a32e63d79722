//! Plumbing commands (low-level operations)
//!
//! ## Commands
//!
//! - `cat-file`: print the content of an object
//! - `write_commit`: shared commit-writing machinery for `commit` and `merge`

pub mod cat_file;
mod write_commit;
