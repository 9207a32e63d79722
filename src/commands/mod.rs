//! Command implementations
//!
//! All commands are implemented as methods on `Repository`, organized into
//! two categories:
//!
//! - `plumbing`: low-level object manipulation (cat-file, commit writing)
//! - `porcelain`: user-facing workflows (init, add, commit, branch, checkout,
//!   merge)

pub mod plumbing;
pub mod porcelain;
