//! Porcelain commands (user-facing operations)
//!
//! ## Commands
//!
//! - `init`: initialize a new repository
//! - `add`: stage files for commit
//! - `commit`: create a new commit
//! - `branch`: create or list branches
//! - `checkout`: switch branches or detach at a commit
//! - `merge`: join another line of development into the current branch

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod merge;
