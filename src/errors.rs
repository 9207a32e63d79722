//! Typed failures surfaced to the user
//!
//! Precondition failures abort before any repository state is touched, so the
//! messages here are the exact strings the CLI prints. Everything else travels
//! as `anyhow::Error` with context attached at the I/O boundary.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("fatal: not a nit repository (or any of the parent directories): .nit")]
    NotARepository,

    /// The merge target matched no ref and no object in the database.
    #[error("merge: {0} - not something we can merge")]
    UnresolvableReference(String),

    /// The target resolved, but to something other than a commit.
    #[error("error: {oid}: expected commit type, but the object dereferences to {actual} type")]
    WrongObjectType { oid: String, actual: String },

    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
}
