//! Merge machinery: sequence alignment, ancestor resolution and line-level
//! reconciliation. The orchestration that drives these against a repository
//! lives in the `merge` porcelain command.

pub mod align;
pub mod ancestor;
pub mod lcs;
pub mod reconcile;

use crate::artifacts::objects::object_id::ObjectId;

/// How a merge concluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The target is already reachable from the current head; nothing changed.
    UpToDate,
    /// The current head was an ancestor of the target; the branch pointer
    /// moved forward to the target without creating a commit.
    FastForward(ObjectId),
    /// A merge commit was created, possibly with conflict markers left in the
    /// worktree.
    TrueMerge { oid: ObjectId, conflicted: bool },
}
