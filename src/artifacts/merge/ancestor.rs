//! Common ancestor resolution for merges
//!
//! Walks the commit graph upward from two commits at once and returns the
//! first commit reached from both sides. That commit is the merge base the
//! three-way reconciliation reads its "unchanged since" answers from.
//!
//! The traversal is a breadth-first walk that alternates between the two
//! sides, one frontier commit per step, marking every commit with the side(s)
//! it has been reached from. A commit is its own ancestor, so when one input
//! is reachable from the other the walk returns that input. The two inputs
//! are put into a canonical order before walking, which makes the result
//! independent of argument order even in histories with several candidates.
//!
//! ## Debug Logging
//!
//! Build with the `debug_merge` feature flag to trace the traversal on
//! stderr: `cargo build --features debug_merge`.

use crate::artifacts::objects::commit::CommitNode;
use crate::artifacts::objects::object_id::ObjectId;
use bitflags::bitflags;
use std::collections::{HashMap, VecDeque};
use std::fmt;

/// Macro for debug logging that is enabled with the debug_merge feature flag
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(any(feature = "debug_merge"))]
        {
            eprintln!($($arg)*);
        }
    };
}

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    struct VisitState: u8 {
        const NONE = 0b00;
        const VISITED_FROM_SOURCE = 0b01;
        const VISITED_FROM_TARGET = 0b10;
        const VISITED_FROM_BOTH =
            Self::VISITED_FROM_SOURCE.bits() | Self::VISITED_FROM_TARGET.bits();
    }
}

impl fmt::Debug for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut flags = Vec::new();
        if self.contains(VisitState::VISITED_FROM_SOURCE) {
            flags.push("SOURCE");
        }
        if self.contains(VisitState::VISITED_FROM_TARGET) {
            flags.push("TARGET");
        }
        if flags.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", flags.join("|"))
        }
    }
}

/// Finds the common ancestor of two commits.
///
/// The graph is read through a generic loader function, which keeps the
/// algorithm independent of where commits live (object database, in-memory
/// test fixtures). Root commits load with an empty parents vector.
pub struct CommonAncestorFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<CommitNode>,
{
    commit_loader: CommitLoaderFn,
}

impl<CommitLoaderFn> CommonAncestorFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<CommitNode>,
{
    pub fn new(commit_loader: CommitLoaderFn) -> Self {
        Self { commit_loader }
    }

    /// Returns the common ancestor of `a` and `b`, or `None` when their
    /// histories share no commit.
    ///
    /// The result is symmetric: `find(a, b)` and `find(b, a)` agree.
    pub fn find(&self, a: &ObjectId, b: &ObjectId) -> anyhow::Result<Option<ObjectId>> {
        if a == b {
            return Ok(Some(a.clone()));
        }

        // Canonical ordering of the two inputs keeps the answer stable no
        // matter which side the caller labels source
        let (source, target) = if a.as_ref() <= b.as_ref() {
            (a, b)
        } else {
            (b, a)
        };

        let mut visit_states = HashMap::<ObjectId, VisitState>::new();
        visit_states.insert(source.clone(), VisitState::VISITED_FROM_SOURCE);
        visit_states.insert(target.clone(), VisitState::VISITED_FROM_TARGET);

        let mut frontiers = [
            VecDeque::from([source.clone()]),
            VecDeque::from([target.clone()]),
        ];
        let marks = [
            VisitState::VISITED_FROM_SOURCE,
            VisitState::VISITED_FROM_TARGET,
        ];

        // Alternate sides, expanding one frontier commit per step, until a
        // commit turns up marked from both sides or both frontiers drain
        let mut side = 0;
        while !frontiers[0].is_empty() || !frontiers[1].is_empty() {
            let Some(commit_id) = frontiers[side].pop_front() else {
                side = 1 - side;
                continue;
            };

            debug_log!(
                "Expanding {} from {:?}",
                commit_id.to_short_oid(),
                marks[side]
            );

            let commit = (self.commit_loader)(&commit_id)?;
            for parent_id in commit.parents {
                let state = visit_states
                    .entry(parent_id.clone())
                    .or_insert(VisitState::NONE);
                if state.contains(marks[side]) {
                    continue;
                }

                *state |= marks[side];
                debug_log!("  Marked {} as {:?}", parent_id.to_short_oid(), state);

                if *state == VisitState::VISITED_FROM_BOTH {
                    debug_log!("Common ancestor: {}", parent_id.to_short_oid());
                    return Ok(Some(parent_id));
                }

                frontiers[side].push_back(parent_id);
            }

            side = 1 - side;
        }

        Ok(None)
    }
}
