//! Column alignment of two token sequences
//!
//! Stretches two sequences to a common length by inserting gaps, so that every
//! token of their longest common subsequence lands in the same column on both
//! sides. Columns where both sides carry the same token are common ground;
//! everything else is a change one side made relative to the other.

use crate::artifacts::merge::lcs::longest_common_subsequence;

/// Two gap-padded rows of equal length. Removing the `None` gaps from either
/// row recovers the original input sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment<T> {
    pub a: Vec<Option<T>>,
    pub b: Vec<Option<T>>,
}

impl<T> Alignment<T> {
    pub fn len(&self) -> usize {
        self.a.len()
    }

    pub fn is_empty(&self) -> bool {
        self.a.is_empty()
    }

    /// Iterate over columns as `(a token, b token)` pairs.
    pub fn columns(&self) -> impl Iterator<Item = (&Option<T>, &Option<T>)> {
        self.a.iter().zip(self.b.iter())
    }
}

/// Align `a` and `b` around their longest common subsequence.
///
/// Each common token is emitted as a both-sides column. Tokens that only one
/// side holds are paired up column by column where both sides have spare
/// tokens before the next common one, and padded with gaps where only one
/// side does.
pub fn align<T: Eq + Clone>(a: &[T], b: &[T]) -> Alignment<T> {
    let common = longest_common_subsequence(a, b);

    let mut aligned_a = Vec::with_capacity(a.len().max(b.len()));
    let mut aligned_b = Vec::with_capacity(a.len().max(b.len()));
    let (mut i, mut j) = (0, 0);

    for anchor in &common {
        // Emit columns until both sides sit on this common token. While only
        // one side has reached it, the other side's tokens go out against
        // gaps; while neither has, spare tokens pair up in the same column.
        loop {
            let a_at_anchor = a.get(i) == Some(anchor);
            let b_at_anchor = b.get(j) == Some(anchor);

            match (a_at_anchor, b_at_anchor) {
                (true, true) => {
                    aligned_a.push(Some(a[i].clone()));
                    aligned_b.push(Some(b[j].clone()));
                    i += 1;
                    j += 1;
                    break;
                }
                (true, false) => {
                    aligned_a.push(None);
                    aligned_b.push(Some(b[j].clone()));
                    j += 1;
                }
                (false, true) => {
                    aligned_a.push(Some(a[i].clone()));
                    aligned_b.push(None);
                    i += 1;
                }
                (false, false) => {
                    aligned_a.push(Some(a[i].clone()));
                    aligned_b.push(Some(b[j].clone()));
                    i += 1;
                    j += 1;
                }
            }
        }
    }

    // Leftover tails past the last common token
    while i < a.len() && j < b.len() {
        aligned_a.push(Some(a[i].clone()));
        aligned_b.push(Some(b[j].clone()));
        i += 1;
        j += 1;
    }
    while i < a.len() {
        aligned_a.push(Some(a[i].clone()));
        aligned_b.push(None);
        i += 1;
    }
    while j < b.len() {
        aligned_a.push(None);
        aligned_b.push(Some(b[j].clone()));
        j += 1;
    }

    Alignment {
        a: aligned_a,
        b: aligned_b,
    }
}
