//! Longest common subsequence over arbitrary token sequences
//!
//! The classic dynamic-programming formulation: a `(|a|+1) x (|b|+1)` length
//! table, then a walk back from `(|a|, |b|)` to read the subsequence out.
//! The walk prefers the `a`-advancing step on ties, which pins down a single
//! deterministic answer when several subsequences share the maximal length.

/// Compute the longest common subsequence of `a` and `b`.
///
/// Pure function, `O(|a| * |b|)` time and space. Either input may be empty or
/// contain duplicates; an empty result means the inputs share no tokens.
pub fn longest_common_subsequence<T: Eq + Clone>(a: &[T], b: &[T]) -> Vec<T> {
    let mut lengths = vec![vec![0usize; b.len() + 1]; a.len() + 1];

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            lengths[i][j] = if a[i - 1] == b[j - 1] {
                lengths[i - 1][j - 1] + 1
            } else {
                lengths[i - 1][j].max(lengths[i][j - 1])
            };
        }
    }

    // Read the subsequence back out of the table. A diagonal step is only
    // taken when the cell strictly exceeds both neighbors, which implies the
    // tokens match; equal neighbors resolve toward the a side first.
    let mut result = Vec::with_capacity(lengths[a.len()][b.len()]);
    let (mut i, mut j) = (a.len(), b.len());
    while i > 0 && j > 0 {
        if lengths[i][j] == lengths[i - 1][j] {
            i -= 1;
        } else if lengths[i][j] == lengths[i][j - 1] {
            j -= 1;
        } else {
            result.push(a[i - 1].clone());
            i -= 1;
            j -= 1;
        }
    }

    result.reverse();
    result
}
