//! Line-level reconciliation of two versions of a file
//!
//! Called for paths both sides changed relative to the merge base. The two
//! versions are split into lines, aligned around their common lines, and
//! walked column by column. Runs where both sides made the same change merge
//! silently; runs where they differ become a conflict region wrapped in
//! standard conflict markers, with our side first.

use crate::artifacts::merge::align::align;

const OURS_LABEL: &str = "HEAD";
const CONFLICT_SEPARATOR: &str = "=======";

/// Result of merging one file: the merged content plus whether any conflict
/// markers were written into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedFile {
    pub content: String,
    pub conflicted: bool,
}

/// Merge two versions of a file's content line by line.
///
/// `theirs_label` names the incoming side in conflict markers, usually the
/// merge target as the user spelled it. A side that deleted the file
/// participates as empty content.
pub fn merge_file(ours: &str, theirs: &str, theirs_label: &str) -> MergedFile {
    let ours_lines = split_lines(ours);
    let theirs_lines = split_lines(theirs);
    let alignment = align(&ours_lines, &theirs_lines);

    let mut merged: Vec<String> = Vec::new();
    let mut conflicted = false;

    let mut column = 0;
    while column < alignment.len() {
        if let (Some(ours_line), Some(theirs_line)) =
            (&alignment.a[column], &alignment.b[column])
        {
            if ours_line == theirs_line {
                merged.push(ours_line.clone());
                column += 1;
                continue;
            }
        }

        // A run of columns where the sides differ: collect each side's lines
        // until the next common column
        let mut ours_run = Vec::new();
        let mut theirs_run = Vec::new();
        while column < alignment.len() {
            match (&alignment.a[column], &alignment.b[column]) {
                (Some(ours_line), Some(theirs_line)) if ours_line == theirs_line => break,
                (ours_slot, theirs_slot) => {
                    if let Some(line) = ours_slot {
                        ours_run.push(line.clone());
                    }
                    if let Some(line) = theirs_slot {
                        theirs_run.push(line.clone());
                    }
                    column += 1;
                }
            }
        }

        if ours_run == theirs_run {
            // Both sides made the identical change
            merged.extend(ours_run);
        } else {
            conflicted = true;
            merged.push(format!("<<<<<<< {OURS_LABEL}"));
            merged.extend(ours_run);
            merged.push(CONFLICT_SEPARATOR.to_string());
            merged.extend(theirs_run);
            merged.push(format!(">>>>>>> {theirs_label}"));
        }
    }

    let mut content = merged.join("\n");
    if !content.is_empty() && (ours.ends_with('\n') || theirs.ends_with('\n')) {
        content.push('\n');
    }

    MergedFile {
        content,
        conflicted,
    }
}

fn split_lines(content: &str) -> Vec<String> {
    content.lines().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn identical_content_merges_without_conflict() {
        let merged = merge_file("milk\nflour\neggs\n", "milk\nflour\neggs\n", "other");

        assert_eq!(merged.content, "milk\nflour\neggs\n");
        assert!(!merged.conflicted);
    }

    #[test]
    fn identical_changes_on_both_sides_merge_silently() {
        let merged = merge_file(
            "milk\nflour\nsausage\neggs\n",
            "milk\nflour\nsausage\neggs\n",
            "other",
        );

        assert_eq!(merged.content, "milk\nflour\nsausage\neggs\n");
        assert!(!merged.conflicted);
    }

    #[test]
    fn differing_changes_produce_a_conflict_region() {
        let merged = merge_file("milk\nflour\neggs\n", "milk\nbutter\neggs\n", "topic");

        assert_eq!(
            merged.content,
            "milk\n<<<<<<< HEAD\nflour\n=======\nbutter\n>>>>>>> topic\neggs\n"
        );
        assert!(merged.conflicted);
    }

    #[test]
    fn conflict_marker_names_the_target_as_given() {
        let merged = merge_file("a\n", "b\n", "feature/recipes");

        assert_eq!(
            merged.content,
            "<<<<<<< HEAD\na\n=======\nb\n>>>>>>> feature/recipes\n"
        );
        assert!(merged.conflicted);
    }

    #[test]
    fn common_lines_around_multiple_conflicts_are_kept() {
        let merged = merge_file("a\nx\nc\ny\ne\n", "a\nX\nc\nY\ne\n", "topic");

        assert_eq!(
            merged.content,
            "a\n<<<<<<< HEAD\nx\n=======\nX\n>>>>>>> topic\nc\n\
             <<<<<<< HEAD\ny\n=======\nY\n>>>>>>> topic\ne\n"
        );
        assert!(merged.conflicted);
    }

    #[test]
    fn deleted_side_conflicts_against_empty_content() {
        let merged = merge_file("milk\nflour\n", "", "topic");

        assert_eq!(
            merged.content,
            "<<<<<<< HEAD\nmilk\nflour\n=======\n>>>>>>> topic\n"
        );
        assert!(merged.conflicted);
    }

    #[test]
    fn both_sides_empty_merge_to_empty() {
        let merged = merge_file("", "", "topic");

        assert_eq!(merged.content, "");
        assert!(!merged.conflicted);
    }
}
