// Property tests for the line diff engine

use diffpane::model::diff::{compute_diff, compute_diff_with_lookahead, split_for_diff};
use diffpane::model::DiffKind;
use proptest::prelude::*;

/// Multi-line text over a small alphabet, so lines repeat and the
/// lookahead actually finds matches
fn multiline_text() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(vec!["a", "b", "c", "d", "", "  e"]), 0..12)
        .prop_map(|lines| lines.join("\n"))
}

/// Arbitrary lines, mostly distinct
fn free_text() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z ]{0,8}", 0..10).prop_map(|lines| lines.join("\n"))
}

proptest! {
    /// Diffing a text against itself leaves every line unchanged
    #[test]
    fn identical_inputs_are_all_unchanged(text in multiline_text()) {
        let diff = compute_diff(&text, &text);
        prop_assert!(diff.is_identical());
        prop_assert_eq!(diff.len(), text.split('\n').count());
    }

    /// Every line of each input is accounted for exactly once
    #[test]
    fn line_counts_are_conserved(original in multiline_text(), modified in multiline_text()) {
        let diff = compute_diff(&original, &modified);
        let (old, new) = split_for_diff(&original, &modified);

        let consumed_original = diff.iter().filter(|l| l.consumes_original()).count();
        let consumed_modified = diff.iter().filter(|l| l.consumes_modified()).count();
        prop_assert_eq!(consumed_original, old.len());
        prop_assert_eq!(consumed_modified, new.len());

        prop_assert!(diff.len() >= old.len().max(new.len()));
        prop_assert!(diff.len() <= old.len() + new.len());
    }

    /// Swapping the inputs swaps added and removed lines and nothing else
    #[test]
    fn swap_inverts_the_diff(a in multiline_text(), b in multiline_text()) {
        let forward = compute_diff(&a, &b);
        let backward = compute_diff(&b, &a);
        prop_assert_eq!(backward, forward.inverted());
    }

    /// Swap inversion holds for any window size
    #[test]
    fn swap_inverts_for_any_window(a in free_text(), b in free_text(), window in 0usize..6) {
        let forward = compute_diff_with_lookahead(&a, &b, window);
        let backward = compute_diff_with_lookahead(&b, &a, window);
        prop_assert_eq!(backward, forward.inverted());
    }

    /// Per-kind invariants on texts and line numbers
    #[test]
    fn lines_respect_kind_invariants(original in multiline_text(), modified in multiline_text()) {
        for line in compute_diff(&original, &modified).iter() {
            match line.kind {
                DiffKind::Unchanged => {
                    prop_assert_eq!(&line.original_text, &line.modified_text);
                    prop_assert!(line.original_line_number.is_some());
                    prop_assert!(line.modified_line_number.is_some());
                }
                DiffKind::Added => {
                    prop_assert!(line.original_text.is_none());
                    prop_assert!(line.original_line_number.is_none());
                }
                DiffKind::Removed => {
                    prop_assert!(line.modified_text.is_none());
                    prop_assert!(line.modified_line_number.is_none());
                }
                DiffKind::Modified => {
                    prop_assert!(line.original_text.is_some());
                    prop_assert!(line.modified_text.is_some());
                    prop_assert_ne!(&line.original_text, &line.modified_text);
                }
            }
        }
    }

    /// Line numbers on each side increase by one through the diff
    #[test]
    fn line_numbers_are_sequential(original in multiline_text(), modified in multiline_text()) {
        let diff = compute_diff(&original, &modified);
        let originals: Vec<usize> = diff.iter().filter_map(|l| l.original_line_number).collect();
        let modifieds: Vec<usize> = diff.iter().filter_map(|l| l.modified_line_number).collect();
        prop_assert_eq!(originals, (1..=split_for_diff(&original, &modified).0.len()).collect::<Vec<_>>());
        prop_assert_eq!(modifieds, (1..=split_for_diff(&original, &modified).1.len()).collect::<Vec<_>>());
    }
}

#[test]
fn pure_addition_from_empty() {
    let diff = compute_diff("", "line1\nline2");
    assert_eq!(diff.len(), 2);
    assert!(diff.iter().all(|l| l.kind == DiffKind::Added));
    assert_eq!(diff.lines()[0].modified_text.as_deref(), Some("line1"));
    assert_eq!(diff.lines()[1].modified_text.as_deref(), Some("line2"));
}

#[test]
fn pure_removal_to_empty() {
    let diff = compute_diff("line1\nline2", "");
    assert_eq!(diff.len(), 2);
    assert!(diff.iter().all(|l| l.kind == DiffKind::Removed));
}
