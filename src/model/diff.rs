//! Line-level diff engine
//!
//! Classifies the lines of two texts as unchanged, added, removed or
//! modified by walking both line streams with two cursors.
//!
//! # Algorithm
//! On a mismatch the engine looks ahead a bounded window of lines to
//! realign the streams:
//! - the modified line reappears a few lines further in the original:
//!   the original lines before it were removed
//! - the original line reappears a few lines further in the modified text:
//!   the modified lines before it were added
//! - neither: the two lines are paired as a modification
//!
//! When both realignments are possible the closer one wins, and an exact
//! tie is broken by comparing the two lines, so that diffing `(b, a)`
//! yields exactly the inversion of diffing `(a, b)`.
//!
//! This is a heuristic aligner, not a minimal edit script: it never
//! backtracks and it does not compute a longest common subsequence.

use std::fmt;

/// Lookahead window used by [`compute_diff`]
pub const DEFAULT_LOOKAHEAD: usize = 3;

/// Largest lookahead accepted from configuration and the command line
pub const MAX_LOOKAHEAD: usize = 1000;

/// Classification of one diff line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiffKind {
    Unchanged,
    Added,
    Removed,
    Modified,
}

impl DiffKind {
    /// Marker used in unified output and gutters
    pub fn marker(&self) -> char {
        match self {
            DiffKind::Unchanged => ' ',
            DiffKind::Added => '+',
            DiffKind::Removed => '-',
            DiffKind::Modified => '~',
        }
    }

    /// Kind seen from the other side of the comparison
    pub fn inverted(&self) -> Self {
        match self {
            DiffKind::Added => DiffKind::Removed,
            DiffKind::Removed => DiffKind::Added,
            other => *other,
        }
    }
}

/// One classified line of a diff.
///
/// Line numbers are 1-based. Use the constructors, which uphold the
/// per-kind invariants (an added line has no original side, a removed
/// line has no modified side).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    pub kind: DiffKind,
    pub original_line_number: Option<usize>,
    pub modified_line_number: Option<usize>,
    pub original_text: Option<String>,
    pub modified_text: Option<String>,
}

impl DiffLine {
    pub fn unchanged(original_line: usize, modified_line: usize, text: &str) -> Self {
        Self {
            kind: DiffKind::Unchanged,
            original_line_number: Some(original_line),
            modified_line_number: Some(modified_line),
            original_text: Some(text.to_string()),
            modified_text: Some(text.to_string()),
        }
    }

    pub fn added(modified_line: usize, text: &str) -> Self {
        Self {
            kind: DiffKind::Added,
            original_line_number: None,
            modified_line_number: Some(modified_line),
            original_text: None,
            modified_text: Some(text.to_string()),
        }
    }

    pub fn removed(original_line: usize, text: &str) -> Self {
        Self {
            kind: DiffKind::Removed,
            original_line_number: Some(original_line),
            modified_line_number: None,
            original_text: Some(text.to_string()),
            modified_text: None,
        }
    }

    pub fn modified(
        original_line: usize,
        modified_line: usize,
        original_text: &str,
        modified_text: &str,
    ) -> Self {
        debug_assert_ne!(original_text, modified_text);
        Self {
            kind: DiffKind::Modified,
            original_line_number: Some(original_line),
            modified_line_number: Some(modified_line),
            original_text: Some(original_text.to_string()),
            modified_text: Some(modified_text.to_string()),
        }
    }

    /// Whether this line accounts for a line of the original text
    pub fn consumes_original(&self) -> bool {
        self.kind != DiffKind::Added
    }

    /// Whether this line accounts for a line of the modified text
    pub fn consumes_modified(&self) -> bool {
        self.kind != DiffKind::Removed
    }

    /// The same line seen with original and modified exchanged
    pub fn inverted(&self) -> Self {
        Self {
            kind: self.kind.inverted(),
            original_line_number: self.modified_line_number,
            modified_line_number: self.original_line_number,
            original_text: self.modified_text.clone(),
            modified_text: self.original_text.clone(),
        }
    }
}

/// Per-kind line counts of a diff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiffStats {
    pub unchanged: usize,
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
}

impl DiffStats {
    /// Number of lines that are not unchanged
    pub fn changes(&self) -> usize {
        self.added + self.removed + self.modified
    }
}

impl fmt::Display for DiffStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "+{} -{} ~{}", self.added, self.removed, self.modified)
    }
}

/// Ordered sequence of diff lines for one document pair
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DiffResult {
    lines: Vec<DiffLine>,
}

impl DiffResult {
    pub fn new(lines: Vec<DiffLine>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[DiffLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DiffLine> {
        self.lines.iter()
    }

    pub fn stats(&self) -> DiffStats {
        let mut stats = DiffStats::default();
        for line in &self.lines {
            match line.kind {
                DiffKind::Unchanged => stats.unchanged += 1,
                DiffKind::Added => stats.added += 1,
                DiffKind::Removed => stats.removed += 1,
                DiffKind::Modified => stats.modified += 1,
            }
        }
        stats
    }

    /// True when every line is unchanged
    pub fn is_identical(&self) -> bool {
        self.lines.iter().all(|l| l.kind == DiffKind::Unchanged)
    }

    /// The diff with original and modified exchanged
    pub fn inverted(&self) -> Self {
        Self {
            lines: self.lines.iter().map(DiffLine::inverted).collect(),
        }
    }

    /// Index of the first line of every hunk (run of changed lines)
    pub fn hunk_starts(&self) -> Vec<usize> {
        let mut starts = Vec::new();
        let mut in_hunk = false;
        for (idx, line) in self.lines.iter().enumerate() {
            let changed = line.kind != DiffKind::Unchanged;
            if changed && !in_hunk {
                starts.push(idx);
            }
            in_hunk = changed;
        }
        starts
    }

    /// Render as unified text: `"  "` context, `"- "` removed, `"+ "` added.
    /// A modified line becomes a removed line followed by an added line.
    pub fn to_unified_text(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            match line.kind {
                DiffKind::Unchanged | DiffKind::Removed => {
                    push_prefixed(&mut out, line.kind.marker(), line.original_text.as_deref())
                }
                DiffKind::Added => {
                    push_prefixed(&mut out, line.kind.marker(), line.modified_text.as_deref())
                }
                DiffKind::Modified => {
                    push_prefixed(&mut out, DiffKind::Removed.marker(), line.original_text.as_deref());
                    push_prefixed(&mut out, DiffKind::Added.marker(), line.modified_text.as_deref());
                }
            }
        }
        out
    }
}

fn push_prefixed(out: &mut String, prefix: char, text: Option<&str>) {
    out.push(prefix);
    out.push(' ');
    out.push_str(text.unwrap_or_default());
    out.push('\n');
}

impl<'a> IntoIterator for &'a DiffResult {
    type Item = &'a DiffLine;
    type IntoIter = std::slice::Iter<'a, DiffLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

/// Split both texts into the line streams the engine walks.
///
/// Each text is split on `\n`. An empty text contributes no lines when the
/// other text is non-empty (so diffing against `""` is a pure addition or
/// removal); two empty texts are one empty line each.
pub fn split_for_diff<'a, 'b>(original: &'a str, modified: &'b str) -> (Vec<&'a str>, Vec<&'b str>) {
    (
        split_lines(original, modified.is_empty()),
        split_lines(modified, original.is_empty()),
    )
}

fn split_lines(text: &str, other_is_empty: bool) -> Vec<&str> {
    if text.is_empty() && !other_is_empty {
        Vec::new()
    } else {
        text.split('\n').collect()
    }
}

/// Diff two texts with the default lookahead window
pub fn compute_diff(original: &str, modified: &str) -> DiffResult {
    compute_diff_with_lookahead(original, modified, DEFAULT_LOOKAHEAD)
}

/// Diff two texts, looking ahead at most `lookahead` lines to realign after
/// a mismatch. A window of 0 pairs every mismatch as a modification.
pub fn compute_diff_with_lookahead(original: &str, modified: &str, lookahead: usize) -> DiffResult {
    let (old, new) = split_for_diff(original, modified);
    let mut lines = Vec::with_capacity(old.len().max(new.len()));

    let (mut i, mut j) = (0, 0);
    while i < old.len() && j < new.len() {
        if old[i] == new[j] {
            lines.push(DiffLine::unchanged(i + 1, j + 1, old[i]));
            i += 1;
            j += 1;
            continue;
        }

        match realign(&old, &new, i, j, lookahead) {
            Realign::Remove(count) => {
                for _ in 0..count {
                    lines.push(DiffLine::removed(i + 1, old[i]));
                    i += 1;
                }
            }
            Realign::Add(count) => {
                for _ in 0..count {
                    lines.push(DiffLine::added(j + 1, new[j]));
                    j += 1;
                }
            }
            Realign::Pair => {
                lines.push(DiffLine::modified(i + 1, j + 1, old[i], new[j]));
                i += 1;
                j += 1;
            }
        }
    }

    for (idx, text) in old.iter().enumerate().skip(i) {
        lines.push(DiffLine::removed(idx + 1, text));
    }
    for (idx, text) in new.iter().enumerate().skip(j) {
        lines.push(DiffLine::added(idx + 1, text));
    }

    DiffResult::new(lines)
}

/// How to resynchronize the cursors after a mismatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Realign {
    /// Drop this many original lines
    Remove(usize),
    /// Insert this many modified lines
    Add(usize),
    /// Pair the two current lines as a modification
    Pair,
}

fn realign(old: &[&str], new: &[&str], i: usize, j: usize, lookahead: usize) -> Realign {
    let removal = find_ahead(old, i, new[j], lookahead);
    let addition = find_ahead(new, j, old[i], lookahead);

    match (removal, addition) {
        (Some(remove), Some(add)) => {
            if remove < add || (remove == add && old[i] < new[j]) {
                Realign::Remove(remove)
            } else {
                Realign::Add(add)
            }
        }
        (Some(remove), None) => Realign::Remove(remove),
        (None, Some(add)) => Realign::Add(add),
        (None, None) => Realign::Pair,
    }
}

/// Distance (1..=window) from `start` to the next occurrence of `needle`.
///
/// The scan stops at the end of `lines`, so oversized windows cost no more
/// than the remaining input.
fn find_ahead(lines: &[&str], start: usize, needle: &str, window: usize) -> Option<usize> {
    let limit = window.min(lines.len().saturating_sub(start + 1));
    (1..=limit).find(|k| lines[start + k] == needle)
}
