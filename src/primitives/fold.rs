//! Indentation-based code folding
//!
//! A fold region starts at a non-blank line and covers the following lines
//! that are indented deeper than it. Blank lines inside a block belong to
//! it; trailing blank lines do not.

use std::collections::BTreeSet;

/// A foldable range of lines (0-indexed, inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoldRegion {
    /// Header line, stays visible when folded
    pub start: usize,
    /// Last line of the block
    pub end: usize,
}

impl FoldRegion {
    /// Lines hidden when the region is folded
    pub fn hidden_lines(&self) -> usize {
        self.end - self.start
    }

    pub fn contains(&self, line: usize) -> bool {
        line >= self.start && line <= self.end
    }
}

fn indent_width(line: &str, tab_size: usize) -> Option<usize> {
    if line.trim().is_empty() {
        return None;
    }
    let mut width = 0;
    for ch in line.chars() {
        match ch {
            ' ' => width += 1,
            '\t' => width += tab_size - (width % tab_size),
            _ => break,
        }
    }
    Some(width)
}

/// Compute fold regions for a document, ordered by start line
pub fn fold_regions(lines: &[&str], tab_size: usize) -> Vec<FoldRegion> {
    let tab_size = tab_size.max(1);
    let indents: Vec<Option<usize>> = lines.iter().map(|l| indent_width(l, tab_size)).collect();
    let mut regions = Vec::new();

    for (start, indent) in indents.iter().enumerate() {
        let Some(depth) = *indent else {
            continue;
        };

        let mut end = start;
        for (idx, next) in indents.iter().enumerate().skip(start + 1) {
            match next {
                None => continue,
                Some(d) if *d > depth => end = idx,
                Some(_) => break,
            }
        }

        if end > start {
            regions.push(FoldRegion { start, end });
        }
    }

    regions
}

/// Fold regions of one document plus which of them are collapsed
#[derive(Debug, Clone, Default)]
pub struct FoldState {
    regions: Vec<FoldRegion>,
    folded: BTreeSet<usize>,
}

impl FoldState {
    pub fn new(lines: &[&str], tab_size: usize) -> Self {
        Self {
            regions: fold_regions(lines, tab_size),
            folded: BTreeSet::new(),
        }
    }

    /// Region whose header is `line`
    pub fn region_at(&self, line: usize) -> Option<&FoldRegion> {
        self.regions.iter().find(|r| r.start == line)
    }

    pub fn is_folded(&self, line: usize) -> bool {
        self.folded.contains(&line)
    }

    /// Toggle the innermost region containing `line`.
    ///
    /// Returns the header line of the toggled region, if any.
    pub fn toggle(&mut self, line: usize) -> Option<usize> {
        let header = self
            .regions
            .iter()
            .filter(|r| r.contains(line))
            .max_by_key(|r| r.start)
            .map(|r| r.start)?;

        if !self.folded.remove(&header) {
            self.folded.insert(header);
        }
        Some(header)
    }

    /// Indices of the lines that remain visible with the current folds
    pub fn visible_lines(&self, line_count: usize) -> Vec<usize> {
        let mut visible = Vec::with_capacity(line_count);
        let mut line = 0;
        while line < line_count {
            visible.push(line);
            line = match self.region_at(line) {
                Some(region) if self.is_folded(line) => region.end + 1,
                _ => line + 1,
            };
        }
        visible
    }
}
