//! View state for the diff viewer
//!
//! Tracks the shared scroll position, per-pane horizontal scroll and which
//! pane has focus. Both panes scroll vertically together.

use ratatui::layout::Rect;

/// Number of panes in the side-by-side layout
pub const PANE_COUNT: usize = 2;

/// Width of the column between the two panes
pub const SEPARATOR_WIDTH: u16 = 1;

/// View state for a diff viewer
#[derive(Debug, Clone)]
pub struct DiffViewState {
    /// Independent horizontal viewport per pane
    pub pane_viewports: Vec<PaneViewport>,

    /// Which pane has focus (0 = original, 1 = modified)
    pub focused_pane: usize,

    /// Single scroll position (display row), shared by both panes
    pub scroll_row: usize,

    /// Width of each pane (computed during render)
    pub pane_widths: Vec<u16>,

    /// Rows of text visible at the last render
    pub viewport_height: usize,
}

impl Default for DiffViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffViewState {
    pub fn new() -> Self {
        Self {
            pane_viewports: (0..PANE_COUNT).map(|_| PaneViewport::default()).collect(),
            focused_pane: 0,
            scroll_row: 0,
            pane_widths: vec![0; PANE_COUNT],
            viewport_height: 0,
        }
    }

    /// Scroll all panes together by delta rows
    pub fn scroll(&mut self, delta: isize, max_row: usize) {
        if delta >= 0 {
            self.scroll_row = self.scroll_row.saturating_add(delta as usize).min(max_row);
        } else {
            self.scroll_row = self.scroll_row.saturating_sub(delta.unsigned_abs());
        }
    }

    /// Set scroll to a specific row
    pub fn set_scroll_row(&mut self, row: usize, max_row: usize) {
        self.scroll_row = row.min(max_row);
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_row = 0;
    }

    pub fn scroll_to_bottom(&mut self, total_rows: usize) {
        self.scroll_row = total_rows.saturating_sub(self.viewport_height.max(1));
    }

    /// Page down by one viewport
    pub fn page_down(&mut self, max_row: usize) {
        let page = self.viewport_height.max(1);
        self.scroll_row = self.scroll_row.saturating_add(page).min(max_row);
    }

    /// Page up by one viewport
    pub fn page_up(&mut self) {
        self.scroll_row = self.scroll_row.saturating_sub(self.viewport_height.max(1));
    }

    /// Largest useful scroll row for `total_rows` rows of content
    pub fn max_scroll_row(&self, total_rows: usize) -> usize {
        total_rows.saturating_sub(self.viewport_height.max(1))
    }

    /// Switch focus to the next pane
    pub fn focus_next_pane(&mut self) {
        if !self.pane_viewports.is_empty() {
            self.focused_pane = (self.focused_pane + 1) % self.pane_viewports.len();
        }
    }

    pub fn pane_viewport(&self, pane_index: usize) -> Option<&PaneViewport> {
        self.pane_viewports.get(pane_index)
    }

    /// Scroll every pane horizontally by the same amount
    pub fn scroll_horizontal(&mut self, delta: isize, max_column: usize) {
        for viewport in &mut self.pane_viewports {
            viewport.scroll_horizontal(delta, max_column);
        }
    }

    /// Update pane widths based on layout ratios and total width
    pub fn update_pane_widths(&mut self, total_width: u16, ratios: &[f32], separator_width: u16) {
        let separator_count = ratios.len().saturating_sub(1);
        let available_width = total_width.saturating_sub(separator_count as u16 * separator_width);

        self.pane_widths.clear();
        for ratio in ratios {
            let width = (available_width as f32 * ratio).round() as u16;
            self.pane_widths.push(width);
        }

        // Adjust last pane to account for rounding
        let total: u16 = self.pane_widths.iter().sum();
        if let Some(last) = self.pane_widths.last_mut() {
            if total < available_width {
                *last += available_width - total;
            } else if total > available_width {
                *last = last.saturating_sub(total - available_width);
            }
        }
    }

    /// Compute rects for each pane given the total area
    pub fn compute_pane_rects(&self, area: Rect, separator_width: u16) -> Vec<Rect> {
        let mut rects = Vec::with_capacity(self.pane_widths.len());
        let mut x = area.x;

        for (i, &width) in self.pane_widths.iter().enumerate() {
            rects.push(Rect {
                x,
                y: area.y,
                width,
                height: area.height,
            });
            x += width;
            if i + 1 < self.pane_widths.len() {
                x += separator_width;
            }
        }

        rects
    }
}

/// Viewport state for a single pane
#[derive(Debug, Clone, Default)]
pub struct PaneViewport {
    /// Horizontal scroll offset for this pane
    pub left_column: usize,
}

impl PaneViewport {
    /// Scroll horizontally
    pub fn scroll_horizontal(&mut self, delta: isize, max_column: usize) {
        if delta >= 0 {
            self.left_column = self.left_column.saturating_add(delta as usize).min(max_column);
        } else {
            self.left_column = self.left_column.saturating_sub(delta.unsigned_abs());
        }
    }

    pub fn reset_horizontal_scroll(&mut self) {
        self.left_column = 0;
    }
}
