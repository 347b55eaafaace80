//! Diff viewer renderer
//!
//! Renders a document pair side-by-side (two raw panes with a separator) or
//! inline (one unified pane with diff markers, dual line numbers and
//! colored backgrounds).

use crate::model::diff::{DiffKind, DiffResult};
use crate::model::document::{Side, TextDocument};
use crate::primitives::fold::FoldState;
use crate::primitives::syntect_highlighter::CategorySpan;
use crate::view::diff_view::{DiffViewState, SEPARATOR_WIDTH};
use crate::view::editor_pane::{EditorPane, FoldMarker, PaneRow};
use crate::view::theme::Theme;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// One document as the renderer sees it
pub struct PaneSource<'a> {
    pub document: &'a TextDocument,
    pub lines: Vec<&'a str>,
    /// Highlight spans per line; may be shorter than `lines` (plain text)
    pub highlights: &'a [Vec<CategorySpan>],
    pub folds: &'a FoldState,
}

impl<'a> PaneSource<'a> {
    pub fn new(
        document: &'a TextDocument,
        highlights: &'a [Vec<CategorySpan>],
        folds: &'a FoldState,
    ) -> Self {
        Self {
            document,
            lines: document.lines(),
            highlights,
            folds,
        }
    }

    fn spans(&self, line: usize) -> &'a [CategorySpan] {
        self.highlights.get(line).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Line indices left visible by the current folds
    pub fn visible_lines(&self) -> Vec<usize> {
        self.folds.visible_lines(self.lines.len())
    }

    /// Display rows in the side-by-side layout
    pub fn row_count(&self) -> usize {
        self.visible_lines().len()
    }

    /// Display row showing `line` (its fold header when hidden)
    pub fn row_for_line(&self, line: usize) -> usize {
        self.visible_lines()
            .partition_point(|&visible| visible <= line)
            .saturating_sub(1)
    }

    /// Source line shown at display row `row`
    pub fn line_at_row(&self, row: usize) -> Option<usize> {
        self.visible_lines().get(row).copied()
    }
}

/// One row of the inline layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InlineRow {
    pub kind: DiffKind,
    /// Document the row's text comes from
    pub side: Side,
    /// 0-indexed line in that document
    pub line: usize,
    pub original_number: Option<usize>,
    pub modified_number: Option<usize>,
    pub marker: char,
}

/// Flatten a diff into inline rows. A modified line becomes two rows: the
/// old text followed by the new text.
pub fn inline_rows(diff: &DiffResult) -> Vec<InlineRow> {
    let mut rows = Vec::with_capacity(diff.len());

    for line in diff {
        let original = line.original_line_number;
        let modified = line.modified_line_number;
        match line.kind {
            DiffKind::Unchanged => rows.push(InlineRow {
                kind: line.kind,
                side: Side::Modified,
                line: modified.unwrap_or(1) - 1,
                original_number: original,
                modified_number: modified,
                marker: line.kind.marker(),
            }),
            DiffKind::Removed => rows.push(InlineRow {
                kind: line.kind,
                side: Side::Original,
                line: original.unwrap_or(1) - 1,
                original_number: original,
                modified_number: None,
                marker: line.kind.marker(),
            }),
            DiffKind::Added => rows.push(InlineRow {
                kind: line.kind,
                side: Side::Modified,
                line: modified.unwrap_or(1) - 1,
                original_number: None,
                modified_number: modified,
                marker: line.kind.marker(),
            }),
            DiffKind::Modified => {
                rows.push(InlineRow {
                    kind: line.kind,
                    side: Side::Original,
                    line: original.unwrap_or(1) - 1,
                    original_number: original,
                    modified_number: None,
                    marker: DiffKind::Removed.marker(),
                });
                rows.push(InlineRow {
                    kind: line.kind,
                    side: Side::Modified,
                    line: modified.unwrap_or(1) - 1,
                    original_number: None,
                    modified_number: modified,
                    marker: DiffKind::Added.marker(),
                });
            }
        }
    }

    rows
}

/// First row of every run of changed inline rows
pub fn inline_hunk_rows(rows: &[InlineRow]) -> Vec<usize> {
    let mut starts = Vec::new();
    let mut in_hunk = false;
    for (idx, row) in rows.iter().enumerate() {
        let changed = row.kind != DiffKind::Unchanged;
        if changed && !in_hunk {
            starts.push(idx);
        }
        in_hunk = changed;
    }
    starts
}

/// Presentation settings shared by both layouts
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub show_line_numbers: bool,
    pub tab_size: usize,
    pub read_only: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_line_numbers: true,
            tab_size: 4,
            read_only: true,
        }
    }
}

/// Renders a document pair into a frame
pub struct DiffRenderer<'a> {
    view_state: &'a DiffViewState,
    theme: &'a Theme,
    options: RenderOptions,
}

impl<'a> DiffRenderer<'a> {
    pub fn new(view_state: &'a DiffViewState, theme: &'a Theme, options: RenderOptions) -> Self {
        Self {
            view_state,
            theme,
            options,
        }
    }

    /// Two raw panes, no diff markup. Pane widths must already be set on
    /// the view state.
    pub fn render_side_by_side(&self, frame: &mut Frame, area: Rect, panes: [&PaneSource<'_>; 2]) {
        let pane_rects = self.view_state.compute_pane_rects(area, SEPARATOR_WIDTH);

        for (i, (pane, rect)) in panes.iter().zip(&pane_rects).enumerate() {
            self.render_pane(frame, pane, *rect, i);
            if i + 1 < pane_rects.len() {
                self.render_separator(frame, rect.x + rect.width, area.y, area.height);
            }
        }
    }

    fn render_pane(&self, frame: &mut Frame, source: &PaneSource<'_>, rect: Rect, pane_index: usize) {
        let height = EditorPane::content_height(rect);
        let visible = source.visible_lines();

        let rows: Vec<PaneRow> = visible
            .iter()
            .skip(self.view_state.scroll_row)
            .take(height)
            .map(|&line| PaneRow {
                number: Some(line + 1),
                fold: fold_marker(source.folds, line),
                text: source.lines[line],
                spans: source.spans(line),
                ..PaneRow::default()
            })
            .collect();

        let left_column = self
            .view_state
            .pane_viewport(pane_index)
            .map(|v| v.left_column)
            .unwrap_or(0);

        EditorPane::new(&source.document.label, self.theme)
            .language(source.document.language)
            .read_only(self.options.read_only)
            .focused(pane_index == self.view_state.focused_pane)
            .line_numbers(self.options.show_line_numbers, source.lines.len())
            .tab_size(self.options.tab_size)
            .left_column(left_column)
            .render(frame, rect, &rows);
    }

    fn render_separator(&self, frame: &mut Frame, x: u16, y: u16, height: u16) {
        let style = Style::default().fg(self.theme.separator_fg).bg(self.theme.editor_bg);
        let lines: Vec<Line> = (0..height)
            .map(|_| Line::from(Span::styled("│", style)))
            .collect();
        frame.render_widget(
            Paragraph::new(lines),
            Rect {
                x,
                y,
                width: SEPARATOR_WIDTH,
                height,
            },
        );
    }

    /// One unified pane: markers, dual line numbers and diff backgrounds
    pub fn render_inline(
        &self,
        frame: &mut Frame,
        area: Rect,
        rows: &[InlineRow],
        panes: [&PaneSource<'_>; 2],
    ) {
        let [original, modified] = panes;
        let height = EditorPane::content_height(area);

        let pane_rows: Vec<PaneRow> = rows
            .iter()
            .skip(self.view_state.scroll_row)
            .take(height)
            .map(|row| {
                let source = match row.side {
                    Side::Original => original,
                    Side::Modified => modified,
                };
                PaneRow {
                    number: row.original_number,
                    second_number: row.modified_number,
                    marker: Some(row.marker),
                    fold: FoldMarker::None,
                    text: source.lines.get(row.line).copied().unwrap_or_default(),
                    spans: source.spans(row.line),
                    kind: Some(row.kind),
                }
            })
            .collect();

        let title = format!("{} → {}", original.document.label, modified.document.label);
        let max_line = original.lines.len().max(modified.lines.len());
        let left_column = self
            .view_state
            .pane_viewport(0)
            .map(|v| v.left_column)
            .unwrap_or(0);

        EditorPane::new(&title, self.theme)
            .language(modified.document.language)
            .read_only(self.options.read_only)
            .focused(true)
            .line_numbers(self.options.show_line_numbers, max_line)
            .dual_numbers(true)
            .diff_markers(true)
            .tab_size(self.options.tab_size)
            .left_column(left_column)
            .render(frame, area, &pane_rows);
    }
}

fn fold_marker(folds: &FoldState, line: usize) -> FoldMarker {
    match folds.region_at(line) {
        Some(region) if folds.is_folded(line) => FoldMarker::Collapsed(region.hidden_lines()),
        Some(_) => FoldMarker::Expanded,
        None => FoldMarker::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::diff::compute_diff;
    use crate::model::document::Language;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "));
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_inline_rows_split_modified_lines() {
        let diff = compute_diff("a\nb\nc", "a\nB\nc\nd");
        let rows = inline_rows(&diff);
        let markers: String = rows.iter().map(|r| r.marker).collect();
        assert_eq!(markers, " -+ +");

        assert_eq!(rows[1].side, Side::Original);
        assert_eq!(rows[1].line, 1);
        assert_eq!(rows[2].side, Side::Modified);
        assert_eq!(rows[2].modified_number, Some(2));
        assert_eq!(rows[4].original_number, None);
        assert_eq!(rows[4].line, 3);

        assert_eq!(inline_hunk_rows(&rows), vec![1, 4]);
    }

    #[test]
    fn test_row_for_folded_line_is_its_header() {
        let doc = TextDocument::new("a", "fn a() {\n    x();\n    y();\n}\nz", Language::PlainText);
        let mut folds = FoldState::new(&doc.lines(), 4);
        folds.toggle(0);
        let source = PaneSource::new(&doc, &[], &folds);

        assert_eq!(source.row_count(), 3);
        assert_eq!(source.row_for_line(2), 0);
        assert_eq!(source.row_for_line(3), 1);
        assert_eq!(source.line_at_row(2), Some(4));
    }

    #[test]
    fn test_side_by_side_shows_both_documents() {
        let original = TextDocument::new("Left", "alpha\nbeta", Language::PlainText);
        let modified = TextDocument::new("Right", "alpha\ngamma", Language::PlainText);
        let folds = FoldState::default();
        let left = PaneSource::new(&original, &[], &folds);
        let right = PaneSource::new(&modified, &[], &folds);

        let mut view = DiffViewState::new();
        view.update_pane_widths(60, &[0.5, 0.5], SEPARATOR_WIDTH);
        let theme = Theme::dark();

        let mut terminal = Terminal::new(TestBackend::new(60, 5)).unwrap();
        terminal
            .draw(|frame| {
                let renderer = DiffRenderer::new(&view, &theme, RenderOptions::default());
                renderer.render_side_by_side(frame, frame.area(), [&left, &right]);
            })
            .unwrap();

        let text = screen(&terminal);
        assert!(text.contains("Left"));
        assert!(text.contains("Right"));
        assert!(text.contains("beta"));
        assert!(text.contains("gamma"));
        assert!(text.contains('│'));
        // No diff markup in this layout
        assert!(!text.contains("+ "));
    }

    #[test]
    fn test_inline_marks_changes() {
        let original = TextDocument::new("old", "keep\ndrop", Language::PlainText);
        let modified = TextDocument::new("new", "keep\ngrown\nextra", Language::PlainText);
        let folds = FoldState::default();
        let left = PaneSource::new(&original, &[], &folds);
        let right = PaneSource::new(&modified, &[], &folds);
        let diff = compute_diff(&original.content, &modified.content);
        let rows = inline_rows(&diff);

        let view = DiffViewState::new();
        let theme = Theme::light();
        let mut terminal = Terminal::new(TestBackend::new(40, 6)).unwrap();
        terminal
            .draw(|frame| {
                let renderer = DiffRenderer::new(&view, &theme, RenderOptions::default());
                renderer.render_inline(frame, frame.area(), &rows, [&left, &right]);
            })
            .unwrap();

        let text = screen(&terminal);
        assert!(text.contains("old → new"));
        assert!(text.contains("- drop"));
        assert!(text.contains("+ grown"));
        assert!(text.contains("+ extra"));

        // Added rows carry the add background
        let buffer = terminal.backend().buffer();
        let last_row = 4;
        assert_eq!(
            buffer.cell((buffer.area.width - 1, last_row)).map(|c| c.bg),
            Some(theme.diff_add_bg)
        );
    }
}
