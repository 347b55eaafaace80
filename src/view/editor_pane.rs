//! Read-only code pane
//!
//! Draws a title row and a list of rows, each with a line-number gutter,
//! an optional diff marker, a fold marker column and syntax-colored text.
//! The pane knows nothing about diffs beyond the row kind it is given:
//! both the side-by-side and the inline layouts are built from it.

use crate::model::diff::DiffKind;
use crate::model::document::Language;
use crate::primitives::syntect_highlighter::CategorySpan;
use crate::view::theme::Theme;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthChar;

/// Fold affordance shown in the gutter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FoldMarker {
    #[default]
    None,
    /// Header of an expanded region
    Expanded,
    /// Header of a collapsed region hiding this many lines
    Collapsed(usize),
}

/// One display row of a pane
#[derive(Debug, Clone, Default)]
pub struct PaneRow<'a> {
    /// Line number in the first gutter column (1-based)
    pub number: Option<usize>,
    /// Line number in the second gutter column (inline layout only)
    pub second_number: Option<usize>,
    /// Diff marker shown after the numbers
    pub marker: Option<char>,
    pub fold: FoldMarker,
    pub text: &'a str,
    pub spans: &'a [CategorySpan],
    /// Diff classification, drives the row background
    pub kind: Option<DiffKind>,
}

/// Pane configuration for one render
pub struct EditorPane<'a> {
    title: &'a str,
    theme: &'a Theme,
    language: Language,
    read_only: bool,
    focused: bool,
    show_line_numbers: bool,
    dual_numbers: bool,
    show_markers: bool,
    number_width: usize,
    tab_size: usize,
    left_column: usize,
}

impl<'a> EditorPane<'a> {
    pub fn new(title: &'a str, theme: &'a Theme) -> Self {
        Self {
            title,
            theme,
            language: Language::PlainText,
            read_only: true,
            focused: false,
            show_line_numbers: true,
            dual_numbers: false,
            show_markers: false,
            number_width: 3,
            tab_size: 4,
            left_column: 0,
        }
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Show line numbers wide enough for `max_line` lines
    pub fn line_numbers(mut self, show: bool, max_line: usize) -> Self {
        self.show_line_numbers = show;
        self.number_width = max_line.max(1).to_string().len().max(3);
        self
    }

    /// Two number columns (original and modified) instead of one
    pub fn dual_numbers(mut self, dual: bool) -> Self {
        self.dual_numbers = dual;
        self
    }

    /// Reserve a column for diff markers
    pub fn diff_markers(mut self, show: bool) -> Self {
        self.show_markers = show;
        self
    }

    pub fn tab_size(mut self, tab_size: usize) -> Self {
        self.tab_size = tab_size.max(1);
        self
    }

    pub fn left_column(mut self, left_column: usize) -> Self {
        self.left_column = left_column;
        self
    }

    /// Number of text rows available below the title
    pub fn content_height(area: Rect) -> usize {
        area.height.saturating_sub(1) as usize
    }

    /// Width of the gutter in columns
    pub fn gutter_width(&self) -> usize {
        let mut width = 0;
        if self.show_line_numbers {
            width += self.number_width + 1;
            if self.dual_numbers {
                width += self.number_width + 1;
            }
        }
        // fold marker + space
        width += 2;
        if self.show_markers {
            width += 2;
        }
        width
    }

    /// Render the title and the given rows (already scrolled to the viewport)
    pub fn render(&self, frame: &mut Frame, area: Rect, rows: &[PaneRow<'_>]) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        self.render_title(frame, Rect { height: 1, ..area });

        let content_area = Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: area.height.saturating_sub(1),
        };
        let base = Style::default().fg(self.theme.editor_fg).bg(self.theme.editor_bg);

        let lines: Vec<Line> = rows
            .iter()
            .take(content_area.height as usize)
            .map(|row| self.render_row(row, content_area.width as usize))
            .collect();

        frame.render_widget(Paragraph::new(lines).style(base), content_area);
    }

    fn render_title(&self, frame: &mut Frame, area: Rect) {
        let title_style = if self.focused {
            Style::default()
                .fg(self.theme.accent)
                .bg(self.theme.title_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.theme.title_fg).bg(self.theme.title_bg)
        };

        let mut spans = vec![Span::styled(format!(" {} ", self.title), title_style)];
        let mut details = format!("{}", self.language);
        if self.read_only {
            details.push_str(" [RO]");
        }
        spans.push(Span::styled(
            details,
            Style::default().fg(self.theme.line_number_fg).bg(self.theme.title_bg),
        ));

        frame.render_widget(
            Paragraph::new(Line::from(spans)).style(Style::default().bg(self.theme.title_bg)),
            area,
        );
    }

    fn row_background(&self, kind: Option<DiffKind>) -> Color {
        match kind {
            Some(DiffKind::Added) => self.theme.diff_add_bg,
            Some(DiffKind::Removed) => self.theme.diff_remove_bg,
            Some(DiffKind::Modified) => self.theme.diff_modify_bg,
            _ => self.theme.editor_bg,
        }
    }

    fn marker_color(&self, kind: Option<DiffKind>) -> Color {
        match kind {
            Some(DiffKind::Added) => self.theme.diff_add_fg,
            Some(DiffKind::Removed) => self.theme.diff_remove_fg,
            Some(DiffKind::Modified) => self.theme.diff_modify_fg,
            _ => self.theme.line_number_fg,
        }
    }

    fn render_row(&self, row: &PaneRow<'_>, width: usize) -> Line<'static> {
        let bg = self.row_background(row.kind);
        // Changed rows keep their diff background across the whole row
        let gutter_bg = match row.kind {
            None | Some(DiffKind::Unchanged) => self.theme.line_number_bg,
            Some(_) => bg,
        };
        let gutter_style = Style::default().fg(self.theme.line_number_fg).bg(gutter_bg);
        let mut spans = Vec::new();

        if self.show_line_numbers {
            spans.push(Span::styled(
                format_number(row.number, self.number_width),
                gutter_style,
            ));
            if self.dual_numbers {
                spans.push(Span::styled(
                    format_number(row.second_number, self.number_width),
                    gutter_style,
                ));
            }
        }

        let fold_glyph = match row.fold {
            FoldMarker::None => ' ',
            FoldMarker::Expanded => '▾',
            FoldMarker::Collapsed(_) => '▸',
        };
        spans.push(Span::styled(
            format!("{fold_glyph} "),
            Style::default().fg(self.theme.fold_marker_fg).bg(bg),
        ));

        if self.show_markers {
            spans.push(Span::styled(
                format!("{} ", row.marker.unwrap_or(' ')),
                Style::default()
                    .fg(self.marker_color(row.kind))
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        let content_width = width.saturating_sub(self.gutter_width());
        let base = Style::default().fg(self.theme.editor_fg).bg(bg);
        let (text_spans, mut used) = clip_styled(
            row.text,
            row.spans,
            self.theme,
            base,
            self.left_column,
            content_width,
            self.tab_size,
        );
        spans.extend(text_spans);

        if let FoldMarker::Collapsed(hidden) = row.fold {
            let placeholder: String = format!(" ⋯ {hidden} lines")
                .chars()
                .take(content_width.saturating_sub(used))
                .collect();
            used += placeholder.chars().count();
            spans.push(Span::styled(
                placeholder,
                Style::default()
                    .fg(self.theme.fold_marker_fg)
                    .bg(bg)
                    .add_modifier(Modifier::ITALIC),
            ));
        }

        // Pad so the row background spans the whole pane
        if used < content_width {
            spans.push(Span::styled(" ".repeat(content_width - used), base));
        }

        Line::from(spans)
    }
}

fn format_number(number: Option<usize>, width: usize) -> String {
    match number {
        Some(n) => format!("{:>width$} ", n, width = width),
        None => " ".repeat(width + 1),
    }
}

/// Cut a line to the visible columns `[left_column, left_column + width)`,
/// expanding tabs and applying highlight colors.
///
/// Returns the styled spans and the number of columns used.
pub fn clip_styled(
    text: &str,
    highlight: &[CategorySpan],
    theme: &Theme,
    base: Style,
    left_column: usize,
    width: usize,
    tab_size: usize,
) -> (Vec<Span<'static>>, usize) {
    let tab_size = tab_size.max(1);
    let mut out = Vec::new();
    let mut current = String::new();
    let mut current_style = base;
    let mut column = 0;
    let mut used = 0;
    let mut span_idx = 0;

    'chars: for (byte, ch) in text.char_indices() {
        while span_idx < highlight.len() && highlight[span_idx].range.end <= byte {
            span_idx += 1;
        }
        let style = match highlight.get(span_idx) {
            Some(span) if span.range.start <= byte => base.fg(span.category.color(theme)),
            _ => base,
        };

        let (glyph, glyph_width, repeat) = if ch == '\t' {
            (' ', 1, tab_size - (column % tab_size))
        } else {
            match ch.width() {
                Some(w) if w > 0 => (ch, w, 1),
                // Control and zero-width characters are not drawn
                _ => continue,
            }
        };

        for _ in 0..repeat {
            if column < left_column {
                column += glyph_width;
                continue;
            }
            if used + glyph_width > width {
                break 'chars;
            }
            if style != current_style && !current.is_empty() {
                out.push(Span::styled(std::mem::take(&mut current), current_style));
            }
            current_style = style;
            current.push(glyph);
            column += glyph_width;
            used += glyph_width;
        }
    }

    if !current.is_empty() {
        out.push(Span::styled(current, current_style));
    }

    (out, used)
}
