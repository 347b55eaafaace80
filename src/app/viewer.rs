//! Diff viewer controller
//!
//! Owns the document pair, the viewer state (render mode, fullscreen,
//! theme) and the memoized diff. Rendering is a function of that state;
//! the only work done during a render is filling caches.

use crate::input::action::Action;
use crate::model::diff::{DiffLine, DiffResult, DiffStats, DEFAULT_LOOKAHEAD};
use crate::model::diff_cache::DiffCache;
use crate::model::document::{Language, Side, TextDocument};
use crate::primitives::fold::FoldState;
use crate::primitives::syntect_highlighter::{CategorySpan, SyntectHighlighter};
use crate::view::diff_renderer::{
    inline_hunk_rows, inline_rows, DiffRenderer, PaneSource, RenderOptions,
};
use crate::view::diff_view::{DiffViewState, SEPARATOR_WIDTH};
use crate::view::editor_pane::EditorPane;
use crate::view::theme::{Theme, ThemeKind};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph};
use ratatui::Frame;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use unicode_width::UnicodeWidthStr;

/// How the document pair is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenderMode {
    /// Two raw panes next to each other
    #[default]
    SideBySide,
    /// One unified pane with diff markers
    Inline,
}

impl RenderMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderMode::SideBySide => "side-by-side",
            RenderMode::Inline => "inline",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            RenderMode::SideBySide => RenderMode::Inline,
            RenderMode::Inline => RenderMode::SideBySide,
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RenderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "side-by-side" | "sidebyside" | "split" => Ok(RenderMode::SideBySide),
            "inline" | "unified" => Ok(RenderMode::Inline),
            other => Err(format!(
                "unknown render mode '{other}' (expected 'side-by-side' or 'inline')"
            )),
        }
    }
}

/// Presentation state, mutated only by explicit user actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewerState {
    pub render_mode: RenderMode,
    pub is_fullscreen: bool,
    pub theme: ThemeKind,
}

/// Everything needed to instantiate a viewer
#[derive(Debug, Clone)]
pub struct ViewerOptions {
    pub original_code: String,
    pub modified_code: String,
    /// Language name; unrecognized names render as plain text
    pub language: String,
    /// Defaults to "Original"
    pub original_label: Option<String>,
    /// Defaults to "Modified"
    pub modified_label: Option<String>,
    /// Defaults to dark
    pub theme: Option<ThemeKind>,
    pub render_mode: RenderMode,
    pub fullscreen: bool,
    pub lookahead: usize,
    pub show_line_numbers: bool,
    pub tab_size: usize,
    pub read_only: bool,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            original_code: String::new(),
            modified_code: String::new(),
            language: String::new(),
            original_label: None,
            modified_label: None,
            theme: None,
            render_mode: RenderMode::default(),
            fullscreen: false,
            lookahead: DEFAULT_LOOKAHEAD,
            show_line_numbers: true,
            tab_size: 4,
            read_only: true,
        }
    }
}

impl ViewerOptions {
    pub fn new(
        original_code: impl Into<String>,
        modified_code: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            original_code: original_code.into(),
            modified_code: modified_code.into(),
            language: language.into(),
            ..Self::default()
        }
    }
}

/// What the host should do after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Continue,
    Quit,
    /// Write the export artifact for the current documents
    Export,
}

/// One document with its highlighting and folds
struct DocumentPane {
    document: TextDocument,
    highlighter: Option<SyntectHighlighter>,
    folds: FoldState,
}

impl DocumentPane {
    fn new(document: TextDocument, tab_size: usize) -> Self {
        let highlighter = SyntectHighlighter::for_language(document.language);
        let folds = FoldState::new(&document.lines(), tab_size);
        Self {
            document,
            highlighter,
            folds,
        }
    }

    /// Document, highlight spans and folds, borrowed together for rendering
    fn parts(&mut self) -> (&TextDocument, &[Vec<CategorySpan>], &FoldState) {
        let spans: &[Vec<CategorySpan>] = match self.highlighter.as_mut() {
            Some(highlighter) => highlighter.highlight_lines(&self.document.content),
            None => &[],
        };
        (&self.document, spans, &self.folds)
    }

    fn source(&self) -> PaneSource<'_> {
        PaneSource::new(&self.document, &[], &self.folds)
    }
}

/// The diff viewer component
pub struct DiffViewer {
    state: ViewerState,
    theme: Theme,
    /// Indexed by [`Side::index`]
    panes: [DocumentPane; 2],
    lookahead: usize,
    cache: DiffCache,
    view: DiffViewState,
    options: RenderOptions,
}

impl DiffViewer {
    pub fn new(options: ViewerOptions) -> Self {
        let language = Language::from_name(&options.language);
        let original = TextDocument::new(
            options.original_label.unwrap_or_else(|| "Original".to_string()),
            options.original_code,
            language,
        );
        let modified = TextDocument::new(
            options.modified_label.unwrap_or_else(|| "Modified".to_string()),
            options.modified_code,
            language,
        );
        let theme_kind = options.theme.unwrap_or_default();
        let tab_size = options.tab_size.max(1);

        tracing::debug!(
            %language,
            mode = %options.render_mode,
            theme = %theme_kind,
            "creating diff viewer"
        );

        Self {
            state: ViewerState {
                render_mode: options.render_mode,
                is_fullscreen: options.fullscreen,
                theme: theme_kind,
            },
            theme: Theme::from_kind(theme_kind),
            panes: [
                DocumentPane::new(original, tab_size),
                DocumentPane::new(modified, tab_size),
            ],
            lookahead: options.lookahead,
            cache: DiffCache::new(),
            view: DiffViewState::new(),
            options: RenderOptions {
                show_line_numbers: options.show_line_numbers,
                tab_size,
                read_only: options.read_only,
            },
        }
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn view_state(&self) -> &DiffViewState {
        &self.view
    }

    pub fn document(&self, side: Side) -> &TextDocument {
        &self.panes[side.index()].document
    }

    pub fn original(&self) -> &TextDocument {
        self.document(Side::Original)
    }

    pub fn modified(&self) -> &TextDocument {
        self.document(Side::Modified)
    }

    pub fn lookahead(&self) -> usize {
        self.lookahead
    }

    /// Number of times the diff engine has run for this viewer
    pub fn diff_computations(&self) -> usize {
        self.cache.computations()
    }

    pub fn toggle_render_mode(&mut self) {
        self.state.render_mode = self.state.render_mode.toggled();
        tracing::debug!(mode = %self.state.render_mode, "render mode toggled");
    }

    pub fn toggle_fullscreen(&mut self) {
        self.state.is_fullscreen = !self.state.is_fullscreen;
        tracing::debug!(fullscreen = self.state.is_fullscreen, "fullscreen toggled");
    }

    pub fn set_theme(&mut self, kind: ThemeKind) {
        self.state.theme = kind;
        self.theme = Theme::from_kind(kind);
        tracing::debug!(theme = %kind, "theme set");
    }

    pub fn toggle_theme(&mut self) {
        self.set_theme(self.state.theme.toggled());
    }

    /// Exchange original and modified. Labels travel with their documents
    /// and the diff is recomputed, so added lines become removed lines.
    pub fn swap_sides(&mut self) {
        self.panes.swap(0, 1);
        self.cache.invalidate();
        self.view.focused_pane = Side::Original.index();
        tracing::debug!(
            original = %self.original().label,
            modified = %self.modified().label,
            "sides swapped"
        );

        if self.state.render_mode == RenderMode::Inline {
            self.diff();
        }
    }

    /// Replace both documents wholesale
    pub fn set_documents(&mut self, original: TextDocument, modified: TextDocument) {
        let tab_size = self.options.tab_size;
        self.panes = [
            DocumentPane::new(original, tab_size),
            DocumentPane::new(modified, tab_size),
        ];
        self.cache.invalidate();
        self.view.scroll_to_top();
        for viewport in &mut self.view.pane_viewports {
            viewport.reset_horizontal_scroll();
        }
    }

    /// The diff of the current pair, computed at most once per content pair
    pub fn diff(&mut self) -> &DiffResult {
        let [original, modified] = &self.panes;
        self.cache.get_or_compute(
            &original.document.content,
            &modified.document.content,
            self.lookahead,
        )
    }

    pub fn diff_stats(&mut self) -> DiffStats {
        self.diff().stats()
    }

    /// Total display rows in the current render mode
    fn total_rows(&mut self) -> usize {
        match self.state.render_mode {
            RenderMode::SideBySide => self
                .panes
                .iter()
                .map(|pane| pane.source().row_count())
                .max()
                .unwrap_or(0),
            RenderMode::Inline => inline_rows(self.diff()).len(),
        }
    }

    fn max_scroll_row(&mut self) -> usize {
        let total = self.total_rows();
        self.view.max_scroll_row(total)
    }

    pub fn scroll(&mut self, delta: isize) {
        let max_row = self.max_scroll_row();
        self.view.scroll(delta, max_row);
    }

    pub fn page_down(&mut self) {
        let max_row = self.max_scroll_row();
        self.view.page_down(max_row);
    }

    pub fn page_up(&mut self) {
        self.view.page_up();
    }

    pub fn scroll_to_top(&mut self) {
        self.view.scroll_to_top();
    }

    pub fn scroll_to_bottom(&mut self) {
        let total = self.total_rows();
        self.view.scroll_to_bottom(total);
    }

    pub fn scroll_horizontal(&mut self, delta: isize) {
        let max_column = self
            .panes
            .iter()
            .flat_map(|pane| pane.document.content.split('\n'))
            .map(|line| line.width())
            .max()
            .unwrap_or(0);
        self.view.scroll_horizontal(delta, max_column);
    }

    pub fn focus_next_pane(&mut self) {
        self.view.focus_next_pane();
    }

    /// Display rows where a change starts, in the current render mode.
    ///
    /// Side-by-side, the rows are those of the focused document: a hunk
    /// that only adds lines maps to the next line of the other side.
    fn change_rows(&mut self) -> Vec<usize> {
        let side = if self.view.focused_pane == Side::Modified.index() {
            Side::Modified
        } else {
            Side::Original
        };

        let mode = self.state.render_mode;
        let lookahead = self.lookahead;
        let [original, modified] = &self.panes;
        let diff = self.cache.get_or_compute(
            &original.document.content,
            &modified.document.content,
            lookahead,
        );

        let number_on_side = |line: &DiffLine| match side {
            Side::Original => line.original_line_number,
            Side::Modified => line.modified_line_number,
        };

        let mut rows = match mode {
            RenderMode::Inline => inline_hunk_rows(&inline_rows(diff)),
            RenderMode::SideBySide => {
                let source = self.panes[side.index()].source();
                let lines = diff.lines();
                diff.hunk_starts()
                    .into_iter()
                    .map(|start| {
                        let line = lines[start..]
                            .iter()
                            .find_map(number_on_side)
                            .or_else(|| lines[..start].iter().rev().find_map(number_on_side))
                            .unwrap_or(1);
                        source.row_for_line(line - 1)
                    })
                    .collect()
            }
        };
        rows.dedup();
        rows
    }

    /// Scroll to the next change. Returns false when there is none.
    pub fn next_change(&mut self) -> bool {
        let current = self.view.scroll_row;
        let target = self.change_rows().into_iter().find(|&row| row > current);
        self.jump_to_row(target)
    }

    /// Scroll to the previous change. Returns false when there is none.
    pub fn prev_change(&mut self) -> bool {
        let current = self.view.scroll_row;
        let target = self.change_rows().into_iter().rev().find(|&row| row < current);
        self.jump_to_row(target)
    }

    fn jump_to_row(&mut self, target: Option<usize>) -> bool {
        let Some(row) = target else {
            return false;
        };
        let max_row = self.max_scroll_row();
        self.view.set_scroll_row(row, max_row);
        true
    }

    /// Fold or unfold the block at the top visible line of the focused
    /// pane. Folding applies to the side-by-side layout only.
    pub fn toggle_fold(&mut self) -> bool {
        if self.state.render_mode == RenderMode::Inline {
            return false;
        }

        let pane = &mut self.panes[self.view.focused_pane.min(1)];
        let Some(line) = pane.source().line_at_row(self.view.scroll_row) else {
            return false;
        };
        let Some(header) = pane.folds.toggle(line) else {
            return false;
        };

        let row = pane.source().row_for_line(header);
        tracing::debug!(
            header,
            folded = pane.folds.is_folded(header),
            "fold toggled"
        );
        self.view.scroll_row = row;
        true
    }

    /// Dispatch an action to the matching operation
    pub fn apply(&mut self, action: Action) -> ActionOutcome {
        match action {
            Action::Quit => return ActionOutcome::Quit,
            Action::Escape => {
                if !self.state.is_fullscreen {
                    return ActionOutcome::Quit;
                }
                self.toggle_fullscreen();
            }
            Action::Export => return ActionOutcome::Export,
            Action::ToggleRenderMode => self.toggle_render_mode(),
            Action::ToggleFullscreen => self.toggle_fullscreen(),
            Action::SwapSides => self.swap_sides(),
            Action::ToggleTheme => self.toggle_theme(),
            Action::NextChange => {
                self.next_change();
            }
            Action::PrevChange => {
                self.prev_change();
            }
            Action::ScrollUp => self.scroll(-1),
            Action::ScrollDown => self.scroll(1),
            Action::PageUp => self.page_up(),
            Action::PageDown => self.page_down(),
            Action::ScrollToTop => self.scroll_to_top(),
            Action::ScrollToBottom => self.scroll_to_bottom(),
            Action::ScrollLeft => self.scroll_horizontal(-4),
            Action::ScrollRight => self.scroll_horizontal(4),
            Action::ToggleFold => {
                self.toggle_fold();
            }
            Action::FocusNextPane => self.focus_next_pane(),
            // Help is owned by the host
            Action::ToggleHelp => {}
        }
        ActionOutcome::Continue
    }

    /// Draw the viewer. In fullscreen the viewer covers the whole frame
    /// and `area` is ignored.
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let area = if self.state.is_fullscreen {
            frame.area()
        } else {
            area
        };
        frame.render_widget(Clear, area);
        if area.width == 0 || area.height == 0 {
            return;
        }

        let toolbar_area = Rect { height: 1, ..area };
        let content_area = Rect {
            y: area.y + 1,
            height: area.height - 1,
            ..area
        };

        self.view.viewport_height = EditorPane::content_height(content_area);

        let [original, modified] = &mut self.panes;
        match self.state.render_mode {
            RenderMode::SideBySide => {
                self.view
                    .update_pane_widths(content_area.width, &[0.5, 0.5], SEPARATOR_WIDTH);

                let (doc, spans, folds) = original.parts();
                let left = PaneSource::new(doc, spans, folds);
                let (doc, spans, folds) = modified.parts();
                let right = PaneSource::new(doc, spans, folds);

                let total = left.row_count().max(right.row_count());
                let max_row = self.view.max_scroll_row(total);
                self.view.scroll_row = self.view.scroll_row.min(max_row);

                DiffRenderer::new(&self.view, &self.theme, self.options).render_side_by_side(
                    frame,
                    content_area,
                    [&left, &right],
                );
            }
            RenderMode::Inline => {
                self.view.update_pane_widths(content_area.width, &[1.0], SEPARATOR_WIDTH);

                let rows = inline_rows(self.cache.get_or_compute(
                    &original.document.content,
                    &modified.document.content,
                    self.lookahead,
                ));
                let max_row = self.view.max_scroll_row(rows.len());
                self.view.scroll_row = self.view.scroll_row.min(max_row);

                let (doc, spans, folds) = original.parts();
                let left = PaneSource::new(doc, spans, folds);
                let (doc, spans, folds) = modified.parts();
                let right = PaneSource::new(doc, spans, folds);

                DiffRenderer::new(&self.view, &self.theme, self.options).render_inline(
                    frame,
                    content_area,
                    &rows,
                    [&left, &right],
                );
            }
        }

        self.render_toolbar(frame, toolbar_area);
    }

    /// Labels, state and key hints above the panes
    fn render_toolbar(&self, frame: &mut Frame, area: Rect) {
        let base = Style::default().fg(self.theme.toolbar_fg).bg(self.theme.toolbar_bg);
        let accent = base.fg(self.theme.accent).add_modifier(Modifier::BOLD);

        let mut spans = vec![
            Span::styled(format!(" {} ⇄ {} ", self.original().label, self.modified().label), accent),
            Span::styled(format!("│ {} │ {} ", self.state.render_mode, self.state.theme), base),
        ];
        if self.state.render_mode == RenderMode::Inline {
            if let Some(diff) = self.cache.cached() {
                spans.push(Span::styled(format!("│ {} ", diff.stats()), base));
            }
        }
        if self.state.is_fullscreen {
            spans.push(Span::styled("│ FULLSCREEN ", accent));
        }
        spans.push(Span::styled(
            "│ m mode  s swap  f full  t theme  d export  ? help",
            base.add_modifier(Modifier::DIM),
        ));

        frame.render_widget(Paragraph::new(Line::from(spans)).style(base), area);
    }
}
