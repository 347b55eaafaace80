//! Host title bar and status bar rendering

use crate::app::viewer::DiffViewer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Renders the host chrome around the viewer
pub struct StatusBarRenderer;

impl StatusBarRenderer {
    /// Render the title bar above the viewer
    pub fn render_title(frame: &mut Frame, area: Rect, viewer: &DiffViewer) {
        let theme = viewer.theme();
        let style = Style::default().fg(theme.title_fg).bg(theme.title_bg);

        let title = Line::from(vec![
            Span::styled(
                " diffpane ",
                style.fg(theme.accent).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("{} vs {}", viewer.original().label, viewer.modified().label),
                style,
            ),
        ]);

        frame.render_widget(Paragraph::new(title).style(style), area);
    }

    /// Render the status bar below the viewer
    ///
    /// # Arguments
    /// * `frame` - The ratatui frame to render to
    /// * `area` - The rectangular area to render in
    /// * `viewer` - The viewer whose state is summarized
    /// * `status_message` - Optional status message to display
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        viewer: &DiffViewer,
        status_message: Option<&str>,
    ) {
        let theme = viewer.theme();
        let state = viewer.state();
        let view = viewer.view_state();

        let mut status = format!(
            " {} | {} | {} | row {}",
            viewer.original().language,
            state.render_mode,
            state.theme,
            view.scroll_row + 1
        );
        if let Some(msg) = status_message {
            status.push_str(" | ");
            status.push_str(msg);
        }

        let status_line = Paragraph::new(status)
            .style(Style::default().fg(theme.status_bar_fg).bg(theme.status_bar_bg));

        frame.render_widget(status_line, area);
    }
}
