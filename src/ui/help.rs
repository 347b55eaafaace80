//! Help overlay rendering

use crate::input::action::DEFAULT_BINDINGS;
use crate::view::theme::Theme;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

/// Manages help overlay state and rendering
#[derive(Debug, Default)]
pub struct HelpRenderer {
    /// Current scroll offset
    scroll: usize,
    /// Is help visible?
    visible: bool,
}

impl HelpRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle help visibility
    pub fn toggle(&mut self) {
        self.visible = !self.visible;
        self.scroll = 0; // Reset scroll when toggling
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Scroll the binding list (positive = down, negative = up)
    pub fn scroll(&mut self, delta: isize) {
        let max_scroll = DEFAULT_BINDINGS.len().saturating_sub(1);

        if delta > 0 {
            self.scroll = (self.scroll + delta as usize).min(max_scroll);
        } else {
            self.scroll = self.scroll.saturating_sub(delta.unsigned_abs());
        }
    }

    /// Centered rectangle for the overlay within `area`
    pub fn overlay_area(area: Rect) -> Rect {
        let width = area.width.min(60);
        let height = area.height.min(DEFAULT_BINDINGS.len() as u16 + 6);
        Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        }
    }

    /// Render the help overlay over `area`
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let overlay = Self::overlay_area(area);
        if overlay.width < 4 || overlay.height < 4 {
            return;
        }

        // Leave space for borders, header and footer
        let visible_height = overlay.height.saturating_sub(6) as usize;
        let start_idx = self.scroll.min(DEFAULT_BINDINGS.len());
        let end_idx = (start_idx + visible_height).min(DEFAULT_BINDINGS.len());

        let base = Style::default().fg(theme.help_fg).bg(theme.help_bg);
        let key_style = Style::default()
            .fg(theme.help_key_fg)
            .bg(theme.help_bg)
            .add_modifier(Modifier::BOLD);

        let mut lines = vec![
            Line::from(Span::styled(
                " KEYBOARD SHORTCUTS ",
                key_style.add_modifier(Modifier::REVERSED),
            )),
            Line::from(""),
        ];

        let max_key_width = DEFAULT_BINDINGS
            .iter()
            .map(|(key, _)| key.len())
            .max()
            .unwrap_or(10);

        for (key, action) in &DEFAULT_BINDINGS[start_idx..end_idx] {
            lines.push(Line::from(vec![
                Span::styled(format!("  {key:<max_key_width$}  "), key_style),
                Span::styled(action.description(), base),
            ]));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(
                " Showing {}-{} of {} | Up/Down to scroll | ? or Esc to close ",
                start_idx + 1,
                end_idx,
                DEFAULT_BINDINGS.len()
            ),
            Style::default().fg(theme.status_bar_fg).bg(theme.status_bar_bg),
        )));

        let help = Paragraph::new(lines).style(base).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.accent))
                .title(" Help ")
                .title_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
        );

        frame.render_widget(Clear, overlay);
        frame.render_widget(help, overlay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_resets_scroll() {
        let mut help = HelpRenderer::new();
        assert!(!help.is_visible());
        help.toggle();
        help.scroll(3);
        assert_eq!(help.scroll, 3);
        help.toggle();
        assert!(!help.is_visible());
        help.toggle();
        assert_eq!(help.scroll, 0);
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut help = HelpRenderer::new();
        help.scroll(1000);
        assert_eq!(help.scroll, DEFAULT_BINDINGS.len() - 1);
        help.scroll(-1000);
        assert_eq!(help.scroll, 0);
    }

    #[test]
    fn test_overlay_is_centered() {
        let area = Rect::new(0, 0, 100, 40);
        let overlay = HelpRenderer::overlay_area(area);
        assert_eq!(overlay.width, 60);
        assert_eq!(overlay.x, 20);
        assert!(overlay.y + overlay.height <= 40);
    }
}
