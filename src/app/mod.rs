//! Application host
//!
//! Embeds the diff viewer between a title bar and a status bar, owns the
//! help overlay and the exporter, and routes actions. In fullscreen the
//! viewer covers the whole frame and the chrome is not drawn.

pub mod export;
pub mod viewer;

pub use export::{artifact_file_name, build_download_artifact, Exporter};
pub use viewer::{ActionOutcome, DiffViewer, RenderMode, ViewerOptions, ViewerState};

use crate::input::action::Action;
use crate::ui::{HelpRenderer, StatusBarRenderer};
use ratatui::layout::{Constraint, Layout};
use ratatui::Frame;

/// The host application
pub struct App {
    viewer: DiffViewer,
    exporter: Exporter,
    help: HelpRenderer,
    status_message: Option<String>,
    should_quit: bool,
}

impl App {
    pub fn new(viewer: DiffViewer, exporter: Exporter) -> Self {
        Self {
            viewer,
            exporter,
            help: HelpRenderer::new(),
            status_message: None,
            should_quit: false,
        }
    }

    pub fn viewer(&self) -> &DiffViewer {
        &self.viewer
    }

    pub fn viewer_mut(&mut self) -> &mut DiffViewer {
        &mut self.viewer
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn is_help_visible(&self) -> bool {
        self.help.is_visible()
    }

    /// Route an action to the help overlay, the viewer or the exporter
    pub fn handle_action(&mut self, action: Action) {
        if self.help.is_visible() {
            match action {
                Action::ToggleHelp | Action::Escape => {
                    self.help.hide();
                    return;
                }
                Action::ScrollUp => {
                    self.help.scroll(-1);
                    return;
                }
                Action::ScrollDown => {
                    self.help.scroll(1);
                    return;
                }
                // Anything else closes help and goes through
                _ => self.help.hide(),
            }
        }

        if action == Action::ToggleHelp {
            self.help.toggle();
            return;
        }

        match self.viewer.apply(action) {
            ActionOutcome::Continue => self.update_status(action),
            ActionOutcome::Quit => self.should_quit = true,
            ActionOutcome::Export => self.export(),
        }
    }

    fn update_status(&mut self, action: Action) {
        let message = match action {
            Action::SwapSides => format!(
                "Swapped: {} is now the original",
                self.viewer.original().label
            ),
            Action::ToggleRenderMode => format!("{} view", self.viewer.state().render_mode),
            Action::ToggleTheme => format!("{} theme", self.viewer.state().theme),
            _ => return,
        };
        self.status_message = Some(message);
    }

    fn export(&mut self) {
        let saved = self
            .exporter
            .save(self.viewer.original(), self.viewer.modified());
        self.status_message = Some(match saved {
            Some(path) => format!("Exported to {}", path.display()),
            None => format!(
                "Export failed: could not write to {}",
                self.exporter.directory().display()
            ),
        });
    }

    /// Draw the whole frame
    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        if self.viewer.state().is_fullscreen {
            self.viewer.render(frame, area);
        } else {
            let [title_area, viewer_area, status_area] = Layout::vertical([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .areas(area);

            StatusBarRenderer::render_title(frame, title_area, &self.viewer);
            self.viewer.render(frame, viewer_area);
            StatusBarRenderer::render(frame, status_area, &self.viewer, self.status_message());
        }

        if self.help.is_visible() {
            self.help.render(frame, area, self.viewer.theme());
        }
    }
}

#[cfg(feature = "runtime")]
mod runtime {
    use super::App;
    use crate::input::keymap::action_for_key;
    use crossterm::event::{self, Event, KeyEvent};
    use ratatui::DefaultTerminal;
    use std::io;

    impl App {
        pub fn handle_key(&mut self, key: &KeyEvent) {
            if let Some(action) = action_for_key(key) {
                tracing::trace!(?action, "key");
                self.handle_action(action);
            }
        }

        /// Draw and process events until the user quits
        pub fn run(&mut self, mut terminal: DefaultTerminal) -> io::Result<()> {
            while !self.should_quit {
                terminal.draw(|frame| self.render(frame))?;
                if let Event::Key(key) = event::read()? {
                    self.handle_key(&key);
                }
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(dir: &std::path::Path) -> App {
        let viewer = DiffViewer::new(ViewerOptions::new("a\nb", "a\nc", "python"));
        App::new(viewer, Exporter::new(dir))
    }

    #[test]
    fn test_help_captures_navigation() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());

        app.handle_action(Action::ToggleHelp);
        assert!(app.is_help_visible());
        app.handle_action(Action::ScrollDown);
        assert_eq!(app.viewer().view_state().scroll_row, 0);

        app.handle_action(Action::Escape);
        assert!(!app.is_help_visible());
        assert!(!app.should_quit());

        app.handle_action(Action::Escape);
        assert!(app.should_quit());
    }

    #[test]
    fn test_other_actions_close_help() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());
        app.handle_action(Action::ToggleHelp);
        app.handle_action(Action::ToggleRenderMode);
        assert!(!app.is_help_visible());
        assert_eq!(app.viewer().state().render_mode, RenderMode::Inline);
        assert_eq!(app.status_message(), Some("inline view"));
    }

    #[test]
    fn test_export_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());
        app.handle_action(Action::Export);

        let message = app.status_message().unwrap_or_default().to_string();
        assert!(message.starts_with("Exported to "), "{message}");
        let files: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_export_failure_names_directory() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocked");
        std::fs::write(&blocker, "x").unwrap();
        let mut app = app(&blocker);
        app.handle_action(Action::Export);

        let expected = format!("Export failed: could not write to {}", blocker.display());
        assert_eq!(app.status_message(), Some(expected.as_str()));
        assert!(!app.should_quit());
    }

    #[test]
    fn test_swap_updates_status() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());
        app.handle_action(Action::SwapSides);
        assert_eq!(
            app.status_message(),
            Some("Swapped: Modified is now the original")
        );
    }
}
