// Test harness driving the whole host through a virtual terminal

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use diffpane::app::{App, DiffViewer, Exporter, ViewerOptions};
use ratatui::backend::TestBackend;
use ratatui::style::Color;
use ratatui::Terminal;
use std::io;
use std::path::Path;
use tempfile::TempDir;

/// Runs an [`App`] against a `TestBackend` of fixed size
pub struct ViewerTestHarness {
    app: App,
    terminal: Terminal<TestBackend>,
    export_dir: TempDir,
}

impl ViewerTestHarness {
    /// Create a harness and draw the first frame
    pub fn new(width: u16, height: u16, options: ViewerOptions) -> io::Result<Self> {
        super::tracing::init_tracing_from_env();

        let export_dir = tempfile::tempdir()?;
        let app = App::new(DiffViewer::new(options), Exporter::new(export_dir.path()));
        let terminal = Terminal::new(TestBackend::new(width, height))?;

        let mut harness = Self {
            app,
            terminal,
            export_dir,
        };
        harness.render()?;
        Ok(harness)
    }

    /// Harness for two texts with default options
    pub fn with_texts(
        width: u16,
        height: u16,
        original: &str,
        modified: &str,
        language: &str,
    ) -> io::Result<Self> {
        Self::new(width, height, ViewerOptions::new(original, modified, language))
    }

    pub fn render(&mut self) -> io::Result<()> {
        let app = &mut self.app;
        self.terminal.draw(|frame| app.render(frame))?;
        Ok(())
    }

    /// Send one key and redraw
    pub fn send_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> io::Result<()> {
        self.app.handle_key(&KeyEvent::new(code, modifiers));
        self.render()
    }

    /// Send each character as a key press (uppercase with Shift)
    pub fn type_keys(&mut self, keys: &str) -> io::Result<()> {
        for ch in keys.chars() {
            let modifiers = if ch.is_ascii_uppercase() {
                KeyModifiers::SHIFT
            } else {
                KeyModifiers::NONE
            };
            self.send_key(KeyCode::Char(ch), modifiers)?;
        }
        Ok(())
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn viewer(&self) -> &DiffViewer {
        self.app.viewer()
    }

    pub fn export_dir(&self) -> &Path {
        self.export_dir.path()
    }

    /// One screen row as text
    pub fn screen_row(&self, y: u16) -> String {
        let buffer = self.terminal.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "))
            .collect()
    }

    /// The whole screen, one line per row
    pub fn screen_to_string(&self) -> String {
        let height = self.terminal.backend().buffer().area.height;
        (0..height)
            .map(|y| self.screen_row(y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Background color at a screen position
    pub fn background_at(&self, x: u16, y: u16) -> Option<Color> {
        self.terminal.backend().buffer().cell((x, y)).map(|c| c.bg)
    }

    pub fn assert_screen_contains(&self, text: &str) {
        let screen = self.screen_to_string();
        assert!(
            screen.contains(text),
            "Expected screen to contain {text:?}\nScreen:\n{screen}"
        );
    }

    pub fn assert_screen_not_contains(&self, text: &str) {
        let screen = self.screen_to_string();
        assert!(
            !screen.contains(text),
            "Expected screen not to contain {text:?}\nScreen:\n{screen}"
        );
    }
}
