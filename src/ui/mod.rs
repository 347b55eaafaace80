//! Host chrome: title bar, status bar and help overlay

pub mod help;
pub mod status_bar;

pub use help::HelpRenderer;
pub use status_bar::StatusBarRenderer;
