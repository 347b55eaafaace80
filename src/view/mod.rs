//! View layer
//!
//! Pure ratatui rendering components. Nothing here reads input or touches
//! the terminal directly, so everything renders onto a `TestBackend`.

pub mod diff_renderer;
pub mod diff_view;
pub mod editor_pane;
pub mod theme;
