// diffpane library - exposes all core modules for testing

// Pure modules, usable without a terminal
pub mod config;
pub mod input;
pub mod model;
pub mod primitives;
pub mod view;

// Modules with internal gating (pure types ungated, runtime code gated internally)
pub mod app;
pub mod services;
pub mod ui;

pub use app::{App, DiffViewer, RenderMode, ViewerOptions, ViewerState};
pub use model::{compute_diff, DiffKind, DiffLine, DiffResult, TextDocument};
