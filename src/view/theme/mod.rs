//! Theme module - color schemes for the diff viewer
//!
//! - **`types`**: `ThemeKind` (the user-facing light/dark switch) and the
//!   `Theme` struct with every color the panes, gutters and chrome use.
//!
//! # Usage
//!
//! ```ignore
//! use diffpane::view::theme::{Theme, ThemeKind};
//!
//! let theme = Theme::from_kind(ThemeKind::Dark);
//! assert_eq!(theme.name, "dark");
//! ```

mod types;

pub use types::{Theme, ThemeKind};
