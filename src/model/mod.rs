//! Core data model
//!
//! Pure types with no terminal or filesystem dependencies:
//! - `document` - labeled text documents and their language tag
//! - `diff` - the line-level diff engine and its result types
//! - `diff_cache` - memoization of diff results on the document pair

pub mod diff;
pub mod diff_cache;
pub mod document;

pub use diff::{compute_diff, compute_diff_with_lookahead, DiffKind, DiffLine, DiffResult, DiffStats};
pub use diff_cache::DiffCache;
pub use document::{Language, Side, TextDocument};
