//! Low-level text primitives: syntax highlighting and code folding

pub mod fold;
pub mod syntect_highlighter;

pub use fold::{FoldRegion, FoldState};
pub use syntect_highlighter::{CategorySpan, HighlightCategory, SyntectHighlighter};
