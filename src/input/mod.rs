//! Input pipeline
//!
//! Translates key events into viewer actions.
//!
//! `action` is pure; `keymap` depends on crossterm and is runtime-only.

pub mod action;

pub use action::{Action, DEFAULT_BINDINGS};

#[cfg(feature = "runtime")]
pub mod keymap;
