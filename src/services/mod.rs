//! Process-level services
//!
//! Runtime-only: these depend on tracing-subscriber.

#[cfg(feature = "runtime")]
pub mod tracing_setup;
