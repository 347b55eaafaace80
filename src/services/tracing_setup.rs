//! Tracing subscriber setup
//!
//! The terminal UI owns stdout, so logs always go to a file.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Default log file location
pub fn default_log_path() -> PathBuf {
    std::env::temp_dir().join("diffpane.log")
}

/// Initialize the global tracing subscriber writing to `log_file_path`.
///
/// Filtering follows `RUST_LOG`, defaulting to `info`. Returns false if the
/// log file could not be created or a subscriber was already installed;
/// the viewer runs without logging in that case.
pub fn init_global(log_file_path: &Path) -> bool {
    let Ok(log_file) = File::create(log_file_path) else {
        return false;
    };

    build_subscriber(log_file).try_init().is_ok()
}

/// Build a subscriber with file logging.
///
/// This is the configuration shared between the binary and tests.
pub fn build_subscriber(log_file: File) -> impl tracing::Subscriber + Send + Sync {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer().with_writer(Arc::new(log_file)).with_ansi(false);

    tracing_subscriber::registry().with(fmt_layer).with(env_filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_subscriber_writes_to_file() {
        let log_file = NamedTempFile::new().unwrap();
        let subscriber = build_subscriber(log_file.reopen().unwrap());

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!("export failed for test");
        });

        let contents = std::fs::read_to_string(log_file.path()).unwrap();
        assert!(contents.contains("export failed for test"));
    }
}
