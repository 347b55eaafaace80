//! Export of the current document pair
//!
//! The artifact is a plain-text file holding both documents under
//! `=== <label> ===` headers. It is a human-readable convenience export,
//! not an interchange format.

use crate::model::document::TextDocument;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Serialize both documents with their labels
pub fn build_download_artifact(original: &TextDocument, modified: &TextDocument) -> Vec<u8> {
    let mut out = String::with_capacity(original.content.len() + modified.content.len() + 64);
    push_section(&mut out, original);
    out.push('\n');
    push_section(&mut out, modified);
    out.into_bytes()
}

fn push_section(out: &mut String, document: &TextDocument) {
    out.push_str("=== ");
    out.push_str(&document.label);
    out.push_str(" ===\n");
    out.push_str(&document.content);
    if !document.content.ends_with('\n') {
        out.push('\n');
    }
}

/// File name for an export created at `unix_ms`
pub fn artifact_file_name(unix_ms: i64) -> String {
    format!("diff-{unix_ms}.txt")
}

/// Writes export artifacts into a directory
#[derive(Debug, Clone)]
pub struct Exporter {
    directory: PathBuf,
}

impl Exporter {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Write the artifact with a timestamped name.
    ///
    /// Failures are logged and reported as `None`; they are never errors
    /// for the caller.
    pub fn save(&self, original: &TextDocument, modified: &TextDocument) -> Option<PathBuf> {
        self.save_at(chrono::Utc::now().timestamp_millis(), original, modified)
    }

    /// Write the artifact as if created at `unix_ms`. If that name is taken
    /// (two exports within one millisecond) the next free millisecond is used.
    pub fn save_at(
        &self,
        unix_ms: i64,
        original: &TextDocument,
        modified: &TextDocument,
    ) -> Option<PathBuf> {
        if let Err(e) = std::fs::create_dir_all(&self.directory) {
            tracing::warn!(
                "Failed to create export directory {}: {}",
                self.directory.display(),
                e
            );
            return None;
        }

        let contents = build_download_artifact(original, modified);
        let mut stamp = unix_ms;
        loop {
            let path = self.directory.join(artifact_file_name(stamp));
            let file = OpenOptions::new().write(true).create_new(true).open(&path);
            let result = match file {
                Ok(mut file) => file.write_all(&contents),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    stamp += 1;
                    continue;
                }
                Err(e) => Err(e),
            };

            return match result {
                Ok(()) => {
                    tracing::info!("Exported diff to {}", path.display());
                    Some(path)
                }
                Err(e) => {
                    tracing::warn!("Failed to write export {}: {}", path.display(), e);
                    None
                }
            };
        }
    }
}
