//! Sidecar store error types
//!
//! Only writes can fail. A missing or malformed document on load is logged
//! and treated as empty, so no error variant exists for it.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while persisting a sidecar document
#[derive(Debug, Error)]
pub enum StoreError {
    /// Creating, writing or renaming the document file failed
    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The in-memory document could not be encoded
    #[error("Failed to encode {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub(crate) fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
