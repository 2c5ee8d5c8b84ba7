//! Filesystem mutation error types
//!
//! Every mutation recovers its own failures: the error is logged where it
//! happens and returned as a value, never propagated as a panic.
//!
//! # Error Types
//!
//! - **`Io`**: the host refused an operation (permission denied, path
//!   vanished, handle locked elsewhere)
//! - **`AlreadyExists`**: a move or rename would replace an existing entry
//! - **`SameFile`**, **`NestedDestination`**: an entry would be copied or
//!   moved onto or into itself
//! - **`Walk`**: recursive traversal hit a filesystem loop
//! - **`NoParent`**, **`Placeholder`**, **`InvalidName`**: the request could
//!   not be turned into a filesystem operation at all

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Filesystem mutation errors
#[derive(Debug, Error)]
pub enum FsError {
    /// The host filesystem reported an error for `path`
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Target of a move or rename is already taken
    #[error("Destination already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    /// Copying a file onto itself would truncate it
    #[error("Source and destination are the same file: {}", .0.display())]
    SameFile(PathBuf),

    /// A directory cannot be placed inside itself
    #[error("Cannot place {} inside itself ({})", .origin.display(), .destination.display())]
    NestedDestination {
        origin: PathBuf,
        destination: PathBuf,
    },

    /// Recursive traversal failed without an underlying I/O error
    #[error("Failed to traverse {}: {message}", .path.display())]
    Walk { path: PathBuf, message: String },

    /// Entry has no parent directory to rename within
    #[error("No parent directory for {}", .0.display())]
    NoParent(PathBuf),

    /// Synthetic listing rows cannot be mutated or opened
    #[error("'{0}' is not a filesystem entry")]
    Placeholder(String),

    /// A new name is empty or would escape its directory
    #[error("Invalid name: '{0}'")]
    InvalidName(String),
}

impl FsError {
    /// Attach a path to an I/O error
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// The underlying I/O error kind, if there is one
    #[must_use]
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Self::Io { source, .. } => Some(source.kind()),
            _ => None,
        }
    }
}

impl From<walkdir::Error> for FsError {
    fn from(e: walkdir::Error) -> Self {
        let message = e.to_string();
        let path = e.path().map(Path::to_path_buf).unwrap_or_default();
        match e.into_io_error() {
            Some(source) => Self::Io { path, source },
            None => Self::Walk { path, message },
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
