//! Pixshelf - the non-visual engine behind a picture-aware file browser
//!
//! This library lists and mutates filesystem entries, keeps a cut/copy/paste
//! clipboard session, and drives an external auto-tagging script whose
//! results are kept in two JSON sidecar stores.
//!
//! Every filesystem failure is recovered inside the operation that caused it:
//! listings degrade to placeholder entries and mutations return typed
//! outcomes, so a caller decides whether to re-list instead of receiving a
//! refresh callback.

use thiserror::Error;

pub mod background;
pub mod cli;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod fs;
pub mod icons;
pub mod listing;
pub mod store;
pub mod tagger;
pub mod ui;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum ShelfError {
    /// Filesystem mutation error
    #[error("Filesystem error: {0}")]
    Fs(#[from] fs::FsError),
    /// Clipboard error
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] clipboard::ClipboardError),
    /// External tagger error
    #[error("Tagger error: {0}")]
    Tagger(#[from] tagger::TaggerError),
    /// Sidecar store error
    #[error("Store error: {0}")]
    Store(#[from] store::StoreError),
    /// Prompt error
    #[error("Input error: {0}")]
    Input(#[from] ui::InputError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// A background unit of work panicked or was torn down
    #[error("Background task failed: {0}")]
    Background(#[from] tokio::task::JoinError),
    /// Clipboard session file could not be encoded or decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Some items of a multi-item command failed
    #[error("{failed} of {total} item(s) failed")]
    Incomplete { failed: usize, total: usize },
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
