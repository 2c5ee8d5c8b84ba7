//! Outcome values returned by mutations
//!
//! Mutations describe which directory is stale instead of calling back into
//! the front end. A [`Refresh`] only exists when something changed; batches
//! always carry one, even when every item failed.

use super::error::FsError;
use std::path::{Path, PathBuf};

/// Directory that should be listed again after a mutation
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Refresh {
    dir: PathBuf,
}

impl Refresh {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Hand the stale directory to a refresh callback
    pub fn notify(self, notify: impl FnOnce(&Path)) {
        notify(&self.dir);
    }
}

/// One item of a batch that could not be processed
#[derive(Debug)]
pub struct ItemFailure {
    pub path: PathBuf,
    pub error: FsError,
}

/// Result of a move or copy batch
///
/// Items fail individually; the batch itself always completes and always
/// refreshes its destination exactly once.
#[derive(Debug)]
#[must_use]
pub struct BatchOutcome {
    pub refresh: Refresh,
    pub succeeded: usize,
    pub failures: Vec<ItemFailure>,
}

impl BatchOutcome {
    pub(crate) fn new(destination: &Path) -> Self {
        Self {
            refresh: Refresh::new(destination),
            succeeded: 0,
            failures: Vec::new(),
        }
    }

    pub(crate) fn record(&mut self, path: &Path, result: Result<(), FsError>) {
        match result {
            Ok(()) => self.succeeded += 1,
            Err(error) => self.failures.push(ItemFailure {
                path: path.to_path_buf(),
                error,
            }),
        }
    }

    /// Every item went through
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Hand the destination to a refresh callback, returning the counts
    pub fn notify(self, notify: impl FnOnce(&Path)) -> (usize, Vec<ItemFailure>) {
        notify(self.refresh.dir());
        (self.succeeded, self.failures)
    }
}

/// Result of opening an entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenOutcome {
    /// The entry is a directory; the front end should list it
    Navigate(PathBuf),
    /// The file was handed to the host's default application
    Launched(PathBuf),
}
