//! Cut/copy/paste session
//!
//! [`ClipboardSelection`] is a plain value owned by the front end and passed
//! to [`ClipboardSelection::paste`] explicitly. It holds two ordered sets of
//! entry snapshots, one per pending operation.
//!
//! # Rules
//!
//! - Starting a cut or copy replaces that set outright; the other set is left
//!   alone apart from dropping entries that now belong to the new set.
//! - Paste consults the cut set before the copy set. If both are pending, the
//!   cut wins and the copy stays queued for the next paste.
//! - The pasted set is cleared once its batch has run, whatever the per-item
//!   results were.

use crate::fs::{self, BatchOutcome};
use crate::listing::Entry;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Clipboard errors surfaced to the user
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClipboardError {
    /// Cut or copy was started with nothing selected
    #[error("No items selected to {0}")]
    EmptySelection(PasteMode),
    /// Paste was requested with both sets empty
    #[error("Nothing to paste")]
    NothingToPaste,
}

/// Which pending set a paste executed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PasteMode {
    Move,
    Copy,
}

impl std::fmt::Display for PasteMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Move => "cut",
            Self::Copy => "copy",
        })
    }
}

/// Observable clipboard state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardState {
    Idle,
    CutPending,
    CopyPending,
}

/// Result of a paste
#[derive(Debug)]
pub struct PasteOutcome {
    pub mode: PasteMode,
    pub batch: BatchOutcome,
}

/// Pending cut and copy selections
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClipboardSelection {
    cut: Vec<Entry>,
    copy: Vec<Entry>,
}

impl ClipboardSelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn cut_set(&self) -> &[Entry] {
        &self.cut
    }

    #[must_use]
    pub fn copy_set(&self) -> &[Entry] {
        &self.copy
    }

    /// The set the next paste would execute
    #[must_use]
    pub fn state(&self) -> ClipboardState {
        if !self.cut.is_empty() {
            ClipboardState::CutPending
        } else if !self.copy.is_empty() {
            ClipboardState::CopyPending
        } else {
            ClipboardState::Idle
        }
    }

    /// Replace the cut set with the selected entries of `entries`
    ///
    /// Selection flags are cleared on the entries taken. Returns how many
    /// entries were taken.
    ///
    /// # Errors
    /// Returns `ClipboardError::EmptySelection` and leaves the session
    /// unchanged if nothing in `entries` is selected.
    pub fn begin_cut(&mut self, entries: &mut [Entry]) -> Result<usize, ClipboardError> {
        let taken = take_selected(entries, PasteMode::Move)?;
        self.copy.retain(|e| !taken.iter().any(|t| t.path == e.path));
        self.cut = taken;
        Ok(self.cut.len())
    }

    /// Replace the copy set with the selected entries of `entries`
    ///
    /// # Errors
    /// Returns `ClipboardError::EmptySelection` and leaves the session
    /// unchanged if nothing in `entries` is selected.
    pub fn begin_copy(&mut self, entries: &mut [Entry]) -> Result<usize, ClipboardError> {
        let taken = take_selected(entries, PasteMode::Copy)?;
        self.cut.retain(|e| !taken.iter().any(|t| t.path == e.path));
        self.copy = taken;
        Ok(self.copy.len())
    }

    /// Execute the pending cut (or, failing that, copy) into `destination`
    ///
    /// # Errors
    /// Returns `ClipboardError::NothingToPaste` if both sets are empty.
    pub fn paste(&mut self, destination: &Path) -> Result<PasteOutcome, ClipboardError> {
        let (mode, items) = self.take_pending()?;
        Ok(execute(mode, &items, destination))
    }

    /// Remove and return the set the next paste would execute
    ///
    /// # Errors
    /// Returns `ClipboardError::NothingToPaste` if both sets are empty.
    pub fn take_pending(&mut self) -> Result<(PasteMode, Vec<Entry>), ClipboardError> {
        if !self.cut.is_empty() {
            Ok((PasteMode::Move, std::mem::take(&mut self.cut)))
        } else if !self.copy.is_empty() {
            Ok((PasteMode::Copy, std::mem::take(&mut self.copy)))
        } else {
            Err(ClipboardError::NothingToPaste)
        }
    }

    /// Drop both pending sets
    pub fn clear(&mut self) {
        self.cut.clear();
        self.copy.clear();
    }
}

/// Run a batch taken from [`ClipboardSelection::take_pending`]
#[must_use]
pub fn execute(mode: PasteMode, items: &[Entry], destination: &Path) -> PasteOutcome {
    let batch = match mode {
        PasteMode::Move => fs::move_batch(items, destination),
        PasteMode::Copy => fs::copy_batch(items, destination),
    };
    PasteOutcome { mode, batch }
}

fn take_selected(entries: &mut [Entry], mode: PasteMode) -> Result<Vec<Entry>, ClipboardError> {
    let mut taken = Vec::new();
    for entry in entries.iter_mut().filter(|e| e.is_selected && !e.is_placeholder()) {
        entry.is_selected = false;
        taken.push(entry.clone());
    }
    if taken.is_empty() {
        return Err(ClipboardError::EmptySelection(mode));
    }
    Ok(taken)
}
