//! Filesystem mutations
//!
//! Rename, delete, create, move, copy and open for listing entries. Each
//! operation recovers its own failures: the error is logged with `tracing`
//! and returned as a value. Success carries a [`Refresh`] naming the
//! directory to re-list; failure carries none, so a caller never re-lists on
//! the strength of a refresh that did not happen.
//!
//! # Batches
//!
//! [`move_batch`] and [`copy_batch`] isolate failures per item. A failing
//! item is recorded in the [`BatchOutcome`] and the batch carries on; the
//! destination is refreshed exactly once at the end.

mod copy;
mod error;
mod outcome;

pub use copy::{copy_file, copy_tree};
pub use error::FsError;
pub use outcome::{BatchOutcome, ItemFailure, OpenOutcome, Refresh};

use crate::listing::Entry;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Component, Path, PathBuf};

type Result<T> = std::result::Result<T, FsError>;

fn ensure_real(entry: &Entry) -> Result<()> {
    if entry.is_placeholder() {
        return Err(FsError::Placeholder(entry.name.clone()));
    }
    Ok(())
}

/// Reject names that are empty or that would leave their directory
fn validate_name(name: &str) -> Result<()> {
    let trimmed = name.trim();
    let mut components = Path::new(trimmed).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(FsError::InvalidName(name.to_string())),
    }
}

fn log_failure<T>(action: &str, path: &Path, result: Result<T>) -> Result<T> {
    if let Err(e) = &result {
        tracing::warn!(action, path = %path.display(), error = %e, "filesystem operation failed");
    }
    result
}

/// Move a file or directory, refusing to replace an existing entry
///
/// Files fall back to copy-then-delete when the move crosses devices.
fn move_path(source: &Path, destination: &Path, is_directory: bool) -> Result<()> {
    if destination.exists() {
        return Err(FsError::AlreadyExists(destination.to_path_buf()));
    }
    if is_directory && destination.starts_with(source) {
        return Err(FsError::NestedDestination {
            origin: source.to_path_buf(),
            destination: destination.to_path_buf(),
        });
    }

    match std::fs::rename(source, destination) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices && !is_directory => {
            copy_file(source, destination)?;
            std::fs::remove_file(source).map_err(|e| FsError::io(source, e))
        }
        Err(e) => Err(FsError::io(source, e)),
    }
}

/// Open a file for reading without sharing it
///
/// On Windows this fails while another process holds the file open. Other
/// platforms have no share modes, so only readability is checked.
fn open_exclusive(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.read(true);
    #[cfg(windows)]
    {
        use std::os::windows::fs::OpenOptionsExt;
        options.share_mode(0);
    }
    options.open(path)
}

/// Rename `entry` to `new_name` within its own parent directory
///
/// # Errors
/// Returns `FsError` if the entry is a placeholder, the name is invalid, the
/// target already exists, or the host refuses the move.
pub fn rename(entry: &Entry, new_name: &str, current_dir: &Path) -> Result<Refresh> {
    let result = (|| -> Result<Refresh> {
        ensure_real(entry)?;
        validate_name(new_name)?;
        let parent = entry
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| FsError::NoParent(entry.path.clone()))?;
        let new_path = parent.join(new_name.trim());
        move_path(&entry.path, &new_path, entry.is_directory)?;
        tracing::debug!(from = %entry.path.display(), to = %new_path.display(), "renamed");
        Ok(Refresh::new(current_dir))
    })();
    log_failure("rename", &entry.path, result)
}

/// Delete `entry`
///
/// Directories are removed recursively. Files are first opened exclusively
/// so a file held open elsewhere is left untouched.
///
/// # Errors
/// Returns `FsError` if the entry is a placeholder, the file is locked, or
/// the host refuses the removal.
pub fn delete(entry: &Entry, current_dir: &Path) -> Result<Refresh> {
    let result = (|| -> Result<Refresh> {
        ensure_real(entry)?;
        if entry.is_directory {
            std::fs::remove_dir_all(&entry.path).map_err(|e| FsError::io(&entry.path, e))?;
        } else {
            drop(open_exclusive(&entry.path).map_err(|e| FsError::io(&entry.path, e))?);
            std::fs::remove_file(&entry.path).map_err(|e| FsError::io(&entry.path, e))?;
        }
        tracing::debug!(path = %entry.path.display(), "deleted");
        Ok(Refresh::new(current_dir))
    })();
    log_failure("delete", &entry.path, result)
}

/// Create a folder named `name` inside `current_dir`
///
/// # Errors
/// Returns `FsError` if the name is invalid or the directory cannot be created.
pub fn create_folder(current_dir: &Path, name: &str) -> Result<Refresh> {
    let new_path = current_dir.join(name.trim());
    let result = validate_name(name).and_then(|()| {
        std::fs::create_dir_all(&new_path).map_err(|e| FsError::io(&new_path, e))?;
        tracing::debug!(path = %new_path.display(), "created folder");
        Ok(Refresh::new(current_dir))
    });
    log_failure("create_folder", &new_path, result)
}

/// Create an empty file named `name` inside `current_dir`
///
/// An existing file of the same name is truncated.
///
/// # Errors
/// Returns `FsError` if the name is invalid or the file cannot be created.
pub fn create_file(current_dir: &Path, name: &str) -> Result<Refresh> {
    let new_path = current_dir.join(name.trim());
    let result = validate_name(name).and_then(|()| {
        File::create(&new_path).map_err(|e| FsError::io(&new_path, e))?;
        tracing::debug!(path = %new_path.display(), "created file");
        Ok(Refresh::new(current_dir))
    });
    log_failure("create_file", &new_path, result)
}

fn batch_target(item: &Entry, destination: &Path) -> Result<PathBuf> {
    ensure_real(item)?;
    Ok(destination.join(&item.name))
}

/// Move every item into `destination`
///
/// Each item is moved on its own; a failure is recorded and the batch goes on.
pub fn move_batch(items: &[Entry], destination: &Path) -> BatchOutcome {
    let mut outcome = BatchOutcome::new(destination);
    for item in items {
        let result = batch_target(item, destination)
            .and_then(|target| move_path(&item.path, &target, item.is_directory));
        outcome.record(&item.path, log_failure("move", &item.path, result));
    }
    tracing::debug!(
        destination = %destination.display(),
        succeeded = outcome.succeeded,
        failed = outcome.failed(),
        "move batch finished"
    );
    outcome
}

/// Copy every item into `destination`, overwriting what is there
///
/// Directories are copied recursively. Each item is copied on its own; a
/// failure is recorded and the batch goes on.
pub fn copy_batch(items: &[Entry], destination: &Path) -> BatchOutcome {
    let mut outcome = BatchOutcome::new(destination);
    for item in items {
        let result = batch_target(item, destination).and_then(|target| {
            if item.is_directory {
                copy_tree(&item.path, &target).map(|_| ())
            } else {
                copy_file(&item.path, &target).map(|_| ())
            }
        });
        outcome.record(&item.path, log_failure("copy", &item.path, result));
    }
    tracing::debug!(
        destination = %destination.display(),
        succeeded = outcome.succeeded,
        failed = outcome.failed(),
        "copy batch finished"
    );
    outcome
}

/// Open `entry`: directories navigate, files go to the default application
///
/// # Errors
/// Returns `FsError` if the entry is a placeholder or the host cannot launch
/// a handler for the file.
pub fn open(entry: &Entry) -> Result<OpenOutcome> {
    let result = ensure_real(entry).and_then(|()| {
        if entry.is_directory {
            return Ok(OpenOutcome::Navigate(entry.path.clone()));
        }
        open::that(&entry.path).map_err(|e| FsError::io(&entry.path, e))?;
        Ok(OpenOutcome::Launched(entry.path.clone()))
    });
    log_failure("open", &entry.path, result)
}
