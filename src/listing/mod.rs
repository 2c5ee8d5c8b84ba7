//! Directory listing
//!
//! Enumerates a directory into [`Entry`] rows: subdirectories first, then
//! files, each group sorted by name. Listing never fails. An unset path yields
//! the "unsupported location" placeholder and an unreadable directory yields
//! the load-error placeholder.

mod bookmarks;
mod models;

pub use bookmarks::{Navigation, default_bookmarks, find_bookmark, navigate_up};
pub use models::{BookmarkTarget, Entry, LOAD_ERROR_NAME, UNSUPPORTED_LOCATION_NAME};

use std::io;
use std::path::Path;

/// File that is never shown, compared case-insensitively
pub const HIDDEN_FILE: &str = "desktop.ini";

/// List the contents of `path`
///
/// `None` or an empty path means the location is not supported and returns a
/// single placeholder entry. Any enumeration failure is logged and replaced by
/// a single error placeholder.
#[must_use]
pub fn list_directory(path: Option<&Path>) -> Vec<Entry> {
    let Some(path) = path.filter(|p| !p.as_os_str().is_empty()) else {
        return vec![Entry::unsupported_location()];
    };

    match read_entries(path) {
        Ok(entries) => {
            tracing::debug!(path = %path.display(), count = entries.len(), "listed directory");
            entries
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to list directory");
            vec![Entry::load_error()]
        }
    }
}

fn read_entries(path: &Path) -> io::Result<Vec<Entry>> {
    let mut directories = Vec::new();
    let mut files = Vec::new();

    for dirent in std::fs::read_dir(path)? {
        let dirent = dirent?;
        let entry_path = dirent.path();
        let name = dirent.file_name().to_string_lossy().into_owned();

        if entry_path.is_dir() {
            directories.push(Entry::directory(name, entry_path));
        } else if !name.eq_ignore_ascii_case(HIDDEN_FILE) {
            files.push(Entry::file(name, entry_path));
        }
    }

    directories.sort_by(|a, b| a.name.cmp(&b.name));
    files.sort_by(|a, b| a.name.cmp(&b.name));
    directories.extend(files);
    Ok(directories)
}

/// Keep the entries whose name contains `query`, ignoring case
///
/// An empty query keeps everything.
#[must_use]
pub fn filter_entries(entries: &[Entry], query: &str) -> Vec<Entry> {
    let needle = query.to_lowercase();
    entries
        .iter()
        .filter(|e| e.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
