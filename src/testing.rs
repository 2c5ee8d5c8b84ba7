//! Testing utilities for pixshelf
//!
//! This module provides helper types and functions for writing tests,
//! including a `TestDir` wrapper for temporary directory fixtures.
//!
//! Only available when compiled with `cfg(test)`.

use crate::listing::Entry;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary directory that is removed when dropped
///
/// # Examples
/// ```ignore
/// let dir = TestDir::new();
/// create_test_file(dir.join("a.txt")).unwrap();
/// assert!(dir.join("a.txt").exists());
/// // Directory and contents removed when `dir` is dropped
/// ```
pub struct TestDir {
    inner: TempDir,
}

impl TestDir {
    /// Create a fresh, empty directory
    ///
    /// # Panics
    /// Panics if the directory cannot be created.
    pub fn new() -> Self {
        Self {
            inner: TempDir::new().expect("Failed to create test directory"),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.inner.path()
    }

    /// Path of `relative` inside the directory
    #[must_use]
    pub fn join(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.inner.path().join(relative)
    }
}

impl Default for TestDir {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a test file with default content
///
/// Creates a file at the specified path with "test content" written to it.
///
/// # Errors
/// Returns an `io::Error` if the file cannot be created or written.
pub fn create_test_file(path: impl AsRef<Path>) -> std::io::Result<()> {
    create_test_file_with_content(path, b"test content")
}

/// Create a test file with custom content
///
/// # Errors
/// Returns an `io::Error` if the file cannot be created or written.
pub fn create_test_file_with_content(path: impl AsRef<Path>, content: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(content)?;
    Ok(())
}

/// Entries for `paths`, each marked as selected
///
/// Paths that do not exist become file entries.
#[must_use]
pub fn selected_entries(paths: &[PathBuf]) -> Vec<Entry> {
    paths
        .iter()
        .map(|p| {
            let mut entry = Entry::from_path(p);
            entry.is_selected = true;
            entry
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dir_is_removed_on_drop() {
        let path = {
            let dir = TestDir::new();
            create_test_file(dir.join("file.txt")).unwrap();
            assert!(dir.join("file.txt").exists());
            dir.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn test_create_test_file_content() {
        let dir = TestDir::new();
        create_test_file(dir.join("a.txt")).unwrap();
        create_test_file_with_content(dir.join("b.bin"), &[1, 2, 3]).unwrap();

        assert_eq!(fs::read_to_string(dir.join("a.txt")).unwrap(), "test content");
        assert_eq!(fs::read(dir.join("b.bin")).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_selected_entries() {
        let dir = TestDir::new();
        fs::create_dir(dir.join("sub")).unwrap();

        let entries = selected_entries(&[dir.join("sub"), dir.join("ghost.txt")]);

        assert!(entries.iter().all(|e| e.is_selected));
        assert!(entries[0].is_directory);
        assert!(!entries[1].is_directory);
    }
}
