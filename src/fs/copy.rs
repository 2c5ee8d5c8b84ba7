//! Overwriting file and directory copies
//!
//! Directory trees are walked iteratively with `walkdir`, so depth is bounded
//! by the heap rather than the call stack. Within each directory files are
//! copied before subdirectories are entered. Existing files at the
//! destination are always overwritten.

use super::error::FsError;
use std::path::Path;
use walkdir::WalkDir;

/// Copy a single file, replacing whatever is at `destination`
///
/// # Errors
/// Returns `FsError::Io` if the source cannot be read or the destination
/// cannot be written.
pub fn copy_file(source: &Path, destination: &Path) -> Result<u64, FsError> {
    if is_same_file(source, destination) {
        return Err(FsError::SameFile(destination.to_path_buf()));
    }
    std::fs::copy(source, destination).map_err(|e| FsError::io(source, e))
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Recursively copy `source` into `destination`
///
/// Creates `destination` (and any missing parents), then reproduces every
/// file and subdirectory below `source`. Symlinks are followed; a link loop
/// aborts the copy with `FsError::Walk`. Returns the number of files copied.
///
/// # Errors
/// Returns the first error met. Files copied before the failure stay in
/// place.
pub fn copy_tree(source: &Path, destination: &Path) -> Result<usize, FsError> {
    if destination.starts_with(source) {
        return Err(FsError::NestedDestination {
            origin: source.to_path_buf(),
            destination: destination.to_path_buf(),
        });
    }

    std::fs::create_dir_all(destination).map_err(|e| FsError::io(destination, e))?;

    let walker = WalkDir::new(source)
        .min_depth(1)
        .follow_links(true)
        .sort_by(|a, b| {
            a.file_type()
                .is_dir()
                .cmp(&b.file_type().is_dir())
                .then_with(|| a.file_name().cmp(b.file_name()))
        });

    let mut copied = 0;
    for entry in walker {
        let entry = entry?;
        let Ok(relative) = entry.path().strip_prefix(source) else {
            continue;
        };
        let target = destination.join(relative);

        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target).map_err(|e| FsError::io(&target, e))?;
        } else {
            copy_file(entry.path(), &target)?;
            copied += 1;
        }
    }

    Ok(copied)
}
