//! Bookmarked locations and upward navigation

use super::models::BookmarkTarget;
use std::path::{Path, PathBuf};

/// Result of asking to move to the parent directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Move to the parent directory
    Parent(PathBuf),
    /// The current directory is the active bookmark; the front end must
    /// confirm before leaving it
    ConfirmLeave { parent: PathBuf, bookmark: String },
    /// Already at a filesystem root (or no location at all)
    AtRoot,
}

/// Resolve the default bookmark set from the host environment
///
/// `tagged_images` is the tagger output directory. Special folders the host
/// cannot resolve are left out; the recycle bin is always present as an
/// unsupported target.
#[must_use]
pub fn default_bookmarks(tagged_images: Option<PathBuf>) -> Vec<BookmarkTarget> {
    let resolved = [
        ("Desktop", dirs::desktop_dir(), "desktop"),
        ("Downloads", dirs::download_dir(), "downloads"),
        ("Documents", dirs::document_dir(), "documents"),
        ("Pictures", dirs::picture_dir(), "pictures"),
        ("Tagged Images", tagged_images, "tagged_photos"),
        ("Music", dirs::audio_dir(), "music"),
        ("Videos", dirs::video_dir(), "videos"),
    ];

    let mut bookmarks: Vec<_> = resolved
        .into_iter()
        .filter_map(|(name, path, icon)| path.map(|p| BookmarkTarget::new(name, Some(p), icon)))
        .collect();
    bookmarks.push(BookmarkTarget::new("Recycle Bin", None, "bin"));
    bookmarks
}

/// Find a bookmark by name, ignoring case
#[must_use]
pub fn find_bookmark<'a>(bookmarks: &'a [BookmarkTarget], name: &str) -> Option<&'a BookmarkTarget> {
    bookmarks.iter().find(|b| b.name.eq_ignore_ascii_case(name))
}

/// Work out where "up" leads from `current`
///
/// Leaving the directory of the active bookmark is a disruptive action, so
/// the caller gets [`Navigation::ConfirmLeave`] instead of a plain parent.
#[must_use]
pub fn navigate_up(current: &Path, active: Option<&BookmarkTarget>) -> Navigation {
    let Some(parent) = current.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Navigation::AtRoot;
    };
    let parent = parent.to_path_buf();

    match active {
        Some(bookmark) if bookmark.path.as_deref() == Some(current) => Navigation::ConfirmLeave {
            parent,
            bookmark: bookmark.name.clone(),
        },
        _ => Navigation::Parent(parent),
    }
}
