//! Terminal rendering of listing rows and batch results

use crate::fs::ItemFailure;
use crate::icons::Icon;
use crate::listing::{BookmarkTarget, Entry};
use colored::Colorize;

/// Short icon label: the token, or `image` for entries drawn as themselves
#[must_use]
pub fn icon_label(icon: &Icon) -> &str {
    icon.as_token().unwrap_or("image")
}

/// One listing row: `[icon] name`, directories suffixed with `/`
#[must_use]
pub fn format_entry(entry: &Entry) -> String {
    let label = format!("[{}]", icon_label(&entry.icon)).dimmed();
    let name = if entry.is_placeholder() {
        entry.name.red().to_string()
    } else if entry.is_directory {
        format!("{}/", entry.name).blue().bold().to_string()
    } else if entry.is_image() {
        entry.name.magenta().to_string()
    } else {
        entry.name.clone()
    };
    format!("{label} {name}")
}

/// One bookmark row: name and target, or a note that it cannot be opened
#[must_use]
pub fn format_bookmark(bookmark: &BookmarkTarget) -> String {
    let target = bookmark.path.as_ref().map_or_else(
        || "(not supported)".dimmed().to_string(),
        |p| p.display().to_string(),
    );
    format!("{:<16} {}", bookmark.name.bold(), target)
}

/// One failed batch item
#[must_use]
pub fn format_failure(failure: &ItemFailure) -> String {
    format!("{}: {}", failure.path.display(), failure.error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_icon_label() {
        assert_eq!(icon_label(&Icon::token("pdf")), "pdf");
        assert_eq!(icon_label(&Icon::Image(PathBuf::from("a.png"))), "image");
    }

    #[test]
    fn test_format_entry_contains_name() {
        let dir = Entry::directory("photos", "/home/u/photos");
        let row = format_entry(&dir);
        assert!(row.contains("photos/"));
        assert!(row.contains("folder"));

        let file = Entry::file("notes.txt", "/home/u/notes.txt");
        assert!(format_entry(&file).contains("notes.txt"));
    }

    #[test]
    fn test_format_unsupported_bookmark() {
        let bookmark = BookmarkTarget::new("Recycle Bin", None, "bin");
        assert!(format_bookmark(&bookmark).contains("not supported"));
    }
}
