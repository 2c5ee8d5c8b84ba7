//! Icon classification for listing entries
//!
//! Maps a file extension onto a display icon token. Image files are their own
//! icon: the classifier hands back the image path instead of a token so the
//! front end can render a thumbnail.
//!
//! Both functions are pure and never fail; an unreadable or missing extension
//! simply lands on [`UNKNOWN_ICON`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Token for directories
pub const FOLDER_ICON: &str = "folder";
/// Token for locations the browser cannot show (e.g. the recycle bin)
pub const UNSUPPORTED_ICON: &str = "recycle_bin";
/// Token for the placeholder shown when a directory cannot be read
pub const ERROR_ICON: &str = "error";
/// Token for extensions missing from the table
pub const UNKNOWN_ICON: &str = "unknown_icon";

/// Extensions treated as images, compared case-insensitively
pub const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "bmp", "gif"];

const ICON_TABLE: &[(&str, &str)] = &[
    ("txt", "text"),
    ("pdf", "pdf"),
    ("mp3", "audio"),
    ("mp4", "video"),
    ("mkv", "video"),
    ("zip", "zip"),
    ("rar", "rar"),
    ("exe", "exe"),
    ("doc", "word"),
    ("docx", "word"),
    ("xlsx", "excel"),
    ("pptx", "powerpoint"),
    ("py", "python"),
    ("js", "javascript"),
    ("java", "java"),
    ("cpp", "cplus"),
    ("c", "c"),
    ("cs", "csharp"),
    ("html", "html"),
    ("css", "css"),
    ("php", "php"),
    ("go", "go"),
    ("rb", "ruby"),
    ("swift", "swift"),
    ("sql", "sql"),
    ("mysql", "mysql"),
    ("xml", "xml"),
    ("json", "json"),
    ("csv", "csv"),
    ("yaml", "yaml"),
    ("yml", "yaml"),
    ("fxml", "fxml"),
    ("lua", "lua"),
    ("kt", "kotlin"),
    ("hs", "haskell"),
    ("r", "r"),
    ("dart", "dart"),
    ("md", "markdown"),
    ("7z", "sevenzip"),
    ("pkt", "packet"),
];

/// Display icon for an entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
    /// The entry is an image and serves as its own icon
    Image(PathBuf),
    /// A named icon from the token table
    Token(String),
}

impl Icon {
    #[must_use]
    pub fn token(token: &str) -> Self {
        Self::Token(token.to_string())
    }

    /// Token name, or `None` for image icons
    #[must_use]
    pub fn as_token(&self) -> Option<&str> {
        match self {
            Self::Token(t) => Some(t),
            Self::Image(_) => None,
        }
    }
}

fn lowercase_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}

/// Whether `path` has one of the [`IMAGE_EXTENSIONS`]
#[must_use]
pub fn is_image(path: &Path) -> bool {
    lowercase_extension(path).is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// Look up the icon token for an extension (without the leading dot)
#[must_use]
pub fn token_for_extension(extension: &str) -> &'static str {
    let extension = extension.to_ascii_lowercase();
    ICON_TABLE
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map_or(UNKNOWN_ICON, |(_, token)| token)
}

/// Classify a file path into its display icon
///
/// Images return [`Icon::Image`] carrying the path itself; everything else
/// is looked up in the extension table.
#[must_use]
pub fn classify(path: &Path) -> Icon {
    if is_image(path) {
        return Icon::Image(path.to_path_buf());
    }
    let token = lowercase_extension(path).map_or(UNKNOWN_ICON, |ext| token_for_extension(&ext));
    Icon::token(token)
}
