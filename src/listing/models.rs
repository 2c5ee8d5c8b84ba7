//! Domain models for directory listings
//!
//! An [`Entry`] is one row of a listing snapshot. Entries are rebuilt from
//! scratch on every listing call; nothing about them survives a navigation.

use crate::icons::{self, ERROR_ICON, FOLDER_ICON, Icon, UNSUPPORTED_ICON};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Name of the placeholder returned for a location the browser cannot show
pub const UNSUPPORTED_LOCATION_NAME: &str = "Recycle Bin (Not Supported)";

/// Name of the placeholder returned when a directory cannot be enumerated
pub const LOAD_ERROR_NAME: &str = "Error loading directory";

/// A file or directory surfaced by a listing
///
/// `is_image` starts unresolved and is classified lazily, at most once, when
/// the front end first asks for it (see [`Entry::resolve_image`]). It
/// serializes as `null` until then.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    pub name: String,
    pub path: PathBuf,
    pub is_directory: bool,
    pub icon: Icon,
    #[serde(skip)]
    pub is_selected: bool,
    #[serde(default, serialize_with = "serialize_resolved", deserialize_with = "deserialize_resolved")]
    is_image: OnceLock<bool>,
}

fn serialize_resolved<S: Serializer>(flag: &OnceLock<bool>, serializer: S) -> Result<S::Ok, S::Error> {
    flag.get().copied().serialize(serializer)
}

fn deserialize_resolved<'de, D: Deserializer<'de>>(deserializer: D) -> Result<OnceLock<bool>, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.map_or_else(OnceLock::new, OnceLock::from))
}

impl Entry {
    /// Create a directory entry
    #[must_use]
    pub fn directory(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            is_directory: true,
            icon: Icon::token(FOLDER_ICON),
            is_selected: false,
            is_image: OnceLock::new(),
        }
    }

    /// Create a file entry, its icon taken from the extension table
    #[must_use]
    pub fn file(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            name: name.into(),
            icon: icons::classify(&path),
            path,
            is_directory: false,
            is_selected: false,
            is_image: OnceLock::new(),
        }
    }

    /// Build an entry for an existing path by inspecting the filesystem
    ///
    /// Used by front ends that receive paths rather than listing rows. Paths
    /// that cannot be inspected are treated as files.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        if path.is_dir() {
            Self::directory(name, path)
        } else {
            Self::file(name, path)
        }
    }

    /// Placeholder for a location the browser does not support
    #[must_use]
    pub fn unsupported_location() -> Self {
        Self::placeholder(UNSUPPORTED_LOCATION_NAME, UNSUPPORTED_ICON)
    }

    /// Placeholder for a directory that could not be read
    #[must_use]
    pub fn load_error() -> Self {
        Self::placeholder(LOAD_ERROR_NAME, ERROR_ICON)
    }

    fn placeholder(name: &str, icon: &str) -> Self {
        Self {
            name: name.to_string(),
            path: PathBuf::new(),
            is_directory: false,
            icon: Icon::token(icon),
            is_selected: false,
            is_image: OnceLock::from(false),
        }
    }

    /// Synthetic entries carry an empty path and cannot be acted upon
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.path.as_os_str().is_empty()
    }

    /// Current image flag; `false` until [`Entry::resolve_image`] has run
    #[must_use]
    pub fn is_image(&self) -> bool {
        self.is_image.get().copied().unwrap_or(false)
    }

    /// Whether the image flag has been classified yet
    #[must_use]
    pub fn is_image_resolved(&self) -> bool {
        self.is_image.get().is_some()
    }

    /// Classify the entry as image or not, caching the answer
    pub fn resolve_image(&self) -> bool {
        *self
            .is_image
            .get_or_init(|| !self.is_directory && icons::is_image(&self.path))
    }

    /// Would [`Entry::resolve_image`] answer `true`, without caching anything
    #[must_use]
    pub fn looks_like_image(&self) -> bool {
        !self.is_directory && !self.is_placeholder() && icons::is_image(&self.path)
    }
}

/// A named shortcut to a filesystem location
///
/// `path` is `None` for pseudo-locations the browser cannot open, such as the
/// recycle bin. Targets are resolved once at startup and never change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookmarkTarget {
    pub name: String,
    pub path: Option<PathBuf>,
    pub icon: String,
}

impl BookmarkTarget {
    #[must_use]
    pub fn new(name: &str, path: Option<PathBuf>, icon: &str) -> Self {
        Self {
            name: name.to_string(),
            path,
            icon: icon.to_string(),
        }
    }

    /// Whether the target can be listed
    #[must_use]
    pub const fn is_supported(&self) -> bool {
        self.path.is_some()
    }
}
