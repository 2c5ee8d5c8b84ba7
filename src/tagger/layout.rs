//! Project layout: where the tagger script and its sidecar files live
//!
//! The project root is found by walking a fixed number of parents above the
//! directory holding the running executable (for a cargo build that is
//! `target/<profile>`), unless the configuration names the root directly.
//! Everything the tagger needs sits in one directory below that root.

use super::error::TaggerError;
use crate::config::ShelfConfig;
use std::path::{Path, PathBuf};

/// Parents walked above the executable directory by default
pub const DEFAULT_PARENT_LEVELS: usize = 2;
/// Directory under the project root holding the tagger and its files
pub const DEFAULT_TAGGER_DIR: &str = "tagger";

const SCRIPT_NAME: &str = "tagger.py";
const IMAGE_DIR: &str = "images";
const OUTPUT_DIR: &str = "processed_images";
const EXCLUSION_STORE: &str = "NoTag.json";
const MANUAL_TAG_STORE: &str = "ManualTag.json";
const IMAGENET_LABELS: &str = "imagenet_classes.txt";
const COCO_LABELS: &str = "coco.names";

/// Resolved locations of the tagger and its sidecar files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
    tagger_dir: PathBuf,
}

impl ProjectLayout {
    /// Layout rooted at an explicit project directory
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, tagger_dir: impl AsRef<Path>) -> Self {
        let root = root.into();
        let tagger_dir = root.join(tagger_dir);
        Self { root, tagger_dir }
    }

    /// Walk `levels` parents above `exe_dir` to find the project root
    ///
    /// # Errors
    /// Returns `TaggerError::ProjectRoot` if `exe_dir` has fewer ancestors.
    pub fn from_executable_dir(
        exe_dir: &Path,
        levels: usize,
        tagger_dir: impl AsRef<Path>,
    ) -> Result<Self, TaggerError> {
        let root = exe_dir
            .ancestors()
            .nth(levels)
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| TaggerError::ProjectRoot {
                exe_dir: exe_dir.to_path_buf(),
                levels,
            })?;
        Ok(Self::new(root, tagger_dir))
    }

    /// Layout for the running binary, honouring configuration overrides
    ///
    /// # Errors
    /// Returns `TaggerError::Spawn` if the executable path is unavailable, or
    /// `TaggerError::ProjectRoot` if the root cannot be walked to.
    pub fn from_config(config: &ShelfConfig) -> Result<Self, TaggerError> {
        if let Some(root) = &config.project_root {
            return Ok(Self::new(root, &config.tagger_dir));
        }
        let exe = std::env::current_exe().map_err(|source| TaggerError::Spawn {
            program: "current executable".to_string(),
            source,
        })?;
        let exe_dir = exe.parent().unwrap_or(Path::new(""));
        Self::from_executable_dir(exe_dir, config.parent_levels, &config.tagger_dir)
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn tagger_dir(&self) -> &Path {
        &self.tagger_dir
    }

    /// Where the script is expected, whether or not it exists
    #[must_use]
    pub fn script_path(&self) -> PathBuf {
        self.tagger_dir.join(SCRIPT_NAME)
    }

    /// The script path, checked for existence
    ///
    /// # Errors
    /// Returns `TaggerError::ScriptNotFound` if no file is there.
    pub fn resolve_script_path(&self) -> Result<PathBuf, TaggerError> {
        let path = self.script_path();
        if path.is_file() {
            Ok(path)
        } else {
            Err(TaggerError::ScriptNotFound(path))
        }
    }

    #[must_use]
    pub fn image_dir(&self) -> PathBuf {
        self.tagger_dir.join(IMAGE_DIR)
    }

    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.tagger_dir.join(OUTPUT_DIR)
    }

    #[must_use]
    pub fn exclusion_store(&self) -> PathBuf {
        self.tagger_dir.join(EXCLUSION_STORE)
    }

    #[must_use]
    pub fn manual_tag_store(&self) -> PathBuf {
        self.tagger_dir.join(MANUAL_TAG_STORE)
    }

    /// Label files feeding the tag vocabulary, in load order
    #[must_use]
    pub fn label_files(&self) -> [PathBuf; 2] {
        [
            self.tagger_dir.join(IMAGENET_LABELS),
            self.tagger_dir.join(COCO_LABELS),
        ]
    }

    /// Whether `path` is the tagger output directory or lies below it
    #[must_use]
    pub fn is_output_location(&self, path: &Path) -> bool {
        path.starts_with(self.output_dir())
    }
}

/// Resolve the tagger script from the executable directory with defaults
///
/// # Errors
/// Returns `TaggerError::ProjectRoot` or `TaggerError::ScriptNotFound`.
pub fn resolve_script_path(exe_dir: &Path) -> Result<PathBuf, TaggerError> {
    ProjectLayout::from_executable_dir(exe_dir, DEFAULT_PARENT_LEVELS, DEFAULT_TAGGER_DIR)?
        .resolve_script_path()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{TestDir, create_test_file};

    #[test]
    fn test_walks_parents() {
        let layout = ProjectLayout::from_executable_dir(Path::new("/proj/target/debug"), 2, "tagger").unwrap();
        assert_eq!(layout.root(), Path::new("/proj"));
        assert_eq!(layout.script_path(), PathBuf::from("/proj/tagger/tagger.py"));
        assert_eq!(layout.exclusion_store(), PathBuf::from("/proj/tagger/NoTag.json"));
        assert_eq!(layout.manual_tag_store(), PathBuf::from("/proj/tagger/ManualTag.json"));
    }

    #[test]
    fn test_too_few_parents() {
        let err = ProjectLayout::from_executable_dir(Path::new("bin"), 3, "tagger").unwrap_err();
        assert!(matches!(err, TaggerError::ProjectRoot { levels: 3, .. }));
    }

    #[test]
    fn test_resolve_missing_script() {
        let dir = TestDir::new();
        let exe_dir = dir.join("target/debug");
        std::fs::create_dir_all(&exe_dir).unwrap();

        let err = resolve_script_path(&exe_dir).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_resolve_existing_script() {
        let dir = TestDir::new();
        let exe_dir = dir.join("target/debug");
        std::fs::create_dir_all(&exe_dir).unwrap();
        std::fs::create_dir_all(dir.join("tagger")).unwrap();
        create_test_file(dir.join("tagger/tagger.py")).unwrap();

        assert_eq!(resolve_script_path(&exe_dir).unwrap(), dir.join("tagger/tagger.py"));
    }

    #[test]
    fn test_output_location() {
        let layout = ProjectLayout::new("/proj", "tagger");
        assert!(layout.is_output_location(Path::new("/proj/tagger/processed_images/dog")));
        assert!(!layout.is_output_location(Path::new("/proj/tagger/images")));
    }

    #[test]
    fn test_from_config_uses_explicit_root() {
        let config = ShelfConfig {
            project_root: Some(PathBuf::from("/srv/shelf")),
            ..ShelfConfig::default()
        };
        let layout = ProjectLayout::from_config(&config).unwrap();
        assert_eq!(layout.image_dir(), PathBuf::from("/srv/shelf/tagger/images"));
    }
}
