//! Configuration module for pixshelf
//!
//! Manages where the tagger project lives and how it is run, plus a few
//! front-end preferences. Configuration is stored in the user's config
//! directory as TOML.

mod setup;

pub use setup::first_time_setup;

use crate::tagger::{DEFAULT_INTERPRETER, DEFAULT_PARENT_LEVELS, DEFAULT_TAGGER_DIR};
use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Keys accepted by [`ShelfConfig::get`] and [`ShelfConfig::set`]
pub const KEYS: [&str; 6] = [
    "project_root",
    "parent_levels",
    "interpreter",
    "tagger_dir",
    "quiet",
    "confirm_destructive",
];

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ShelfConfig {
    /// Project directory holding the tagger; found from the executable when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_root: Option<PathBuf>,

    /// Parents walked above the executable directory to find the project
    #[serde(default = "default_parent_levels")]
    pub parent_levels: usize,

    /// Program used to run the tagger script
    #[serde(default = "default_interpreter")]
    pub interpreter: String,

    /// Tagger directory, relative to the project root
    #[serde(default = "default_tagger_dir")]
    pub tagger_dir: PathBuf,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,

    /// Ask before deleting, renaming or leaving a bookmarked directory
    #[serde(default = "default_true")]
    pub confirm_destructive: bool,
}

const fn default_parent_levels() -> usize {
    DEFAULT_PARENT_LEVELS
}

fn default_interpreter() -> String {
    DEFAULT_INTERPRETER.to_string()
}

fn default_tagger_dir() -> PathBuf {
    PathBuf::from(DEFAULT_TAGGER_DIR)
}

const fn default_true() -> bool {
    true
}

impl Default for ShelfConfig {
    fn default() -> Self {
        Self {
            project_root: None,
            parent_levels: default_parent_levels(),
            interpreter: default_interpreter(),
            tagger_dir: default_tagger_dir(),
            quiet: false,
            confirm_destructive: true,
        }
    }
}

impl ShelfConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("pixshelf").join("config.toml"))
    }

    /// Load configuration from file, creating default if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let default_config = Self::default();
            default_config.save_to(&config_path)?;
            return Ok(default_config);
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to an explicit file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file or its directory cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Load configuration, running first-time setup if config doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if loading or creating the configuration fails.
    pub fn load_or_setup() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            first_time_setup()
        }
    }

    /// Current value of `key` as text; `None` for unknown keys
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "project_root" => self
                .project_root
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
            "parent_levels" => self.parent_levels.to_string(),
            "interpreter" => self.interpreter.clone(),
            "tagger_dir" => self.tagger_dir.display().to_string(),
            "quiet" => self.quiet.to_string(),
            "confirm_destructive" => self.confirm_destructive.to_string(),
            _ => return None,
        };
        Some(value)
    }

    /// Parse `value` into `key`; an empty `project_root` unsets it
    ///
    /// Does not save.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for an unknown key or a value of the wrong type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |e: &dyn std::fmt::Display| {
            ConfigError::Message(format!("Invalid value '{value}' for '{key}': {e}"))
        };
        match key {
            "project_root" => {
                self.project_root = (!value.trim().is_empty()).then(|| PathBuf::from(value.trim()));
            }
            "parent_levels" => self.parent_levels = value.trim().parse().map_err(|e| invalid(&e))?,
            "interpreter" => {
                if value.trim().is_empty() {
                    return Err(invalid(&"interpreter cannot be empty"));
                }
                self.interpreter = value.trim().to_string();
            }
            "tagger_dir" => self.tagger_dir = PathBuf::from(value.trim()),
            "quiet" => self.quiet = value.trim().parse().map_err(|e| invalid(&e))?,
            "confirm_destructive" => {
                self.confirm_destructive = value.trim().parse().map_err(|e| invalid(&e))?;
            }
            _ => {
                return Err(ConfigError::Message(format!(
                    "Unknown config key '{key}' (expected one of: {})",
                    KEYS.join(", ")
                )));
            }
        }
        Ok(())
    }
}
