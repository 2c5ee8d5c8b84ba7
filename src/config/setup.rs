//! Interactive setup wizard for first-time configuration
//!
//! Runs when pixshelf starts without a config file.

use super::ShelfConfig;
use config::ConfigError;
use dialoguer::{Input, theme::ColorfulTheme};
use std::path::PathBuf;

/// Interactive first-time setup - prompts for the tagger project and interpreter
///
/// 1. Prompts for the project root (blank: locate it from the executable)
/// 2. Prompts for the interpreter that runs the tagger script
/// 3. Saves the configuration
///
/// # Errors
///
/// Returns `ConfigError` if user input cannot be read or the configuration
/// cannot be saved.
pub fn first_time_setup() -> Result<ShelfConfig, ConfigError> {
    println!("Welcome to pixshelf! Let's find your tagger project.\n");

    let defaults = ShelfConfig::default();

    let root: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Project root (leave blank to locate it from the executable)")
        .allow_empty(true)
        .interact_text()
        .map_err(|e| ConfigError::Message(format!("Failed to read input: {e}")))?;

    let interpreter: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Interpreter for the tagger script")
        .default(defaults.interpreter.clone())
        .interact_text()
        .map_err(|e| ConfigError::Message(format!("Failed to read input: {e}")))?;

    let config = ShelfConfig {
        project_root: (!root.trim().is_empty()).then(|| PathBuf::from(root.trim())),
        interpreter,
        ..defaults
    };

    config.save()?;

    println!("\nConfiguration saved successfully!");
    Ok(config)
}
