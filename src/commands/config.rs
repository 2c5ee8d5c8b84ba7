//! Config commands: get, set, list

use super::Result;
use crate::ShelfError;
use crate::cli::ConfigCommands;
use crate::config::{KEYS, ShelfConfig};
use crate::ui::OutputWriter;
use std::path::Path;

/// Execute a config subcommand against `config`, saving to `config_path`
///
/// # Errors
/// Returns `ShelfError::InvalidInput` for malformed or unknown settings and
/// `ShelfError::ConfigError` if the file cannot be written.
pub fn execute(
    config: &mut ShelfConfig,
    config_path: &Path,
    command: &ConfigCommands,
    output: &dyn OutputWriter,
    quiet: bool,
) -> Result<()> {
    match command {
        ConfigCommands::Set { setting } => {
            let Some((key, value)) = setting.split_once('=') else {
                return Err(ShelfError::InvalidInput(
                    "Invalid format. Use: pixshelf config set key=value".into(),
                ));
            };
            let key = key.trim();
            config
                .set(key, value)
                .map_err(|e| ShelfError::InvalidInput(e.to_string()))?;
            config.save_to(config_path)?;
            if !quiet {
                output.success(&format!("Set {key} = {}", config.get(key).unwrap_or_default()));
            }
        }
        ConfigCommands::Get { key } => {
            let value = config.get(key).ok_or_else(|| {
                ShelfError::InvalidInput(format!(
                    "Unknown configuration key: '{key}'. Available keys: {}",
                    KEYS.join(", ")
                ))
            })?;
            output.write(&value);
        }
        ConfigCommands::List => {
            if !quiet {
                output.info(&format!("Config file: {}", config_path.display()));
            }
            for key in KEYS {
                output.write(&format!("{key} = {}", config.get(key).unwrap_or_default()));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestDir;
    use crate::ui::{BufferedWriter, MessageLevel};

    #[test]
    fn test_set_saves_and_get_reads() {
        let dir = TestDir::new();
        let path = dir.join("config.toml");
        let output = BufferedWriter::new();
        let mut config = ShelfConfig::default();

        let set = ConfigCommands::Set {
            setting: "interpreter=python3".into(),
        };
        execute(&mut config, &path, &set, &output, false).unwrap();

        assert_eq!(ShelfConfig::load_from(&path).unwrap().interpreter, "python3");

        let get = ConfigCommands::Get {
            key: "interpreter".into(),
        };
        execute(&mut config, &path, &get, &output, true).unwrap();
        assert_eq!(output.at_level(MessageLevel::Normal), vec!["python3"]);
    }

    #[test]
    fn test_set_requires_equals() {
        let dir = TestDir::new();
        let output = BufferedWriter::new();
        let set = ConfigCommands::Set {
            setting: "quiet".into(),
        };
        let err = execute(&mut ShelfConfig::default(), &dir.join("c.toml"), &set, &output, false).unwrap_err();
        assert!(matches!(err, ShelfError::InvalidInput(_)));
        assert!(!dir.join("c.toml").exists());
    }

    #[test]
    fn test_unknown_key() {
        let dir = TestDir::new();
        let output = BufferedWriter::new();
        let get = ConfigCommands::Get { key: "colour".into() };
        assert!(execute(&mut ShelfConfig::default(), &dir.join("c.toml"), &get, &output, false).is_err());
    }

    #[test]
    fn test_list_prints_every_key() {
        let dir = TestDir::new();
        let output = BufferedWriter::new();
        execute(&mut ShelfConfig::default(), &dir.join("c.toml"), &ConfigCommands::List, &output, true).unwrap();
        assert_eq!(output.at_level(MessageLevel::Normal).len(), KEYS.len());
    }
}
