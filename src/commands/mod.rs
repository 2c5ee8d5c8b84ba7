//! Command implementations
//!
//! Each command module exposes functions that take parsed CLI args and a
//! [`Context`], run the operation through the core, and report through the
//! context's output writer.

pub mod browse;
pub mod clipboard;
pub mod config;
pub mod mutate;
pub mod tagger;

use crate::ShelfError;
use crate::config::ShelfConfig;
use crate::fs::{ItemFailure, Refresh};
use crate::ui::{OutputWriter, UserInput, format_failure};
use std::path::{Component, Path, PathBuf};

type Result<T> = std::result::Result<T, ShelfError>;

/// Everything a command needs besides its own arguments
pub struct Context<'a> {
    pub config: &'a ShelfConfig,
    pub output: &'a dyn OutputWriter,
    pub input: &'a dyn UserInput,
    /// Where the clipboard session is kept between invocations
    pub clipboard_file: PathBuf,
    pub quiet: bool,
    /// Skip every confirmation
    pub assume_yes: bool,
}

impl Context<'_> {
    /// Ask before a destructive or disruptive action
    ///
    /// Always yes with `--yes` or when confirmations are turned off in the
    /// config. A cancelled prompt counts as no.
    ///
    /// # Errors
    /// Returns `ShelfError::Input` if the prompt cannot be shown.
    pub fn confirm(&self, prompt: &str) -> Result<bool> {
        if self.assume_yes || !self.config.confirm_destructive {
            return Ok(true);
        }
        Ok(self.input.prompt_confirm(prompt, false)?.unwrap_or(false))
    }

    /// Informational line, dropped in quiet mode
    pub fn note(&self, message: &str) {
        if !self.quiet {
            self.output.info(message);
        }
    }

    /// Success line, dropped in quiet mode
    pub fn done(&self, message: &str) {
        if !self.quiet {
            self.output.success(message);
        }
    }

    fn refreshed(&self, refresh: Refresh) {
        refresh.notify(|dir| tracing::debug!(dir = %dir.display(), "refresh requested"));
    }

    fn report_failures(&self, failures: &[ItemFailure], total: usize) -> Result<()> {
        for failure in failures {
            self.output.error(&format_failure(failure));
        }
        if failures.is_empty() {
            Ok(())
        } else {
            Err(ShelfError::Incomplete {
                failed: failures.len(),
                total,
            })
        }
    }
}

/// `path` made absolute, or the process working directory when `None`
///
/// # Errors
/// Returns `ShelfError::IoError` if the working directory is unavailable.
pub fn dir_or_cwd(path: Option<&Path>) -> Result<PathBuf> {
    match path {
        Some(p) => Ok(resolve_parent_components(&std::path::absolute(p)?)),
        None => Ok(std::env::current_dir()?),
    }
}

/// Drop `..` components lexically so the parent of the result is what the
/// user expects
fn resolve_parent_components(path: &Path) -> PathBuf {
    let mut resolved = PathBuf::new();
    for component in path.components() {
        match component {
            Component::ParentDir => {
                resolved.pop();
            }
            Component::CurDir => {}
            other => resolved.push(other),
        }
    }
    resolved
}

/// Directory holding `path`, for re-listing after a mutation
fn containing_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::ui::{BufferedWriter, ScriptedInput};

    /// Owns what a [`Context`] borrows
    pub struct Harness {
        pub config: ShelfConfig,
        pub output: BufferedWriter,
        pub input: ScriptedInput,
        pub clipboard_file: PathBuf,
        pub assume_yes: bool,
    }

    impl Harness {
        pub fn new(clipboard_file: PathBuf) -> Self {
            Self {
                config: ShelfConfig::default(),
                output: BufferedWriter::new(),
                input: ScriptedInput::default(),
                clipboard_file,
                assume_yes: true,
            }
        }

        pub fn ctx(&self) -> Context<'_> {
            Context {
                config: &self.config,
                output: &self.output,
                input: &self.input,
                clipboard_file: self.clipboard_file.clone(),
                quiet: false,
                assume_yes: self.assume_yes,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::Harness;
    use super::*;
    use crate::ui::{Answer, ScriptedInput};

    #[test]
    fn test_confirm_skipped_with_yes() {
        let harness = Harness::new(PathBuf::from("clip.json"));
        assert!(harness.ctx().confirm("Delete?").unwrap());
        assert!(harness.input.prompts().is_empty());
    }

    #[test]
    fn test_confirm_asks_and_cancel_is_no() {
        let mut harness = Harness::new(PathBuf::from("clip.json"));
        harness.assume_yes = false;
        harness.input = ScriptedInput::new([Answer::Confirm(true), Answer::Cancel]);

        assert!(harness.ctx().confirm("First?").unwrap());
        assert!(!harness.ctx().confirm("Second?").unwrap());
        assert_eq!(harness.input.prompts(), vec!["First?", "Second?"]);
    }

    #[test]
    fn test_confirm_disabled_in_config() {
        let mut harness = Harness::new(PathBuf::from("clip.json"));
        harness.assume_yes = false;
        harness.config.confirm_destructive = false;
        assert!(harness.ctx().confirm("Delete?").unwrap());
    }

    #[test]
    fn test_containing_dir() {
        assert_eq!(containing_dir(Path::new("/a/b.txt")), PathBuf::from("/a"));
        assert_eq!(containing_dir(Path::new("b.txt")), PathBuf::from("."));
    }

    #[test]
    fn test_dir_or_cwd() {
        assert_eq!(dir_or_cwd(Some(Path::new("/x"))).unwrap(), PathBuf::from("/x"));
        assert!(dir_or_cwd(None).unwrap().is_absolute());
    }

    #[test]
    fn test_dir_or_cwd_makes_relative_paths_absolute() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(dir_or_cwd(Some(Path::new("sub"))).unwrap(), cwd.join("sub"));
        assert_eq!(dir_or_cwd(Some(Path::new("sub/./.."))).unwrap(), cwd);
    }
}
