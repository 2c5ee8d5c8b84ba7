//! User input abstraction layer
//!
//! Confirmation and text prompts go through [`UserInput`], backed by
//! `dialoguer` on a terminal and by [`ScriptedInput`] in tests.

use std::collections::VecDeque;
use std::io;
use std::sync::{Mutex, PoisonError};

/// Result type for user input operations
pub type Result<T> = std::result::Result<T, InputError>;

/// Errors that can occur during user input
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// IO error during input
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// No scripted answer was left for a prompt
    #[error("No answer available for prompt: {0}")]
    Exhausted(String),
}

/// Trait for user input operations
///
/// # Examples
///
/// ```no_run
/// use pixshelf::ui::input::{UserInput, DialoguerInput};
///
/// let input = DialoguerInput::new();
/// if let Some(true) = input.prompt_confirm("Delete files?", false).unwrap() {
///     println!("Deleting...");
/// }
/// ```
pub trait UserInput: Send + Sync {
    /// Prompt user for text input
    ///
    /// Returns `Ok(None)` if the user cancelled.
    fn prompt_text(&self, prompt: &str, default: Option<&str>) -> Result<Option<String>>;

    /// Prompt user for confirmation (yes/no)
    ///
    /// Returns `Ok(None)` if the user cancelled.
    fn prompt_confirm(&self, prompt: &str, default: bool) -> Result<Option<bool>>;
}

/// CLI-based user input using dialoguer
pub struct DialoguerInput {
    theme: dialoguer::theme::ColorfulTheme,
}

impl DialoguerInput {
    /// Create a new dialoguer-based input handler
    #[must_use]
    pub fn new() -> Self {
        Self {
            theme: dialoguer::theme::ColorfulTheme::default(),
        }
    }
}

impl Default for DialoguerInput {
    fn default() -> Self {
        Self::new()
    }
}

impl UserInput for DialoguerInput {
    fn prompt_text(&self, prompt: &str, default: Option<&str>) -> Result<Option<String>> {
        use dialoguer::Input;

        let mut input = Input::<String>::with_theme(&self.theme).with_prompt(prompt);

        if let Some(def) = default {
            input = input.default(def.to_string());
        }

        input
            .interact_text()
            .map(Some)
            .map_err(|e| InputError::Io(io::Error::other(e)))
    }

    fn prompt_confirm(&self, prompt: &str, default: bool) -> Result<Option<bool>> {
        use dialoguer::Confirm;

        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact_opt()
            .map_err(|e| InputError::Io(io::Error::other(e)))
    }
}

/// A prepared answer for [`ScriptedInput`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Text(String),
    Confirm(bool),
    Cancel,
}

/// Input that replays prepared answers in order
///
/// Useful for testing without requiring user interaction. Every prompt is
/// recorded so tests can check what was asked.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    answers: Mutex<VecDeque<Answer>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedInput {
    #[must_use]
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts shown so far, oldest first
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn next(&self, prompt: &str) -> Result<Answer> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(prompt.to_string());
        self.answers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .ok_or_else(|| InputError::Exhausted(prompt.to_string()))
    }
}

impl UserInput for ScriptedInput {
    fn prompt_text(&self, prompt: &str, default: Option<&str>) -> Result<Option<String>> {
        match self.next(prompt)? {
            Answer::Text(text) => Ok(Some(text)),
            Answer::Confirm(_) => Ok(default.map(str::to_string)),
            Answer::Cancel => Ok(None),
        }
    }

    fn prompt_confirm(&self, prompt: &str, default: bool) -> Result<Option<bool>> {
        match self.next(prompt)? {
            Answer::Confirm(yes) => Ok(Some(yes)),
            Answer::Text(_) => Ok(Some(default)),
            Answer::Cancel => Ok(None),
        }
    }
}
