//! Tagger-specific error types

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while locating or running the external tagger
#[derive(Debug, Error)]
pub enum TaggerError {
    /// The tagger script is not where the project layout says it is
    #[error("Tagger script not found at: {}", .0.display())]
    ScriptNotFound(PathBuf),

    /// The executable sits too close to the filesystem root to walk up from
    #[error("Failed to find project root {levels} level(s) above {}", .exe_dir.display())]
    ProjectRoot { exe_dir: PathBuf, levels: usize },

    /// The interpreter could not be started or its output could not be read
    #[error("Failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The script wrote to stderr; its exit code is not consulted
    #[error("Tagger script failed: {}", .stderr.trim_end())]
    Process { stderr: String, status: Option<i32> },
}

impl TaggerError {
    /// Whether this is the missing-script condition
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::ScriptNotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_script_not_found_display() {
        let error = TaggerError::ScriptNotFound(PathBuf::from("/proj/tagger/tagger.py"));
        assert_eq!(error.to_string(), "Tagger script not found at: /proj/tagger/tagger.py");
        assert!(error.is_not_found());
    }

    #[test]
    fn test_process_error_trims_trailing_newline() {
        let error = TaggerError::Process {
            stderr: "Traceback: boom\n".to_string(),
            status: Some(1),
        };
        assert_eq!(error.to_string(), "Tagger script failed: Traceback: boom");
        assert!(!error.is_not_found());
    }

    #[test]
    fn test_spawn_error_has_source() {
        let error = TaggerError::Spawn {
            program: "python".to_string(),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert!(error.source().is_some());
        assert!(error.to_string().starts_with("Failed to run 'python'"));
    }
}
