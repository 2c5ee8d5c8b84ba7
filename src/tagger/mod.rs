//! External tagger invocation
//!
//! The tagger is a script run by an interpreter as a child process with two
//! positional arguments: the image directory and the output directory. Its
//! stdout is the report; any stderr output marks the run as failed,
//! regardless of exit status.

mod error;
mod layout;

pub use error::TaggerError;
pub use layout::{DEFAULT_PARENT_LEVELS, DEFAULT_TAGGER_DIR, ProjectLayout, resolve_script_path};

use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Stdio};

/// Interpreter used when none is configured
pub const DEFAULT_INTERPRETER: &str = "python";

/// Runs tagger scripts through an interpreter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggerInvoker {
    interpreter: String,
}

impl Default for TaggerInvoker {
    fn default() -> Self {
        Self::new(DEFAULT_INTERPRETER)
    }
}

impl TaggerInvoker {
    #[must_use]
    pub fn new(interpreter: impl Into<String>) -> Self {
        Self {
            interpreter: interpreter.into(),
        }
    }

    #[must_use]
    pub fn interpreter(&self) -> &str {
        &self.interpreter
    }

    /// Run `script` with `args` and return everything it wrote to stdout
    ///
    /// Blocks until the child exits. Stdout and stderr are drained together,
    /// so a chatty script cannot stall on a full pipe.
    ///
    /// # Errors
    /// - `TaggerError::Spawn` if the interpreter cannot be started
    /// - `TaggerError::Process` if the script wrote anything to stderr
    pub fn execute<I, S>(&self, script: &Path, args: I) -> Result<String, TaggerError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        tracing::info!(interpreter = %self.interpreter, script = %script.display(), "running tagger");

        let mut command = Command::new(&self.interpreter);
        command
            .arg(script)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            const CREATE_NO_WINDOW: u32 = 0x0800_0000;
            command.creation_flags(CREATE_NO_WINDOW);
        }

        let output = command.output().map_err(|source| TaggerError::Spawn {
            program: self.interpreter.clone(),
            source,
        })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.is_empty() {
            tracing::warn!(status = ?output.status.code(), "tagger wrote to stderr");
            return Err(TaggerError::Process {
                stderr: stderr.into_owned(),
                status: output.status.code(),
            });
        }

        tracing::debug!(bytes = output.stdout.len(), "tagger finished");
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Locate the tagger script in `layout` and run it over `image_dir`
    ///
    /// # Errors
    /// Returns `TaggerError::ScriptNotFound` before anything is spawned if
    /// the script is missing, otherwise whatever [`Self::execute`] returns.
    pub fn run(
        &self,
        layout: &ProjectLayout,
        image_dir: &Path,
        output_dir: &Path,
    ) -> Result<String, TaggerError> {
        let script = layout.resolve_script_path()?;
        self.execute(&script, [image_dir.as_os_str(), output_dir.as_os_str()])
    }

    /// Like [`Self::run`], but folds every failure except a missing script
    /// into the returned text
    ///
    /// # Errors
    /// Returns `TaggerError::ScriptNotFound` if the script is missing.
    pub fn run_report(
        &self,
        layout: &ProjectLayout,
        image_dir: &Path,
        output_dir: &Path,
    ) -> Result<String, TaggerError> {
        match self.run(layout, image_dir, output_dir) {
            Err(e) if e.is_not_found() => Err(e),
            other => Ok(render_output(other)),
        }
    }
}

/// Text shown to the user for a finished run
#[must_use]
pub fn render_output(result: Result<String, TaggerError>) -> String {
    match result {
        Ok(stdout) => stdout,
        Err(e) => format!("Error: {e}"),
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::testing::{TestDir, create_test_file_with_content};

    fn shell() -> TaggerInvoker {
        TaggerInvoker::new("sh")
    }

    fn layout_with_script(dir: &TestDir, body: &str) -> ProjectLayout {
        let layout = ProjectLayout::new(dir.path(), DEFAULT_TAGGER_DIR);
        std::fs::create_dir_all(layout.tagger_dir()).unwrap();
        create_test_file_with_content(layout.script_path(), body.as_bytes()).unwrap();
        layout
    }

    #[test]
    fn test_stdout_is_returned() {
        let dir = TestDir::new();
        let layout = layout_with_script(&dir, "echo \"Hello from script\"\n");

        let out = shell().execute(&layout.script_path(), std::iter::empty::<&str>()).unwrap();
        assert_eq!(out, "Hello from script\n");
    }

    #[test]
    fn test_arguments_are_passed_in_order() {
        let dir = TestDir::new();
        let layout = layout_with_script(&dir, "echo \"$1|$2\"\n");

        let out = shell().run(&layout, Path::new("in"), Path::new("out")).unwrap();
        assert_eq!(out, "in|out\n");
    }

    #[test]
    fn test_stderr_fails_even_on_success_status() {
        let dir = TestDir::new();
        let layout = layout_with_script(&dir, "echo partial\necho oops >&2\nexit 0\n");

        let err = shell().run(&layout, Path::new("in"), Path::new("out")).unwrap_err();
        match err {
            TaggerError::Process { stderr, status } => {
                assert_eq!(stderr, "oops\n");
                assert_eq!(status, Some(0));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_nonzero_exit_without_stderr_is_success() {
        let dir = TestDir::new();
        let layout = layout_with_script(&dir, "echo done\nexit 3\n");

        assert_eq!(shell().run(&layout, Path::new("a"), Path::new("b")).unwrap(), "done\n");
    }

    #[test]
    fn test_missing_script_is_reported_before_spawning() {
        let dir = TestDir::new();
        let layout = ProjectLayout::new(dir.path(), DEFAULT_TAGGER_DIR);
        let invoker = TaggerInvoker::new("definitely-not-an-interpreter");

        let err = invoker.run_report(&layout, Path::new("a"), Path::new("b")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_missing_interpreter_is_rendered() {
        let dir = TestDir::new();
        let layout = layout_with_script(&dir, "echo hi\n");
        let invoker = TaggerInvoker::new("definitely-not-an-interpreter");

        let report = invoker.run_report(&layout, Path::new("a"), Path::new("b")).unwrap();
        assert!(report.starts_with("Error: Failed to run 'definitely-not-an-interpreter'"));
    }

    #[test]
    fn test_executing_nonexistent_script_renders_error() {
        let dir = TestDir::new();
        let script = dir.join("nonexistent/x.py");

        let result = shell().execute(&script, ["a", "b"]);
        assert!(matches!(result, Err(TaggerError::Process { .. })));

        let report = render_output(shell().execute(&script, ["a", "b"]));
        assert!(report.starts_with("Error"));
    }

    #[test]
    fn test_render_output() {
        assert_eq!(render_output(Ok("tagged 3 images".into())), "tagged 3 images");
        let rendered = render_output(Err(TaggerError::Process {
            stderr: "boom".into(),
            status: Some(1),
        }));
        assert_eq!(rendered, "Error: Tagger script failed: boom");
    }

    #[test]
    fn test_default_interpreter() {
        assert_eq!(TaggerInvoker::default().interpreter(), "python");
    }
}
