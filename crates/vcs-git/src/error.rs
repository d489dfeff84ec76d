//! Error types for vcs-git

use std::borrow::Cow;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::command::Invocation;
use crate::runner::ProcessOutput;

/// Result type for vcs-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in vcs-git operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// The process outlived the configured timeout and was killed.
    ///
    /// Only the direct child is killed. Processes it spawned keep running, and
    /// the threads reading its output stay alive until they close the pipes.
    #[error("{message}: `{command}` timed out after {timeout:?}")]
    Timeout {
        message: String,
        command: String,
        timeout: Duration,
    },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// The captured tool failure, if this error came from a finished process.
    pub fn as_tool(&self) -> Option<&ToolError> {
        match self {
            Self::Tool(e) => Some(e),
            _ => None,
        }
    }
}

/// A git invocation that exited unsuccessfully.
///
/// Spawn failures land here too, with `exit_code == -1` and the spawn error
/// text as `stderr`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolError {
    /// Human readable description of the attempted operation
    pub message: String,

    /// Process exit code, `-1` when the process ended without one
    pub exit_code: i32,

    /// The resolved command line
    pub command: String,

    /// Working directory of the process, `None` for clone
    pub working_directory: Option<PathBuf>,

    /// Bytes the process wrote to stdout, unmodified
    pub stdout: Vec<u8>,

    /// Bytes the process wrote to stderr, unmodified
    pub stderr: Vec<u8>,
}

impl ToolError {
    pub fn new(message: impl Into<String>, invocation: &Invocation, output: ProcessOutput) -> Self {
        Self {
            message: message.into(),
            exit_code: output.exit_code,
            command: invocation.command_line(),
            working_directory: invocation.current_dir().map(PathBuf::from),
            stdout: output.stdout,
            stderr: output.stderr,
        }
    }

    /// Stdout decoded as UTF-8, invalid sequences replaced.
    pub fn stdout_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stdout)
    }

    /// Stderr decoded as UTF-8, invalid sequences replaced.
    pub fn stderr_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stderr)
    }
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: `{}` exited with code {}",
            self.message, self.command, self.exit_code
        )?;
        let stderr = self.stderr_text();
        let stderr = stderr.trim();
        if !stderr.is_empty() {
            write!(f, ": {}", stderr)?;
        }
        Ok(())
    }
}

impl std::error::Error for ToolError {}
