//! Error types for the log search workflow.
//!
//! Every failure in the workflow is fatal: nothing here is retried, the
//! error bubbles up to the command line which reports it and exits non-zero.

#![warn(clippy::all, rust_2018_idioms)]

use std::fmt;
use std::path::PathBuf;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, LogSearchError>;

/// Errors raised while searching logs and writing execution files
#[derive(Debug)]
pub enum LogSearchError {
    /// A time boundary or event timestamp that cannot be interpreted
    InvalidTimestamp { input: String },
    /// The external command could not be started at all
    Spawn {
        program: String,
        source: std::io::Error,
    },
    /// The external command ran but exited unsuccessfully
    CommandFailed {
        command: String,
        status: Option<i32>,
        stderr: String,
    },
    /// The CloudWatch Logs API rejected a request
    Service { operation: String, message: String },
    /// The search response was not the JSON shape we expect
    MalformedResponse { context: String, message: String },
    /// Directory creation or file write failed
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl LogSearchError {
    pub fn invalid_timestamp(input: impl Into<String>) -> Self {
        LogSearchError::InvalidTimestamp {
            input: input.into(),
        }
    }

    pub fn malformed(context: impl Into<String>, message: impl fmt::Display) -> Self {
        LogSearchError::MalformedResponse {
            context: context.into(),
            message: message.to_string(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LogSearchError::Io {
            path: path.into(),
            source,
        }
    }
}

impl fmt::Display for LogSearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogSearchError::InvalidTimestamp { input } => {
                write!(
                    f,
                    "Invalid timestamp '{}': expected ISO-8601 or Unix milliseconds",
                    input
                )
            }
            LogSearchError::Spawn { program, source } => {
                write!(f, "Failed to execute '{}': {}", program, source)
            }
            LogSearchError::CommandFailed {
                command,
                status,
                stderr,
            } => {
                let status = status
                    .map(|code| code.to_string())
                    .unwrap_or_else(|| "signal".to_string());
                write!(f, "Command failed (exit {}): {}", status, command)?;
                if !stderr.is_empty() {
                    write!(f, "\n{}", stderr)?;
                }
                Ok(())
            }
            LogSearchError::Service { operation, message } => {
                write!(f, "CloudWatch Logs {} failed: {}", operation, message)
            }
            LogSearchError::MalformedResponse { context, message } => {
                write!(f, "Malformed response from {}: {}", context, message)
            }
            LogSearchError::Io { path, source } => {
                write!(f, "I/O error on {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for LogSearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LogSearchError::Spawn { source, .. } | LogSearchError::Io { source, .. } => {
                Some(source)
            }
            _ => None,
        }
    }
}
