//! Error types for tuido
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (validation failure, unknown task id, bad args)
//! - 4: Operation failed (storage medium, terminal)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the tuido CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for tuido operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Task text must not be empty")]
    EmptyText,

    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid month '{0}': expected YYYY-MM")]
    InvalidMonth(String),

    #[error("Task not found: {0}")]
    TaskNotFound(i64),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Confirmation required to delete task {0} (pass --yes)")]
    ConfirmationRequired(i64),

    #[error("Invalid configuration in {path}: {message}")]
    InvalidConfig { path: PathBuf, message: String },

    // Operation failures (exit code 4)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No data directory available for this platform")]
    DataDirUnavailable,

    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::EmptyText
            | Error::InvalidDate(_)
            | Error::InvalidMonth(_)
            | Error::TaskNotFound(_)
            | Error::InvalidArgument(_)
            | Error::ConfirmationRequired(_)
            | Error::InvalidConfig { .. } => exit_codes::USER_ERROR,

            Error::Io(_)
            | Error::Json(_)
            | Error::DataDirUnavailable
            | Error::Terminal(_) => exit_codes::OPERATION_FAILED,
        }
    }

    /// Whether this error came from the storage medium rather than the user.
    ///
    /// Storage errors are recoverable: the in-memory change is kept, the
    /// error is surfaced, and the session stays interactive. Validation
    /// errors block the operation before any state changes.
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            Error::Io(_) | Error::Json(_) | Error::DataDirUnavailable
        )
    }
}

/// Result type alias for tuido operations
pub type Result<T> = std::result::Result<T, Error>;

/// Wrapper for displaying errors in JSON format
#[derive(serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub code: i32,
}

impl From<&Error> for JsonError {
    fn from(err: &Error) -> Self {
        JsonError {
            error: err.to_string(),
            code: err.exit_code(),
        }
    }
}
