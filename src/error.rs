//! Error types for tend
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad args, unknown task id, invalid duration)
//! - 4: Operation failed (storage error, lock contention)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the tend CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for tend operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Task text is empty")]
    EmptyInput,

    #[error("Task not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid focus duration: {0}")]
    InvalidDuration(String),

    // History boundaries: surfaced as transient messages by the CLI,
    // never as process failures.
    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Nothing to redo")]
    NothingToRedo,

    // Operation failures (exit code 4)
    #[error("Storage unavailable at {path}: {reason}")]
    PersistenceUnavailable { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Lock acquisition failed: {0}")]
    LockFailed(PathBuf),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::EmptyInput
            | Error::NotFound(_)
            | Error::InvalidArgument(_)
            | Error::InvalidDuration(_)
            | Error::NothingToUndo
            | Error::NothingToRedo => exit_codes::USER_ERROR,

            Error::PersistenceUnavailable { .. }
            | Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::LockFailed(_)
            | Error::OperationFailed(_) => exit_codes::OPERATION_FAILED,
        }
    }

    /// True for the history boundaries that the CLI reports as a
    /// transient message with a success exit code.
    pub fn is_history_boundary(&self) -> bool {
        matches!(self, Error::NothingToUndo | Error::NothingToRedo)
    }

    /// Optional structured details for JSON error output
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::NotFound(id) => Some(serde_json::json!({ "id": id })),
            Error::PersistenceUnavailable { path, .. } => {
                Some(serde_json::json!({ "path": path.display().to_string() }))
            }
            _ => None,
        }
    }
}

/// Result type alias for tend operations
pub type Result<T> = std::result::Result<T, Error>;
