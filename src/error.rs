//! Error types for taskgrid
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad args, invalid field values, invalid config)
//! - 4: Operation failed (IO error, serialization failure)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the taskgrid CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for taskgrid operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid due date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Task id {0} already exists")]
    DuplicateTask(u64),

    #[error("No data directory available (set --data-file or TASKGRID_DATA_FILE)")]
    NoDataDir,

    // Operation failures (exit code 4)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Failed to write task blob {0}")]
    BlobWriteFailed(PathBuf),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            // User errors
            Error::InvalidConfig(_)
            | Error::InvalidArgument(_)
            | Error::InvalidDate(_)
            | Error::DuplicateTask(_)
            | Error::NoDataDir => exit_codes::USER_ERROR,

            // Operation failures
            Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::TomlSerialize(_)
            | Error::BlobWriteFailed(_)
            | Error::OperationFailed(_) => exit_codes::OPERATION_FAILED,
        }
    }
}

/// Result type alias for taskgrid operations
pub type Result<T> = std::result::Result<T, Error>;
