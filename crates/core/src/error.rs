//! Error types for s3c-core
//!
//! Provides a unified error type that can be converted to a process exit code.

use thiserror::Error;

/// Result type alias for s3c-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for s3c-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// No configuration file could be located
    #[error("{0}")]
    ConfigNotFound(String),

    /// Configuration file exists but could not be read or parsed
    #[error("Invalid config file: {0}")]
    ConfigParse(String),

    /// Region or credentials unusable by the storage SDK
    #[error("Invalid AWS configuration: {0}")]
    Auth(String),

    /// Local file missing or not a regular file
    #[error("File does not exist: {0}")]
    FileNotFound(String),

    /// Object key is empty after normalization
    #[error("Invalid object key: {0}")]
    InvalidKey(String),

    /// Failure reported by the storage service (head, put, list, delete)
    #[error("{0}")]
    Remote(String),

    /// Deleted object still visible when the waiter gave up
    #[error("Timed out waiting for deletion: {0}")]
    WaitTimeout(String),

    /// User declined to overwrite an existing object
    #[error("Upload cancelled.")]
    UploadCancelled,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// URL parsing error
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Error {
    /// Get the appropriate exit code for this error
    ///
    /// A declined overwrite is not a failure.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::UploadCancelled => 0,
            _ => 1,
        }
    }
}
