//! Error handling module for Reelcut

use thiserror::Error;

use crate::domain::errors::DomainError;

/// Main error type for Reelcut operations
#[derive(Error, Debug)]
pub enum ReelcutError {
    /// Probe concurrency must be a positive integer
    #[error("Invalid probe concurrency: {value}. Expected an integer of at least 1")]
    InvalidConcurrency { value: i64 },

    /// A probe worker task died outside the per-file boundary
    #[error("Probe worker failed: {message}")]
    WorkerFailed { message: String },

    /// Input folder or file not found
    #[error("Input not found: {path}")]
    InputNotFound { path: String },

    /// Configuration file or value error
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Error raised by a port or domain rule
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Directory traversal error
    #[error("Directory walk error: {0}")]
    WalkError(#[from] walkdir::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML parse error
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Result type alias for Reelcut operations
pub type ReelcutResult<T> = std::result::Result<T, ReelcutError>;
