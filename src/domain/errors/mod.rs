// Domain errors - Error types for the domain layer

use thiserror::Error;

/// Domain-specific error types returned across port boundaries
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Invalid arguments provided
    #[error("Bad arguments: {0}")]
    BadArgs(String),
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),
    /// Invalid file format
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    /// Invalid time range
    #[error("Invalid time range: {0}")]
    InvalidTimeRange(String),
    /// The media prober rejected a file
    #[error("{0}")]
    ProbeFailed(String),
    /// An external tool could not be started or exited unsuccessfully
    #[error("{tool} failed: {message}")]
    ToolFailed { tool: String, message: String },
    /// An external call did not finish in time
    #[error("Timed out after {seconds}s: {operation}")]
    Timeout { operation: String, seconds: u64 },
    /// File system operation failed
    #[error("File system error: {0}")]
    FsFail(String),
    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Shorthand for a failed external tool invocation
    pub fn tool(tool: &str, message: impl Into<String>) -> Self {
        DomainError::ToolFailed {
            tool: tool.to_string(),
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => DomainError::FileNotFound(err.to_string()),
            _ => DomainError::FsFail(err.to_string()),
        }
    }
}
