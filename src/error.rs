//! Global error handling for repo2wc
//!
//! Only the command-line shell has fatal paths. Collection and tree building
//! recover locally, so most of these variants come from configuration and
//! export.

use std::io;
use thiserror::Error;

/// Global error type for repo2wc operations
#[derive(Error, Debug)]
pub enum Repo2WcError {
    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Path not found
    #[error("Path not found: {0}")]
    PathNotFound(String),
}

/// Specialized Result type for repo2wc operations
pub type Result<T> = std::result::Result<T, Repo2WcError>;

/// Creates a Repo2WcError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::Repo2WcError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}

// Lets the binary keep returning io::Result
impl From<Repo2WcError> for io::Error {
    fn from(err: Repo2WcError) -> Self {
        match err {
            Repo2WcError::Io(e) => e,
            Repo2WcError::PathNotFound(_) => io::Error::new(io::ErrorKind::NotFound, err.to_string()),
            other => io::Error::new(io::ErrorKind::Other, other.to_string()),
        }
    }
}
