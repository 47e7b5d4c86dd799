//! Error types for the library lookup core

use thiserror::Error;

/// Main application error type
///
/// Only the file-facing layers return these. The catalog and ledger turn them into
/// logged warnings and plain `bool`/`Option` results at their public boundary.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Build a parse error for a 1-based line number
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        AppError::Parse {
            line,
            message: message.into(),
        }
    }
}

impl From<tempfile::PersistError> for AppError {
    fn from(err: tempfile::PersistError) -> Self {
        AppError::Io(err.error)
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
