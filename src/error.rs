//! Error types for clubboard.

use thiserror::Error;

/// Common error type for clubboard.
#[derive(Error, Debug)]
pub enum BoardError {
    /// Database error.
    ///
    /// Errors from sqlx are converted into this variant with their message.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Identifier/password pair did not match.
    ///
    /// Unknown identifiers and wrong passwords share this variant so callers
    /// cannot tell them apart.
    #[error("invalid credentials")]
    InvalidCredential,

    /// No valid session was presented.
    #[error("authentication required")]
    Unauthenticated,

    /// Authenticated, but not allowed to touch the resource.
    #[error("permission denied: {0}")]
    Forbidden(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// A record with the same key already exists.
    #[error("{0} already exists")]
    Duplicate(String),

    /// Password hashing failure.
    #[error("password error: {0}")]
    Password(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for BoardError {
    fn from(e: sqlx::Error) -> Self {
        BoardError::Database(e.to_string())
    }
}

/// Result type alias for clubboard operations.
pub type Result<T> = std::result::Result<T, BoardError>;
