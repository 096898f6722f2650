//! Error types for chirp.

use thiserror::Error;

/// Common error type for chirp.
#[derive(Error, Debug)]
pub enum ChirpError {
    /// Database error.
    ///
    /// Wraps errors from the account store backend. sqlx errors are
    /// converted automatically.
    #[error("database error: {0}")]
    Database(String),

    /// Database connection error.
    #[error("database connection error: {0}")]
    DatabaseConnection(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error (fatal at startup).
    #[error("configuration error: {0}")]
    Config(String),

    /// Upstream collaborator error (image store).
    #[error("upstream error: {0}")]
    Upstream(String),
}

// Conversion from sqlx errors
impl From<sqlx::Error> for ChirpError {
    fn from(e: sqlx::Error) -> Self {
        ChirpError::Database(e.to_string())
    }
}

/// Convenience result type for chirp.
pub type Result<T> = std::result::Result<T, ChirpError>;
