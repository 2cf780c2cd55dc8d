//! Error types for mr-db

use thiserror::Error;

/// Database operation errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection error (D001)
    #[error("[D001] Database connection failed: {0}")]
    ConnectionError(String),

    /// Query execution error (D002)
    #[error("[D002] SQL execution failed: {0}")]
    ExecutionError(String),

    /// Credential rejected (D003)
    #[error("[D003] Request rejected (HTTP {status}): {message}")]
    Unauthorized { status: u16, message: String },

    /// RPC function not exposed by the backend (D004)
    #[error("[D004] RPC function not found: {0}")]
    RpcNotFound(String),

    /// Request timed out (D005)
    #[error("[D005] Request timed out: {0}")]
    Timeout(String),
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;

impl From<reqwest::Error> for DbError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DbError::Timeout(err.to_string())
        } else {
            DbError::ConnectionError(err.to_string())
        }
    }
}
