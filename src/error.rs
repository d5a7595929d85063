//! Error types for the sms-history library.
//!
//! Storage failures are split into a retryable [`HistoryError::StorageUnavailable`]
//! (pool exhausted, database busy or locked) and a non-retryable
//! [`HistoryError::Database`] so callers can decide whether to re-queue an event.

use rusqlite::ErrorCode;
use thiserror::Error;

/// Errors that can occur while reading or writing the contact history.
#[derive(Error, Debug)]
pub enum HistoryError {
    /// Input rejected before any storage I/O
    #[error("Validation error: {0}")]
    Validation(String),

    /// Backend unreachable, busy or timed out; safe to retry
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// No history record for the given phone number
    #[error("No history record for: {0}")]
    NotFound(String),

    /// Non-transient database error
    #[error("Database error: {0}")]
    Database(rusqlite::Error),

    /// Schema migration failed
    #[error("Migration error: {0}")]
    Migration(String),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Result with `HistoryError`
pub type Result<T> = std::result::Result<T, HistoryError>;

impl HistoryError {
    /// Whether the caller may retry the operation unchanged.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::StorageUnavailable(_))
    }
}

impl From<rusqlite::Error> for HistoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err.sqlite_error_code() {
            Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked | ErrorCode::CannotOpen) => {
                Self::StorageUnavailable(err.to_string())
            },
            _ => Self::Database(err),
        }
    }
}

impl From<r2d2::Error> for HistoryError {
    fn from(err: r2d2::Error) -> Self {
        Self::StorageUnavailable(err.to_string())
    }
}
