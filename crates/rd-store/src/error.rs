//! Error types for rd-store.

use thiserror::Error;

use rd_core::{CoreError, UnitId};

/// Errors raised by facility and unit store backends.
///
/// Everything except `UnitNotFound` is a backing-store failure from the
/// caller's point of view: it is surfaced, never retried inside the core.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unit {0} not found")]
    UnitNotFound(UnitId),

    #[error("unit identifier {0:?} already exists")]
    DuplicateIdentifier(String),

    #[error("invalid stored data: {0}")]
    InvalidData(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "sqlite")]
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl From<CoreError> for StoreError {
    fn from(e: CoreError) -> Self {
        StoreError::InvalidData(e.to_string())
    }
}

/// Alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;
