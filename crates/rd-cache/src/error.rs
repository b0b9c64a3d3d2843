//! Cache error type.

use thiserror::Error;

/// Errors a cache backend can report.
///
/// Callers treat every variant as a miss and recompute: the cache is a
/// performance layer, never a source of truth.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheError {
    #[error("proximity cache unavailable: {message}")]
    Unavailable { message: String },
}

impl CacheError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        CacheError::Unavailable { message: message.into() }
    }
}

/// Alias for `Result<T, CacheError>`.
pub type CacheResult<T> = Result<T, CacheError>;
