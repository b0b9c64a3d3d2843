//! Core error type.
//!
//! Everything here is a validation failure: malformed or out-of-range input
//! that is rejected before any store or cache is touched.  Sub-crates wrap
//! `CoreError` as one variant of their own enums.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    #[error("{field} {value} is out of range")]
    InvalidCoordinate { field: &'static str, value: f64 },

    #[error("{field} {input:?} is not a number")]
    Parse { field: &'static str, input: String },

    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("unknown unit status {0:?}")]
    UnknownStatus(String),
}

/// Shorthand result type for validation in `rd-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;
