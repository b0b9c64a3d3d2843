//! Service error type.

use thiserror::Error;
use tracing::error;

use rd_core::{CoreError, FacilityId, UnitId};
use rd_store::StoreError;

/// Everything a proximity query or unit mutation can fail with.
///
/// Cache failures never appear here: the cache is fail-open and its errors
/// are absorbed inside the service.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Malformed or out-of-range input.  Raised before any store access.
    #[error("invalid input: {0}")]
    Validation(#[from] CoreError),

    #[error("facility {0} not found")]
    FacilityNotFound(FacilityId),

    #[error("unit {0} not found")]
    UnitNotFound(UnitId),

    /// The facility exists but no unit is currently available.
    #[error("no available unit for facility {0}")]
    NoAvailableUnit(FacilityId),

    #[error("backing store error: {0}")]
    BackingStore(StoreError),

    #[error("configuration error: {0}")]
    Config(String),
}

impl ServiceError {
    /// `true` for the variants an external surface reports as "not found".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ServiceError::FacilityNotFound(_)
                | ServiceError::UnitNotFound(_)
                | ServiceError::NoAvailableUnit(_)
        )
    }
}

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::UnitNotFound(id) => ServiceError::UnitNotFound(id),
            other                        => ServiceError::BackingStore(other),
        }
    }
}

/// Convert a store error, logging it if it is a genuine backend failure.
pub(crate) fn store_error(op: &'static str, e: StoreError) -> ServiceError {
    let e = ServiceError::from(e);
    if let ServiceError::BackingStore(inner) = &e {
        error!(op, error = %inner, "backing store failure");
    }
    e
}

pub type ServiceResult<T> = Result<T, ServiceError>;
