//! The `FacilityStore` and `UnitStore` traits implemented by every backend.

use rd_core::{Facility, FacilityId, GeoPoint, MobileUnit, Timestamp, UnitId, UnitPosition, UnitStatus};

use crate::StoreResult;

/// Read-only access to provisioned facilities.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync`; one store instance is shared by
/// every concurrent request.
pub trait FacilityStore: Send + Sync {
    /// Look up one facility.  `Ok(None)` means the id is unknown; `Err` is a
    /// backend failure.
    fn facility(&self, id: FacilityId) -> StoreResult<Option<Facility>>;

    /// All facilities, ordered by id.
    fn facilities(&self) -> StoreResult<Vec<Facility>>;
}

/// Access to mobile units and their mutable position / status.
pub trait UnitStore: Send + Sync {
    /// Every unit whose status is `available`, ordered by id.
    fn list_available(&self) -> StoreResult<Vec<UnitPosition>>;

    /// All units regardless of status, ordered by identifier.
    fn units(&self) -> StoreResult<Vec<MobileUnit>>;

    /// Move a unit.  Coordinates and `updated_at` are written together in a
    /// single atomic step.
    ///
    /// # Errors
    ///
    /// [`StoreError::UnitNotFound`](crate::StoreError::UnitNotFound) if `id`
    /// does not exist.
    fn update_position(&self, id: UnitId, position: GeoPoint, at: Timestamp) -> StoreResult<MobileUnit>;

    /// Change a unit's availability, stamping `updated_at`.
    fn set_status(&self, id: UnitId, status: UnitStatus, at: Timestamp) -> StoreResult<MobileUnit>;
}
