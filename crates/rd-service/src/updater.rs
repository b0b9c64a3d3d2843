//! Unit mutations and the cache invalidation they trigger.

use std::sync::Arc;

use tracing::{info, warn};

use rd_cache::ProximityCache;
use rd_core::{Clock, GeoPoint, MobileUnit, UnitId, UnitStatus};
use rd_store::UnitStore;

use crate::error::store_error;
use crate::{MutationGate, PositionPayload, ServiceResult};

/// Moves units and changes their status.
///
/// Every successful mutation clears the whole proximity cache before the
/// call returns.  A position change can make any cached answer wrong, for
/// any facility, so there is no narrower invalidation.
pub struct PositionUpdater {
    pub(crate) units: Arc<dyn UnitStore>,
    pub(crate) cache: Arc<dyn ProximityCache>,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) gate:  MutationGate,
}

impl PositionUpdater {
    /// Move `unit` to (`latitude`, `longitude`).
    ///
    /// # Errors
    ///
    /// - [`ServiceError::Validation`](crate::ServiceError::Validation) for a
    ///   non-finite or out-of-range coordinate.  The store is not touched.
    /// - [`ServiceError::UnitNotFound`](crate::ServiceError::UnitNotFound)
    ///   for an unknown id.
    /// - [`ServiceError::BackingStore`](crate::ServiceError::BackingStore)
    ///   if the write fails.
    pub fn update_position(&self, unit: UnitId, latitude: f64, longitude: f64) -> ServiceResult<MobileUnit> {
        let position = GeoPoint::try_new(latitude, longitude)?;
        self.move_to(unit, position)
    }

    /// Validate a request body, then apply it as [`update_position`](Self::update_position).
    pub fn apply_payload(&self, unit: UnitId, payload: &PositionPayload) -> ServiceResult<MobileUnit> {
        let position = payload.validate()?;
        self.move_to(unit, position)
    }

    /// Mark `unit` available or unavailable.  Invalidates like a move.
    pub fn set_status(&self, unit: UnitId, status: UnitStatus) -> ServiceResult<MobileUnit> {
        let updated = self
            .units
            .set_status(unit, status, self.clock.now())
            .map_err(|e| store_error("set_status", e))?;

        info!(unit = %unit, status = %status, "unit status changed");
        self.invalidate();
        Ok(updated)
    }

    fn move_to(&self, unit: UnitId, position: GeoPoint) -> ServiceResult<MobileUnit> {
        let updated = self
            .units
            .update_position(unit, position, self.clock.now())
            .map_err(|e| store_error("update_position", e))?;

        info!(unit = %unit, identifier = %updated.identifier, position = %position, "unit moved");
        self.invalidate();
        Ok(updated)
    }

    fn invalidate(&self) {
        let _closed = self.gate.close();
        if let Err(e) = self.cache.invalidate_all() {
            warn!(error = %e, "proximity cache invalidation failed; cached answers expire with their ttl");
        }
    }
}
