//! Nearest-unit queries, cache first.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use rd_cache::{CacheStats, ProximityCache};
use rd_core::{Clock, Facility, FacilityId, NearestUnit, ProximityResult};
use rd_spatial::{LinearScan, Nearest, SpatialIndex};
use rd_store::{FacilityStore, UnitStore};

use crate::error::store_error;
use crate::{MutationGate, ServiceError, ServiceResult};

/// Answers "which available unit is nearest to this facility?".
///
/// Construct through [`DispatchBuilder`](crate::DispatchBuilder), which wires
/// the same cache and gate into the matching [`PositionUpdater`](crate::PositionUpdater).
pub struct ProximityService<I: SpatialIndex = LinearScan> {
    pub(crate) facilities: Arc<dyn FacilityStore>,
    pub(crate) units:      Arc<dyn UnitStore>,
    pub(crate) cache:      Arc<dyn ProximityCache>,
    pub(crate) index:      I,
    pub(crate) clock:      Arc<dyn Clock>,
    pub(crate) gate:       MutationGate,
    pub(crate) ttl:        Duration,
}

impl<I: SpatialIndex> ProximityService<I> {
    /// The nearest available unit to `facility`.
    ///
    /// A cached answer is returned unchanged, `computed_at` included.  On a
    /// miss the answer is recomputed from the stores and cached for the
    /// configured TTL.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::FacilityNotFound`] for an unknown id.
    /// - [`ServiceError::NoAvailableUnit`] when no unit is available.  This
    ///   outcome is never cached.
    /// - [`ServiceError::BackingStore`] when a store call fails.
    ///
    /// Cache failures are not errors: they are logged and the answer is
    /// recomputed.
    pub fn nearest_unit_for(&self, facility: FacilityId) -> ServiceResult<ProximityResult> {
        match self.cache.get(facility) {
            Ok(Some(hit)) => {
                debug!(facility = %facility, "proximity cache hit");
                return Ok(hit);
            }
            Ok(None) => debug!(facility = %facility, "proximity cache miss"),
            Err(e)   => warn!(facility = %facility, error = %e, "proximity cache read failed; recomputing"),
        }

        let _pass = self.gate.pass();

        let site = self
            .facilities
            .facility(facility)
            .map_err(|e| store_error("facility", e))?
            .ok_or(ServiceError::FacilityNotFound(facility))?;

        let candidates = self.units.list_available().map_err(|e| store_error("list_available", e))?;
        let nearest = self
            .index
            .nearest_available(&candidates, site.position)
            .ok_or(ServiceError::NoAvailableUnit(facility))?;

        let result = self.stamp(facility, nearest);
        self.store(facility, &result);
        Ok(result)
    }

    /// Answer the query for every provisioned facility, ordered by facility
    /// id.  Facilities with no available unit are left out.
    ///
    /// Cached answers are reused; the remaining facilities are answered
    /// against one candidate snapshot.
    pub fn nearest_units_for_all(&self) -> ServiceResult<Vec<ProximityResult>> {
        let sites = self.facilities.facilities().map_err(|e| store_error("facilities", e))?;

        let mut answered: Vec<ProximityResult> = Vec::with_capacity(sites.len());
        let mut pending: Vec<&Facility> = Vec::new();
        for site in &sites {
            match self.cache.get(site.id) {
                Ok(Some(hit)) => answered.push(hit),
                Ok(None)      => pending.push(site),
                Err(e) => {
                    warn!(facility = %site.id, error = %e, "proximity cache read failed; recomputing");
                    pending.push(site);
                }
            }
        }

        if !pending.is_empty() {
            let _pass = self.gate.pass();
            let candidates = self.units.list_available().map_err(|e| store_error("list_available", e))?;
            let points: Vec<_> = pending.iter().map(|f| f.position).collect();

            for (site, nearest) in pending.iter().zip(self.index.nearest_many(&candidates, &points)) {
                let Some(nearest) = nearest else {
                    debug!(facility = %site.id, "no available unit");
                    continue;
                };
                let result = self.stamp(site.id, nearest);
                self.store(site.id, &result);
                answered.push(result);
            }
        }

        answered.sort_by_key(|r| r.facility_id);
        Ok(answered)
    }

    /// Counters of the underlying cache.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn cache_ttl(&self) -> Duration {
        self.ttl
    }

    pub fn index(&self) -> &I {
        &self.index
    }

    fn stamp(&self, facility: FacilityId, nearest: Nearest) -> ProximityResult {
        let Nearest { unit, distance_m } = nearest;
        ProximityResult {
            facility_id:  facility,
            nearest_unit: NearestUnit {
                id:              unit.id,
                identifier:      unit.identifier,
                distance_meters: distance_m,
                position:        unit.position,
            },
            computed_at: self.clock.now(),
        }
    }

    fn store(&self, facility: FacilityId, result: &ProximityResult) {
        if let Err(e) = self.cache.set(facility, result.clone(), self.ttl) {
            warn!(facility = %facility, error = %e, "proximity cache write failed");
        }
    }
}
