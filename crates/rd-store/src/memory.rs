//! In-memory store backend.
//!
//! Facilities and units live in `BTreeMap`s behind `parking_lot::RwLock`s, so
//! reads run concurrently and every unit mutation happens under one write
//! lock (position and timestamp change together).

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;

use rd_core::{Facility, FacilityId, GeoPoint, MobileUnit, Timestamp, UnitId, UnitPosition, UnitStatus};

use crate::{FacilityStore, StoreError, StoreResult, UnitStore};

/// Implements both [`FacilityStore`] and [`UnitStore`] over process memory.
#[derive(Default)]
pub struct MemoryStore {
    facilities: RwLock<BTreeMap<FacilityId, Facility>>,
    units:      RwLock<BTreeMap<UnitId, MobileUnit>>,
    offline:    AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provision a facility.  Replaces any facility with the same id.
    pub fn insert_facility(&self, facility: Facility) -> StoreResult<()> {
        GeoPoint::try_new(facility.position.lat, facility.position.lon)?;
        self.facilities.write().insert(facility.id, facility);
        Ok(())
    }

    /// Provision a unit.
    ///
    /// # Errors
    ///
    /// - [`StoreError::DuplicateIdentifier`] if another unit already uses
    ///   `unit.identifier`.
    /// - [`StoreError::InvalidData`] if the id is taken or the position is
    ///   out of range.
    pub fn insert_unit(&self, unit: MobileUnit) -> StoreResult<()> {
        GeoPoint::try_new(unit.position.lat, unit.position.lon)?;

        let mut units = self.units.write();
        if units.contains_key(&unit.id) {
            return Err(StoreError::InvalidData(format!("{} already exists", unit.id)));
        }
        if units.values().any(|u| u.identifier == unit.identifier) {
            return Err(StoreError::DuplicateIdentifier(unit.identifier));
        }
        units.insert(unit.id, unit);
        Ok(())
    }

    /// Look up a unit by id.
    pub fn unit(&self, id: UnitId) -> StoreResult<Option<MobileUnit>> {
        self.check_online()?;
        Ok(self.units.read().get(&id).cloned())
    }

    /// Simulate an unreachable backend: while offline every trait method
    /// fails with [`StoreError::Unavailable`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> StoreResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable("memory store is offline".into()))
        } else {
            Ok(())
        }
    }

    fn mutate_unit(&self, id: UnitId, f: impl FnOnce(&mut MobileUnit)) -> StoreResult<MobileUnit> {
        self.check_online()?;
        let mut units = self.units.write();
        let unit = units.get_mut(&id).ok_or(StoreError::UnitNotFound(id))?;
        f(unit);
        Ok(unit.clone())
    }
}

impl FacilityStore for MemoryStore {
    fn facility(&self, id: FacilityId) -> StoreResult<Option<Facility>> {
        self.check_online()?;
        Ok(self.facilities.read().get(&id).cloned())
    }

    fn facilities(&self) -> StoreResult<Vec<Facility>> {
        self.check_online()?;
        Ok(self.facilities.read().values().cloned().collect())
    }
}

impl UnitStore for MemoryStore {
    fn list_available(&self) -> StoreResult<Vec<UnitPosition>> {
        self.check_online()?;
        Ok(self
            .units
            .read()
            .values()
            .filter(|u| u.status.is_available())
            .map(MobileUnit::to_position)
            .collect())
    }

    fn units(&self) -> StoreResult<Vec<MobileUnit>> {
        self.check_online()?;
        let mut all: Vec<MobileUnit> = self.units.read().values().cloned().collect();
        all.sort_by(|a, b| a.identifier.cmp(&b.identifier));
        Ok(all)
    }

    fn update_position(&self, id: UnitId, position: GeoPoint, at: Timestamp) -> StoreResult<MobileUnit> {
        GeoPoint::try_new(position.lat, position.lon)?;
        self.mutate_unit(id, |u| {
            u.position   = position;
            u.updated_at = at;
        })
    }

    fn set_status(&self, id: UnitId, status: UnitStatus, at: Timestamp) -> StoreResult<MobileUnit> {
        self.mutate_unit(id, |u| {
            u.status     = status;
            u.updated_at = at;
        })
    }
}
