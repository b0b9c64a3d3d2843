//! Facilities, mobile units, and the derived proximity result.
//!
//! Serialized field names are camelCase with coordinates flattened to
//! `latitude` / `longitude`, which is the JSON shape callers consume.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{CoreError, FacilityId, GeoPoint, Timestamp, UnitId};

// ── Facility ──────────────────────────────────────────────────────────────────

/// A fixed-location facility.  Immutable once provisioned.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    pub id:      FacilityId,
    pub name:    String,
    pub address: String,
    #[serde(flatten)]
    pub position: GeoPoint,
}

// ── UnitStatus ────────────────────────────────────────────────────────────────

/// Availability of a mobile unit.  Only `Available` units are candidates for
/// the nearest-unit search.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitStatus {
    #[default]
    Available,
    Unavailable,
}

impl UnitStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            UnitStatus::Available   => "available",
            UnitStatus::Unavailable => "unavailable",
        }
    }

    #[inline]
    pub fn is_available(self) -> bool {
        self == UnitStatus::Available
    }
}

impl FromStr for UnitStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "available"   => Ok(UnitStatus::Available),
            "unavailable" => Ok(UnitStatus::Unavailable),
            other         => Err(CoreError::UnknownStatus(other.to_owned())),
        }
    }
}

impl fmt::Display for UnitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── MobileUnit ────────────────────────────────────────────────────────────────

/// A trackable response unit.
///
/// `position`, `status` and `updated_at` change only through the unit
/// store's position-update and status-change operations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MobileUnit {
    pub id:         UnitId,
    pub identifier: String,
    #[serde(flatten)]
    pub position:   GeoPoint,
    pub status:     UnitStatus,
    pub updated_at: Timestamp,
}

impl MobileUnit {
    /// Project to the candidate row used by the spatial index.
    pub fn to_position(&self) -> UnitPosition {
        UnitPosition {
            id:         self.id,
            identifier: self.identifier.clone(),
            position:   self.position,
        }
    }
}

/// An available unit as seen by the spatial index: identity and position only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnitPosition {
    pub id:         UnitId,
    pub identifier: String,
    #[serde(flatten)]
    pub position:   GeoPoint,
}

// ── ProximityResult ───────────────────────────────────────────────────────────

/// The nearest available unit to a facility, with its rounded distance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearestUnit {
    pub id:              UnitId,
    pub identifier:      String,
    pub distance_meters: u64,
    #[serde(flatten)]
    pub position:        GeoPoint,
}

/// A computed nearest-unit answer for one facility.
///
/// Never persisted on its own: it lives in the proximity cache until its TTL
/// elapses or a unit mutation invalidates the cache.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProximityResult {
    pub facility_id:  FacilityId,
    pub nearest_unit: NearestUnit,
    pub computed_at:  Timestamp,
}
