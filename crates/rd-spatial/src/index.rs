//! The `SpatialIndex` trait and the default linear-scan implementation.
//!
//! # Pluggability
//!
//! `rd-service` calls the nearest-unit search through [`SpatialIndex`], so a
//! tree-based implementation (see [`RTreeIndex`](crate::RTreeIndex)) can
//! replace the scan without touching the service.
//!
//! # Distance and ordering
//!
//! Candidates are ranked by unrounded haversine distance.  Two candidates at
//! exactly the same distance are ordered by `UnitId`, lowest first, so the
//! answer is deterministic regardless of the order the store returns rows.
//! The reported distance is rounded to the nearest whole metre.

use std::cmp::Ordering;

use rd_core::{GeoPoint, UnitId, UnitPosition};

// ── Nearest ───────────────────────────────────────────────────────────────────

/// The winning candidate of a nearest-unit query.
#[derive(Clone, Debug, PartialEq)]
pub struct Nearest {
    pub unit: UnitPosition,
    /// Haversine distance to the query point, rounded to whole metres.
    pub distance_m: u64,
}

// ── SpatialIndex trait ────────────────────────────────────────────────────────

/// Nearest-available-unit search.
///
/// `units` is the current candidate set, already restricted to available
/// units by the unit store.  Implementations must be pure: the same
/// candidates and point always give the same answer.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync`; one index is shared by every
/// concurrent request.
pub trait SpatialIndex: Send + Sync {
    /// Returns `None` when `units` is empty.
    fn nearest_available(&self, units: &[UnitPosition], point: GeoPoint) -> Option<Nearest>;

    /// Answer several query points against one candidate set.  Element `i`
    /// of the result answers `points[i]`.
    fn nearest_many(&self, units: &[UnitPosition], points: &[GeoPoint]) -> Vec<Option<Nearest>> {
        points.iter().map(|&p| self.nearest_available(units, p)).collect()
    }
}

impl<T: SpatialIndex + ?Sized> SpatialIndex for std::sync::Arc<T> {
    fn nearest_available(&self, units: &[UnitPosition], point: GeoPoint) -> Option<Nearest> {
        (**self).nearest_available(units, point)
    }

    fn nearest_many(&self, units: &[UnitPosition], points: &[GeoPoint]) -> Vec<Option<Nearest>> {
        (**self).nearest_many(units, points)
    }
}

// ── LinearScan ────────────────────────────────────────────────────────────────

/// O(n) scan over every candidate.  The default index.
#[derive(Copy, Clone, Debug, Default)]
pub struct LinearScan;

impl SpatialIndex for LinearScan {
    fn nearest_available(&self, units: &[UnitPosition], point: GeoPoint) -> Option<Nearest> {
        units
            .iter()
            .map(|u| (point.distance_m(u.position), u))
            .min_by(|a, b| rank(a.0, a.1.id, b.0, b.1.id))
            .map(|(d, u)| Nearest { unit: u.clone(), distance_m: d.round() as u64 })
    }
}

/// Order by distance, then by id on an exact distance tie.
#[inline]
pub(crate) fn rank(d_a: f64, id_a: UnitId, d_b: f64, id_b: UnitId) -> Ordering {
    d_a.total_cmp(&d_b).then(id_a.cmp(&id_b))
}
