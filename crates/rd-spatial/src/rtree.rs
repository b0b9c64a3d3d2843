//! R-tree backed nearest-unit search.
//!
//! # Geometry
//!
//! Units are indexed by their position on the unit sphere (`[x, y, z]`, see
//! [`GeoPoint::to_unit_vector`]).  Straight-line chord length between two
//! such points grows monotonically with great-circle distance, so the tree's
//! Euclidean nearest neighbour is also the haversine nearest neighbour, with
//! no distortion near the poles or the antimeridian.
//!
//! Chord and haversine are computed differently, so a last-bit disagreement
//! is possible between near-equal candidates.  Every candidate within a small
//! tolerance of the best chord is re-ranked by exact haversine distance and
//! then by id, which gives the same answer as [`LinearScan`](crate::LinearScan).

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use rd_core::{GeoPoint, UnitPosition};

use crate::index::rank;
use crate::{Nearest, SpatialIndex};

/// Relative and absolute slack (squared chord units) when collecting
/// near-tied candidates for re-ranking.
const TIE_REL: f64 = 1e-9;
const TIE_ABS: f64 = 1e-12;

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: a unit-sphere point plus the slot of the unit
/// in the snapshot's `units` vector.
#[derive(Clone)]
struct UnitEntry {
    point: [f64; 3],
    slot:  usize,
}

impl RTreeObject for UnitEntry {
    type Envelope = AABB<[f64; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for UnitEntry {
    /// Squared chord length.
    fn distance_2(&self, point: &[f64; 3]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        let dz = self.point[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

// ── UnitSnapshot ──────────────────────────────────────────────────────────────

/// A bulk-loaded R-tree over one candidate set.
///
/// Build once and query many times when the unit set is fixed for the
/// duration of a batch (e.g. answering every facility at once).
pub struct UnitSnapshot {
    units: Vec<UnitPosition>,
    tree:  RTree<UnitEntry>,
}

impl UnitSnapshot {
    /// O(n log n) bulk load.
    pub fn build(units: Vec<UnitPosition>) -> Self {
        let entries: Vec<UnitEntry> = units
            .iter()
            .enumerate()
            .map(|(slot, u)| UnitEntry { point: u.position.to_unit_vector(), slot })
            .collect();
        Self { tree: RTree::bulk_load(entries), units }
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Nearest unit to `point`; `None` only if the snapshot is empty.
    pub fn nearest(&self, point: GeoPoint) -> Option<Nearest> {
        let query = point.to_unit_vector();
        let mut iter = self.tree.nearest_neighbor_iter_with_distance_2(&query);

        let (first, best_d2) = iter.next()?;
        let limit = best_d2 * (1.0 + TIE_REL) + TIE_ABS;

        let mut best_slot = first.slot;
        let mut best_d = point.distance_m(self.units[first.slot].position);

        for (entry, d2) in iter {
            if d2 > limit {
                break;
            }
            let d = point.distance_m(self.units[entry.slot].position);
            if rank(d, self.units[entry.slot].id, best_d, self.units[best_slot].id).is_lt() {
                best_slot = entry.slot;
                best_d = d;
            }
        }

        Some(Nearest {
            unit:       self.units[best_slot].clone(),
            distance_m: best_d.round() as u64,
        })
    }

    /// Up to `k` nearest units, ascending by distance (ties by id).
    pub fn k_nearest(&self, point: GeoPoint, k: usize) -> Vec<Nearest> {
        let query = point.to_unit_vector();
        let mut found: Vec<(f64, &UnitPosition)> = self
            .tree
            .nearest_neighbor_iter(&query)
            .take(k)
            .map(|e| {
                let u = &self.units[e.slot];
                (point.distance_m(u.position), u)
            })
            .collect();
        found.sort_by(|a, b| rank(a.0, a.1.id, b.0, b.1.id));
        found
            .into_iter()
            .map(|(d, u)| Nearest { unit: u.clone(), distance_m: d.round() as u64 })
            .collect()
    }
}

// ── RTreeIndex ────────────────────────────────────────────────────────────────

/// [`SpatialIndex`] that answers each query from a freshly built
/// [`UnitSnapshot`].
///
/// A single query pays the O(n log n) bulk load, so this only beats
/// [`LinearScan`](crate::LinearScan) when one snapshot serves many points;
/// `nearest_many` builds the tree once per batch.
#[derive(Copy, Clone, Debug, Default)]
pub struct RTreeIndex;

impl SpatialIndex for RTreeIndex {
    fn nearest_available(&self, units: &[UnitPosition], point: GeoPoint) -> Option<Nearest> {
        UnitSnapshot::build(units.to_vec()).nearest(point)
    }

    fn nearest_many(&self, units: &[UnitPosition], points: &[GeoPoint]) -> Vec<Option<Nearest>> {
        let snapshot = UnitSnapshot::build(units.to_vec());
        points.iter().map(|&p| snapshot.nearest(p)).collect()
    }
}
