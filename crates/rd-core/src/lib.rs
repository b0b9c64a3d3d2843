//! `rd-core` — foundational types for the response-dispatch proximity core.
//!
//! Every other `rd-*` crate depends on this one.  It has no `rd-*`
//! dependencies and only a handful of external ones (`chrono`, `serde`,
//! `thiserror`, `parking_lot`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`ids`]     | `FacilityId`, `UnitId`                                      |
//! | [`geo`]     | `GeoPoint`, haversine distance, coordinate validation       |
//! | [`model`]   | `Facility`, `MobileUnit`, `UnitStatus`, `UnitPosition`, `ProximityResult` |
//! | [`clock`]   | `Clock` trait, `SystemClock`, `ManualClock`                 |
//! | [`error`]   | `CoreError`, `CoreResult`                                   |

pub mod clock;
pub mod error;
pub mod geo;
pub mod ids;
pub mod model;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use clock::{Clock, ManualClock, SystemClock, Timestamp};
pub use error::{CoreError, CoreResult};
pub use geo::{EARTH_RADIUS_M, GeoPoint, parse_degrees};
pub use ids::{FacilityId, UnitId};
pub use model::{Facility, MobileUnit, NearestUnit, ProximityResult, UnitPosition, UnitStatus};
