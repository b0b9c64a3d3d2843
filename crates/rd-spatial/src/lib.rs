//! `rd-spatial` — nearest-available-unit search.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                    |
//! |-----------|-------------------------------------------------------------|
//! | [`index`] | `SpatialIndex` trait, `Nearest`, `LinearScan` (default)     |
//! | [`rtree`] | `RTreeIndex`, `UnitSnapshot` (R-tree via `rstar`)           |
//!
//! Both implementations return the same answer for the same input: the unit
//! with the smallest haversine distance, ties broken by lowest `UnitId`.

pub mod index;
pub mod rtree;


pub use index::{LinearScan, Nearest, SpatialIndex};
pub use rtree::{RTreeIndex, UnitSnapshot};
