//! `rd-store` — facility and unit stores for the response-dispatch core.
//!
//! The proximity core treats persistence as an external collaborator reached
//! only through the [`FacilityStore`] and [`UnitStore`] traits.  Two backends
//! are provided:
//!
//! | Feature   | Backend        | Notes                                        |
//! |-----------|----------------|----------------------------------------------|
//! | *(none)*  | [`MemoryStore`] | `parking_lot` locks over `BTreeMap`s        |
//! | `sqlite`  | `SqliteStore`  | single-file database via `rusqlite`          |
//!
//! [`loader`] reads seed facilities and units from CSV for either backend.

pub mod error;
pub mod loader;
pub mod memory;
pub mod store;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use error::{StoreError, StoreResult};
pub use loader::{load_facilities_csv, load_facilities_reader, load_units_csv, load_units_reader};
pub use memory::MemoryStore;
pub use store::{FacilityStore, UnitStore};

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;
