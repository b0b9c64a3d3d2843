//! `rd-service` — the proximity query and the unit updater that keeps its
//! cache honest.
//!
//! A [`ProximityService`] answers nearest-unit queries cache-first; a
//! [`PositionUpdater`] moves units and clears the cache after every write.
//! Both are built together by [`DispatchBuilder`] so they share one
//! [`ProximityCache`](rd_cache::ProximityCache).
//!
//! # Crate layout
//!
//! | Module        | Contents                                                 |
//! |---------------|----------------------------------------------------------|
//! | [`proximity`] | `ProximityService`                                       |
//! | [`updater`]   | `PositionUpdater`                                        |
//! | [`payload`]   | `PositionPayload`, `CoordinateInput` (request body)      |
//! | [`builder`]   | `DispatchBuilder`, `Dispatch`                            |
//! | [`config`]    | `ServiceConfig`, `from_env`                              |
//! | [`gate`]      | `MutationGate` query/invalidation ordering               |
//! | [`error`]     | `ServiceError`, `ServiceResult<T>`                       |
//!
//! # Logging
//!
//! Events go through `tracing`: cache hits/misses at `debug`, unit
//! mutations at `info`, absorbed cache failures at `warn`, store failures at
//! `error`.  Installing a subscriber is left to the binary.

pub mod builder;
pub mod config;
pub mod error;
pub mod gate;
pub mod payload;
pub mod proximity;
pub mod updater;


pub use builder::{Dispatch, DispatchBuilder};
pub use config::{CACHE_TTL_ENV, ServiceConfig};
pub use error::{ServiceError, ServiceResult};
pub use gate::MutationGate;
pub use payload::{CoordinateInput, PositionPayload};
pub use proximity::ProximityService;
pub use updater::PositionUpdater;
