//! `rd-cache` — the proximity cache.
//!
//! Maps a facility id to its last computed nearest-unit answer.  Entries
//! expire after a TTL (default [`DEFAULT_TTL`], 300 s) and are cleared in full
//! whenever any unit moves or changes status.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`cache`]  | `ProximityCache` trait, `NoopCache`, `DEFAULT_TTL`        |
//! | [`memory`] | `MemoryCache` — `RwLock<HashMap>` with lazy TTL expiry    |
//! | [`stats`]  | `CacheStats` hit/miss counters                            |
//! | [`error`]  | `CacheError`, `CacheResult<T>`                            |

pub mod cache;
pub mod error;
pub mod memory;
pub mod stats;

#[cfg(test)]
mod tests;

pub use cache::{DEFAULT_TTL, NoopCache, ProximityCache};
pub use error::{CacheError, CacheResult};
pub use memory::MemoryCache;
pub use stats::CacheStats;
