//! The `ProximityCache` trait and the no-op implementation.

use std::time::Duration;

use rd_core::{FacilityId, ProximityResult};

use crate::{CacheResult, CacheStats};

/// How long a computed answer stays fresh when no mutation intervenes.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Facility-keyed store of computed nearest-unit answers.
///
/// Every method is atomic with respect to every other; in particular no
/// reader can observe a partially applied [`invalidate_all`](Self::invalidate_all).
///
/// Methods return `CacheResult` so that a remote backend can report being
/// unreachable; callers degrade any error to a miss.
///
/// # Example
///
/// ```
/// use rd_cache::{ProximityCache, NoopCache};
/// use rd_core::FacilityId;
///
/// fn lookup(cache: &dyn ProximityCache) {
///     match cache.get(FacilityId(1)) {
///         Ok(Some(hit)) => println!("cached: {}m", hit.nearest_unit.distance_meters),
///         Ok(None) | Err(_) => println!("recompute"),
///     }
/// }
/// lookup(&NoopCache);
/// ```
pub trait ProximityCache: Send + Sync {
    /// The stored answer, or `None` if absent or past its TTL.  Expired
    /// entries are indistinguishable from absent ones.
    fn get(&self, facility: FacilityId) -> CacheResult<Option<ProximityResult>>;

    /// Store or replace the answer for `facility`, expiring `ttl` from now.
    fn set(&self, facility: FacilityId, result: ProximityResult, ttl: Duration) -> CacheResult<()>;

    /// Drop every entry.  Called after any unit mutation.
    fn invalidate_all(&self) -> CacheResult<()>;

    /// Drop one facility's entry.
    fn invalidate_one(&self, facility: FacilityId) -> CacheResult<()>;

    /// Counters since construction.
    fn stats(&self) -> CacheStats {
        CacheStats::default()
    }
}

impl<T: ProximityCache + ?Sized> ProximityCache for std::sync::Arc<T> {
    fn get(&self, facility: FacilityId) -> CacheResult<Option<ProximityResult>> {
        (**self).get(facility)
    }

    fn set(&self, facility: FacilityId, result: ProximityResult, ttl: Duration) -> CacheResult<()> {
        (**self).set(facility, result, ttl)
    }

    fn invalidate_all(&self) -> CacheResult<()> {
        (**self).invalidate_all()
    }

    fn invalidate_one(&self, facility: FacilityId) -> CacheResult<()> {
        (**self).invalidate_one(facility)
    }

    fn stats(&self) -> CacheStats {
        (**self).stats()
    }
}

// ── NoopCache ─────────────────────────────────────────────────────────────────

/// A cache that never stores anything.  Every `get` misses and every write
/// succeeds, so every query recomputes.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopCache;

impl ProximityCache for NoopCache {
    fn get(&self, _facility: FacilityId) -> CacheResult<Option<ProximityResult>> {
        Ok(None)
    }

    fn set(&self, _facility: FacilityId, _result: ProximityResult, _ttl: Duration) -> CacheResult<()> {
        Ok(())
    }

    fn invalidate_all(&self) -> CacheResult<()> {
        Ok(())
    }

    fn invalidate_one(&self, _facility: FacilityId) -> CacheResult<()> {
        Ok(())
    }
}
