//! In-process TTL cache.
//!
//! One `parking_lot::RwLock` guards the whole map.  Each trait method takes
//! the lock exactly once, which makes every operation (including the full
//! clear in `invalidate_all`) atomic for concurrent readers.
//!
//! Expiry is lazy: `get` ignores entries past their deadline and `set`
//! sweeps them out while it already holds the write lock.

use std::collections::HashMap;
use std::time::Duration;

use chrono::TimeDelta;
use parking_lot::RwLock;
use tracing::debug;

use rd_core::{Clock, FacilityId, ProximityResult, SystemClock, Timestamp};

use crate::stats::Counters;
use crate::{CacheResult, CacheStats, ProximityCache};

struct Entry {
    result:     ProximityResult,
    /// `None` when `now + ttl` is not representable; such an entry never
    /// expires on its own.
    expires_at: Option<Timestamp>,
}

impl Entry {
    #[inline]
    fn is_live(&self, now: Timestamp) -> bool {
        self.expires_at.is_none_or(|t| now < t)
    }
}

/// [`ProximityCache`] held in process memory.
pub struct MemoryCache<C: Clock = SystemClock> {
    entries:  RwLock<HashMap<FacilityId, Entry>>,
    clock:    C,
    counters: Counters,
}

impl MemoryCache<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for MemoryCache<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> MemoryCache<C> {
    /// Use `clock` for expiry decisions.
    pub fn with_clock(clock: C) -> Self {
        Self {
            entries:  RwLock::new(HashMap::new()),
            clock,
            counters: Counters::default(),
        }
    }

    /// Number of stored entries, live or expired.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drop every expired entry and return how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, e| e.is_live(now));
        before - entries.len()
    }
}

impl<C: Clock> ProximityCache for MemoryCache<C> {
    fn get(&self, facility: FacilityId) -> CacheResult<Option<ProximityResult>> {
        let now = self.clock.now();
        let entries = self.entries.read();
        match entries.get(&facility) {
            Some(e) if e.is_live(now) => {
                self.counters.hit();
                Ok(Some(e.result.clone()))
            }
            Some(_) => {
                self.counters.miss(true);
                Ok(None)
            }
            None => {
                self.counters.miss(false);
                Ok(None)
            }
        }
    }

    fn set(&self, facility: FacilityId, result: ProximityResult, ttl: Duration) -> CacheResult<()> {
        let now = self.clock.now();
        let expires_at = TimeDelta::from_std(ttl)
            .ok()
            .and_then(|ttl| now.checked_add_signed(ttl));

        let mut entries = self.entries.write();
        entries.retain(|_, e| e.is_live(now));
        entries.insert(facility, Entry { result, expires_at });
        self.counters.write();
        Ok(())
    }

    fn invalidate_all(&self) -> CacheResult<()> {
        let cleared = {
            let mut entries = self.entries.write();
            let n = entries.len();
            entries.clear();
            n
        };
        self.counters.invalidation();
        debug!(cleared, "proximity cache cleared");
        Ok(())
    }

    fn invalidate_one(&self, facility: FacilityId) -> CacheResult<()> {
        let removed = self.entries.write().remove(&facility).is_some();
        self.counters.invalidation();
        debug!(facility = %facility, removed, "proximity cache entry invalidated");
        Ok(())
    }

    fn stats(&self) -> CacheStats {
        self.counters.snapshot()
    }
}
