//! Hit/miss counters.

use std::sync::atomic::{AtomicU64, Ordering};

/// Point-in-time copy of a cache's counters.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits:          u64,
    pub misses:        u64,
    /// Misses caused by an entry past its TTL (also counted in `misses`).
    pub expired:       u64,
    pub writes:        u64,
    /// Number of `invalidate_all` / `invalidate_one` calls.
    pub invalidations: u64,
}

impl CacheStats {
    /// Hits over lookups, or `0.0` before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        let lookups = self.hits + self.misses;
        if lookups == 0 {
            0.0
        } else {
            self.hits as f64 / lookups as f64
        }
    }
}

/// Lock-free counters shared by concurrent callers.
#[derive(Debug, Default)]
pub(crate) struct Counters {
    hits:          AtomicU64,
    misses:        AtomicU64,
    expired:       AtomicU64,
    writes:        AtomicU64,
    invalidations: AtomicU64,
}

impl Counters {
    pub fn hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn miss(&self, expired: bool) {
        self.misses.fetch_add(1, Ordering::Relaxed);
        if expired {
            self.expired.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn write(&self) {
        self.writes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn invalidation(&self) {
        self.invalidations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> CacheStats {
        CacheStats {
            hits:          self.hits.load(Ordering::Relaxed),
            misses:        self.misses.load(Ordering::Relaxed),
            expired:       self.expired.load(Ordering::Relaxed),
            writes:        self.writes.load(Ordering::Relaxed),
            invalidations: self.invalidations.load(Ordering::Relaxed),
        }
    }
}
