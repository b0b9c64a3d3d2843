//! Unit tests for rd-cache.

#[cfg(test)]
mod helpers {
    use std::sync::Arc;

    use rd_core::{FacilityId, GeoPoint, ManualClock, NearestUnit, ProximityResult, Timestamp, UnitId};

    use crate::MemoryCache;

    pub fn result(facility: u32, unit: u32, at: Timestamp) -> ProximityResult {
        ProximityResult {
            facility_id: FacilityId(facility),
            nearest_unit: NearestUnit {
                id:              UnitId(unit),
                identifier:      format!("AMB-{unit:03}"),
                distance_meters: 1_000 + unit as u64,
                position:        GeoPoint::new(9.0, 7.0),
            },
            computed_at: at,
        }
    }

    pub fn cache() -> (MemoryCache<Arc<ManualClock>>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::at_epoch());
        (MemoryCache::with_clock(clock.clone()), clock)
    }
}

// ── MemoryCache ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod memory {
    use std::time::Duration;

    use chrono::TimeDelta;

    use rd_core::{Clock, FacilityId};

    use super::helpers::{cache, result};
    use crate::{DEFAULT_TTL, ProximityCache};

    #[test]
    fn miss_then_hit() {
        let (c, clock) = cache();
        assert_eq!(c.get(FacilityId(1)).unwrap(), None);
        let r = result(1, 2, clock.now());
        c.set(FacilityId(1), r.clone(), DEFAULT_TTL).unwrap();
        assert_eq!(c.get(FacilityId(1)).unwrap(), Some(r));
    }

    #[test]
    fn entry_expires_at_ttl() {
        let (c, clock) = cache();
        c.set(FacilityId(1), result(1, 2, clock.now()), DEFAULT_TTL).unwrap();

        clock.advance(TimeDelta::seconds(299));
        assert!(c.get(FacilityId(1)).unwrap().is_some());

        clock.advance(TimeDelta::seconds(1));
        assert!(c.get(FacilityId(1)).unwrap().is_none(), "expired exactly at ttl");
    }

    #[test]
    fn get_does_not_extend_ttl() {
        let (c, clock) = cache();
        c.set(FacilityId(1), result(1, 2, clock.now()), Duration::from_secs(10)).unwrap();
        for _ in 0..9 {
            clock.advance(TimeDelta::seconds(1));
            assert!(c.get(FacilityId(1)).unwrap().is_some());
        }
        clock.advance(TimeDelta::seconds(1));
        assert!(c.get(FacilityId(1)).unwrap().is_none());
    }

    #[test]
    fn set_replaces_and_resets_expiry() {
        let (c, clock) = cache();
        c.set(FacilityId(1), result(1, 2, clock.now()), Duration::from_secs(10)).unwrap();
        clock.advance(TimeDelta::seconds(8));
        let newer = result(1, 3, clock.now());
        c.set(FacilityId(1), newer.clone(), Duration::from_secs(10)).unwrap();
        clock.advance(TimeDelta::seconds(8));
        assert_eq!(c.get(FacilityId(1)).unwrap(), Some(newer));
    }

    #[test]
    fn zero_ttl_is_immediately_expired() {
        let (c, clock) = cache();
        c.set(FacilityId(1), result(1, 2, clock.now()), Duration::ZERO).unwrap();
        assert!(c.get(FacilityId(1)).unwrap().is_none());
    }

    #[test]
    fn unrepresentable_ttl_never_expires() {
        let (c, clock) = cache();
        c.set(FacilityId(1), result(1, 2, clock.now()), Duration::MAX).unwrap();
        clock.advance(TimeDelta::days(365 * 100));
        assert!(c.get(FacilityId(1)).unwrap().is_some());
    }

    #[test]
    fn invalidate_all_clears_every_entry() {
        let (c, clock) = cache();
        for f in 1..=5 {
            c.set(FacilityId(f), result(f, 1, clock.now()), DEFAULT_TTL).unwrap();
        }
        assert_eq!(c.len(), 5);
        c.invalidate_all().unwrap();
        assert!(c.is_empty());
        for f in 1..=5 {
            assert!(c.get(FacilityId(f)).unwrap().is_none());
        }
    }

    #[test]
    fn invalidate_one_leaves_others() {
        let (c, clock) = cache();
        c.set(FacilityId(1), result(1, 1, clock.now()), DEFAULT_TTL).unwrap();
        c.set(FacilityId(2), result(2, 1, clock.now()), DEFAULT_TTL).unwrap();
        c.invalidate_one(FacilityId(1)).unwrap();
        assert!(c.get(FacilityId(1)).unwrap().is_none());
        assert!(c.get(FacilityId(2)).unwrap().is_some());
        // Unknown id is not an error.
        c.invalidate_one(FacilityId(99)).unwrap();
    }

    #[test]
    fn set_sweeps_expired_entries() {
        let (c, clock) = cache();
        c.set(FacilityId(1), result(1, 1, clock.now()), Duration::from_secs(5)).unwrap();
        c.set(FacilityId(2), result(2, 1, clock.now()), Duration::from_secs(50)).unwrap();
        clock.advance(TimeDelta::seconds(10));
        c.set(FacilityId(3), result(3, 1, clock.now()), DEFAULT_TTL).unwrap();
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn purge_expired_counts_removed() {
        let (c, clock) = cache();
        c.set(FacilityId(1), result(1, 1, clock.now()), Duration::from_secs(5)).unwrap();
        c.set(FacilityId(2), result(2, 1, clock.now()), Duration::from_secs(5)).unwrap();
        c.set(FacilityId(3), result(3, 1, clock.now()), Duration::from_secs(60)).unwrap();
        clock.advance(TimeDelta::seconds(6));
        assert_eq!(c.purge_expired(), 2);
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn stats_track_lookups() {
        let (c, clock) = cache();
        c.get(FacilityId(1)).unwrap();
        c.set(FacilityId(1), result(1, 1, clock.now()), Duration::from_secs(5)).unwrap();
        c.get(FacilityId(1)).unwrap();
        clock.advance(TimeDelta::seconds(5));
        c.get(FacilityId(1)).unwrap();
        c.invalidate_all().unwrap();

        let s = c.stats();
        assert_eq!((s.hits, s.misses, s.expired, s.writes, s.invalidations), (1, 2, 1, 1, 1));
        assert!((s.hit_rate() - 1.0 / 3.0).abs() < 1e-12);
    }
}

// ── Concurrency ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod concurrency {
    use std::sync::Arc;

    use rd_core::{Clock, FacilityId};

    use super::helpers::{cache, result};
    use crate::{DEFAULT_TTL, MemoryCache, ProximityCache};

    #[test]
    fn concurrent_readers_and_writers() {
        let (c, clock) = cache();
        let c = Arc::new(c);
        let now = clock.now();

        std::thread::scope(|s| {
            for t in 0..4u32 {
                let c = &c;
                s.spawn(move || {
                    for i in 0..500u32 {
                        let f = FacilityId(i % 16);
                        c.set(f, result(f.get(), t, now), DEFAULT_TTL).unwrap();
                        if let Some(r) = c.get(f).unwrap() {
                            assert_eq!(r.facility_id, f);
                        }
                    }
                });
            }
            s.spawn(|| {
                for _ in 0..100 {
                    c.invalidate_all().unwrap();
                }
            });
        });

        // Once every writer has finished, a final clear leaves nothing behind.
        c.invalidate_all().unwrap();
        for f in 0..16 {
            assert!(c.get(FacilityId(f)).unwrap().is_none());
        }
    }

    #[test]
    fn shared_through_trait_object() {
        let cache: Arc<dyn ProximityCache> = Arc::new(MemoryCache::new());
        let other = Arc::clone(&cache);
        let r = result(1, 1, chrono::Utc::now());
        cache.set(FacilityId(1), r.clone(), DEFAULT_TTL).unwrap();
        assert_eq!(other.get(FacilityId(1)).unwrap(), Some(r));
        other.invalidate_all().unwrap();
        assert!(cache.get(FacilityId(1)).unwrap().is_none());
    }
}

// ── NoopCache ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod noop {
    use rd_core::FacilityId;

    use super::helpers::result;
    use crate::{DEFAULT_TTL, NoopCache, ProximityCache};

    #[test]
    fn never_stores() {
        let c = NoopCache;
        c.set(FacilityId(1), result(1, 1, Default::default()), DEFAULT_TTL).unwrap();
        assert!(c.get(FacilityId(1)).unwrap().is_none());
        c.invalidate_all().unwrap();
        assert_eq!(c.stats(), Default::default());
    }
}
