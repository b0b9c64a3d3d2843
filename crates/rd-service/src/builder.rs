//! Wiring stores, index, cache and clock into a matched service pair.

use std::sync::Arc;

use rd_cache::{MemoryCache, ProximityCache};
use rd_core::{Clock, SystemClock};
use rd_spatial::{LinearScan, SpatialIndex};
use rd_store::{FacilityStore, UnitStore};

use crate::{MutationGate, PositionUpdater, ProximityService, ServiceConfig};

/// The query side and the mutation side, sharing one cache.
pub struct Dispatch<I: SpatialIndex = LinearScan> {
    pub proximity: ProximityService<I>,
    pub positions: PositionUpdater,
}

/// Builds a [`Dispatch`].
///
/// Defaults: [`LinearScan`], an in-process [`MemoryCache`], the system
/// clock, and [`ServiceConfig::default`].
///
/// ```
/// use std::sync::Arc;
/// use rd_service::DispatchBuilder;
/// use rd_spatial::RTreeIndex;
/// use rd_store::MemoryStore;
///
/// let store = Arc::new(MemoryStore::new());
/// let dispatch = DispatchBuilder::new(store.clone(), store)
///     .index(RTreeIndex)
///     .build();
/// assert!(dispatch.proximity.nearest_units_for_all().unwrap().is_empty());
/// ```
pub struct DispatchBuilder<I: SpatialIndex = LinearScan> {
    facilities: Arc<dyn FacilityStore>,
    units:      Arc<dyn UnitStore>,
    index:      I,
    cache:      Option<Arc<dyn ProximityCache>>,
    clock:      Arc<dyn Clock>,
    config:     ServiceConfig,
}

impl DispatchBuilder<LinearScan> {
    pub fn new(facilities: Arc<dyn FacilityStore>, units: Arc<dyn UnitStore>) -> Self {
        Self {
            facilities,
            units,
            index:  LinearScan,
            cache:  None,
            clock:  Arc::new(SystemClock),
            config: ServiceConfig::default(),
        }
    }
}

impl<I: SpatialIndex> DispatchBuilder<I> {
    /// Replace the spatial index.
    pub fn index<J: SpatialIndex>(self, index: J) -> DispatchBuilder<J> {
        DispatchBuilder {
            facilities: self.facilities,
            units:      self.units,
            index,
            cache:      self.cache,
            clock:      self.clock,
            config:     self.config,
        }
    }

    pub fn cache(mut self, cache: Arc<dyn ProximityCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Clock used for `computed_at`, `updated_at`, and the default cache's
    /// expiry.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(mut self, config: ServiceConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Dispatch<I> {
        let cache: Arc<dyn ProximityCache> = match self.cache {
            Some(cache) => cache,
            None        => Arc::new(MemoryCache::with_clock(Arc::clone(&self.clock))),
        };
        let gate = MutationGate::new();

        Dispatch {
            proximity: ProximityService {
                facilities: self.facilities,
                units:      Arc::clone(&self.units),
                cache:      Arc::clone(&cache),
                index:      self.index,
                clock:      Arc::clone(&self.clock),
                gate:       gate.clone(),
                ttl:        self.config.cache_ttl,
            },
            positions: PositionUpdater {
                units: self.units,
                cache,
                clock: self.clock,
                gate,
            },
        }
    }
}
