//! Ordering between cache-filling queries and cache-clearing mutations.
//!
//! A query reads a store snapshot, computes, then writes its answer to the
//! cache.  If a unit mutation and its `invalidate_all` both land between the
//! snapshot and the write, the late write would outlive the mutation.
//!
//! Queries hold a shared pass from before the snapshot until after the cache
//! write; the updater takes the exclusive side only around `invalidate_all`,
//! after its store write.  Queries never wait on each other, and cache hits
//! never touch the gate.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Orders query cache writes before a mutation's cache clear; clones share one lock.
#[derive(Clone, Debug, Default)]
pub struct MutationGate(Arc<RwLock<()>>);

impl MutationGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Held by a query while it recomputes and caches.
    pub fn pass(&self) -> RwLockReadGuard<'_, ()> {
        self.0.read()
    }

    /// Held by the updater while it clears the cache.
    pub fn close(&self) -> RwLockWriteGuard<'_, ()> {
        self.0.write()
    }
}
