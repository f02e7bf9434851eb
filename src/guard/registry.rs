/*!
 * Handle Registry
 *
 * Tracks every live guard for accounting and leak detection
 */

use super::text::TextGuard;
use crate::abi::NativeLibrary;
use crate::core::limits::REGISTRY_INITIAL_CAPACITY;
use crate::core::types::{HandleId, RawAddress};
use crate::monitoring::Collector;
use ahash::RandomState;
use dashmap::DashMap;
use log::warn;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Link from a tracked guard back to its registry
pub(crate) struct Registration {
    pub(crate) registry: Arc<HandleRegistry>,
    pub(crate) id: HandleId,
}

/// Bookkeeping for one live handle
#[derive(Debug, Clone)]
pub struct HandleEntry {
    pub address: RawAddress,
    pub decoded_bytes: usize,
    created_at: Instant,
}

impl HandleEntry {
    /// Time this handle has been live, in microseconds
    pub fn age_micros(&self) -> u64 {
        self.created_at.elapsed().as_micros() as u64
    }
}

/// Serializable registry snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryStats {
    pub created: u64,
    pub released: u64,
    pub active: usize,
    pub decoded_bytes: u64,
}

impl RegistryStats {
    /// Serialize to JSON for exporters
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Registry of live handles
///
/// Guards created through [`HandleRegistry::adopt`] register on creation and
/// deregister on release, so at any point the registry knows exactly which
/// native addresses this process still owes a free for.
pub struct HandleRegistry {
    entries: DashMap<HandleId, HandleEntry, RandomState>,
    next_id: AtomicU64,
    created: AtomicU64,
    released: AtomicU64,
    decoded_bytes: AtomicU64,
    collector: Option<Arc<Collector>>,
}

impl HandleRegistry {
    /// Create a registry without observability
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Create a registry that reports through `collector`
    pub fn with_collector(collector: Arc<Collector>) -> Self {
        Self::build(Some(collector))
    }

    fn build(collector: Option<Arc<Collector>>) -> Self {
        Self {
            entries: DashMap::with_capacity_and_hasher(
                REGISTRY_INITIAL_CAPACITY,
                RandomState::new(),
            ),
            next_id: AtomicU64::new(1),
            created: AtomicU64::new(0),
            released: AtomicU64::new(0),
            decoded_bytes: AtomicU64::new(0),
            collector,
        }
    }

    /// Wrap a raw address in a tracked guard
    pub fn adopt(self: &Arc<Self>, address: RawAddress, library: Arc<dyn NativeLibrary>) -> TextGuard {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.entries.insert(
            id,
            HandleEntry {
                address,
                decoded_bytes: 0,
                created_at: Instant::now(),
            },
        );
        self.created.fetch_add(1, Ordering::Relaxed);

        TextGuard::registered(
            address,
            library,
            self.collector.clone(),
            Registration {
                registry: Arc::clone(self),
                id,
            },
        )
    }

    /// Record a completed decode for `id`
    pub(crate) fn record_decode(&self, id: HandleId, bytes: usize) {
        if let Some(mut entry) = self.entries.get_mut(&id) {
            entry.decoded_bytes = bytes;
        }
        self.decoded_bytes.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    /// Remove `id` after its guard released
    pub(crate) fn deregister(&self, id: HandleId) {
        if self.entries.remove(&id).is_some() {
            self.released.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Number of currently live handles
    pub fn active_count(&self) -> usize {
        self.entries.len()
    }

    /// Look up the entry for a live handle
    pub fn entry(&self, id: HandleId) -> Option<HandleEntry> {
        self.entries.get(&id).map(|e| e.value().clone())
    }

    /// Snapshot of registry counters
    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            created: self.created.load(Ordering::Relaxed),
            released: self.released.load(Ordering::Relaxed),
            active: self.entries.len(),
            decoded_bytes: self.decoded_bytes.load(Ordering::Relaxed),
        }
    }

    /// Report handles still live, typically at session teardown
    ///
    /// Returns the number of live handles. Live handles are not freed here;
    /// their guards still own the buffers.
    pub fn report_leaks(&self) -> usize {
        let count = self.entries.len();
        if count > 0 {
            warn!("{} native handles still live at leak sweep", count);
            for entry in self.entries.iter() {
                log::debug!(
                    "live handle {}: address {:#x}, age {}us",
                    entry.key(),
                    entry.address,
                    entry.age_micros()
                );
            }
            if let Some(ref collector) = self.collector {
                collector.handles_leaked(count as u64);
            }
        }
        count
    }
}

impl Default for HandleRegistry {
    fn default() -> Self {
        Self::new()
    }
}
