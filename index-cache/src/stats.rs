//! Coordinator counters.
//!
//! Lock-free atomic counters recorded by [`IndexCache`](crate::IndexCache) and
//! copied into a serialisable snapshot on demand.
//!
//! ```text
//! IndexCache ─────► IndexCacheStats ─────► IndexCacheStatsSnapshot ─────► JSON / logs
//!                   (atomic counters)      (point-in-time copy)
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Live counters for one index's cache coordinator.
#[derive(Debug, Default)]
pub struct IndexCacheStats {
    segment_clears: AtomicU64,
    full_clears: AtomicU64,
    unreferenced_sweeps: AtomicU64,
    metadata_invalidations: AtomicU64,
    failures: AtomicU64,
}

impl IndexCacheStats {
    /// Create zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn segment_cleared(&self) {
        self.segment_clears.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn fully_cleared(&self) {
        self.full_clears.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn unreferenced_swept(&self) {
        self.unreferenced_sweeps.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn metadata_invalidated(&self) {
        self.metadata_invalidations.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn failed(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Take a point-in-time copy of all counters.
    pub fn snapshot(&self) -> IndexCacheStatsSnapshot {
        IndexCacheStatsSnapshot {
            segment_clears: self.segment_clears.load(Ordering::Relaxed),
            full_clears: self.full_clears.load(Ordering::Relaxed),
            unreferenced_sweeps: self.unreferenced_sweeps.load(Ordering::Relaxed),
            metadata_invalidations: self.metadata_invalidations.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`IndexCacheStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IndexCacheStatsSnapshot {
    /// Completed segment-scoped clears.
    pub segment_clears: u64,
    /// Completed full clears.
    pub full_clears: u64,
    /// Completed unreferenced sweeps.
    pub unreferenced_sweeps: u64,
    /// Query-parser clears triggered by metadata changes.
    pub metadata_invalidations: u64,
    /// Clear or close operations that surfaced a cache error.
    pub failures: u64,
}

impl IndexCacheStatsSnapshot {
    /// Render the snapshot as JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
