//! Simple segment-keyed caches.
//!
//! One generic [`SimpleCache`] backs the filter, field-value and id roles. It
//! keeps every entry until its segment is cleared, swept as unreferenced, or
//! the whole cache is cleared. There is no size bound.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use super::store::SegmentStore;
use super::traits::{
    CacheError, DocIdSet, FieldValueCache, FieldValues, FilterCache, IdCache, SegmentScopedCache,
};
use crate::segment::Segment;

/// Filter cache keeping doc sets per segment.
pub type SimpleFilterCache = SimpleCache<DocIdSet>;

/// Field-value cache keeping loaded columns per segment.
pub type SimpleFieldValueCache = SimpleCache<FieldValues>;

/// Id cache keeping uid to doc mappings per segment.
pub type SimpleIdCache = SimpleCache<u32>;

/// Unbounded segment-keyed cache.
pub struct SimpleCache<V> {
    store: SegmentStore<String, V>,
    closed: AtomicBool,
}

impl<V: Clone> SimpleCache<V> {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            store: SegmentStore::new(),
            closed: AtomicBool::new(false),
        }
    }

    /// Total number of cached entries.
    pub fn entry_count(&self) -> usize {
        self.store.entry_count()
    }

    /// Number of segments with cached entries.
    pub fn segment_count(&self) -> usize {
        self.store.segment_count()
    }

    fn ensure_open(&self) -> Result<(), CacheError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(CacheError::Closed);
        }
        Ok(())
    }

    fn lookup(&self, segment: &Segment, key: &str) -> Option<V> {
        if self.closed.load(Ordering::Acquire) {
            return None;
        }
        self.store.get(segment, key)
    }

    fn put(&self, segment: &Segment, key: &str, value: V) -> Result<(), CacheError> {
        self.ensure_open()?;
        self.store.insert(segment, key.to_string(), value);
        Ok(())
    }
}

impl<V: Clone> Default for SimpleCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> SegmentScopedCache for SimpleCache<V>
where
    V: Clone + Send + Sync,
{
    fn type_name(&self) -> &'static str {
        "simple"
    }

    fn clear(&self) -> Result<(), CacheError> {
        self.ensure_open()?;
        self.store.clear();
        Ok(())
    }

    fn clear_segment(&self, segment: &Segment) -> Result<(), CacheError> {
        self.ensure_open()?;
        let removed = self.store.remove_segment(segment);
        debug!(segment = %segment.id(), removed, "Cleared segment entries");
        Ok(())
    }

    fn clear_unreferenced(&self) -> Result<(), CacheError> {
        self.ensure_open()?;
        let removed = self.store.remove_unreferenced();
        if removed > 0 {
            debug!(segments = removed, "Dropped unreferenced segments");
        }
        Ok(())
    }

    fn close(&self) -> Result<(), CacheError> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Err(CacheError::Closed);
        }
        self.store.clear();
        Ok(())
    }
}

impl FilterCache for SimpleCache<DocIdSet> {
    fn get(&self, segment: &Segment, filter_key: &str) -> Option<DocIdSet> {
        self.lookup(segment, filter_key)
    }

    fn insert(&self, segment: &Segment, filter_key: &str, docs: DocIdSet) -> Result<(), CacheError> {
        self.put(segment, filter_key, docs)
    }
}

impl FieldValueCache for SimpleCache<FieldValues> {
    fn get(&self, segment: &Segment, field: &str) -> Option<FieldValues> {
        self.lookup(segment, field)
    }

    fn insert(
        &self,
        segment: &Segment,
        field: &str,
        values: FieldValues,
    ) -> Result<(), CacheError> {
        self.put(segment, field, values)
    }
}

impl IdCache for SimpleCache<u32> {
    fn doc_id(&self, segment: &Segment, uid: &str) -> Option<u32> {
        self.lookup(segment, uid)
    }

    fn insert(&self, segment: &Segment, uid: &str, doc: u32) -> Result<(), CacheError> {
        self.put(segment, uid, doc)
    }
}
