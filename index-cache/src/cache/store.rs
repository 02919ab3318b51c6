//! Segment-keyed entry store shared by the simple cache implementations.
//!
//! Entries are grouped per segment instance. A group is keyed by the segment
//! id together with the segment's liveness token, so two segments that share
//! an id (a reopened reader, a recycled name) never see or clear each other's
//! entries. Each group remembers a [`SegmentRef`] so that
//! [`SegmentStore::remove_unreferenced`] can drop exactly the groups whose
//! segment no longer has a reader, and nothing else.

use std::hash::Hash;

use dashmap::DashMap;

use crate::segment::{Segment, SegmentId, SegmentRef};

/// Identity of one segment instance.
type GroupKey = (SegmentId, usize);

fn group_key(segment: &Segment) -> GroupKey {
    (segment.id(), segment.token())
}

struct SegmentEntries<K, V> {
    segment: SegmentRef,
    entries: DashMap<K, V>,
}

impl<K: Eq + Hash, V> SegmentEntries<K, V> {
    fn new(segment: &Segment) -> Self {
        Self {
            segment: segment.downgrade(),
            entries: DashMap::new(),
        }
    }
}

/// Concurrent map of `segment -> key -> value`.
pub struct SegmentStore<K, V> {
    segments: DashMap<GroupKey, SegmentEntries<K, V>>,
}

impl<K, V> SegmentStore<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            segments: DashMap::new(),
        }
    }

    /// Look up `key` within `segment`.
    pub fn get<Q>(&self, segment: &Segment, key: &Q) -> Option<V>
    where
        K: std::borrow::Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let slot = self.segments.get(&group_key(segment))?;
        if !slot.segment.refers_to(segment) {
            return None;
        }
        slot.entries.get(key).map(|entry| entry.value().clone())
    }

    /// Store `value` under `key` within `segment`.
    pub fn insert(&self, segment: &Segment, key: K, value: V) {
        let mut slot = self
            .segments
            .entry(group_key(segment))
            .or_insert_with(|| SegmentEntries::new(segment));
        // A group's Weak pins its token, so a mismatch means the group was
        // never this segment's.
        if !slot.segment.refers_to(segment) {
            *slot = SegmentEntries::new(segment);
        }
        slot.entries.insert(key, value);
    }

    /// Remove every entry of `segment`. Returns the number of entries dropped.
    ///
    /// Other segments sharing its id are untouched.
    pub fn remove_segment(&self, segment: &Segment) -> usize {
        self.segments
            .remove_if(&group_key(segment), |_, slot| slot.segment.refers_to(segment))
            .map(|(_, slot)| slot.entries.len())
            .unwrap_or(0)
    }

    /// Remove groups whose segment has no live reader. Returns the number of
    /// segments dropped.
    pub fn remove_unreferenced(&self) -> usize {
        let before = self.segments.len();
        self.segments.retain(|_, slot| slot.segment.is_live());
        before.saturating_sub(self.segments.len())
    }

    /// Remove everything.
    pub fn clear(&self) {
        self.segments.clear();
    }

    /// Number of segment instances with cached entries.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Total number of entries across all segments.
    pub fn entry_count(&self) -> usize {
        self.segments.iter().map(|slot| slot.entries.len()).sum()
    }
}

impl<K, V> Default for SegmentStore<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_store_insert_and_get() {
        let store: SegmentStore<String, u32> = SegmentStore::new();
        let segment = Segment::new(1);

        store.insert(&segment, "a".to_string(), 10);

        assert_eq!(store.get(&segment, "a"), Some(10));
        assert_eq!(store.get(&segment, "b"), None);
        assert_eq!(store.entry_count(), 1);
    }

    #[test]
    fn test_store_segments_are_isolated() {
        let store: SegmentStore<String, u32> = SegmentStore::new();
        let first = Segment::new(1);
        let second = Segment::new(2);

        store.insert(&first, "a".to_string(), 1);
        store.insert(&second, "a".to_string(), 2);

        assert_eq!(store.remove_segment(&first), 1);
        assert_eq!(store.get(&first, "a"), None);
        assert_eq!(store.get(&second, "a"), Some(2));
    }

    #[test]
    fn test_store_remove_unreferenced_keeps_live_segments() {
        let store: SegmentStore<String, u32> = SegmentStore::new();
        let live = Segment::new(1);
        let dead = Segment::new(2);

        store.insert(&live, "a".to_string(), 1);
        store.insert(&dead, "a".to_string(), 2);
        drop(dead);

        assert_eq!(store.remove_unreferenced(), 1);
        assert_eq!(store.segment_count(), 1);
        assert_eq!(store.get(&live, "a"), Some(1));
    }

    #[test]
    fn test_store_ignores_dead_group_with_reused_id() {
        let store: SegmentStore<String, u32> = SegmentStore::new();
        let old = Segment::new(9);
        store.insert(&old, "stale".to_string(), 1);
        drop(old);

        let reopened = Segment::new(9);
        assert_eq!(store.get(&reopened, "stale"), None);

        store.insert(&reopened, "fresh".to_string(), 2);
        assert_eq!(store.get(&reopened, "stale"), None);
        assert_eq!(store.get(&reopened, "fresh"), Some(2));

        assert_eq!(store.remove_unreferenced(), 1);
        assert_eq!(store.get(&reopened, "fresh"), Some(2));
    }

    #[test]
    fn test_store_live_segments_sharing_an_id_stay_separate() {
        let store: SegmentStore<String, u32> = SegmentStore::new();
        let old = Segment::new(9);
        let new = Segment::new(9);

        store.insert(&old, "a".to_string(), 1);
        store.insert(&new, "b".to_string(), 2);

        assert_eq!(store.get(&new, "a"), None);
        assert_eq!(store.get(&old, "b"), None);
        assert_eq!(store.segment_count(), 2);

        // Clearing one leaves the other alone.
        assert_eq!(store.remove_segment(&old), 1);
        assert_eq!(store.get(&new, "b"), Some(2));

        // Sweeping after the older one dies keeps the live one.
        store.insert(&old, "a".to_string(), 1);
        drop(old);
        assert_eq!(store.remove_unreferenced(), 1);
        assert_eq!(store.get(&new, "b"), Some(2));
        assert_eq!(store.entry_count(), 1);
    }

    #[test]
    fn test_store_clear() {
        let store: SegmentStore<String, u32> = SegmentStore::new();
        let segment = Segment::new(1);
        store.insert(&segment, "a".to_string(), 1);

        store.clear();

        assert_eq!(store.segment_count(), 0);
        assert_eq!(store.get(&segment, "a"), None);
    }

    proptest! {
        #[test]
        fn prop_unreferenced_sweep_never_drops_live_entries(
            segments in proptest::collection::vec((0u64..4, any::<bool>()), 1..32)
        ) {
            let store: SegmentStore<String, usize> = SegmentStore::new();
            let mut kept = Vec::new();

            // Small id range so live and dead segments often share an id.
            for (i, (id, keep)) in segments.iter().enumerate() {
                let segment = Segment::new(*id);
                store.insert(&segment, "k".to_string(), i);
                if *keep {
                    kept.push((segment, i));
                }
            }

            let removed = store.remove_unreferenced();

            prop_assert_eq!(removed, segments.len() - kept.len());
            for (segment, value) in &kept {
                prop_assert_eq!(store.get(segment, "k"), Some(*value));
            }
            prop_assert_eq!(store.entry_count(), kept.len());
        }
    }
}
