//! Per-index cache coordinator.
//!
//! [`IndexCache`] owns the four caches used during query execution and gives
//! them one lifecycle: they are handed over fully built, cleared together, and
//! closed together. It does not lock the caches; each implementation is
//! responsible for its own thread safety, and a reader may observe some caches
//! cleared and others not while a multi-cache clear is in flight.
//!
//! # Clearing
//!
//! | Operation              | filter | field | id | query parser |
//! |------------------------|:------:|:-----:|:--:|:------------:|
//! | `clear_segment`        |   ✓    |   ✓   | ✓  |              |
//! | `clear`                |   ✓    |   ✓   | ✓  |      ✓       |
//! | `clear_unreferenced`   |   ✓    |   ✓   | ✓  |              |
//! | metadata change event  |        |       |    |      ✓       |
//!
//! Clears stop at the first failing cache and return its error; caches cleared
//! before it stay cleared. `close` instead attempts every cache, removes the
//! cluster subscription, and then reports the first failure.
//!
//! # Metadata invalidation
//!
//! ```text
//! Idle --[event.metadata_changed()]--> Invalidating --[query parser cleared]--> Idle
//! Idle --[!event.metadata_changed()]--> Idle
//! ```
//!
//! An invalidation that has started when `close` is called completes first;
//! events delivered after `close` touch no cache.
//!
//! # Example
//!
//! ```ignore
//! let cache = Arc::new(IndexCache::new(index, settings, filter, fields, parser, ids));
//! cache.attach_cluster_source(Some(cluster_service))?;
//!
//! // After a merge replaced a segment
//! cache.clear_segment(&merged_away)?;
//!
//! // Index close
//! cache.close()?;
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};
use tracing::{debug, info, trace, warn};

use crate::cache::{
    CacheRole, FieldValueCache, FilterCache, IdCache, QueryParserCache, SegmentScopedCache,
};
use crate::cluster::{ClusterChangedEvent, ClusterStateListener, ClusterStateSource, ListenerId};
use crate::error::{resource, IndexCacheError};
use crate::index::Index;
use crate::segment::Segment;
use crate::settings::IndexSettings;
use crate::stats::{IndexCacheStats, IndexCacheStatsSnapshot};

/// An active registration with a cluster-state source.
struct Subscription {
    source: Arc<dyn ClusterStateSource>,
    id: ListenerId,
}

/// The subscription slot is filled at most once and emptied at most once.
enum SubscriptionSlot {
    Vacant,
    Active(Subscription),
    Released,
}

/// Coordinator for the caches of one index.
pub struct IndexCache {
    index: Index,
    settings: IndexSettings,
    filter: Arc<dyn FilterCache>,
    field_values: Arc<dyn FieldValueCache>,
    query_parser: Arc<dyn QueryParserCache>,
    id: Arc<dyn IdCache>,
    subscription: Mutex<SubscriptionSlot>,
    closed: AtomicBool,
    /// Held shared while a metadata invalidation runs; `close` takes it
    /// exclusively to flip `closed`.
    delivery: RwLock<()>,
    stats: IndexCacheStats,
}

impl IndexCache {
    /// Take ownership of four fully constructed caches.
    pub fn new(
        index: Index,
        settings: IndexSettings,
        filter: Arc<dyn FilterCache>,
        field_values: Arc<dyn FieldValueCache>,
        query_parser: Arc<dyn QueryParserCache>,
        id: Arc<dyn IdCache>,
    ) -> Self {
        debug!(
            index = %index,
            filter = filter.type_name(),
            field = field_values.type_name(),
            query_parser = query_parser.type_name(),
            id = id.type_name(),
            "Created index cache"
        );
        Self {
            index,
            settings,
            filter,
            field_values,
            query_parser,
            id,
            subscription: Mutex::new(SubscriptionSlot::Vacant),
            closed: AtomicBool::new(false),
            delivery: RwLock::new(()),
            stats: IndexCacheStats::new(),
        }
    }

    /// Subscribe to cluster state changes from `source`.
    ///
    /// With `None` no subscription is made and metadata changes never clear
    /// the query-parser cache automatically; manual clears work either way.
    /// The source only holds a weak reference to this coordinator.
    ///
    /// # Errors
    ///
    /// - [`IndexCacheError::AlreadyAttached`] if a source was attached before
    /// - [`IndexCacheError::Closed`] if the coordinator is closed
    pub fn attach_cluster_source(
        self: &Arc<Self>,
        source: Option<Arc<dyn ClusterStateSource>>,
    ) -> Result<(), IndexCacheError> {
        self.ensure_open()?;

        let Some(source) = source else {
            debug!(index = %self.index, "No cluster state source; metadata invalidation disabled");
            return Ok(());
        };

        let mut slot = self.subscription.lock();
        match *slot {
            SubscriptionSlot::Vacant => {}
            SubscriptionSlot::Active(_) => return Err(IndexCacheError::AlreadyAttached),
            SubscriptionSlot::Released => return Err(IndexCacheError::Closed),
        }

        let this: Weak<IndexCache> = Arc::downgrade(self);
        let listener: Weak<dyn ClusterStateListener> = this;
        let id = source.register(listener);
        *slot = SubscriptionSlot::Active(Subscription { source, id });

        debug!(index = %self.index, "Subscribed to cluster state changes");
        Ok(())
    }

    /// Whether a cluster-state subscription is currently active.
    pub fn is_subscribed(&self) -> bool {
        matches!(*self.subscription.lock(), SubscriptionSlot::Active(_))
    }

    /// The index this coordinator belongs to.
    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Settings the index was created with.
    pub fn settings(&self) -> &IndexSettings {
        &self.settings
    }

    /// The filter-result cache.
    pub fn filter(&self) -> &Arc<dyn FilterCache> {
        &self.filter
    }

    /// The per-field value cache.
    pub fn field_values(&self) -> &Arc<dyn FieldValueCache> {
        &self.field_values
    }

    /// The query-parser cache.
    pub fn query_parser(&self) -> &Arc<dyn QueryParserCache> {
        &self.query_parser
    }

    /// The document-identifier cache.
    pub fn id_cache(&self) -> &Arc<dyn IdCache> {
        &self.id
    }

    /// Whether [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Current counters.
    pub fn stats(&self) -> IndexCacheStatsSnapshot {
        self.stats.snapshot()
    }

    /// Drop entries tied to `segment` from the filter, field-value and id
    /// caches. Parsed queries are valid across segments and are kept.
    pub fn clear_segment(&self, segment: &Segment) -> Result<(), IndexCacheError> {
        self.ensure_open()?;
        trace!(index = %self.index, segment = %segment.id(), "Clearing segment caches");

        self.observe(self.forward_clear_segment(segment))?;
        self.stats.segment_cleared();
        Ok(())
    }

    /// Drop every entry from all four caches. The caches stay usable.
    pub fn clear(&self) -> Result<(), IndexCacheError> {
        self.ensure_open()?;
        debug!(index = %self.index, "Clearing all index caches");

        self.observe(self.forward_clear())?;
        self.stats.fully_cleared();
        Ok(())
    }

    /// Let the segment-scoped caches drop entries for segments no reader
    /// holds any more.
    pub fn clear_unreferenced(&self) -> Result<(), IndexCacheError> {
        self.ensure_open()?;
        trace!(index = %self.index, "Clearing unreferenced cache entries");

        self.observe(self.forward_clear_unreferenced())?;
        self.stats.unreferenced_swept();
        Ok(())
    }

    /// Close all four caches and remove the cluster subscription.
    ///
    /// Every cache is closed even if an earlier one fails, and the
    /// subscription is removed regardless; the first failure is returned.
    /// Calling `close` again is a no-op returning `Ok(())`.
    ///
    /// A metadata invalidation already in progress finishes before the caches
    /// are closed; none starts afterwards.
    pub fn close(&self) -> Result<(), IndexCacheError> {
        let already_closed = {
            let _gate = self.delivery.write();
            self.closed.swap(true, Ordering::AcqRel)
        };
        if already_closed {
            debug!(index = %self.index, "Index cache already closed");
            return Ok(());
        }
        info!(index = %self.index, "Closing index caches");

        let results = [
            self.filter
                .close()
                .map_err(resource(CacheRole::Filter, "close")),
            self.field_values
                .close()
                .map_err(resource(CacheRole::FieldValue, "close")),
            self.id.close().map_err(resource(CacheRole::Id, "close")),
            self.query_parser
                .close()
                .map_err(resource(CacheRole::QueryParser, "close")),
        ];

        self.release_subscription();

        let mut first_error = None;
        for error in results.into_iter().filter_map(Result::err) {
            self.stats.failed();
            warn!(index = %self.index, error = %error, "Cache failed to close");
            first_error.get_or_insert(error);
        }

        match first_error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn forward_clear_segment(&self, segment: &Segment) -> Result<(), IndexCacheError> {
        self.filter
            .clear_segment(segment)
            .map_err(resource(CacheRole::Filter, "clear segment"))?;
        self.field_values
            .clear_segment(segment)
            .map_err(resource(CacheRole::FieldValue, "clear segment"))?;
        self.id
            .clear_segment(segment)
            .map_err(resource(CacheRole::Id, "clear segment"))?;
        Ok(())
    }

    fn forward_clear(&self) -> Result<(), IndexCacheError> {
        self.filter
            .clear()
            .map_err(resource(CacheRole::Filter, "clear"))?;
        self.field_values
            .clear()
            .map_err(resource(CacheRole::FieldValue, "clear"))?;
        self.id.clear().map_err(resource(CacheRole::Id, "clear"))?;
        self.query_parser
            .clear()
            .map_err(resource(CacheRole::QueryParser, "clear"))?;
        Ok(())
    }

    fn forward_clear_unreferenced(&self) -> Result<(), IndexCacheError> {
        self.filter
            .clear_unreferenced()
            .map_err(resource(CacheRole::Filter, "clear unreferenced"))?;
        self.field_values
            .clear_unreferenced()
            .map_err(resource(CacheRole::FieldValue, "clear unreferenced"))?;
        self.id
            .clear_unreferenced()
            .map_err(resource(CacheRole::Id, "clear unreferenced"))?;
        Ok(())
    }

    fn observe(&self, result: Result<(), IndexCacheError>) -> Result<(), IndexCacheError> {
        if let Err(ref error) = result {
            self.stats.failed();
            warn!(index = %self.index, error = %error, "Cache clear failed");
        }
        result
    }

    fn ensure_open(&self) -> Result<(), IndexCacheError> {
        if self.is_closed() {
            return Err(IndexCacheError::Closed);
        }
        Ok(())
    }

    fn release_subscription(&self) {
        let mut slot = self.subscription.lock();
        if let SubscriptionSlot::Active(subscription) =
            std::mem::replace(&mut *slot, SubscriptionSlot::Released)
        {
            subscription.source.unregister(subscription.id);
            debug!(index = %self.index, "Unsubscribed from cluster state changes");
        }
    }
}

impl ClusterStateListener for IndexCache {
    fn cluster_changed(&self, event: &ClusterChangedEvent) {
        if !event.metadata_changed() {
            return;
        }
        let _delivery = self.delivery.read();
        if self.is_closed() {
            trace!(index = %self.index, "Ignoring metadata change on closed index cache");
            return;
        }

        // Parsed queries depend on mappings; the other caches depend on segments.
        match self.query_parser.clear() {
            Ok(()) => {
                self.stats.metadata_invalidated();
                debug!(
                    index = %self.index,
                    source = event.source(),
                    version = event.state().version(),
                    "Metadata changed, cleared query parser cache"
                );
            }
            Err(e) => {
                self.stats.failed();
                warn!(index = %self.index, error = %e, "Failed to clear query parser cache after metadata change");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Barrier;
    use std::thread;
    use std::time::Duration;

    use super::*;
    use crate::cache::{CacheError, DocIdSet, FieldValues, ParsedQuery};
    use crate::cluster::{ClusterService, ClusterState, MetaData};

    type Log = Arc<Mutex<Vec<String>>>;

    /// Segment-scoped fake recording `"{name}.{op}"` for every call.
    struct RecordingCache {
        name: &'static str,
        log: Log,
        fail_on: Option<&'static str>,
    }

    impl RecordingCache {
        fn new(name: &'static str, log: &Log) -> Arc<Self> {
            Arc::new(Self {
                name,
                log: Arc::clone(log),
                fail_on: None,
            })
        }

        fn failing(name: &'static str, log: &Log, op: &'static str) -> Arc<Self> {
            Arc::new(Self {
                name,
                log: Arc::clone(log),
                fail_on: Some(op),
            })
        }

        fn record(&self, op: &'static str) -> Result<(), CacheError> {
            self.log.lock().push(format!("{}.{}", self.name, op));
            if self.fail_on == Some(op) {
                return Err(CacheError::Other(format!("{} {} failed", self.name, op)));
            }
            Ok(())
        }
    }

    impl SegmentScopedCache for RecordingCache {
        fn type_name(&self) -> &'static str {
            "recording"
        }
        fn clear(&self) -> Result<(), CacheError> {
            self.record("clear")
        }
        fn clear_segment(&self, _segment: &Segment) -> Result<(), CacheError> {
            self.record("clear_segment")
        }
        fn clear_unreferenced(&self) -> Result<(), CacheError> {
            self.record("clear_unreferenced")
        }
        fn close(&self) -> Result<(), CacheError> {
            self.record("close")
        }
    }

    impl FilterCache for RecordingCache {
        fn get(&self, _segment: &Segment, _filter_key: &str) -> Option<DocIdSet> {
            None
        }
        fn insert(&self, _: &Segment, _: &str, _: DocIdSet) -> Result<(), CacheError> {
            Ok(())
        }
    }

    impl FieldValueCache for RecordingCache {
        fn get(&self, _segment: &Segment, _field: &str) -> Option<FieldValues> {
            None
        }
        fn insert(&self, _: &Segment, _: &str, _: FieldValues) -> Result<(), CacheError> {
            Ok(())
        }
    }

    impl IdCache for RecordingCache {
        fn doc_id(&self, _segment: &Segment, _uid: &str) -> Option<u32> {
            None
        }
        fn insert(&self, _: &Segment, _: &str, _: u32) -> Result<(), CacheError> {
            Ok(())
        }
    }

    impl QueryParserCache for RecordingCache {
        fn type_name(&self) -> &'static str {
            "recording"
        }
        fn get(&self, _query: &str) -> Option<ParsedQuery> {
            None
        }
        fn insert(&self, _: &str, _: ParsedQuery) -> Result<(), CacheError> {
            Ok(())
        }
        fn clear(&self) -> Result<(), CacheError> {
            self.record("clear")
        }
        fn close(&self) -> Result<(), CacheError> {
            self.record("close")
        }
    }

    struct Fixture {
        log: Log,
        cache: Arc<IndexCache>,
    }

    fn fixture() -> Fixture {
        fixture_with(|_, _| None)
    }

    /// Build a coordinator; `failing(role, log)` may substitute a failing fake.
    fn fixture_with(
        failing: impl Fn(&'static str, &Log) -> Option<Arc<RecordingCache>>,
    ) -> Fixture {
        let log: Log = Arc::new(Mutex::new(Vec::new()));
        let make = |name| failing(name, &log).unwrap_or_else(|| RecordingCache::new(name, &log));
        let cache = Arc::new(IndexCache::new(
            Index::new("test"),
            IndexSettings::new(),
            make("filter"),
            make("field"),
            make("query_parser"),
            make("id"),
        ));
        Fixture { log, cache }
    }

    fn calls(log: &Log) -> Vec<String> {
        log.lock().clone()
    }

    fn mapping_change(service: &ClusterService) -> ClusterState {
        let current = service.state();
        current.with_metadata(current.metadata().with_mapping("test", "doc", "{}"))
    }

    #[test]
    fn test_clear_segment_skips_query_parser() {
        let f = fixture();
        f.cache.clear_segment(&Segment::new(1)).unwrap();

        assert_eq!(
            calls(&f.log),
            vec!["filter.clear_segment", "field.clear_segment", "id.clear_segment"]
        );
        assert_eq!(f.cache.stats().segment_clears, 1);
    }

    #[test]
    fn test_clear_covers_all_four_in_order() {
        let f = fixture();
        f.cache.clear().unwrap();

        assert_eq!(
            calls(&f.log),
            vec!["filter.clear", "field.clear", "id.clear", "query_parser.clear"]
        );
    }

    #[test]
    fn test_clear_unreferenced_skips_query_parser() {
        let f = fixture();
        f.cache.clear_unreferenced().unwrap();

        assert_eq!(
            calls(&f.log),
            vec![
                "filter.clear_unreferenced",
                "field.clear_unreferenced",
                "id.clear_unreferenced"
            ]
        );
    }

    #[test]
    fn test_close_closes_all_four_in_order() {
        let f = fixture();
        f.cache.close().unwrap();

        assert_eq!(
            calls(&f.log),
            vec!["filter.close", "field.close", "id.close", "query_parser.close"]
        );
        assert!(f.cache.is_closed());
    }

    #[test]
    fn test_second_close_is_noop() {
        let f = fixture();
        f.cache.close().unwrap();
        f.log.lock().clear();

        assert!(f.cache.close().is_ok());
        assert!(calls(&f.log).is_empty());
    }

    #[test]
    fn test_clears_after_close_are_rejected() {
        let f = fixture();
        f.cache.close().unwrap();
        f.log.lock().clear();

        assert!(matches!(f.cache.clear(), Err(IndexCacheError::Closed)));
        assert!(matches!(
            f.cache.clear_segment(&Segment::new(1)),
            Err(IndexCacheError::Closed)
        ));
        assert!(matches!(
            f.cache.clear_unreferenced(),
            Err(IndexCacheError::Closed)
        ));
        assert!(calls(&f.log).is_empty());
    }

    #[test]
    fn test_clear_aborts_at_first_failure() {
        let f = fixture_with(|name, log| {
            (name == "field").then(|| RecordingCache::failing(name, log, "clear_segment"))
        });

        let err = f.cache.clear_segment(&Segment::new(1)).unwrap_err();

        assert_eq!(err.role(), Some(CacheRole::FieldValue));
        assert_eq!(
            calls(&f.log),
            vec!["filter.clear_segment", "field.clear_segment"]
        );
        assert_eq!(f.cache.stats().failures, 1);
        assert_eq!(f.cache.stats().segment_clears, 0);
    }

    #[test]
    fn test_coordinator_usable_after_failed_clear() {
        let f = fixture_with(|name, log| {
            (name == "id").then(|| RecordingCache::failing(name, log, "clear"))
        });

        assert!(f.cache.clear().is_err());
        assert!(f.cache.clear_unreferenced().is_ok());
    }

    #[test]
    fn test_close_continues_past_failure_and_unsubscribes() {
        let f = fixture_with(|name, log| {
            (name == "filter").then(|| RecordingCache::failing(name, log, "close"))
        });
        let service = Arc::new(ClusterService::new());
        f.cache
            .attach_cluster_source(Some(service.clone() as Arc<dyn ClusterStateSource>))
            .unwrap();

        let err = f.cache.close().unwrap_err();

        assert_eq!(err.role(), Some(CacheRole::Filter));
        assert_eq!(
            calls(&f.log),
            vec!["filter.close", "field.close", "id.close", "query_parser.close"]
        );
        assert!(!f.cache.is_subscribed());
        assert_eq!(service.listener_count(), 0);
    }

    #[test]
    fn test_metadata_change_clears_only_query_parser() {
        let f = fixture();
        let service = Arc::new(ClusterService::new());
        f.cache
            .attach_cluster_source(Some(service.clone() as Arc<dyn ClusterStateSource>))
            .unwrap();

        service.apply("reroute", service.state().next());
        assert!(calls(&f.log).is_empty());

        service.apply("put-mapping", mapping_change(&service));
        assert_eq!(calls(&f.log), vec!["query_parser.clear"]);
        assert_eq!(f.cache.stats().metadata_invalidations, 1);
    }

    #[test]
    fn test_without_source_manual_clears_still_work() {
        let f = fixture();
        f.cache.attach_cluster_source(None).unwrap();

        assert!(!f.cache.is_subscribed());
        f.cache.clear().unwrap();
        assert_eq!(calls(&f.log).len(), 4);
    }

    #[test]
    fn test_attach_twice_is_rejected() {
        let f = fixture();
        let service: Arc<dyn ClusterStateSource> = Arc::new(ClusterService::new());
        f.cache.attach_cluster_source(Some(service.clone())).unwrap();

        assert!(matches!(
            f.cache.attach_cluster_source(Some(service)),
            Err(IndexCacheError::AlreadyAttached)
        ));
    }

    #[test]
    fn test_attach_after_close_is_rejected() {
        let f = fixture();
        f.cache.close().unwrap();

        let service: Arc<dyn ClusterStateSource> = Arc::new(ClusterService::new());
        assert!(matches!(
            f.cache.attach_cluster_source(Some(service)),
            Err(IndexCacheError::Closed)
        ));
    }

    #[test]
    fn test_event_after_close_touches_nothing() {
        let f = fixture();
        f.cache.close().unwrap();
        f.log.lock().clear();

        let previous = ClusterState::default();
        let state = previous.with_metadata(MetaData::default().with_mapping("test", "doc", "{}"));
        f.cache
            .cluster_changed(&ClusterChangedEvent::new("put-mapping", state, previous));

        assert!(calls(&f.log).is_empty());
    }

    /// Query-parser cache whose `clear` meets a barrier and then lingers, so
    /// a concurrent `close` can be lined up against it.
    struct SlowQueryParser {
        log: Log,
        entered: Arc<Barrier>,
    }

    impl QueryParserCache for SlowQueryParser {
        fn type_name(&self) -> &'static str {
            "slow"
        }
        fn get(&self, _query: &str) -> Option<ParsedQuery> {
            None
        }
        fn insert(&self, _: &str, _: ParsedQuery) -> Result<(), CacheError> {
            Ok(())
        }
        fn clear(&self) -> Result<(), CacheError> {
            self.entered.wait();
            thread::sleep(Duration::from_millis(50));
            self.log.lock().push("query_parser.clear".to_string());
            Ok(())
        }
        fn close(&self) -> Result<(), CacheError> {
            self.log.lock().push("query_parser.close".to_string());
            Ok(())
        }
    }

    #[test]
    fn test_close_waits_for_in_flight_invalidation() {
        let log: Log = Arc::new(Mutex::new(Vec::new()));
        let entered = Arc::new(Barrier::new(2));
        let cache = Arc::new(IndexCache::new(
            Index::new("test"),
            IndexSettings::new(),
            RecordingCache::new("filter", &log),
            RecordingCache::new("field", &log),
            Arc::new(SlowQueryParser {
                log: Arc::clone(&log),
                entered: Arc::clone(&entered),
            }),
            RecordingCache::new("id", &log),
        ));
        let service = Arc::new(ClusterService::new());
        cache
            .attach_cluster_source(Some(service.clone() as Arc<dyn ClusterStateSource>))
            .unwrap();

        let delivery = {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                service.apply("put-mapping", mapping_change(&service));
            })
        };
        entered.wait();
        cache.close().unwrap();
        delivery.join().unwrap();

        assert_eq!(
            calls(&log),
            vec![
                "query_parser.clear",
                "filter.close",
                "field.close",
                "id.close",
                "query_parser.close"
            ]
        );
        let stats = cache.stats();
        assert_eq!(stats.metadata_invalidations, 1);
        assert_eq!(stats.failures, 0);
        assert_eq!(service.listener_count(), 0);
    }

    #[test]
    fn test_subscription_does_not_keep_coordinator_alive() {
        let f = fixture();
        let service = Arc::new(ClusterService::new());
        f.cache
            .attach_cluster_source(Some(service.clone() as Arc<dyn ClusterStateSource>))
            .unwrap();
        let weak = Arc::downgrade(&f.cache);

        drop(f.cache);

        assert!(weak.upgrade().is_none());
        assert_eq!(service.listener_count(), 0);
    }

    #[test]
    fn test_accessors_return_owned_handles() {
        let f = fixture();

        assert_eq!(f.cache.filter().type_name(), "recording");
        assert_eq!(f.cache.field_values().type_name(), "recording");
        assert_eq!(f.cache.id_cache().type_name(), "recording");
        assert_eq!(QueryParserCache::type_name(f.cache.query_parser().as_ref()), "recording");
        assert_eq!(f.cache.index().name(), "test");
        assert!(f.cache.settings().is_empty());
        assert!(calls(&f.log).is_empty());
    }
}
