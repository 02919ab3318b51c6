//! Caches that never cache anything.
//!
//! Selected with `type = none`. Every lookup misses, every insert is dropped,
//! and clear/close always succeed.

use super::traits::{
    CacheError, DocIdSet, FieldValueCache, FieldValues, FilterCache, IdCache, ParsedQuery,
    QueryParserCache, SegmentScopedCache,
};
use crate::segment::Segment;

/// No-op cache usable for any segment-scoped role.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoneCache;

/// No-op query-parser cache.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoneQueryParserCache;

impl SegmentScopedCache for NoneCache {
    fn type_name(&self) -> &'static str {
        "none"
    }

    fn clear(&self) -> Result<(), CacheError> {
        Ok(())
    }

    fn clear_segment(&self, _segment: &Segment) -> Result<(), CacheError> {
        Ok(())
    }

    fn clear_unreferenced(&self) -> Result<(), CacheError> {
        Ok(())
    }

    fn close(&self) -> Result<(), CacheError> {
        Ok(())
    }
}

impl FilterCache for NoneCache {
    fn get(&self, _segment: &Segment, _filter_key: &str) -> Option<DocIdSet> {
        None
    }

    fn insert(&self, _segment: &Segment, _filter_key: &str, _docs: DocIdSet) -> Result<(), CacheError> {
        Ok(())
    }
}

impl FieldValueCache for NoneCache {
    fn get(&self, _segment: &Segment, _field: &str) -> Option<FieldValues> {
        None
    }

    fn insert(
        &self,
        _segment: &Segment,
        _field: &str,
        _values: FieldValues,
    ) -> Result<(), CacheError> {
        Ok(())
    }
}

impl IdCache for NoneCache {
    fn doc_id(&self, _segment: &Segment, _uid: &str) -> Option<u32> {
        None
    }

    fn insert(&self, _segment: &Segment, _uid: &str, _doc: u32) -> Result<(), CacheError> {
        Ok(())
    }
}

impl QueryParserCache for NoneQueryParserCache {
    fn type_name(&self) -> &'static str {
        "none"
    }

    fn get(&self, _query: &str) -> Option<ParsedQuery> {
        None
    }

    fn insert(&self, _query: &str, _parsed: ParsedQuery) -> Result<(), CacheError> {
        Ok(())
    }

    fn clear(&self) -> Result<(), CacheError> {
        Ok(())
    }

    fn close(&self) -> Result<(), CacheError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use std::sync::Arc;

    #[test]
    fn test_none_cache_never_stores() {
        let cache = NoneCache;
        let segment = Segment::new(1);

        FilterCache::insert(&cache, &segment, "f", Arc::from(vec![1u32])).unwrap();
        IdCache::insert(&cache, &segment, "uid", 1).unwrap();

        assert!(FilterCache::get(&cache, &segment, "f").is_none());
        assert!(cache.doc_id(&segment, "uid").is_none());
        assert!(cache.close().is_ok());
        assert!(cache.close().is_ok(), "Closing twice is harmless");
    }

    #[test]
    fn test_none_query_parser_cache_never_stores() {
        let cache = NoneQueryParserCache;
        cache.insert("a:b", Bytes::from_static(b"q")).unwrap();

        assert!(cache.get("a:b").is_none());
        assert_eq!(QueryParserCache::type_name(&cache), "none");
    }
}
