//! Capability traits for the caches owned by an index.
//!
//! Caches come in two shapes:
//!
//! - **Segment-scoped** ([`SegmentScopedCache`]): entries are keyed on a
//!   [`Segment`] and can be cleared per segment or swept once their segment is
//!   no longer referenced. The filter, field-value and id caches are of this
//!   shape.
//! - **Global-only** ([`QueryParserCache`]): entries are valid across every
//!   segment, so only a full clear applies.
//!
//! Each role trait adds the minimal lookup/insert surface query execution
//! needs. How an implementation stores or evicts entries is its own business.
//!
//! # Thread Safety
//!
//! All implementations must be `Send + Sync`; they are shared across query
//! threads behind `Arc<dyn ...>` and are responsible for their own locking.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use thiserror::Error;

use crate::segment::Segment;

/// Sorted document numbers matching a filter within one segment.
pub type DocIdSet = Arc<[u32]>;

/// Per-document values of one field within one segment, indexed by doc number.
pub type FieldValues = Arc<[Option<Bytes>]>;

/// Opaque parsed form of a query string.
pub type ParsedQuery = Bytes;

/// Errors raised by an individual cache.
#[derive(Debug, Error)]
pub enum CacheError {
    /// I/O error while releasing or clearing cache resources.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The cache has already been closed.
    #[error("Cache is closed")]
    Closed,

    /// Implementation-specific failure.
    #[error("Cache error: {0}")]
    Other(String),
}

/// The four cache roles owned by an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheRole {
    Filter,
    FieldValue,
    Id,
    QueryParser,
}

impl CacheRole {
    /// Stable lowercase name used in logs and settings keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheRole::Filter => "filter",
            CacheRole::FieldValue => "field",
            CacheRole::Id => "id",
            CacheRole::QueryParser => "query_parser",
        }
    }
}

impl fmt::Display for CacheRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle and invalidation contract for caches keyed on segments.
pub trait SegmentScopedCache: Send + Sync {
    /// Implementation name, e.g. `"simple"` or `"none"`.
    fn type_name(&self) -> &'static str;

    /// Drop every entry. The cache stays usable.
    fn clear(&self) -> Result<(), CacheError>;

    /// Drop the entries associated with `segment`.
    fn clear_segment(&self, segment: &Segment) -> Result<(), CacheError>;

    /// Drop entries whose segment is no longer held by any reader.
    ///
    /// Must never remove an entry whose segment is still live.
    fn clear_unreferenced(&self) -> Result<(), CacheError>;

    /// Release all resources. The cache must not be used afterwards.
    fn close(&self) -> Result<(), CacheError>;
}

/// Cache of filter results per segment.
pub trait FilterCache: SegmentScopedCache {
    /// Look up the cached doc set for `filter_key` in `segment`.
    fn get(&self, segment: &Segment, filter_key: &str) -> Option<DocIdSet>;

    /// Cache the doc set for `filter_key` in `segment`.
    fn insert(&self, segment: &Segment, filter_key: &str, docs: DocIdSet) -> Result<(), CacheError>;
}

/// Columnar per-field value cache.
pub trait FieldValueCache: SegmentScopedCache {
    /// Look up the loaded values of `field` in `segment`.
    fn get(&self, segment: &Segment, field: &str) -> Option<FieldValues>;

    /// Cache the loaded values of `field` in `segment`.
    fn insert(&self, segment: &Segment, field: &str, values: FieldValues)
        -> Result<(), CacheError>;
}

/// Document identifier cache, mapping a uid to its doc number in a segment.
pub trait IdCache: SegmentScopedCache {
    /// Resolve `uid` to a doc number in `segment`.
    fn doc_id(&self, segment: &Segment, uid: &str) -> Option<u32>;

    /// Record that `uid` lives at `doc` in `segment`.
    fn insert(&self, segment: &Segment, uid: &str, doc: u32) -> Result<(), CacheError>;
}

/// Cache of parsed queries. Not segment-keyed.
pub trait QueryParserCache: Send + Sync {
    /// Implementation name, e.g. `"resident"` or `"none"`.
    fn type_name(&self) -> &'static str;

    /// Look up a previously parsed query.
    fn get(&self, query: &str) -> Option<ParsedQuery>;

    /// Cache the parsed form of `query`.
    fn insert(&self, query: &str, parsed: ParsedQuery) -> Result<(), CacheError>;

    /// Drop every entry. The cache stays usable.
    fn clear(&self) -> Result<(), CacheError>;

    /// Release all resources. The cache must not be used afterwards.
    fn close(&self) -> Result<(), CacheError>;
}
