//! Cache roles, implementations and construction.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                          IndexCache                           │
//! │                                                               │
//! │  Arc<dyn FilterCache>   Arc<dyn FieldValueCache>              │
//! │  Arc<dyn IdCache>       Arc<dyn QueryParserCache>             │
//! └──────────────┬──────────────────────────────┬─────────────────┘
//!                │ SegmentScopedCache           │ global only
//!                ▼                              ▼
//! ┌──────────────────────────────┐  ┌──────────────────────────────┐
//! │ SimpleCache (SegmentStore)   │  │ ResidentQueryParserCache     │
//! │ NoneCache                    │  │ NoneQueryParserCache         │
//! └──────────────────────────────┘  └──────────────────────────────┘
//! ```
//!
//! Implementations are normally chosen from settings by
//! [`IndexCacheBuilder`]; any type implementing the role traits can be passed
//! to [`IndexCache::new`](crate::IndexCache::new) directly.

mod factory;
mod none;
mod resident;
mod simple;
mod store;
mod traits;

pub use factory::{
    IndexCacheBuilder, FIELD_TYPE, FILTER_TYPE, ID_TYPE, QUERY_PARSER_EXPIRE,
    QUERY_PARSER_MAX_SIZE, QUERY_PARSER_TYPE,
};
pub use none::{NoneCache, NoneQueryParserCache};
pub use resident::{ResidentQueryParserCache, ResidentQueryParserConfig, DEFAULT_MAX_SIZE};
pub use simple::{SimpleCache, SimpleFieldValueCache, SimpleFilterCache, SimpleIdCache};
pub use store::SegmentStore;
pub use traits::{
    CacheError, CacheRole, DocIdSet, FieldValueCache, FieldValues, FilterCache, IdCache,
    ParsedQuery, QueryParserCache, SegmentScopedCache,
};
