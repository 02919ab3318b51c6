//! Bounded in-memory query-parser cache using moka.
//!
//! Parsed queries are cheap to keep and expensive to rebuild, so the resident
//! cache holds a small, fixed number of them (100 by default) with optional
//! expiry. Entries are not tied to segments; they only become stale when the
//! index mappings change, which is handled by a full [`clear`].
//!
//! [`clear`]: QueryParserCache::clear

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use moka::sync::Cache as MokaCache;

use super::traits::{CacheError, ParsedQuery, QueryParserCache};

/// Default maximum number of parsed queries kept.
pub const DEFAULT_MAX_SIZE: u64 = 100;

/// Configuration for [`ResidentQueryParserCache`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResidentQueryParserConfig {
    /// Maximum number of entries.
    pub max_size: u64,

    /// Optional time-to-live for entries.
    pub expire: Option<Duration>,
}

impl Default for ResidentQueryParserConfig {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
            expire: None,
        }
    }
}

impl ResidentQueryParserConfig {
    /// Set the maximum number of entries.
    pub fn with_max_size(mut self, max_size: u64) -> Self {
        self.max_size = max_size;
        self
    }

    /// Set the entry time-to-live.
    pub fn with_expire(mut self, expire: Duration) -> Self {
        self.expire = Some(expire);
        self
    }
}

/// Query-parser cache bounded by entry count.
pub struct ResidentQueryParserCache {
    cache: MokaCache<String, ParsedQuery>,
    config: ResidentQueryParserConfig,
    closed: AtomicBool,
}

impl ResidentQueryParserCache {
    /// Create a new resident cache.
    pub fn new(config: ResidentQueryParserConfig) -> Self {
        let mut builder = MokaCache::builder().max_capacity(config.max_size);

        if let Some(ttl) = config.expire {
            builder = builder.time_to_live(ttl);
        }

        Self {
            cache: builder.build(),
            config,
            closed: AtomicBool::new(false),
        }
    }

    /// The configuration this cache was built with.
    pub fn config(&self) -> &ResidentQueryParserConfig {
        &self.config
    }

    /// Approximate number of cached entries.
    ///
    /// Runs pending maintenance first so the count reflects recent writes.
    pub fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }
}

impl Default for ResidentQueryParserCache {
    fn default() -> Self {
        Self::new(ResidentQueryParserConfig::default())
    }
}

impl QueryParserCache for ResidentQueryParserCache {
    fn type_name(&self) -> &'static str {
        "resident"
    }

    fn get(&self, query: &str) -> Option<ParsedQuery> {
        if self.closed.load(Ordering::Acquire) {
            return None;
        }
        self.cache.get(query)
    }

    fn insert(&self, query: &str, parsed: ParsedQuery) -> Result<(), CacheError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(CacheError::Closed);
        }
        self.cache.insert(query.to_string(), parsed);
        Ok(())
    }

    fn clear(&self) -> Result<(), CacheError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(CacheError::Closed);
        }
        self.cache.invalidate_all();
        self.cache.run_pending_tasks();
        Ok(())
    }

    fn close(&self) -> Result<(), CacheError> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Err(CacheError::Closed);
        }
        self.cache.invalidate_all();
        self.cache.run_pending_tasks();
        Ok(())
    }
}
