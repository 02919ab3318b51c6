//! Build an [`IndexCache`] from index settings.
//!
//! Each role picks its implementation from a `type` setting:
//!
//! | Key                              | Values              | Default    |
//! |----------------------------------|---------------------|------------|
//! | `index.cache.filter.type`        | `simple`, `none`    | `simple`   |
//! | `index.cache.field.type`         | `simple`, `none`    | `simple`   |
//! | `index.cache.id.type`            | `simple`, `none`    | `simple`   |
//! | `index.cache.query.parser.type`  | `resident`, `none`  | `resident` |
//!
//! The resident query-parser cache additionally reads
//! `index.cache.query.parser.resident.max_size` (entries, default 100) and
//! `index.cache.query.parser.resident.expire` (seconds, unset by default).

use std::sync::Arc;

use tracing::debug;

use super::none::{NoneCache, NoneQueryParserCache};
use super::resident::{ResidentQueryParserCache, ResidentQueryParserConfig};
use super::simple::{SimpleFieldValueCache, SimpleFilterCache, SimpleIdCache};
use super::traits::{FieldValueCache, FilterCache, IdCache, QueryParserCache};
use crate::coordinator::IndexCache;
use crate::index::Index;
use crate::settings::{invalid, IndexSettings, SettingsError};

pub const FILTER_TYPE: &str = "index.cache.filter.type";
pub const FIELD_TYPE: &str = "index.cache.field.type";
pub const ID_TYPE: &str = "index.cache.id.type";
pub const QUERY_PARSER_TYPE: &str = "index.cache.query.parser.type";
pub const QUERY_PARSER_MAX_SIZE: &str = "index.cache.query.parser.resident.max_size";
pub const QUERY_PARSER_EXPIRE: &str = "index.cache.query.parser.resident.expire";

/// Implementation choice for a segment-scoped role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SegmentCacheType {
    Simple,
    None,
}

/// Implementation choice for the query-parser role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QueryParserCacheType {
    Resident,
    None,
}

/// Constructs the four caches for an index and hands them to a coordinator.
pub struct IndexCacheBuilder {
    index: Index,
    settings: IndexSettings,
}

impl IndexCacheBuilder {
    /// Create a builder for `index` configured by `settings`.
    pub fn new(index: Index, settings: IndexSettings) -> Self {
        Self { index, settings }
    }

    /// Build the caches and the coordinator.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidValue`] for an unknown cache type or a
    /// malformed numeric setting.
    pub fn build(self) -> Result<IndexCache, SettingsError> {
        let filter: Arc<dyn FilterCache> = match self.segment_type(FILTER_TYPE)? {
            SegmentCacheType::Simple => Arc::new(SimpleFilterCache::new()),
            SegmentCacheType::None => Arc::new(NoneCache),
        };
        let field_values: Arc<dyn FieldValueCache> = match self.segment_type(FIELD_TYPE)? {
            SegmentCacheType::Simple => Arc::new(SimpleFieldValueCache::new()),
            SegmentCacheType::None => Arc::new(NoneCache),
        };
        let id: Arc<dyn IdCache> = match self.segment_type(ID_TYPE)? {
            SegmentCacheType::Simple => Arc::new(SimpleIdCache::new()),
            SegmentCacheType::None => Arc::new(NoneCache),
        };
        let query_parser: Arc<dyn QueryParserCache> = match self.query_parser_type()? {
            QueryParserCacheType::Resident => {
                Arc::new(ResidentQueryParserCache::new(self.resident_config()?))
            }
            QueryParserCacheType::None => Arc::new(NoneQueryParserCache),
        };

        debug!(index = %self.index, settings = self.settings.len(), "Built index caches from settings");

        Ok(IndexCache::new(
            self.index,
            self.settings,
            filter,
            field_values,
            query_parser,
            id,
        ))
    }

    fn segment_type(&self, key: &str) -> Result<SegmentCacheType, SettingsError> {
        match self.settings.get_or(key, "simple") {
            "simple" => Ok(SegmentCacheType::Simple),
            "none" => Ok(SegmentCacheType::None),
            other => Err(invalid(key, other, "expected 'simple' or 'none'")),
        }
    }

    fn query_parser_type(&self) -> Result<QueryParserCacheType, SettingsError> {
        match self.settings.get_or(QUERY_PARSER_TYPE, "resident") {
            "resident" => Ok(QueryParserCacheType::Resident),
            "none" => Ok(QueryParserCacheType::None),
            other => Err(invalid(
                QUERY_PARSER_TYPE,
                other,
                "expected 'resident' or 'none'",
            )),
        }
    }

    fn resident_config(&self) -> Result<ResidentQueryParserConfig, SettingsError> {
        let mut config = ResidentQueryParserConfig::default();
        if let Some(max_size) = self.settings.get_u64(QUERY_PARSER_MAX_SIZE)? {
            config = config.with_max_size(max_size);
        }
        if let Some(expire) = self.settings.get_duration_secs(QUERY_PARSER_EXPIRE)? {
            config = config.with_expire(expire);
        }
        Ok(config)
    }
}
