//! Index Cache - per-index cache coordination for a search engine
//!
//! Every open index owns four caches used while executing queries: filter
//! results, per-field columnar values, parsed queries, and document ids. This
//! crate gives them a single owner, [`IndexCache`], which:
//!
//! - constructs and closes them together,
//! - clears them per segment, globally, or for segments no reader holds,
//! - clears the query-parser cache when cluster metadata (mappings) changes.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use index_cache::cache::IndexCacheBuilder;
//! use index_cache::cluster::{ClusterService, ClusterStateSource};
//! use index_cache::{Index, IndexSettings};
//!
//! let cluster = Arc::new(ClusterService::new());
//! let cache = Arc::new(IndexCacheBuilder::new(Index::new("products"), IndexSettings::new()).build()?);
//! cache.attach_cluster_source(Some(cluster.clone() as Arc<dyn ClusterStateSource>))?;
//!
//! cache.clear_unreferenced()?;
//! cache.close()?;
//! ```

pub mod cache;
pub mod cluster;
mod coordinator;
mod error;
mod index;
pub mod logging;
pub mod segment;
pub mod settings;
pub mod stats;

pub use coordinator::IndexCache;
pub use error::IndexCacheError;
pub use index::Index;
pub use segment::{Segment, SegmentId};
pub use settings::{IndexSettings, SettingsError};
