//! Cluster state observed by index components.
//!
//! Only the narrow surface the cache coordinator needs lives here: immutable
//! state snapshots, a change event that knows whether index metadata moved,
//! and a source that delivers those events to weakly-held listeners.
//!
//! # Example
//!
//! ```ignore
//! use index_cache::cluster::{ClusterService, ClusterStateSource};
//!
//! let cluster = Arc::new(ClusterService::new());
//! index_cache.attach_cluster_source(Some(cluster.clone()))?;
//!
//! let current = cluster.state();
//! let next = current.with_metadata(current.metadata().with_mapping("products", "item", mapping));
//! cluster.apply("put-mapping", next); // clears the query-parser cache
//! ```

mod event;
mod service;

pub use event::{ClusterChangedEvent, ClusterState, MetaData};
pub use service::{ClusterService, ClusterStateListener, ClusterStateSource, ListenerId};
