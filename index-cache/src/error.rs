//! Coordinator error types.

use thiserror::Error;

use crate::cache::{CacheError, CacheRole};

/// Errors surfaced by [`IndexCache`](crate::IndexCache).
#[derive(Debug, Error)]
pub enum IndexCacheError {
    /// An underlying cache failed. Caches cleared before it stay cleared.
    #[error("Failed to {operation} {role} cache: {source}")]
    Resource {
        role: CacheRole,
        operation: &'static str,
        #[source]
        source: CacheError,
    },

    /// The coordinator has been closed.
    #[error("Index cache is closed")]
    Closed,

    /// A cluster-state source is already attached.
    #[error("Cluster state source already attached")]
    AlreadyAttached,
}

impl IndexCacheError {
    /// The failing cache role, for resource errors.
    pub fn role(&self) -> Option<CacheRole> {
        match self {
            IndexCacheError::Resource { role, .. } => Some(*role),
            _ => None,
        }
    }
}

/// Adapter for `map_err` on a delegate call.
pub(crate) fn resource(
    role: CacheRole,
    operation: &'static str,
) -> impl FnOnce(CacheError) -> IndexCacheError {
    move |source| IndexCacheError::Resource {
        role,
        operation,
        source,
    }
}
