//! Cluster state snapshots and change events.

use std::collections::BTreeMap;
use std::sync::Arc;

/// Index metadata held in cluster state: mappings keyed by `index/type`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetaData {
    version: u64,
    mappings: BTreeMap<String, String>,
}

impl MetaData {
    /// Metadata version, bumped on every mapping change.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Mapping source for `index`/`doc_type`, if any.
    pub fn mapping(&self, index: &str, doc_type: &str) -> Option<&str> {
        self.mappings
            .get(&mapping_key(index, doc_type))
            .map(String::as_str)
    }

    /// Copy of this metadata with one mapping added or replaced.
    pub fn with_mapping(&self, index: &str, doc_type: &str, source: impl Into<String>) -> Self {
        let mut mappings = self.mappings.clone();
        mappings.insert(mapping_key(index, doc_type), source.into());
        Self {
            version: self.version + 1,
            mappings,
        }
    }
}

fn mapping_key(index: &str, doc_type: &str) -> String {
    format!("{}/{}", index, doc_type)
}

/// Immutable snapshot of cluster state.
#[derive(Debug, Clone, Default)]
pub struct ClusterState {
    version: u64,
    metadata: Arc<MetaData>,
}

impl ClusterState {
    /// Create a state at `version` holding `metadata`.
    pub fn new(version: u64, metadata: Arc<MetaData>) -> Self {
        Self { version, metadata }
    }

    /// State version.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Metadata snapshot.
    pub fn metadata(&self) -> &Arc<MetaData> {
        &self.metadata
    }

    /// Next state carrying new metadata.
    pub fn with_metadata(&self, metadata: MetaData) -> Self {
        Self {
            version: self.version + 1,
            metadata: Arc::new(metadata),
        }
    }

    /// Next state sharing this state's metadata (e.g. a routing-only change).
    pub fn next(&self) -> Self {
        Self {
            version: self.version + 1,
            metadata: Arc::clone(&self.metadata),
        }
    }
}

/// Notification that cluster state moved from `previous` to `state`.
#[derive(Debug, Clone)]
pub struct ClusterChangedEvent {
    source: String,
    state: ClusterState,
    previous: ClusterState,
    metadata_changed: bool,
}

impl ClusterChangedEvent {
    /// Build an event, deciding once whether metadata differs between the two
    /// states.
    pub fn new(source: impl Into<String>, state: ClusterState, previous: ClusterState) -> Self {
        let metadata_changed = !Arc::ptr_eq(&state.metadata, &previous.metadata)
            && *state.metadata != *previous.metadata;
        Self {
            source: source.into(),
            state,
            previous,
            metadata_changed,
        }
    }

    /// What caused the change.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The new state.
    pub fn state(&self) -> &ClusterState {
        &self.state
    }

    /// The state before the change.
    pub fn previous(&self) -> &ClusterState {
        &self.previous
    }

    /// Whether index metadata (mappings) changed.
    pub fn metadata_changed(&self) -> bool {
        self.metadata_changed
    }
}
