//! Index identity.

use std::fmt;
use std::sync::Arc;

/// Immutable identity of one logical index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Index {
    name: Arc<str>,
}

impl Index {
    /// Create an index identity.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            name: Arc::from(name.as_ref()),
        }
    }

    /// The index name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.name)
    }
}
