//! Index segments and their liveness.
//!
//! A [`Segment`] is an immutable unit of index data. Readers hold strong
//! `Segment` clones for as long as they search it; caches only ever keep a
//! [`SegmentRef`], which observes liveness without extending it. Once the last
//! reader drops its `Segment`, every `SegmentRef` pointing at it reports
//! `is_live() == false` and the entries keyed on it become eligible for
//! unreferenced cleanup.
//!
//! # Example
//!
//! ```
//! use index_cache::segment::Segment;
//!
//! let segment = Segment::new(7);
//! let weak = segment.downgrade();
//! assert!(weak.is_live());
//!
//! drop(segment);
//! assert!(!weak.is_live());
//! ```

use std::fmt;
use std::sync::{Arc, Weak};

/// Identifier of a segment, unique within one index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentId(pub u64);

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_{}", self.0)
    }
}

/// Liveness marker shared by every strong clone of a segment.
#[derive(Debug)]
struct Liveness;

/// A live segment handle held by readers.
#[derive(Debug, Clone)]
pub struct Segment {
    id: SegmentId,
    liveness: Arc<Liveness>,
}

impl Segment {
    /// Create a new live segment.
    pub fn new(id: u64) -> Self {
        Self {
            id: SegmentId(id),
            liveness: Arc::new(Liveness),
        }
    }

    /// The segment identifier.
    pub fn id(&self) -> SegmentId {
        self.id
    }

    /// Create a non-owning reference suitable for storing in a cache.
    pub fn downgrade(&self) -> SegmentRef {
        SegmentRef {
            id: self.id,
            liveness: Arc::downgrade(&self.liveness),
        }
    }

    /// Number of strong handles currently keeping this segment alive.
    pub fn reader_count(&self) -> usize {
        Arc::strong_count(&self.liveness)
    }

    /// Address of the liveness marker. Distinct for every segment instance
    /// while it or any `SegmentRef` to it exists, even when ids repeat.
    pub(crate) fn token(&self) -> usize {
        Arc::as_ptr(&self.liveness) as usize
    }
}

/// Non-owning reference to a segment.
#[derive(Debug, Clone)]
pub struct SegmentRef {
    id: SegmentId,
    liveness: Weak<Liveness>,
}

impl SegmentRef {
    /// The segment identifier.
    pub fn id(&self) -> SegmentId {
        self.id
    }

    /// Whether any reader still holds the segment.
    pub fn is_live(&self) -> bool {
        self.liveness.strong_count() > 0
    }

    /// Whether this reference was taken from `segment` (or one of its
    /// clones), as opposed to another segment that happens to share its id.
    pub fn refers_to(&self, segment: &Segment) -> bool {
        self.id == segment.id
            && std::ptr::eq(self.liveness.as_ptr(), Arc::as_ptr(&segment.liveness))
    }
}
