//! Cluster-state source and in-process cluster service.
//!
//! Listeners are held weakly: registering never extends a listener's lifetime,
//! and a listener that has been dropped simply stops receiving events. Dead
//! registrations are pruned on the next delivery.
//!
//! # Dispatch
//!
//! [`ClusterService::apply`] delivers synchronously on the calling thread.
//! [`ClusterService::spawn_dispatcher`] runs a tokio task that applies states
//! received over a channel, which is how the engine feeds updates from its
//! state-propagation layer. Each apply runs on tokio's blocking pool, so
//! listeners may block without stalling async workers.
//!
//! ```text
//! state updates ──mpsc──► dispatcher task ──spawn_blocking──► apply() ──► listeners (Weak)
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

use super::event::{ClusterChangedEvent, ClusterState};

/// Receives cluster state changes.
pub trait ClusterStateListener: Send + Sync {
    /// Called once per applied state change.
    fn cluster_changed(&self, event: &ClusterChangedEvent);
}

/// Handle identifying one registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Something that publishes cluster state changes to registered listeners.
pub trait ClusterStateSource: Send + Sync {
    /// Register a listener. The source keeps only a weak reference.
    fn register(&self, listener: Weak<dyn ClusterStateListener>) -> ListenerId;

    /// Remove a registration. Returns `false` if it was already gone.
    fn unregister(&self, id: ListenerId) -> bool;
}

/// In-process cluster state holder and publisher.
pub struct ClusterService {
    state: RwLock<ClusterState>,
    listeners: RwLock<Vec<(ListenerId, Weak<dyn ClusterStateListener>)>>,
    next_id: AtomicU64,
    /// Serialises state transitions so listeners observe them in order.
    apply_lock: Mutex<()>,
}

impl ClusterService {
    /// Create a service starting from an empty state.
    pub fn new() -> Self {
        Self::with_state(ClusterState::default())
    }

    /// Create a service starting from `state`.
    pub fn with_state(state: ClusterState) -> Self {
        Self {
            state: RwLock::new(state),
            listeners: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(0),
            apply_lock: Mutex::new(()),
        }
    }

    /// Current cluster state.
    pub fn state(&self) -> ClusterState {
        self.state.read().clone()
    }

    /// Number of registrations whose listener is still alive.
    pub fn listener_count(&self) -> usize {
        self.listeners
            .read()
            .iter()
            .filter(|(_, listener)| listener.strong_count() > 0)
            .count()
    }

    /// Install `new_state` and notify listeners.
    ///
    /// Listeners are invoked without any service lock held, so they may
    /// register, unregister or read state from within the callback.
    pub fn apply(&self, source: &str, new_state: ClusterState) -> ClusterChangedEvent {
        let _guard = self.apply_lock.lock();

        let previous = std::mem::replace(&mut *self.state.write(), new_state.clone());
        let event = ClusterChangedEvent::new(source, new_state, previous);

        let live: Vec<Arc<dyn ClusterStateListener>> = {
            let mut listeners = self.listeners.write();
            listeners.retain(|(_, listener)| listener.strong_count() > 0);
            listeners
                .iter()
                .filter_map(|(_, listener)| listener.upgrade())
                .collect()
        };

        debug!(
            source,
            version = event.state().version(),
            metadata_changed = event.metadata_changed(),
            listeners = live.len(),
            "Applying cluster state"
        );

        for listener in live {
            listener.cluster_changed(&event);
        }

        event
    }

    /// Spawn a task applying every state received on `rx`, in order.
    ///
    /// Each [`apply`](Self::apply) runs on the blocking pool, since it takes
    /// the apply lock and listeners may clear caches synchronously. The next
    /// state is not applied until the previous one has been delivered. The
    /// task ends when all senders are dropped.
    pub fn spawn_dispatcher(
        self: Arc<Self>,
        mut rx: mpsc::UnboundedReceiver<(String, ClusterState)>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            while let Some((source, state)) = rx.recv().await {
                let service = Arc::clone(&self);
                let applied = tokio::task::spawn_blocking(move || {
                    service.apply(&source, state);
                })
                .await;
                if let Err(e) = applied {
                    warn!(error = %e, "Cluster state delivery failed");
                }
            }
            trace!("Cluster state dispatcher stopped");
        })
    }
}

impl Default for ClusterService {
    fn default() -> Self {
        Self::new()
    }
}

impl ClusterStateSource for ClusterService {
    fn register(&self, listener: Weak<dyn ClusterStateListener>) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.write().push((id, listener));
        id
    }

    fn unregister(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.write();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }
}
