use quadview_common::{GraphEvent, GraphEventSink};
use quadview_model::LogicalGraph;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// Receives the events of the graphs it is registered for.
pub trait GraphListener: Send + Sync {
    fn on_event(&self, graph: &LogicalGraph, event: &GraphEvent);
}

/// Identifies a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// A [GraphEventSink] that forwards every event to its registered [GraphListener]s.
#[derive(Default)]
pub struct GraphEventManager {
    next_id: AtomicU64,
    listeners: RwLock<Vec<(ListenerId, Arc<dyn GraphListener>)>>,
}

impl GraphEventManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, listener: Arc<dyn GraphListener>) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, listener));
        id
    }

    /// Removes the listener with the given `id`. Returns false if it was not registered.
    pub fn unregister(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
        let len_before = listeners.len();
        listeners.retain(|(registered, _)| *registered != id);
        listeners.len() != len_before
    }

    /// Returns the number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl GraphEventSink for GraphEventManager {
    fn notify(&self, graph: &LogicalGraph, event: &GraphEvent) {
        // Listeners may register other listeners, so the lock is not held during the callbacks.
        let listeners = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect::<Vec<_>>();
        for listener in listeners {
            listener.on_event(graph, event);
        }
    }

    fn has_listeners(&self) -> bool {
        self.listener_count() > 0
    }
}

impl std::fmt::Debug for GraphEventManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphEventManager")
            .field("listeners", &self.listener_count())
            .finish_non_exhaustive()
    }
}
