use quadview_model::{LogicalGraph, Triple};

/// An event that is raised when the content of a graph changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphEvent {
    /// A triple has been added to the graph.
    Added(Triple),
    /// A triple has been removed from the graph.
    Removed(Triple),
    /// All triples of the graph have been removed. No [GraphEvent::Removed] events are guaranteed
    /// to precede this event.
    Cleared,
}

/// Receives the [GraphEvent]s of one or more graphs.
///
/// Callers use [GraphEventSink::has_listeners] to decide whether they have to take a slower
/// path that reports every changed triple individually.
pub trait GraphEventSink: Send + Sync {
    /// Reports `event` that happened in `graph`.
    fn notify(&self, graph: &LogicalGraph, event: &GraphEvent);

    /// Returns true if anyone is interested in the events of this sink.
    fn has_listeners(&self) -> bool;
}
