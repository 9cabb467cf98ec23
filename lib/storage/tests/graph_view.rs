use quadview_common::{GraphEvent, GraphEventSink};
use quadview_model::{
    GraphName, LogicalGraph, NamedNode, NamedOrBlankNode, Quad, Triple,
};
use quadview_storage::graph::{GraphError, GraphEventManager, GraphListener, GraphView};
use quadview_storage::memory::{MemQuadStorage, MemStorageContext};
use std::sync::{Arc, Mutex};

fn iri(suffix: &str) -> NamedNode {
    NamedNode::new_unchecked(format!("http://example.com/{suffix}"))
}

fn example_triple(subject: &str) -> Triple {
    Triple::new(iri(subject), iri("p"), iri("o"))
}

fn in_graph(triple: &Triple, graph: Option<&str>) -> Quad {
    let graph_name = graph.map_or(GraphName::DefaultGraph, |g| iri(g).into());
    triple.clone().in_graph(graph_name)
}

fn named(graph: &str) -> LogicalGraph {
    LogicalGraph::NamedGraph(NamedOrBlankNode::from(iri(graph)))
}

fn store(quads: impl IntoIterator<Item = Quad>) -> MemQuadStorage {
    let storage = MemQuadStorage::new();
    storage.extend(quads);
    storage
}

/// Records every event, independently of whether it reports listeners.
struct RecordingSink {
    has_listeners: bool,
    events: Mutex<Vec<GraphEvent>>,
}

impl RecordingSink {
    fn new(has_listeners: bool) -> Arc<Self> {
        Arc::new(Self {
            has_listeners,
            events: Mutex::new(Vec::new()),
        })
    }

    fn events(&self) -> Vec<GraphEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl GraphEventSink for RecordingSink {
    fn notify(&self, _graph: &LogicalGraph, event: &GraphEvent) {
        self.events.lock().unwrap().push(event.clone());
    }

    fn has_listeners(&self) -> bool {
        self.has_listeners
    }
}

fn view_with_sink(
    context: &MemStorageContext,
    graph: LogicalGraph,
    sink: &Arc<RecordingSink>,
) -> GraphView<MemStorageContext> {
    let sink = Arc::clone(sink) as Arc<dyn GraphEventSink>;
    GraphView::with_event_sink(context.clone(), graph, sink)
}

fn collect(view: &GraphView<MemStorageContext>) -> Vec<Triple> {
    view.find_triples(None, None, None)
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

#[test]
fn test_union_graph_deduplicates_triples() {
    let triple = example_triple("a");
    let storage = store([
        in_graph(&triple, Some("g1")),
        in_graph(&triple, Some("g2")),
        in_graph(&triple, Some("g3")),
    ]);
    let union = storage.context().project(LogicalGraph::UnionGraph);

    assert_eq!(collect(&union), vec![triple]);
    assert_eq!(union.len().unwrap(), 1);
}

#[test]
fn test_union_graph_excludes_default_graph() {
    let storage = store([
        in_graph(&example_triple("a"), None),
        in_graph(&example_triple("b"), Some("g1")),
    ]);
    let union = storage.context().project(LogicalGraph::UnionGraph);

    assert_eq!(collect(&union), vec![example_triple("b")]);
}

#[test]
fn test_union_graph_with_interleaved_graphs() {
    let storage = store([
        in_graph(&example_triple("a"), Some("g1")),
        in_graph(&example_triple("b"), Some("g1")),
        in_graph(&example_triple("a"), Some("g2")),
        in_graph(&example_triple("b"), Some("g3")),
    ]);
    let union = storage.context().project(LogicalGraph::UnionGraph);

    assert_eq!(collect(&union), vec![example_triple("a"), example_triple("b")]);
    assert_eq!(union.len().unwrap(), 2);
}

#[test]
fn test_find_triples_with_pattern() {
    let storage = store([
        in_graph(&example_triple("a"), Some("g1")),
        in_graph(&example_triple("b"), Some("g1")),
        in_graph(&example_triple("a"), None),
    ]);
    let graph = storage.context().project(named("g1"));
    let subject = iri("b");

    let triples = graph
        .find_triples(Some(subject.as_ref().into()), None, None)
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    assert_eq!(triples, vec![example_triple("b")]);
}

#[test]
fn test_len_per_graph() {
    let storage = store([
        in_graph(&example_triple("a"), None),
        in_graph(&example_triple("b"), None),
        in_graph(&example_triple("a"), Some("g1")),
    ]);
    let context = storage.context();

    assert_eq!(context.project(LogicalGraph::DefaultGraph).len().unwrap(), 2);
    assert_eq!(context.project(named("g1")).len().unwrap(), 1);
    assert!(context.project(named("g2")).is_empty().unwrap());
}

#[test]
fn test_len_is_not_cached() {
    let storage = store([in_graph(&example_triple("a"), Some("g1"))]);
    let context = storage.context();
    let union = context.project(LogicalGraph::UnionGraph);
    assert_eq!(union.len().unwrap(), 1);

    context
        .project(named("g2"))
        .insert(example_triple("b").as_ref())
        .unwrap();

    assert_eq!(union.len().unwrap(), 2);
}

#[test]
fn test_contains() {
    let storage = store([in_graph(&example_triple("a"), Some("g1"))]);
    let context = storage.context();

    assert!(context
        .project(LogicalGraph::UnionGraph)
        .contains(example_triple("a").as_ref())
        .unwrap());
    assert!(!context
        .project(LogicalGraph::DefaultGraph)
        .contains(example_triple("a").as_ref())
        .unwrap());
}

#[test]
fn test_insert_and_delete_raise_events() {
    let storage = MemQuadStorage::new();
    let context = storage.context();
    let sink = RecordingSink::new(true);
    let graph = view_with_sink(&context, named("g1"), &sink);
    let triple = example_triple("a");

    assert!(graph.insert(triple.as_ref()).unwrap());
    assert!(!graph.insert(triple.as_ref()).unwrap());
    assert!(graph.delete(triple.as_ref()).unwrap());
    assert!(!graph.delete(triple.as_ref()).unwrap());

    assert_eq!(
        sink.events(),
        vec![GraphEvent::Added(triple.clone()), GraphEvent::Removed(triple)]
    );
}

#[test]
fn test_insert_into_union_graph_is_rejected() {
    let storage = MemQuadStorage::new();
    let union = storage.context().project(LogicalGraph::UnionGraph);

    let result = union.insert(example_triple("a").as_ref());

    assert!(matches!(result, Err(GraphError::UnionGraphUpdate)));
    assert!(!union.capabilities().add_allowed);
    assert!(storage.is_empty());
}

#[test]
fn test_clear_without_listeners_deletes_in_bulk() {
    let storage = store([
        in_graph(&example_triple("a"), Some("g1")),
        in_graph(&example_triple("b"), Some("g1")),
        in_graph(&example_triple("a"), None),
    ]);
    let context = storage.context();
    let sink = RecordingSink::new(false);
    let graph = view_with_sink(&context, named("g1"), &sink);

    graph.clear().unwrap();

    assert_eq!(sink.events(), vec![GraphEvent::Cleared]);
    assert!(graph.is_empty().unwrap());
    assert_eq!(storage.len(), 1);
}

#[test]
fn test_clear_with_listeners_reports_every_triple() {
    let storage = store([
        in_graph(&example_triple("a"), Some("g1")),
        in_graph(&example_triple("b"), Some("g1")),
    ]);
    let context = storage.context();
    let sink = RecordingSink::new(true);
    let graph = view_with_sink(&context, named("g1"), &sink);

    graph.clear().unwrap();

    assert_eq!(
        sink.events(),
        vec![
            GraphEvent::Removed(example_triple("a")),
            GraphEvent::Removed(example_triple("b")),
            GraphEvent::Cleared,
        ]
    );
    assert!(storage.is_empty());
}

#[test]
fn test_remove_fast_path() {
    let storage = store([
        in_graph(&example_triple("a"), Some("g1")),
        in_graph(&example_triple("a"), Some("g2")),
        in_graph(&example_triple("b"), Some("g2")),
    ]);
    let context = storage.context();
    let sink = RecordingSink::new(false);
    let union = view_with_sink(&context, LogicalGraph::UnionGraph, &sink);
    let subject = iri("a");

    let deleted = union
        .remove(Some(subject.as_ref().into()), None, None)
        .unwrap();

    assert_eq!(deleted, 2);
    assert!(sink.events().is_empty());
    assert_eq!(collect(&union), vec![example_triple("b")]);
}

#[test]
fn test_remove_slow_path_reports_deduplicated_triples() {
    let storage = store([
        in_graph(&example_triple("a"), Some("g1")),
        in_graph(&example_triple("a"), Some("g2")),
    ]);
    let context = storage.context();
    let sink = RecordingSink::new(true);
    let union = view_with_sink(&context, LogicalGraph::UnionGraph, &sink);

    let deleted = union.remove(None, None, None).unwrap();

    assert_eq!(deleted, 2);
    assert_eq!(sink.events(), vec![GraphEvent::Removed(example_triple("a"))]);
}

#[test]
fn test_registered_listener_receives_events() {
    struct Counter(Mutex<usize>);

    impl GraphListener for Counter {
        fn on_event(&self, _graph: &LogicalGraph, _event: &GraphEvent) {
            *self.0.lock().unwrap() += 1;
        }
    }

    let storage = store([in_graph(&example_triple("a"), None)]);
    let manager = Arc::new(GraphEventManager::new());
    let counter = Arc::new(Counter(Mutex::new(0)));
    let listener = Arc::clone(&counter) as Arc<dyn GraphListener>;
    manager.register(listener);
    let sink: Arc<dyn GraphEventSink> = manager;
    let graph = GraphView::with_event_sink(storage.context(), LogicalGraph::DefaultGraph, sink);

    graph.clear().unwrap();

    // One removed triple and the cleared event.
    assert_eq!(*counter.0.lock().unwrap(), 2);
}

#[test]
fn test_closed_context_invalidates_view() {
    let storage = store([in_graph(&example_triple("a"), None)]);
    let context = storage.context();
    let graph = context.project(LogicalGraph::DefaultGraph);
    context.close();

    assert!(matches!(graph.len(), Err(GraphError::InvalidContext)));
    assert!(matches!(
        graph.find_triples(None, None, None).err(),
        Some(GraphError::InvalidContext)
    ));
    assert!(matches!(
        graph.insert(example_triple("b").as_ref()),
        Err(GraphError::InvalidContext)
    ));
    assert!(matches!(graph.clear(), Err(GraphError::InvalidContext)));
    assert!(matches!(graph.sync(), Err(GraphError::InvalidContext)));
    assert_eq!(storage.len(), 1);
}

#[test]
fn test_closing_context_stops_running_iteration() {
    let storage = store([
        in_graph(&example_triple("a"), None),
        in_graph(&example_triple("b"), None),
    ]);
    let context = storage.context();
    let graph = context.project(LogicalGraph::DefaultGraph);
    let mut triples = graph.find_triples(None, None, None).unwrap();

    assert!(matches!(triples.next(), Some(Ok(_))));
    context.close();

    assert!(matches!(triples.next(), Some(Err(GraphError::InvalidContext))));
    assert!(triples.next().is_none());
}

#[test]
fn test_capabilities() {
    let storage = MemQuadStorage::new();
    let capabilities = storage
        .context()
        .project(LogicalGraph::DefaultGraph)
        .capabilities();

    assert!(!capabilities.iterator_remove_allowed);
    assert!(!capabilities.handles_literal_typing);
    assert!(capabilities.add_allowed);
    assert!(capabilities.size_accurate);
}

#[test]
fn test_union_graph_len_and_clear_with_listener() {
    let shared = example_triple("a");
    let storage = store([
        in_graph(&shared, Some("g1")),
        in_graph(&shared, Some("g2")),
        in_graph(&shared, Some("g3")),
        in_graph(&example_triple("b"), Some("g1")),
    ]);
    let context = storage.context();
    let sink = RecordingSink::new(true);
    let union = view_with_sink(&context, LogicalGraph::UnionGraph, &sink);

    assert_eq!(union.len().unwrap(), 2);
    assert_eq!(context.project(named("g2")).len().unwrap(), 1);

    union.clear().unwrap();

    assert!(storage.is_empty());
    let events = sink.events();
    assert_eq!(events.len(), 3);
    assert_eq!(events.last(), Some(&GraphEvent::Cleared));
}
