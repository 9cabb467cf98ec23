use crate::graph::{GraphCapabilities, GraphError, GraphEventManager};
use itertools::Itertools;
use quadview_common::error::{CorruptionError, StorageError};
use quadview_common::{
    GraphEvent, GraphEventSink, GraphSelector, IdTuple, ObjectId, QuadStorage, TripleFilter,
};
use quadview_model::{
    LogicalGraph, NamedNode, NamedNodeRef, Subject, SubjectRef, Term, TermRef,
    Triple, TripleRef,
};
use std::sync::Arc;
use tracing::debug;

/// A lazy sequence of triples returned by a [GraphView].
pub type TripleIter<'view> = Box<dyn Iterator<Item = Result<Triple, GraphError>> + 'view>;

/// The object ids of a triple.
type IdTriple = [ObjectId; 3];

type IdTripleIter<'view> = Box<dyn Iterator<Item = Result<IdTriple, GraphError>> + 'view>;

/// Exposes one [LogicalGraph] of a quad storage as a set of triples.
///
/// The view is bound to the storage context of `storage`. Once that context is closed, every
/// operation fails with [GraphError::InvalidContext].
///
/// # Union Graph
///
/// The union graph contains a triple if any named graph contains it. Scans over the union graph
/// rely on the storage to return quads with the same subject, predicate, and object adjacently
/// and only suppress *adjacent* duplicates. A storage that violates this ordering produces
/// duplicate triples.
pub struct GraphView<S> {
    storage: S,
    graph: LogicalGraph,
    events: Arc<dyn GraphEventSink>,
}

impl<S: QuadStorage> GraphView<S> {
    /// Creates a new view on `graph` without any listeners.
    pub fn new(storage: S, graph: LogicalGraph) -> Self {
        Self::with_event_sink(storage, graph, Arc::new(GraphEventManager::new()))
    }

    /// Creates a new view on `graph` that reports changes to `events`.
    pub fn with_event_sink(
        storage: S,
        graph: LogicalGraph,
        events: Arc<dyn GraphEventSink>,
    ) -> Self {
        Self {
            storage,
            graph,
            events,
        }
    }

    pub fn graph(&self) -> &LogicalGraph {
        &self.graph
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn event_sink(&self) -> &Arc<dyn GraphEventSink> {
        &self.events
    }

    pub fn capabilities(&self) -> GraphCapabilities {
        GraphCapabilities::for_graph(&self.graph)
    }

    /// Returns all triples that match the given pattern. [None] matches any term.
    pub fn find_triples(
        &self,
        subject: Option<SubjectRef<'_>>,
        predicate: Option<NamedNodeRef<'_>>,
        object: Option<TermRef<'_>>,
    ) -> Result<TripleIter<'_>, GraphError> {
        let ids = self.scan_ids(TripleFilter::new(subject, predicate, object))?;
        Ok(Box::new(ids.map(|ids| self.decode_triple(ids?))))
    }

    /// Returns whether the graph contains `triple`.
    pub fn contains(&self, triple: TripleRef<'_>) -> Result<bool, GraphError> {
        let mut ids = self.scan_ids(TripleFilter::exact(triple))?;
        Ok(ids.next().transpose()?.is_some())
    }

    /// Returns the number of triples in the graph.
    ///
    /// For named graphs and the union graph, this scans the graph on every call.
    pub fn len(&self) -> Result<usize, GraphError> {
        if self.graph.is_default_graph() {
            self.ensure_active()?;
            return Ok(self.storage.cardinality(GraphSelector::DefaultGraph)?);
        }
        itertools::process_results(self.scan_ids(TripleFilter::ANY)?, |triples| {
            triples.count()
        })
    }

    pub fn is_empty(&self) -> Result<bool, GraphError> {
        let mut ids = self.scan_ids(TripleFilter::ANY)?;
        Ok(ids.next().transpose()?.is_none())
    }

    /// Inserts `triple`. Returns false if the graph already contained it.
    ///
    /// The union graph does not support insertions, as it is unclear which named graph should
    /// receive the triple.
    pub fn insert(&self, triple: TripleRef<'_>) -> Result<bool, GraphError> {
        self.ensure_active()?;
        let Some(graph_name) = self.graph.graph_name() else {
            return Err(GraphError::UnionGraphUpdate);
        };

        let inserted = self.storage.insert(graph_name, triple)?;
        if inserted && self.events.has_listeners() {
            self.events
                .notify(&self.graph, &GraphEvent::Added(triple.into_owned()));
        }
        Ok(inserted)
    }

    /// Deletes `triple`. Returns false if the graph did not contain it.
    ///
    /// Deleting from the union graph deletes the triple from every named graph.
    pub fn delete(&self, triple: TripleRef<'_>) -> Result<bool, GraphError> {
        self.ensure_active()?;
        let deleted = self
            .storage
            .delete_matching(self.selector(), TripleFilter::exact(triple))?;
        if deleted > 0 && self.events.has_listeners() {
            self.events
                .notify(&self.graph, &GraphEvent::Removed(triple.into_owned()));
        }
        Ok(deleted > 0)
    }

    /// Removes all triples that match the given pattern. Returns the number of deleted quads.
    ///
    /// If the event sink has listeners, every matching triple is deleted individually and
    /// reported with a [GraphEvent::Removed]. Otherwise, a single bulk delete is issued and no
    /// events are raised.
    pub fn remove(
        &self,
        subject: Option<SubjectRef<'_>>,
        predicate: Option<NamedNodeRef<'_>>,
        object: Option<TermRef<'_>>,
    ) -> Result<usize, GraphError> {
        self.ensure_active()?;
        let filter = TripleFilter::new(subject, predicate, object);

        if !self.events.has_listeners() {
            let deleted = self.storage.delete_matching(self.selector(), filter)?;
            debug!(graph = %self.graph, %filter, deleted, "Removed triples in bulk");
            return Ok(deleted);
        }

        // The matches are materialized, as the storage must not change during a scan.
        let triples = self
            .find_triples(subject, predicate, object)?
            .collect::<Result<Vec<_>, _>>()?;
        let mut deleted = 0;
        for triple in &triples {
            deleted += self
                .storage
                .delete_matching(self.selector(), TripleFilter::exact(triple.as_ref()))?;
            self.events
                .notify(&self.graph, &GraphEvent::Removed(triple.clone()));
        }
        debug!(graph = %self.graph, %filter, deleted, "Removed triples one by one");
        Ok(deleted)
    }

    /// Removes all triples and raises a [GraphEvent::Cleared].
    ///
    /// If the event sink has listeners, a [GraphEvent::Removed] is raised for every triple
    /// before.
    pub fn clear(&self) -> Result<(), GraphError> {
        self.remove(None, None, None)?;
        self.events.notify(&self.graph, &GraphEvent::Cleared);
        Ok(())
    }

    /// Flushes pending changes of the storage.
    pub fn sync(&self) -> Result<(), GraphError> {
        self.ensure_active()?;
        Ok(self.storage.sync()?)
    }

    fn selector(&self) -> GraphSelector<'_> {
        GraphSelector::from(&self.graph)
    }

    fn ensure_active(&self) -> Result<(), GraphError> {
        if self.storage.is_active() {
            Ok(())
        } else {
            Err(GraphError::InvalidContext)
        }
    }

    /// Scans the storage and projects the quads to triples.
    fn scan_ids(&self, filter: TripleFilter<'_>) -> Result<IdTripleIter<'_>, GraphError> {
        self.ensure_active()?;
        let triples = self
            .storage
            .scan(self.selector(), filter)?
            .map(|tuple| project_to_triple(tuple?));

        if self.graph.is_union_graph() {
            Ok(Box::new(triples.dedup_by(|previous, current| {
                matches!((previous, current), (Ok(previous), Ok(current)) if previous == current)
            })))
        } else {
            Ok(Box::new(triples))
        }
    }

    fn decode_triple(&self, [subject, predicate, object]: IdTriple) -> Result<Triple, GraphError> {
        let subject = match self.storage.decode(subject)? {
            Term::NamedNode(nn) => Subject::NamedNode(nn),
            Term::BlankNode(bnode) => Subject::BlankNode(bnode),
            term => return Err(invalid_term(&term, "subject")),
        };
        let predicate: NamedNode = match self.storage.decode(predicate)? {
            Term::NamedNode(nn) => nn,
            term => return Err(invalid_term(&term, "predicate")),
        };
        let object = self.storage.decode(object)?;
        Ok(Triple::new(subject, predicate, object))
    }
}

/// Drops the graph name of a `(g, s, p, o)` tuple.
fn project_to_triple(tuple: IdTuple) -> Result<IdTriple, GraphError> {
    match tuple.as_slice() {
        [_, subject, predicate, object] => Ok([*subject, *predicate, *object]),
        other => Err(GraphError::MalformedTuple {
            expected: 4,
            actual: other.len(),
        }),
    }
}

fn invalid_term(term: &Term, position: &str) -> GraphError {
    StorageError::from(CorruptionError::msg(format!(
        "The term {term} cannot be used as a {position}"
    )))
    .into()
}

impl<S> std::fmt::Debug for GraphView<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphView")
            .field("graph", &self.graph)
            .finish_non_exhaustive()
    }
}
