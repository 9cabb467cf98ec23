use crate::graph::GraphView;
use crate::memory::index::{EncodedQuad, GraphIdPattern, IdPattern, MemQuadCursor};
use crate::memory::{MemObjectIdMapping, MemQuadIndexSet};
use quadview_common::error::StorageError;
use quadview_common::{
    GraphSelector, IdTuple, ObjectId, QuadStorage, TripleFilter, TupleIter,
};
use quadview_model::{GraphNameRef, LogicalGraph, Quad, QuadRef, Term, TermRef, TripleRef};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// A memory-based quad storage.
///
/// Writers replace the index set copy-on-write. Hence, a running scan keeps reading the version
/// of the index set that was current when the scan started.
#[derive(Debug, Clone, Default)]
pub struct MemQuadStorage {
    /// Holds the mapping between terms and object ids.
    object_id_mapping: Arc<MemObjectIdMapping>,
    /// The current version of the indexes.
    indexes: Arc<RwLock<Arc<MemQuadIndexSet>>>,
}

impl MemQuadStorage {
    /// Creates a new empty [MemQuadStorage].
    pub fn new() -> Self {
        Self::default()
    }

    pub fn object_id_mapping(&self) -> &Arc<MemObjectIdMapping> {
        &self.object_id_mapping
    }

    /// Inserts a quad. Returns false if the quad was already contained.
    pub fn insert(&self, quad: QuadRef<'_>) -> bool {
        let encoded = self.encode_quad(quad);
        self.write(|indexes| indexes.insert(&encoded))
    }

    /// Inserts all `quads`. Returns the number of quads that were not yet contained.
    pub fn extend(&self, quads: impl IntoIterator<Item = Quad>) -> usize {
        let encoded = quads
            .into_iter()
            .map(|quad| self.encode_quad(quad.as_ref()))
            .collect::<Vec<_>>();
        let inserted = self.write(|indexes| {
            encoded
                .iter()
                .filter(|quad| indexes.insert(quad))
                .count()
        });
        debug!(inserted, total = encoded.len(), "Extended memory storage");
        inserted
    }

    /// Returns the number of stored quads.
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Opens a new storage context.
    pub fn context(&self) -> MemStorageContext {
        MemStorageContext {
            storage: self.clone(),
            active: Arc::new(AtomicBool::new(true)),
        }
    }

    fn encode_quad(&self, quad: QuadRef<'_>) -> EncodedQuad {
        [
            self.object_id_mapping.encode_graph_name(quad.graph_name),
            self.object_id_mapping.encode_term(quad.subject),
            self.object_id_mapping.encode_term(quad.predicate),
            self.object_id_mapping.encode_term(quad.object),
        ]
    }

    /// Returns the current version of the indexes.
    fn snapshot(&self) -> Arc<MemQuadIndexSet> {
        let guard = self.indexes.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    fn write<T>(&self, f: impl FnOnce(&mut MemQuadIndexSet) -> T) -> T {
        let mut guard = self.indexes.write().unwrap_or_else(PoisonError::into_inner);
        f(Arc::make_mut(&mut guard))
    }

    /// Translates a selector and a filter into an [IdPattern].
    ///
    /// Returns [None] if a term of the request has no object id, in which case nothing can
    /// match.
    fn encode_pattern(
        &self,
        graph: GraphSelector<'_>,
        filter: TripleFilter<'_>,
    ) -> Option<IdPattern> {
        let mapping = &self.object_id_mapping;
        let graph = match graph {
            GraphSelector::DefaultGraph => GraphIdPattern::Exact(ObjectId::DEFAULT_GRAPH),
            GraphSelector::NamedGraph(name) => {
                GraphIdPattern::Exact(mapping.try_get_object_id(name)?)
            }
            GraphSelector::AnyNamedGraph => GraphIdPattern::AnyNamed,
        };
        Some(IdPattern {
            graph,
            subject: encode_position(mapping, filter.subject)?,
            predicate: encode_position(mapping, filter.predicate)?,
            object: encode_position(mapping, filter.object)?,
        })
    }
}

/// Encodes a filter position. The outer [None] indicates a term without an object id.
fn encode_position<'a>(
    mapping: &MemObjectIdMapping,
    term: Option<impl Into<TermRef<'a>>>,
) -> Option<Option<ObjectId>> {
    match term {
        None => Some(None),
        Some(term) => mapping.try_get_object_id(term).map(Some),
    }
}

/// A handle to a [MemQuadStorage] that is bound to a context.
///
/// Clones share the context. After [close](Self::close), every operation on the handle, on its
/// clones, and on the scans obtained from them fails with [StorageError::ContextClosed].
#[derive(Debug, Clone)]
pub struct MemStorageContext {
    storage: MemQuadStorage,
    active: Arc<AtomicBool>,
}

impl MemStorageContext {
    /// Closes the context.
    pub fn close(&self) {
        debug!("Closing memory storage context");
        self.active.store(false, Ordering::Release);
    }

    /// Creates a view that exposes `graph` of this context as a set of triples.
    pub fn project(&self, graph: LogicalGraph) -> GraphView<MemStorageContext> {
        GraphView::new(self.clone(), graph)
    }

    fn ensure_active(&self) -> Result<(), StorageError> {
        if self.is_active() {
            Ok(())
        } else {
            Err(StorageError::ContextClosed)
        }
    }
}

impl QuadStorage for MemStorageContext {
    fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    fn scan(
        &self,
        graph: GraphSelector<'_>,
        filter: TripleFilter<'_>,
    ) -> Result<TupleIter<'_>, StorageError> {
        self.ensure_active()?;
        let Some(pattern) = self.storage.encode_pattern(graph, filter) else {
            return Ok(Box::new(std::iter::empty()));
        };
        Ok(Box::new(ContextBoundScan {
            cursor: self.storage.snapshot().scan(pattern),
            active: Arc::clone(&self.active),
            finished: false,
        }))
    }

    fn decode(&self, id: ObjectId) -> Result<Term, StorageError> {
        self.ensure_active()?;
        self.storage.object_id_mapping.decode_term(id)
    }

    fn insert(
        &self,
        graph: GraphNameRef<'_>,
        triple: TripleRef<'_>,
    ) -> Result<bool, StorageError> {
        self.ensure_active()?;
        Ok(self.storage.insert(triple.in_graph(graph)))
    }

    fn delete_matching(
        &self,
        graph: GraphSelector<'_>,
        filter: TripleFilter<'_>,
    ) -> Result<usize, StorageError> {
        self.ensure_active()?;
        let Some(pattern) = self.storage.encode_pattern(graph, filter) else {
            return Ok(0);
        };
        Ok(self.storage.write(|indexes| {
            let matching = indexes.matching(&pattern);
            matching
                .iter()
                .filter(|quad| indexes.remove(quad))
                .count()
        }))
    }

    fn cardinality(&self, graph: GraphSelector<'_>) -> Result<usize, StorageError> {
        self.ensure_active()?;
        Ok(match self.storage.encode_pattern(graph, TripleFilter::ANY) {
            None => 0,
            Some(pattern) => self.storage.snapshot().scan(pattern).count(),
        })
    }
}

/// A scan that stops with [StorageError::ContextClosed] once its context is closed.
struct ContextBoundScan {
    cursor: MemQuadCursor,
    active: Arc<AtomicBool>,
    finished: bool,
}

impl Iterator for ContextBoundScan {
    type Item = Result<IdTuple, StorageError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if !self.active.load(Ordering::Acquire) {
            self.finished = true;
            return Some(Err(StorageError::ContextClosed));
        }
        self.cursor.next().map(|quad| Ok(IdTuple::quad(quad)))
    }
}
