use dashmap::DashMap;
use quadview_common::error::{CorruptionError, StorageError};
use quadview_common::ObjectId;
use quadview_model::{GraphNameRef, Term, TermRef};
use rustc_hash::FxHasher;
use std::hash::BuildHasherDefault;
use std::sync::atomic::{AtomicU32, Ordering};

/// Maintains a mapping between RDF terms and object ids in memory.
///
/// # Object IDs
///
/// The object id is a 32-bit unsigned integer used to uniquely identify RDF terms. Currently, we
/// simply use a counter to allocate new object ids. The id 0 is reserved for the default graph.
#[derive(Debug)]
pub struct MemObjectIdMapping {
    /// Contains the next free object id.
    next_id: AtomicU32,
    /// Maps object ids to their terms.
    id2term: DashMap<ObjectId, Term, BuildHasherDefault<FxHasher>>,
    /// Maps terms to their object id.
    term2id: DashMap<Term, ObjectId, BuildHasherDefault<FxHasher>>,
}

impl Default for MemObjectIdMapping {
    fn default() -> Self {
        Self::new()
    }
}

impl MemObjectIdMapping {
    /// Creates a new empty [MemObjectIdMapping].
    pub fn new() -> Self {
        Self {
            next_id: AtomicU32::new(1), // Start at 1 to account for Default Graph.
            id2term: DashMap::with_hasher(BuildHasherDefault::default()),
            term2id: DashMap::with_hasher(BuildHasherDefault::default()),
        }
    }

    /// Returns the number of mapped terms.
    pub fn len(&self) -> usize {
        self.id2term.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id2term.is_empty()
    }

    /// Returns the object id of `term`, allocating a new one if the term is not yet mapped.
    pub fn encode_term<'term>(&self, term: impl Into<TermRef<'term>>) -> ObjectId {
        let term = term.into().into_owned();
        if let Some(id) = self.term2id.get(&term) {
            return *id;
        }

        *self.term2id.entry(term.clone()).or_insert_with(|| {
            let id = ObjectId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
            self.id2term.insert(id, term);
            id
        })
    }

    /// Returns the object id of `graph_name`, allocating a new one if necessary.
    pub fn encode_graph_name(&self, graph_name: GraphNameRef<'_>) -> ObjectId {
        match graph_name {
            GraphNameRef::NamedNode(nn) => self.encode_term(nn),
            GraphNameRef::BlankNode(bnode) => self.encode_term(bnode),
            GraphNameRef::DefaultGraph => ObjectId::DEFAULT_GRAPH,
        }
    }

    /// Returns the object id of `term` without allocating a new one.
    ///
    /// A term without an object id cannot be part of any stored quad.
    pub fn try_get_object_id<'term>(&self, term: impl Into<TermRef<'term>>) -> Option<ObjectId> {
        self.term2id
            .get(&term.into().into_owned())
            .map(|id| *id)
    }

    /// Decodes the given `object_id`.
    ///
    /// # Error
    ///
    /// Returns an error if the object id is unknown or refers to the default graph.
    pub fn decode_term(&self, object_id: ObjectId) -> Result<Term, StorageError> {
        self.id2term
            .get(&object_id)
            .map(|term| term.clone())
            .ok_or_else(|| CorruptionError::msg(format!("Unknown object id {object_id}")).into())
    }
}
