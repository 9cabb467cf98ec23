use crate::error::StorageError;
use crate::{IdTuple, ObjectId};
use quadview_model::{
    GraphNameRef, LogicalGraph, NamedNodeRef, NamedOrBlankNode, NamedOrBlankNodeRef,
    SubjectRef, Term, TermRef, TripleRef,
};
use std::fmt::{Display, Formatter};

/// A lazy sequence of tuples returned by a [QuadStorage].
pub type TupleIter<'storage> =
    Box<dyn Iterator<Item = Result<IdTuple, StorageError>> + 'storage>;

/// Selects the graphs that take part in a storage operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphSelector<'a> {
    /// Only the default graph.
    DefaultGraph,
    /// A single named graph.
    NamedGraph(NamedOrBlankNodeRef<'a>),
    /// All named graphs. The default graph is not included.
    AnyNamedGraph,
}

impl<'a> From<&'a LogicalGraph> for GraphSelector<'a> {
    fn from(value: &'a LogicalGraph) -> Self {
        match value {
            LogicalGraph::DefaultGraph => Self::DefaultGraph,
            LogicalGraph::NamedGraph(name) => Self::NamedGraph(name.as_ref()),
            LogicalGraph::UnionGraph => Self::AnyNamedGraph,
        }
    }
}

impl<'a> From<GraphNameRef<'a>> for GraphSelector<'a> {
    fn from(value: GraphNameRef<'a>) -> Self {
        match value {
            GraphNameRef::NamedNode(nn) => Self::NamedGraph(nn.into()),
            GraphNameRef::BlankNode(bnode) => Self::NamedGraph(bnode.into()),
            GraphNameRef::DefaultGraph => Self::DefaultGraph,
        }
    }
}

impl<'a> From<&'a NamedOrBlankNode> for GraphSelector<'a> {
    fn from(value: &'a NamedOrBlankNode) -> Self {
        Self::NamedGraph(value.as_ref())
    }
}

impl Display for GraphSelector<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphSelector::DefaultGraph => write!(f, "DEFAULT"),
            GraphSelector::NamedGraph(name) => write!(f, "{name}"),
            GraphSelector::AnyNamedGraph => write!(f, "ANY NAMED"),
        }
    }
}

/// Constrains the subject, predicate, and object of the triples a storage operation applies to.
///
/// A position that is [None] matches any term.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TripleFilter<'a> {
    pub subject: Option<SubjectRef<'a>>,
    pub predicate: Option<NamedNodeRef<'a>>,
    pub object: Option<TermRef<'a>>,
}

impl<'a> TripleFilter<'a> {
    /// A filter that matches every triple.
    pub const ANY: TripleFilter<'static> = TripleFilter {
        subject: None,
        predicate: None,
        object: None,
    };

    pub fn new(
        subject: Option<SubjectRef<'a>>,
        predicate: Option<NamedNodeRef<'a>>,
        object: Option<TermRef<'a>>,
    ) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }

    /// A filter that only matches `triple`.
    pub fn exact(triple: TripleRef<'a>) -> Self {
        Self::new(
            Some(triple.subject),
            Some(triple.predicate),
            Some(triple.object),
        )
    }

    /// Returns true if every position is a wildcard.
    pub fn is_wildcard(&self) -> bool {
        self.subject.is_none() && self.predicate.is_none() && self.object.is_none()
    }
}

impl Display for TripleFilter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        fn write_position<T: Display>(
            f: &mut Formatter<'_>,
            term: Option<T>,
        ) -> std::fmt::Result {
            match term {
                None => write!(f, "ANY"),
                Some(term) => write!(f, "{term}"),
            }
        }

        write!(f, "(")?;
        write_position(f, self.subject)?;
        write!(f, " ")?;
        write_position(f, self.predicate)?;
        write!(f, " ")?;
        write_position(f, self.object)?;
        write!(f, ")")
    }
}

/// The interface of a quad store, as seen by the graph projection layer.
///
/// Terms are identified by compact [ObjectId]s. A [QuadStorage] is a handle that is bound to a
/// single storage context (e.g., a transaction). Once the context is closed, the handle must no
/// longer be used. All operations are blocking.
///
/// # Ordering
///
/// Scans over [GraphSelector::AnyNamedGraph] must return the quads in an order such that quads
/// sharing the same subject, predicate, and object are adjacent. Consumers rely on this to remove
/// duplicates after dropping the graph name without buffering the result.
pub trait QuadStorage: Send + Sync {
    /// Returns whether the context of this handle is still open.
    fn is_active(&self) -> bool;

    /// Returns a lazy sequence of `(graph, subject, predicate, object)` tuples that match the
    /// given `graph` and `filter`.
    ///
    /// The storage must remain unchanged by other contexts while the sequence is consumed.
    fn scan(
        &self,
        graph: GraphSelector<'_>,
        filter: TripleFilter<'_>,
    ) -> Result<TupleIter<'_>, StorageError>;

    /// Returns the term identified by `id`.
    fn decode(&self, id: ObjectId) -> Result<Term, StorageError>;

    /// Inserts a single quad. Returns false if the quad was already contained.
    fn insert(
        &self,
        graph: GraphNameRef<'_>,
        triple: TripleRef<'_>,
    ) -> Result<bool, StorageError>;

    /// Deletes all quads that match the given `graph` and `filter`. Returns the number of deleted
    /// quads.
    fn delete_matching(
        &self,
        graph: GraphSelector<'_>,
        filter: TripleFilter<'_>,
    ) -> Result<usize, StorageError>;

    /// Returns the number of quads stored in the selected graphs.
    fn cardinality(&self, graph: GraphSelector<'_>) -> Result<usize, StorageError>;

    /// Flushes pending changes to the underlying medium.
    fn sync(&self) -> Result<(), StorageError> {
        Ok(())
    }
}
