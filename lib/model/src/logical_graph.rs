use oxrdf::{GraphName, GraphNameRef, NamedOrBlankNode};
use std::fmt::{Display, Formatter};

/// Identifies which part of a quad store is exposed as a set of triples.
///
/// Unlike a [GraphName], a logical graph can also refer to the union of all named graphs. The
/// union graph does not include the default graph.
#[derive(Default, Debug, Clone, PartialEq, Eq, Hash)]
pub enum LogicalGraph {
    /// The default graph of the dataset.
    #[default]
    DefaultGraph,
    /// A single named graph.
    NamedGraph(NamedOrBlankNode),
    /// The union of all named graphs. A triple contained in multiple named graphs is only
    /// contained once in the union graph.
    UnionGraph,
}

impl LogicalGraph {
    /// Creates a [LogicalGraph] for the named graph `graph`.
    pub fn named(graph: impl Into<NamedOrBlankNode>) -> Self {
        Self::NamedGraph(graph.into())
    }

    /// Returns true if this is the default graph.
    pub fn is_default_graph(&self) -> bool {
        matches!(self, Self::DefaultGraph)
    }

    /// Returns true if this is the union of all named graphs.
    pub fn is_union_graph(&self) -> bool {
        matches!(self, Self::UnionGraph)
    }

    /// Returns the graph name of this graph. The union graph has no graph name.
    pub fn graph_name(&self) -> Option<GraphNameRef<'_>> {
        match self {
            Self::DefaultGraph => Some(GraphNameRef::DefaultGraph),
            Self::NamedGraph(NamedOrBlankNode::NamedNode(nn)) => {
                Some(GraphNameRef::NamedNode(nn.as_ref()))
            }
            Self::NamedGraph(NamedOrBlankNode::BlankNode(bnode)) => {
                Some(GraphNameRef::BlankNode(bnode.as_ref()))
            }
            Self::UnionGraph => None,
        }
    }
}

impl From<GraphName> for LogicalGraph {
    fn from(value: GraphName) -> Self {
        match value {
            GraphName::NamedNode(nn) => Self::NamedGraph(nn.into()),
            GraphName::BlankNode(bnode) => Self::NamedGraph(bnode.into()),
            GraphName::DefaultGraph => Self::DefaultGraph,
        }
    }
}

impl From<NamedOrBlankNode> for LogicalGraph {
    fn from(value: NamedOrBlankNode) -> Self {
        Self::NamedGraph(value)
    }
}

impl Display for LogicalGraph {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LogicalGraph::DefaultGraph => write!(f, "Default Graph"),
            LogicalGraph::NamedGraph(name) => write!(f, "Named Graph {name}"),
            LogicalGraph::UnionGraph => write!(f, "Union Graph"),
        }
    }
}
