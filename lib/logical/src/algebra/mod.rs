mod display;
mod from_graph_pattern;

use quadview_model::{
    GraphNamePattern, GroundTerm, NamedNodePattern, TermPattern, TriplePattern, Variable,
};
use spargebra::algebra::{AggregateExpression, Expression, OrderExpression, PropertyPathExpression};
use std::sync::Arc;

/// A node of a logical query algebra tree.
///
/// Nodes are immutable and children are shared via [Arc]. Rewriting a tree builds new nodes
/// only along the paths where something changed; all other sub-trees are shared with the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogicalOp {
    /// A basic graph pattern evaluated against the active graph.
    Bgp { patterns: Vec<TriplePattern> },
    /// A single triple pattern.
    Triple { pattern: TriplePattern },
    /// A basic graph pattern evaluated against an explicit graph.
    QuadPattern {
        graph_name: GraphNamePattern,
        patterns: Vec<TriplePattern>,
    },
    /// A property path between two terms.
    Path {
        subject: TermPattern,
        path: PropertyPathExpression,
        object: TermPattern,
    },
    Join {
        left: Arc<LogicalOp>,
        right: Arc<LogicalOp>,
    },
    LeftJoin {
        left: Arc<LogicalOp>,
        right: Arc<LogicalOp>,
        expression: Option<Expression>,
    },
    Union {
        left: Arc<LogicalOp>,
        right: Arc<LogicalOp>,
    },
    Minus {
        left: Arc<LogicalOp>,
        right: Arc<LogicalOp>,
    },
    /// Keeps the solutions of `inner` for which all `expressions` hold.
    Filter {
        inner: Arc<LogicalOp>,
        expressions: Vec<Expression>,
    },
    /// Evaluates `inner` against the graph `name`.
    Graph {
        name: NamedNodePattern,
        inner: Arc<LogicalOp>,
    },
    /// Binds each variable to the value of its expression.
    Assign {
        inner: Arc<LogicalOp>,
        assignments: Vec<(Variable, Expression)>,
    },
    /// An inline table of solutions.
    Values {
        variables: Vec<Variable>,
        bindings: Vec<Vec<Option<GroundTerm>>>,
    },
    /// Binds `graph_name` to the names of the graphs in the dataset.
    DatasetNames { graph_name: NamedNodePattern },
    Project {
        inner: Arc<LogicalOp>,
        variables: Vec<Variable>,
    },
    Distinct {
        inner: Arc<LogicalOp>,
    },
    Reduced {
        inner: Arc<LogicalOp>,
    },
    Slice {
        inner: Arc<LogicalOp>,
        start: usize,
        length: Option<usize>,
    },
    OrderBy {
        inner: Arc<LogicalOp>,
        expressions: Vec<OrderExpression>,
    },
    /// Groups the solutions of `inner` by `variables` and binds each aggregate to a variable.
    Group {
        inner: Arc<LogicalOp>,
        variables: Vec<Variable>,
        aggregates: Vec<(Variable, AggregateExpression)>,
    },
    /// Evaluates `inner` at a remote endpoint.
    Service {
        name: NamedNodePattern,
        inner: Arc<LogicalOp>,
        silent: bool,
    },
}

impl LogicalOp {
    pub fn bgp(patterns: Vec<TriplePattern>) -> Arc<Self> {
        Arc::new(Self::Bgp { patterns })
    }

    pub fn triple(pattern: TriplePattern) -> Arc<Self> {
        Arc::new(Self::Triple { pattern })
    }

    pub fn quad_pattern(graph_name: GraphNamePattern, patterns: Vec<TriplePattern>) -> Arc<Self> {
        Arc::new(Self::QuadPattern {
            graph_name,
            patterns,
        })
    }

    pub fn join(left: Arc<Self>, right: Arc<Self>) -> Arc<Self> {
        Arc::new(Self::Join { left, right })
    }

    pub fn union(left: Arc<Self>, right: Arc<Self>) -> Arc<Self> {
        Arc::new(Self::Union { left, right })
    }

    pub fn filter(inner: Arc<Self>, expressions: Vec<Expression>) -> Arc<Self> {
        Arc::new(Self::Filter { inner, expressions })
    }

    pub fn graph(name: NamedNodePattern, inner: Arc<Self>) -> Arc<Self> {
        Arc::new(Self::Graph { name, inner })
    }

    pub fn assign(inner: Arc<Self>, assignments: Vec<(Variable, Expression)>) -> Arc<Self> {
        Arc::new(Self::Assign { inner, assignments })
    }

    pub fn values(variables: Vec<Variable>, bindings: Vec<Vec<Option<GroundTerm>>>) -> Arc<Self> {
        Arc::new(Self::Values {
            variables,
            bindings,
        })
    }

    /// Creates the table with no variables and a single empty row.
    ///
    /// Joining with this table yields the other operand unchanged.
    pub fn join_identity() -> Arc<Self> {
        Self::values(Vec::new(), vec![Vec::new()])
    }

    pub fn dataset_names(graph_name: NamedNodePattern) -> Arc<Self> {
        Arc::new(Self::DatasetNames { graph_name })
    }

    pub fn project(inner: Arc<Self>, variables: Vec<Variable>) -> Arc<Self> {
        Arc::new(Self::Project { inner, variables })
    }

    pub fn group(
        inner: Arc<Self>,
        variables: Vec<Variable>,
        aggregates: Vec<(Variable, AggregateExpression)>,
    ) -> Arc<Self> {
        Arc::new(Self::Group {
            inner,
            variables,
            aggregates,
        })
    }

    /// Returns whether this is the [join identity](Self::join_identity).
    pub fn is_join_identity(&self) -> bool {
        match self {
            Self::Values {
                variables,
                bindings,
            } => variables.is_empty() && bindings.len() == 1 && bindings[0].is_empty(),
            _ => false,
        }
    }

    /// Returns a short, lowercase name of the operator kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bgp { .. } => "bgp",
            Self::Triple { .. } => "triple",
            Self::QuadPattern { .. } => "quadpattern",
            Self::Path { .. } => "path",
            Self::Join { .. } => "join",
            Self::LeftJoin { .. } => "leftjoin",
            Self::Union { .. } => "union",
            Self::Minus { .. } => "minus",
            Self::Filter { .. } => "filter",
            Self::Graph { .. } => "graph",
            Self::Assign { .. } => "assign",
            Self::Values { .. } => "table",
            Self::DatasetNames { .. } => "datasetnames",
            Self::Project { .. } => "project",
            Self::Distinct { .. } => "distinct",
            Self::Reduced { .. } => "reduced",
            Self::Slice { .. } => "slice",
            Self::OrderBy { .. } => "order",
            Self::Group { .. } => "group",
            Self::Service { .. } => "service",
        }
    }

    /// Returns the direct children in evaluation order.
    pub fn children(&self) -> Vec<&Arc<LogicalOp>> {
        match self {
            Self::Bgp { .. }
            | Self::Triple { .. }
            | Self::QuadPattern { .. }
            | Self::Path { .. }
            | Self::Values { .. }
            | Self::DatasetNames { .. } => Vec::new(),
            Self::Join { left, right }
            | Self::LeftJoin { left, right, .. }
            | Self::Union { left, right }
            | Self::Minus { left, right } => vec![left, right],
            Self::Filter { inner, .. }
            | Self::Graph { inner, .. }
            | Self::Assign { inner, .. }
            | Self::Project { inner, .. }
            | Self::Distinct { inner }
            | Self::Reduced { inner }
            | Self::Slice { inner, .. }
            | Self::OrderBy { inner, .. }
            | Self::Group { inner, .. }
            | Self::Service { inner, .. } => vec![inner],
        }
    }
}
