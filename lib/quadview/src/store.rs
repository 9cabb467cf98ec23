//! A quad store that exposes logical graphs and rewrites algebra trees.
//!
//! Usage example:
//! ```
//! use quadview::model::*;
//! use quadview::store::Store;
//!
//! let store = Store::new();
//!
//! // insertion
//! let ex = NamedNode::new("http://example.com")?;
//! let graph = NamedNode::new("http://example.com/g")?;
//! store.insert(QuadRef::new(&ex, &ex, &ex, &graph));
//!
//! // projection
//! let context = store.context();
//! let view = store.project(&context, LogicalGraph::NamedGraph(graph.into()));
//! let triples = view.find_triples(None, None, None)?.collect::<Result<Vec<_>, _>>()?;
//! assert_eq!(triples, vec![Triple::new(ex.clone(), ex.clone(), ex)]);
//!
//! // views become invalid once their context is closed
//! context.close();
//! assert!(view.len().is_err());
//! # Result::<_, Box<dyn std::error::Error>>::Ok(())
//! ```

use crate::error::QuadViewError;
use quadview_logical::rewrite::rewrite;
use quadview_logical::transform::{BlankNodesToVariables, NodeTransform, VariableRenamer};
use quadview_logical::{LogicalOp, RewriteOptions};
use quadview_model::{LogicalGraph, Quad, QuadRef, Variable};
use quadview_storage::graph::GraphView;
use quadview_storage::memory::{MemQuadStorage, MemStorageContext};
use spargebra::algebra::GraphPattern;
use std::sync::Arc;
use tracing::debug;

/// Options for a [Store].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreOptions {
    /// Configures the variables allocated while rewriting.
    pub rewrite: RewriteOptions,
}

/// An in-memory quad store.
///
/// The store hands out [contexts](MemStorageContext). A [GraphView] projected from a context
/// is only usable while the context is open.
#[derive(Debug, Clone, Default)]
pub struct Store {
    storage: MemQuadStorage,
    options: StoreOptions,
}

impl Store {
    /// Creates a new empty [Store] with the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new empty [Store] with the given `options`.
    pub fn with_options(options: StoreOptions) -> Result<Self, QuadViewError> {
        options.rewrite.validate()?;
        Ok(Self {
            storage: MemQuadStorage::new(),
            options,
        })
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// Inserts a quad. Returns false if the quad was already contained.
    pub fn insert<'a>(&self, quad: impl Into<QuadRef<'a>>) -> bool {
        self.storage.insert(quad.into())
    }

    /// Inserts all `quads`. Returns the number of quads that were not yet contained.
    pub fn extend(&self, quads: impl IntoIterator<Item = Quad>) -> usize {
        self.storage.extend(quads)
    }

    /// Returns the number of quads in the store.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Opens a new context on the store.
    pub fn context(&self) -> MemStorageContext {
        self.storage.context()
    }

    /// Exposes `graph` of `context` as a set of triples.
    #[allow(clippy::unused_self, reason = "Keeps projection on the store API")]
    pub fn project(
        &self,
        context: &MemStorageContext,
        graph: LogicalGraph,
    ) -> GraphView<MemStorageContext> {
        debug!(%graph, "Projecting logical graph");
        context.project(graph)
    }

    /// Applies `transform` to every term of `op`.
    #[allow(clippy::unused_self, reason = "Keeps rewriting on the store API")]
    pub fn rewrite(
        &self,
        op: &Arc<LogicalOp>,
        transform: &mut impl NodeTransform,
    ) -> Result<Arc<LogicalOp>, QuadViewError> {
        Ok(rewrite(op, transform)?)
    }

    /// Converts `pattern` into a logical operator and applies `transform` to it.
    pub fn rewrite_pattern(
        &self,
        pattern: &GraphPattern,
        transform: &mut impl NodeTransform,
    ) -> Result<Arc<LogicalOp>, QuadViewError> {
        let op = Arc::new(LogicalOp::try_from(pattern)?);
        self.rewrite(&op, transform)
    }

    /// Creates a transform that replaces blank nodes with fresh variables.
    pub fn blank_node_policy(&self) -> Result<BlankNodesToVariables, QuadViewError> {
        Ok(self.options.rewrite.blank_node_policy()?)
    }

    /// Creates a transform that renames every variable except `protected`.
    pub fn renaming_policy(
        &self,
        protected: impl IntoIterator<Item = Variable>,
    ) -> Result<VariableRenamer, QuadViewError> {
        Ok(self.options.rewrite.renaming_policy(protected)?)
    }
}
