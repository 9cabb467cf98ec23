use quadview_common::error::StorageError;
use quadview_logical::{InvalidPrefixError, RewriteError, UnsupportedGraphPatternError};
use quadview_storage::graph::GraphError;

/// An error raised by a [`Store`](crate::store::Store).
#[derive(Debug, thiserror::Error)]
pub enum QuadViewError {
    /// An error raised by a graph view.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// An error raised by the underlying storage.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// An algebra tree could not be rewritten.
    #[error(transparent)]
    Rewrite(#[from] RewriteError),
    /// A graph pattern has no logical operator counterpart.
    #[error(transparent)]
    UnsupportedGraphPattern(#[from] UnsupportedGraphPatternError),
    /// The store options are invalid.
    #[error("Invalid store options: {0}")]
    InvalidOptions(#[from] InvalidPrefixError),
}
