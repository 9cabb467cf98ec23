use quadview_common::error::StorageError;
use thiserror::Error;

/// An error raised by a [GraphView](super::GraphView).
#[derive(Debug, Error)]
pub enum GraphError {
    /// The storage returned a tuple that does not have the expected arity.
    #[error("Expected a tuple with {expected} elements, but got {actual}")]
    MalformedTuple { expected: usize, actual: usize },
    /// The storage context the view is bound to has been closed.
    #[error("The storage context of the graph is no longer active")]
    InvalidContext,
    /// Triples cannot be inserted into the union graph, as it has no single target graph.
    #[error("Triples cannot be inserted into the union graph")]
    UnionGraphUpdate,
    #[error(transparent)]
    Storage(StorageError),
}

impl From<StorageError> for GraphError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::ContextClosed => GraphError::InvalidContext,
            error => GraphError::Storage(error),
        }
    }
}
