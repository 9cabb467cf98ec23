pub mod error;
mod events;
mod object_id;
mod quad_storage;
mod tuple;

pub use events::{GraphEvent, GraphEventSink};
pub use object_id::ObjectId;
pub use quad_storage::{GraphSelector, QuadStorage, TripleFilter, TupleIter};
pub use tuple::{IdTuple, TupleTooLongError};
