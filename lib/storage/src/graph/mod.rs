//! Exposes the quads of a storage as graphs of triples.

mod capabilities;
mod error;
mod events;
mod view;

pub use capabilities::GraphCapabilities;
pub use error::GraphError;
pub use events::{GraphEventManager, GraphListener, ListenerId};
pub use view::{GraphView, TripleIter};
