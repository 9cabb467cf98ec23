//! An in-memory quad storage.

mod index;
mod object_id_mapping;
mod storage;

pub use index::{
    EncodedQuad, GraphIdPattern, IdPattern, IndexComponent, IndexComponents,
    IndexComponentsCreationError, MemQuadCursor, MemQuadIndex, MemQuadIndexSet,
};
pub use object_id_mapping::MemObjectIdMapping;
pub use storage::{MemQuadStorage, MemStorageContext};
