use std::fmt::{Display, Formatter};

/// The compact identifier of a term within a quad store.
///
/// # Default Graph
///
/// The default graph is represented by [ObjectId::DEFAULT_GRAPH]. No term is ever assigned this
/// id.
#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy, PartialOrd, Ord)]
pub struct ObjectId(u32);

impl ObjectId {
    /// The id of the default graph.
    pub const DEFAULT_GRAPH: ObjectId = ObjectId(0);
    pub const MIN: ObjectId = ObjectId(0);
    pub const MAX: ObjectId = ObjectId(u32::MAX);

    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn as_u32(self) -> u32 {
        self.0
    }

    /// Returns true if this id identifies the default graph.
    pub fn is_default_graph(self) -> bool {
        self == Self::DEFAULT_GRAPH
    }

    pub fn next(self) -> Option<ObjectId> {
        self.0.checked_add(1).map(ObjectId)
    }
}

impl From<u32> for ObjectId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl Display for ObjectId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
