use crate::ObjectId;
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// A tuple of [ObjectId]s as returned by a quad store.
///
/// Tuples are stored inline and can hold at most [IdTuple::MAX_LEN] elements. A tuple carries its
/// arity, as consumers must verify that the store returned tuples of the expected shape (e.g., a
/// quad) instead of silently re-interpreting them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdTuple {
    ids: [ObjectId; IdTuple::MAX_LEN],
    len: usize,
}

#[derive(Debug, Error)]
#[error("A tuple can hold at most {max} elements, got {0}", max = IdTuple::MAX_LEN)]
pub struct TupleTooLongError(pub usize);

impl IdTuple {
    pub const MAX_LEN: usize = 4;

    /// Creates a tuple of length four, in GSPO order.
    pub fn quad(ids: [ObjectId; 4]) -> Self {
        Self { ids, len: 4 }
    }

    /// Creates a tuple of length three, in SPO order.
    pub fn triple([subject, predicate, object]: [ObjectId; 3]) -> Self {
        Self {
            ids: [subject, predicate, object, ObjectId::MIN],
            len: 3,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, index: usize) -> Option<ObjectId> {
        self.as_slice().get(index).copied()
    }

    pub fn as_slice(&self) -> &[ObjectId] {
        &self.ids[..self.len]
    }
}

impl TryFrom<&[ObjectId]> for IdTuple {
    type Error = TupleTooLongError;

    fn try_from(value: &[ObjectId]) -> Result<Self, Self::Error> {
        if value.len() > Self::MAX_LEN {
            return Err(TupleTooLongError(value.len()));
        }

        // Unused slots must stay zeroed so that the derived equality is correct.
        let mut ids = [ObjectId::MIN; Self::MAX_LEN];
        ids[..value.len()].copy_from_slice(value);
        Ok(Self {
            ids,
            len: value.len(),
        })
    }
}

impl Display for IdTuple {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "(")?;
        for (i, id) in self.as_slice().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{id}")?;
        }
        write!(f, ")")
    }
}
