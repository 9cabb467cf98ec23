use crate::transform::{NodeTransform, SubstitutionMapping, VariableAllocator};
use quadview_model::{TermPatternRef, Variable};

/// Replaces blank nodes with fresh variables.
///
/// Each distinct blank node is mapped to exactly one variable for the lifetime of the instance.
/// All other terms pass through unchanged. Create a new instance for every rewrite pass; two
/// instances never share state.
#[derive(Debug, Clone)]
pub struct BlankNodesToVariables {
    mapping: SubstitutionMapping,
}

impl BlankNodesToVariables {
    /// Creates a transform that allocates variables with the default blank node prefix.
    pub fn new() -> Self {
        Self::with_allocator(VariableAllocator::for_blank_nodes())
    }

    pub fn with_allocator(allocator: VariableAllocator) -> Self {
        Self {
            mapping: SubstitutionMapping::new(allocator),
        }
    }

    pub fn mapping(&self) -> &SubstitutionMapping {
        &self.mapping
    }

    pub fn into_mapping(self) -> SubstitutionMapping {
        self.mapping
    }
}

impl Default for BlankNodesToVariables {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeTransform for BlankNodesToVariables {
    fn substitute(&mut self, term: TermPatternRef<'_>) -> Option<Variable> {
        match term {
            TermPatternRef::BlankNode(_) => self.mapping.get_or_allocate(term),
            TermPatternRef::NamedNode(_)
            | TermPatternRef::Literal(_)
            | TermPatternRef::Variable(_) => None,
        }
    }
}
