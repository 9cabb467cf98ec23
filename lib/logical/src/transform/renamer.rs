use crate::transform::{NodeTransform, SubstitutionMapping, VariableAllocator};
use quadview_model::{TermPatternRef, Variable, VariableRef};
use rustc_hash::FxHashSet;

/// Renames every variable that is not protected to a fresh variable.
///
/// Protected variables, blank nodes, IRIs, and literals pass through unchanged. The renamer can
/// start from a pre-seeded [SubstitutionMapping] to continue the renaming of an earlier pass.
#[derive(Debug, Clone)]
pub struct VariableRenamer {
    protected: FxHashSet<String>,
    mapping: SubstitutionMapping,
}

impl VariableRenamer {
    /// Creates a renamer that allocates variables with the default renaming prefix.
    pub fn new(protected: impl IntoIterator<Item = Variable>) -> Self {
        Self::with_mapping(
            protected,
            SubstitutionMapping::new(VariableAllocator::for_renaming()),
        )
    }

    pub fn with_mapping(
        protected: impl IntoIterator<Item = Variable>,
        mapping: SubstitutionMapping,
    ) -> Self {
        Self {
            protected: protected.into_iter().map(Variable::into_string).collect(),
            mapping,
        }
    }

    pub fn is_protected(&self, variable: VariableRef<'_>) -> bool {
        self.protected.contains(variable.as_str())
    }

    pub fn mapping(&self) -> &SubstitutionMapping {
        &self.mapping
    }

    pub fn into_mapping(self) -> SubstitutionMapping {
        self.mapping
    }
}

impl NodeTransform for VariableRenamer {
    fn substitute(&mut self, term: TermPatternRef<'_>) -> Option<Variable> {
        match term {
            TermPatternRef::Variable(variable) if !self.is_protected(variable) => {
                self.mapping.get_or_allocate(term)
            }
            _ => None,
        }
    }
}
