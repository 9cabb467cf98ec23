mod allocator;
mod blank_nodes;
mod mapping;
mod renamer;

pub use allocator::{BLANK_NODE_VARIABLE_PREFIX, RENAMED_VARIABLE_PREFIX, VariableAllocator};
pub use blank_nodes::BlankNodesToVariables;
pub use mapping::SubstitutionMapping;
pub use renamer::VariableRenamer;

use quadview_model::{
    GraphNamePattern, NamedNodePattern, TermPattern, TermPatternRef, TriplePattern, Variable,
};
use std::borrow::Cow;

/// A substitution of terms by variables that can be applied to every term of an algebra tree.
///
/// Implementations only decide *which* terms are replaced by implementing
/// [substitute](Self::substitute). The provided methods lift this decision to the pattern types
/// used in operators. A term that is not replaced is returned as [Cow::Borrowed], i.e., the
/// result refers to the very same instance. The rewrite engine relies on this to detect that
/// nothing changed.
pub trait NodeTransform {
    /// Returns the variable that replaces `term`, or [None] if `term` is kept.
    fn substitute(&mut self, term: TermPatternRef<'_>) -> Option<Variable>;

    /// Applies the transform to a term pattern.
    fn apply<'a>(&mut self, term: &'a TermPattern) -> Cow<'a, TermPattern> {
        let Some(term_ref) = TermPatternRef::from_term_pattern(term) else {
            return Cow::Borrowed(term);
        };
        match self.substitute(term_ref) {
            Some(variable) => Cow::Owned(TermPattern::Variable(variable)),
            None => Cow::Borrowed(term),
        }
    }

    fn transform_variable<'a>(&mut self, variable: &'a Variable) -> Cow<'a, Variable> {
        match self.substitute(TermPatternRef::Variable(variable.as_ref())) {
            Some(substitute) => Cow::Owned(substitute),
            None => Cow::Borrowed(variable),
        }
    }

    fn transform_named_node_pattern<'a>(
        &mut self,
        pattern: &'a NamedNodePattern,
    ) -> Cow<'a, NamedNodePattern> {
        let term = match pattern {
            NamedNodePattern::NamedNode(nn) => TermPatternRef::NamedNode(nn.as_ref()),
            NamedNodePattern::Variable(variable) => TermPatternRef::Variable(variable.as_ref()),
        };
        match self.substitute(term) {
            Some(variable) => Cow::Owned(NamedNodePattern::Variable(variable)),
            None => Cow::Borrowed(pattern),
        }
    }

    fn transform_graph_name_pattern<'a>(
        &mut self,
        pattern: &'a GraphNamePattern,
    ) -> Cow<'a, GraphNamePattern> {
        let term = match pattern {
            GraphNamePattern::NamedNode(nn) => TermPatternRef::NamedNode(nn.as_ref()),
            GraphNamePattern::Variable(variable) => TermPatternRef::Variable(variable.as_ref()),
            GraphNamePattern::DefaultGraph => return Cow::Borrowed(pattern),
        };
        match self.substitute(term) {
            Some(variable) => Cow::Owned(GraphNamePattern::Variable(variable)),
            None => Cow::Borrowed(pattern),
        }
    }

    /// Applies the transform to all three positions of `pattern`.
    fn transform_triple_pattern<'a>(
        &mut self,
        pattern: &'a TriplePattern,
    ) -> Cow<'a, TriplePattern> {
        let subject = self.apply(&pattern.subject);
        let predicate = self.transform_named_node_pattern(&pattern.predicate);
        let object = self.apply(&pattern.object);

        match (subject, predicate, object) {
            (Cow::Borrowed(_), Cow::Borrowed(_), Cow::Borrowed(_)) => Cow::Borrowed(pattern),
            (subject, predicate, object) => Cow::Owned(TriplePattern {
                subject: subject.into_owned(),
                predicate: predicate.into_owned(),
                object: object.into_owned(),
            }),
        }
    }
}

impl<T: NodeTransform + ?Sized> NodeTransform for &mut T {
    fn substitute(&mut self, term: TermPatternRef<'_>) -> Option<Variable> {
        (**self).substitute(term)
    }
}
