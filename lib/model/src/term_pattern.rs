use oxrdf::{
    BlankNode, BlankNodeRef, Literal, LiteralRef, NamedNode, NamedNodeRef, Variable,
    VariableRef,
};
use spargebra::term::TermPattern;
use std::fmt::{Display, Formatter};

/// A borrowed term that can appear in a query pattern.
///
/// This is the domain of node transformations: IRIs, literals, blank nodes, and variables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TermPatternRef<'a> {
    NamedNode(NamedNodeRef<'a>),
    BlankNode(BlankNodeRef<'a>),
    Literal(LiteralRef<'a>),
    Variable(VariableRef<'a>),
}

impl<'a> TermPatternRef<'a> {
    /// Creates a [TermPatternRef] from a [TermPattern].
    ///
    /// Returns [None] for quoted triple patterns.
    pub fn from_term_pattern(term: &'a TermPattern) -> Option<Self> {
        match term {
            TermPattern::NamedNode(nn) => Some(Self::NamedNode(nn.as_ref())),
            TermPattern::BlankNode(bnode) => Some(Self::BlankNode(bnode.as_ref())),
            TermPattern::Literal(literal) => Some(Self::Literal(literal.as_ref())),
            TermPattern::Variable(var) => Some(Self::Variable(var.as_ref())),
            #[allow(
                unreachable_patterns,
                reason = "Quoted triples depend on the enabled spargebra features"
            )]
            _ => None,
        }
    }

    pub fn is_blank_node(self) -> bool {
        matches!(self, Self::BlankNode(_))
    }

    pub fn is_variable(self) -> bool {
        matches!(self, Self::Variable(_))
    }

    /// Returns an owned [TermPattern].
    pub fn into_owned(self) -> TermPattern {
        match self {
            Self::NamedNode(nn) => TermPattern::NamedNode(nn.into_owned()),
            Self::BlankNode(bnode) => TermPattern::BlankNode(bnode.into_owned()),
            Self::Literal(literal) => TermPattern::Literal(literal.into_owned()),
            Self::Variable(var) => TermPattern::Variable(var.into_owned()),
        }
    }
}

impl Display for TermPatternRef<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NamedNode(nn) => nn.fmt(f),
            Self::BlankNode(bnode) => bnode.fmt(f),
            Self::Literal(literal) => literal.fmt(f),
            Self::Variable(var) => var.fmt(f),
        }
    }
}

impl<'a> From<NamedNodeRef<'a>> for TermPatternRef<'a> {
    fn from(value: NamedNodeRef<'a>) -> Self {
        Self::NamedNode(value)
    }
}

impl<'a> From<&'a NamedNode> for TermPatternRef<'a> {
    fn from(value: &'a NamedNode) -> Self {
        Self::NamedNode(value.as_ref())
    }
}

impl<'a> From<BlankNodeRef<'a>> for TermPatternRef<'a> {
    fn from(value: BlankNodeRef<'a>) -> Self {
        Self::BlankNode(value)
    }
}

impl<'a> From<&'a BlankNode> for TermPatternRef<'a> {
    fn from(value: &'a BlankNode) -> Self {
        Self::BlankNode(value.as_ref())
    }
}

impl<'a> From<LiteralRef<'a>> for TermPatternRef<'a> {
    fn from(value: LiteralRef<'a>) -> Self {
        Self::Literal(value)
    }
}

impl<'a> From<&'a Literal> for TermPatternRef<'a> {
    fn from(value: &'a Literal) -> Self {
        Self::Literal(value.as_ref())
    }
}

impl<'a> From<VariableRef<'a>> for TermPatternRef<'a> {
    fn from(value: VariableRef<'a>) -> Self {
        Self::Variable(value)
    }
}

impl<'a> From<&'a Variable> for TermPatternRef<'a> {
    fn from(value: &'a Variable) -> Self {
        Self::Variable(value.as_ref())
    }
}
