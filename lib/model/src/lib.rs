mod logical_graph;
mod term_pattern;

pub use logical_graph::LogicalGraph;
pub use term_pattern::TermPatternRef;

// Re-export some oxrdf types.
pub use oxrdf::{
    BlankNode, BlankNodeRef, GraphName, GraphNameRef, Literal, LiteralRef, NamedNode,
    NamedNodeRef, NamedOrBlankNode, NamedOrBlankNodeRef, Quad, QuadRef, Subject, SubjectRef,
    Term, TermRef, Triple, TripleRef, Variable, VariableRef,
};

// Re-export the pattern terms of spargebra.
pub use spargebra::term::{
    GraphNamePattern, GroundTerm, NamedNodePattern, QuadPattern, TermPattern, TriplePattern,
};
