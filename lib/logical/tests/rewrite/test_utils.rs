use quadview_logical::LogicalOp;
use quadview_model::{
    BlankNode, NamedNode, NamedNodePattern, TermPattern, TriplePattern, Variable,
};
use spargebra::Query;
use std::sync::Arc;

pub fn var(name: &str) -> Variable {
    Variable::new_unchecked(name)
}

pub fn iri(suffix: &str) -> NamedNode {
    NamedNode::new_unchecked(format!("http://example.com/{suffix}"))
}

pub fn var_term(name: &str) -> TermPattern {
    TermPattern::Variable(var(name))
}

pub fn bnode_term(id: &str) -> TermPattern {
    TermPattern::BlankNode(BlankNode::new_unchecked(id))
}

pub fn triple(subject: TermPattern, predicate: &str, object: TermPattern) -> TriplePattern {
    TriplePattern {
        subject,
        predicate: NamedNodePattern::NamedNode(iri(predicate)),
        object,
    }
}

/// Parses a SELECT query and converts its pattern into a logical operator.
pub fn parse_select(query: &str) -> Arc<LogicalOp> {
    let Query::Select { pattern, .. } = Query::parse(query, None).unwrap() else {
        panic!("expected a SELECT query");
    };
    Arc::new(LogicalOp::try_from(&pattern).unwrap())
}

/// Asserts that `actual` shares every node with `expected`.
pub fn assert_same_tree(expected: &Arc<LogicalOp>, actual: &Arc<LogicalOp>) {
    assert!(
        Arc::ptr_eq(expected, actual),
        "node '{}' was rebuilt",
        expected.name()
    );
    for (expected, actual) in expected.children().into_iter().zip(actual.children()) {
        assert_same_tree(expected, actual);
    }
}
