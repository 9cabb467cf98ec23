use crate::test_utils::{assert_same_tree, parse_select, triple, var, var_term};
use quadview_logical::rewrite::rewrite;
use quadview_logical::transform::{BlankNodesToVariables, VariableRenamer};
use quadview_logical::{LogicalOp, RewriteError};
use quadview_model::{GroundTerm, NamedNode, NamedNodePattern};
use std::sync::Arc;

#[test]
fn tree_without_blank_nodes_is_shared() {
    let op = parse_select(
        "SELECT ?s (COUNT(?o) AS ?c) WHERE {
            { ?s <http://example.com/p> ?o } UNION { ?s <http://example.com/q> ?o }
            OPTIONAL { ?o <http://example.com/r> ?x FILTER(?x > 2) }
            MINUS { ?s <http://example.com/hidden> true }
            GRAPH ?g { ?s ?p ?o }
            BIND(STR(?o) AS ?label)
            VALUES ?s { <http://example.com/a> }
        }
        GROUP BY ?s
        ORDER BY DESC(?c)
        LIMIT 10",
    );

    let result = rewrite(&op, &mut BlankNodesToVariables::new()).unwrap();

    assert_same_tree(&op, &result);
}

#[test]
fn renaming_with_all_variables_protected_is_shared() {
    let op = parse_select(
        "SELECT DISTINCT ?s ?o WHERE { ?s <http://example.com/p> ?o FILTER(BOUND(?o)) }",
    );
    let mut renamer = VariableRenamer::new([var("s"), var("o")]);

    let result = rewrite(&op, &mut renamer).unwrap();

    assert_same_tree(&op, &result);
    assert!(renamer.mapping().is_empty());
}

#[test]
fn join_identity_is_returned_unchanged() {
    let identity = LogicalOp::join_identity();

    let result = rewrite(&identity, &mut VariableRenamer::new(std::iter::empty())).unwrap();

    assert!(Arc::ptr_eq(&identity, &result));
}

#[test]
fn values_variables_are_renamed() {
    let values = LogicalOp::values(
        vec![var("x")],
        vec![vec![Some(GroundTerm::NamedNode(NamedNode::new_unchecked(
            "http://example.com/a",
        )))]],
    );

    let result = rewrite(&values, &mut VariableRenamer::new(std::iter::empty())).unwrap();

    insta::assert_snapshot!(result, @"Table: ?/v1 (<http://example.com/a>)");
}

#[test]
fn property_path_is_not_supported() {
    let op = parse_select("SELECT * WHERE { ?s <http://example.com/p>+ ?o }");

    let result = rewrite(&op, &mut BlankNodesToVariables::new());

    assert_eq!(result, Err(RewriteError::UnsupportedOperator("path")));
}

#[test]
fn unsupported_operator_below_supported_one_fails() {
    let op = LogicalOp::join(
        LogicalOp::bgp(vec![triple(var_term("s"), "p", var_term("o"))]),
        Arc::new(LogicalOp::Service {
            name: NamedNodePattern::NamedNode(NamedNode::new_unchecked(
                "http://example.com/sparql",
            )),
            inner: LogicalOp::join_identity(),
            silent: false,
        }),
    );

    let result = rewrite(&op, &mut BlankNodesToVariables::new());

    assert_eq!(result, Err(RewriteError::UnsupportedOperator("service")));
}
