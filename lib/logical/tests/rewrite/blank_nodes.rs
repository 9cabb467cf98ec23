use crate::test_utils::{bnode_term, triple, var, var_term};
use quadview_logical::rewrite::rewrite;
use quadview_logical::transform::BlankNodesToVariables;
use quadview_logical::LogicalOp;
use quadview_model::GraphNamePattern;
use std::sync::Arc;

#[test]
fn blank_node_becomes_fresh_variable() {
    let bgp = LogicalOp::bgp(vec![triple(var_term("x"), "p", bnode_term("b1"))]);

    let result = rewrite(&bgp, &mut BlankNodesToVariables::new()).unwrap();

    insta::assert_snapshot!(result, @"Bgp (?x <http://example.com/p> ?~bv1)");
}

#[test]
fn same_transform_keeps_mapping_across_calls() {
    let first = LogicalOp::bgp(vec![triple(var_term("x"), "p", bnode_term("b1"))]);
    let second = LogicalOp::bgp(vec![
        triple(bnode_term("b2"), "q", bnode_term("b1")),
        triple(bnode_term("b1"), "r", var_term("x")),
    ]);
    let mut transform = BlankNodesToVariables::new();

    let first = rewrite(&first, &mut transform).unwrap();
    let second = rewrite(&second, &mut transform).unwrap();

    insta::assert_snapshot!(first, @"Bgp (?x <http://example.com/p> ?~bv1)");
    insta::assert_snapshot!(second, @"Bgp (?~bv2 <http://example.com/q> ?~bv1) (?~bv1 <http://example.com/r> ?x)");
    assert_eq!(transform.mapping().len(), 2);
}

#[test]
fn fresh_transform_starts_a_new_mapping() {
    let bgp = LogicalOp::bgp(vec![triple(var_term("x"), "p", bnode_term("b1"))]);

    let first = rewrite(&bgp, &mut BlankNodesToVariables::new()).unwrap();
    let second = rewrite(&bgp, &mut BlankNodesToVariables::new()).unwrap();

    assert_eq!(first, second);
    assert!(!Arc::ptr_eq(&first, &second));
}

#[test]
fn blank_nodes_in_quad_pattern_and_triple() {
    let op = LogicalOp::join(
        LogicalOp::triple(triple(bnode_term("a"), "p", var_term("o"))),
        LogicalOp::quad_pattern(
            GraphNamePattern::Variable(var("g")),
            vec![triple(var_term("o"), "q", bnode_term("a"))],
        ),
    );

    let result = rewrite(&op, &mut BlankNodesToVariables::new()).unwrap();

    insta::assert_snapshot!(result, @r"
    Join
      Triple (?~bv1 <http://example.com/p> ?o)
      QuadPattern ?g (?o <http://example.com/q> ?~bv1)
    ");
}

#[test]
fn only_changed_branch_is_rebuilt() {
    let unchanged = LogicalOp::bgp(vec![triple(var_term("x"), "p", var_term("y"))]);
    let changed = LogicalOp::bgp(vec![triple(var_term("y"), "q", bnode_term("b"))]);
    let op = LogicalOp::union(Arc::clone(&unchanged), changed);

    let result = rewrite(&op, &mut BlankNodesToVariables::new()).unwrap();

    assert!(!Arc::ptr_eq(&op, &result));
    let children = result.children();
    assert!(Arc::ptr_eq(children[0], &unchanged));
}
