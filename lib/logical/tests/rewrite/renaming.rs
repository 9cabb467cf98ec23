use crate::test_utils::{parse_select, triple, var, var_term};
use quadview_logical::rewrite::{rename, rewrite};
use quadview_logical::transform::VariableRenamer;
use quadview_logical::LogicalOp;
use quadview_model::{NamedNodePattern, Variable};
use spargebra::algebra::{AggregateExpression, AggregateFunction, Expression};

#[test]
fn protected_variables_keep_their_name() {
    let op = parse_select("SELECT ?s WHERE { ?s <http://example.com/p> ?o FILTER(?o) }");

    let result = rename(&op, [var("s")]).unwrap();

    insta::assert_snapshot!(result, @r"
    Project: ?s
      Filter: ?/v1
        Bgp (?s <http://example.com/p> ?/v1)
    ");
}

#[test]
fn group_renames_keys_and_aggregates_consistently() {
    let op = LogicalOp::group(
        LogicalOp::bgp(vec![triple(var_term("x"), "p", var_term("y"))]),
        vec![var("y")],
        vec![(
            var("m"),
            AggregateExpression::FunctionCall {
                name: AggregateFunction::Max,
                expr: Expression::Variable(var("y")),
                distinct: false,
            },
        )],
    );
    let mut renamer = VariableRenamer::new(std::iter::empty());

    let result = rewrite(&op, &mut renamer).unwrap();

    let LogicalOp::Group {
        variables,
        aggregates,
        ..
    } = result.as_ref()
    else {
        panic!("expected a group operator");
    };
    assert_eq!(variables, &vec![var("/v2")]);
    assert_eq!(
        aggregates,
        &vec![(
            var("/v3"),
            AggregateExpression::FunctionCall {
                name: AggregateFunction::Max,
                expr: Expression::Variable(var("/v2")),
                distinct: false,
            },
        )]
    );
}

#[test]
fn graph_and_dataset_names_are_renamed() {
    let op = LogicalOp::join(
        LogicalOp::graph(
            NamedNodePattern::Variable(var("g")),
            LogicalOp::bgp(vec![triple(var_term("s"), "p", var_term("o"))]),
        ),
        LogicalOp::dataset_names(NamedNodePattern::Variable(var("g"))),
    );

    let result = rename(&op, [var("s")]).unwrap();

    insta::assert_snapshot!(result, @r"
    Join
      Graph: ?/v2
        Bgp (?s <http://example.com/p> ?/v1)
      DatasetNames: ?/v2
    ");
}

#[test]
fn assignments_are_renamed() {
    let op = LogicalOp::assign(
        LogicalOp::bgp(vec![triple(var_term("s"), "p", var_term("o"))]),
        vec![(var("x"), Expression::Variable(var("o")))],
    );

    let result = rename(&op, [var("x")]).unwrap();

    insta::assert_snapshot!(result, @r"
    Assign: ?x := ?/v2
      Bgp (?/v1 <http://example.com/p> ?/v2)
    ");
}

#[test]
fn seeded_renamer_continues_previous_pass() {
    let op = LogicalOp::bgp(vec![triple(var_term("s"), "p", var_term("o"))]);
    let mut first = VariableRenamer::new(std::iter::empty());
    rewrite(&op, &mut first).unwrap();

    let mut second =
        VariableRenamer::with_mapping(std::iter::empty::<Variable>(), first.into_mapping());
    let result = rewrite(
        &LogicalOp::bgp(vec![triple(var_term("o"), "q", var_term("z"))]),
        &mut second,
    )
    .unwrap();

    insta::assert_snapshot!(result, @"Bgp (?/v2 <http://example.com/q> ?/v3)");
}
