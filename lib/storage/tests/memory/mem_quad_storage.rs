use crate::memory::{create_storage, scan_terms};
use crate::{example_quad, example_quad_in_graph, triple_terms};
use itertools::Itertools;
use quadview_common::error::StorageError;
use quadview_common::{GraphSelector, ObjectId, QuadStorage, TripleFilter};
use quadview_model::{GraphNameRef, NamedNode, NamedOrBlankNode, Quad};

#[test]
fn insert_quad() {
    let storage = create_storage();

    let inserted = storage.extend(vec![example_quad()]);
    assert_eq!(inserted, 1);
    assert_eq!(storage.len(), 1);
}

#[test]
fn insert_quad_then_read() {
    let storage = create_storage();
    storage.extend(vec![example_quad()]);
    let context = storage.context();

    let terms = scan_terms(&context, GraphSelector::DefaultGraph, TripleFilter::ANY).unwrap();

    let mut expected = vec![None];
    expected.extend(triple_terms(&example_quad()));
    assert_eq!(terms, vec![expected]);
}

#[test]
fn insert_duplicate_quads_no_effect() {
    let storage = create_storage();
    storage.extend(vec![example_quad()]);

    let inserted = storage.extend(vec![example_quad()]);
    assert_eq!(inserted, 0);
    assert!(!storage.insert(example_quad().as_ref()));
}

#[test]
fn insert_duplicate_quads_in_same_operation() {
    let storage = create_storage();

    let inserted = storage.extend(vec![example_quad(), example_quad()]);
    assert_eq!(inserted, 1);
    assert_eq!(storage.len(), 1);
}

#[test]
fn named_graph_insertion_and_query() {
    let storage = create_storage();
    storage.extend(vec![
        example_quad(),
        example_quad_in_graph("http://example.com/g"),
    ]);
    let context = storage.context();
    let graph = NamedOrBlankNode::from(NamedNode::new_unchecked("http://example.com/g"));

    assert_eq!(context.cardinality(GraphSelector::DefaultGraph).unwrap(), 1);
    assert_eq!(context.cardinality(GraphSelector::from(&graph)).unwrap(), 1);
    assert_eq!(context.cardinality(GraphSelector::AnyNamedGraph).unwrap(), 1);
}

#[test]
fn unknown_graph_is_empty() {
    let storage = create_storage();
    storage.extend(vec![example_quad_in_graph("http://example.com/g")]);
    let context = storage.context();
    let graph = NamedOrBlankNode::from(NamedNode::new_unchecked("http://example.com/other"));

    assert_eq!(context.cardinality(GraphSelector::from(&graph)).unwrap(), 0);
    assert_eq!(
        context
            .delete_matching(GraphSelector::from(&graph), TripleFilter::ANY)
            .unwrap(),
        0
    );
}

#[test]
fn remove_quad() {
    let storage = create_storage();
    storage.extend(vec![example_quad()]);
    let context = storage.context();
    let quad = example_quad();

    let deleted = context
        .delete_matching(
            GraphSelector::DefaultGraph,
            TripleFilter::exact(quad.as_ref().into()),
        )
        .unwrap();

    assert_eq!(deleted, 1);
    assert!(storage.is_empty());
}

#[test]
fn clear_graph() {
    let storage = create_storage();
    storage.extend(vec![
        example_quad(),
        example_quad_in_graph("http://example.com/g1"),
        example_quad_in_graph("http://example.com/g2"),
    ]);
    let context = storage.context();
    let graph = NamedOrBlankNode::from(NamedNode::new_unchecked("http://example.com/g1"));

    let deleted = context
        .delete_matching(GraphSelector::from(&graph), TripleFilter::ANY)
        .unwrap();

    assert_eq!(deleted, 1);
    assert_eq!(storage.len(), 2);
}

#[test]
fn clear_all_named_graphs() {
    let storage = create_storage();
    storage.extend(vec![
        example_quad(),
        example_quad_in_graph("http://example.com/g1"),
        example_quad_in_graph("http://example.com/g2"),
    ]);
    let context = storage.context();

    let deleted = context
        .delete_matching(GraphSelector::AnyNamedGraph, TripleFilter::ANY)
        .unwrap();

    assert_eq!(deleted, 2);
    assert_eq!(storage.len(), 1);
}

#[test]
fn insert_through_context() {
    let storage = create_storage();
    let context = storage.context();
    let quad = example_quad_in_graph("http://example.com/g");

    let inserted = context
        .insert(quad.graph_name.as_ref(), quad.as_ref().into())
        .unwrap();

    assert!(inserted);
    assert!(context
        .insert(GraphNameRef::DefaultGraph, quad.as_ref().into())
        .unwrap());
    assert_eq!(storage.len(), 2);
}

#[test]
fn any_named_graph_scan_groups_equal_triples() {
    let storage = create_storage();
    let other = Quad::new(
        NamedNode::new_unchecked("http://example.com/a"),
        NamedNode::new_unchecked("http://example.com/predicate"),
        NamedNode::new_unchecked("http://example.com/o"),
        NamedNode::new_unchecked("http://example.com/g2"),
    );
    storage.extend(vec![
        example_quad_in_graph("http://example.com/g1"),
        other,
        example_quad_in_graph("http://example.com/g2"),
    ]);
    let context = storage.context();

    let triples = scan_terms(&context, GraphSelector::AnyNamedGraph, TripleFilter::ANY)
        .unwrap()
        .into_iter()
        .map(|terms| terms[1..].to_vec())
        .collect::<Vec<_>>();

    assert_eq!(triples.len(), 3);
    let duplicate = triple_terms(&example_quad());
    let positions = triples
        .iter()
        .positions(|terms| terms == &duplicate)
        .collect::<Vec<_>>();
    assert_eq!(positions.len(), 2);
    assert_eq!(positions[1], positions[0] + 1);
}

#[test]
fn snapshot_consistency() {
    let storage = create_storage();
    storage.extend(vec![example_quad()]);
    let context = storage.context();

    let mut scan = context
        .scan(GraphSelector::DefaultGraph, TripleFilter::ANY)
        .unwrap();
    storage.extend(vec![example_quad_in_graph("http://example.com/g")]);
    context
        .delete_matching(GraphSelector::DefaultGraph, TripleFilter::ANY)
        .unwrap();

    assert!(scan.next().unwrap().is_ok());
    assert!(scan.next().is_none());
    assert_eq!(
        storage
            .context()
            .cardinality(GraphSelector::DefaultGraph)
            .unwrap(),
        0
    );
}

#[test]
fn closed_context_rejects_operations() {
    let storage = create_storage();
    storage.extend(vec![example_quad()]);
    let context = storage.context();
    let clone = context.clone();

    context.close();

    assert!(!clone.is_active());
    assert!(matches!(
        clone.cardinality(GraphSelector::DefaultGraph),
        Err(StorageError::ContextClosed)
    ));
    assert!(matches!(
        clone.decode(ObjectId::new(1)),
        Err(StorageError::ContextClosed)
    ));
    assert!(storage.context().is_active());
}

#[test]
fn decode_unknown_id_is_corruption() {
    let storage = create_storage();
    let context = storage.context();

    let result = context.decode(ObjectId::new(42));

    assert!(matches!(result, Err(StorageError::Corruption(_))));
}
