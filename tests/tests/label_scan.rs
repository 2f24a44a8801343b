//! Label scan integration tests.
//!
//! The index invariant under test: a node appears under a label iff, in the
//! committed state, the node exists and carries that label — after every
//! create, add-label, remove-label, and delete.

use nest_tests::prelude::*;
use std::collections::HashSet;

const FIRST: LabelId = LabelId(1);
const SECOND: LabelId = LabelId(2);
const THIRD: LabelId = LabelId(3);

fn as_set(ids: &[NodeId]) -> HashSet<NodeId> {
    ids.iter().copied().collect()
}

/// Assert that each label's index entry equals the membership derived from
/// the nodes themselves.
fn assert_index_matches_nodes(fixture: &Fixture) {
    for label in [FIRST, SECOND, THIRD] {
        let derived: HashSet<NodeId> = fixture
            .store
            .node_ids()
            .filter(|&id| fixture.store.node(id).unwrap().has_label(label))
            .collect();
        assert_eq!(fixture.nodes_with_label(label), derived);
    }
}

#[test]
fn test_nodes_with_created_labels() {
    // GIVEN
    let mut fixture = Fixture::new();
    let (node1, node2, node3, node4, node5) = fixture.commit(|tx| {
        (
            tx.create_node([FIRST], props!()).unwrap(),
            tx.create_node([SECOND], props!()).unwrap(),
            tx.create_node([THIRD], props!()).unwrap(),
            tx.create_node([FIRST, SECOND, THIRD], props!()).unwrap(),
            tx.create_node([FIRST, THIRD], props!()).unwrap(),
        )
    });

    // THEN
    assert_eq!(
        fixture.nodes_with_label(FIRST),
        as_set(&[node1, node4, node5])
    );
    assert_eq!(fixture.nodes_with_label(SECOND), as_set(&[node2, node4]));
    assert_eq!(
        fixture.nodes_with_label(THIRD),
        as_set(&[node3, node4, node5])
    );
    assert_index_matches_nodes(&fixture);
}

#[test]
fn test_nodes_with_added_labels() {
    // GIVEN
    let mut fixture = Fixture::new();
    let (node1, node2, node3, node4, node5) = fixture.commit(|tx| {
        (
            tx.create_node([FIRST], props!()).unwrap(),
            tx.create_node([SECOND], props!()).unwrap(),
            tx.create_node([THIRD], props!()).unwrap(),
            tx.create_node([FIRST], props!()).unwrap(),
            tx.create_node([FIRST], props!()).unwrap(),
        )
    });

    // WHEN
    fixture.commit(|tx| {
        tx.add_label(node4, SECOND).unwrap();
        tx.add_label(node4, THIRD).unwrap();
        tx.add_label(node5, THIRD).unwrap();
    });

    // THEN
    assert_eq!(
        fixture.nodes_with_label(FIRST),
        as_set(&[node1, node4, node5])
    );
    assert_eq!(fixture.nodes_with_label(SECOND), as_set(&[node2, node4]));
    assert_eq!(
        fixture.nodes_with_label(THIRD),
        as_set(&[node3, node4, node5])
    );
    assert_index_matches_nodes(&fixture);
}

#[test]
fn test_nodes_after_deleted_nodes() {
    // GIVEN
    let mut fixture = Fixture::new();
    let (node1, node2) = fixture.commit(|tx| {
        (
            tx.create_node([FIRST, SECOND], props!()).unwrap(),
            tx.create_node([FIRST, THIRD], props!()).unwrap(),
        )
    });

    // WHEN
    fixture.commit(|tx| tx.delete_node(node1).unwrap());

    // THEN
    assert_eq!(fixture.nodes_with_label(FIRST), as_set(&[node2]));
    assert_eq!(fixture.nodes_with_label(SECOND), as_set(&[]));
    assert_eq!(fixture.nodes_with_label(THIRD), as_set(&[node2]));
    assert_index_matches_nodes(&fixture);
}

#[test]
fn test_nodes_after_removed_labels() {
    // GIVEN
    let mut fixture = Fixture::new();
    let (node1, node2) = fixture.commit(|tx| {
        (
            tx.create_node([FIRST, SECOND], props!()).unwrap(),
            tx.create_node([FIRST, THIRD], props!()).unwrap(),
        )
    });

    // WHEN
    fixture.commit(|tx| {
        tx.remove_label(node1, FIRST).unwrap();
        tx.remove_label(node2, THIRD).unwrap();
    });

    // THEN
    assert_eq!(fixture.nodes_with_label(FIRST), as_set(&[node2]));
    assert_eq!(fixture.nodes_with_label(SECOND), as_set(&[node1]));
    assert_eq!(fixture.nodes_with_label(THIRD), as_set(&[]));
    assert_index_matches_nodes(&fixture);
}

#[test]
fn test_adding_a_label_twice_equals_adding_it_once() {
    // GIVEN
    let mut fixture = Fixture::new();
    let node = fixture.commit(|tx| tx.create_node([FIRST], props!()).unwrap());

    // WHEN - the same label is added in two separate transactions
    fixture.commit(|tx| assert!(tx.add_label(node, SECOND).unwrap()));
    fixture.commit(|tx| assert!(!tx.add_label(node, SECOND).unwrap()));

    // THEN
    assert_eq!(fixture.nodes_with_label(SECOND), as_set(&[node]));
    assert_index_matches_nodes(&fixture);
}

#[test]
fn test_deleted_node_is_never_returned_for_any_label() {
    // GIVEN
    let mut fixture = Fixture::new();
    let node = fixture.commit(|tx| tx.create_node([FIRST, SECOND, THIRD], props!()).unwrap());

    // WHEN
    fixture.commit(|tx| tx.delete_node(node).unwrap());

    // THEN
    for label in [FIRST, SECOND, THIRD] {
        assert!(!fixture.nodes_with_label(label).contains(&node));
    }
    assert_index_matches_nodes(&fixture);
}

#[test]
fn test_rolled_back_transaction_leaves_index_untouched() {
    // GIVEN committed state
    let mut fixture = Fixture::new();
    let keep = fixture.commit(|tx| tx.create_node([FIRST], props!()).unwrap());

    // WHEN - a transaction churns labels and nodes, then rolls back
    fixture.roll_back(|tx| {
        let scratch = tx.create_node([FIRST, SECOND], props!()).unwrap();
        tx.add_label(keep, THIRD).unwrap();
        tx.remove_label(keep, FIRST).unwrap();
        tx.delete_node(scratch).unwrap();
    });

    // THEN - exactly the committed state remains
    assert_eq!(fixture.nodes_with_label(FIRST), as_set(&[keep]));
    assert_eq!(fixture.nodes_with_label(SECOND), as_set(&[]));
    assert_eq!(fixture.nodes_with_label(THIRD), as_set(&[]));
    assert_index_matches_nodes(&fixture);
}

#[test]
fn test_index_matches_membership_after_every_commit() {
    // GIVEN
    let mut fixture = Fixture::new();

    // WHEN/THEN - the invariant holds after each committed step
    let a = fixture.commit(|tx| tx.create_node([FIRST], props!()).unwrap());
    assert_index_matches_nodes(&fixture);

    let b = fixture.commit(|tx| tx.create_node([FIRST, SECOND], props!()).unwrap());
    assert_index_matches_nodes(&fixture);

    fixture.commit(|tx| tx.add_label(a, THIRD).unwrap());
    assert_index_matches_nodes(&fixture);

    fixture.commit(|tx| tx.remove_label(b, FIRST).unwrap());
    assert_index_matches_nodes(&fixture);

    fixture.commit(|tx| tx.delete_node(a).unwrap());
    assert_index_matches_nodes(&fixture);

    fixture.commit(|tx| tx.delete_node(b).unwrap());
    assert_index_matches_nodes(&fixture);

    for label in [FIRST, SECOND, THIRD] {
        assert!(fixture.nodes_with_label(label).is_empty());
    }
}
