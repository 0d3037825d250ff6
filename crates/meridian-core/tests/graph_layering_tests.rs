// SPDX-License-Identifier: Apache-2.0

#![allow(missing_docs)]
use std::sync::Arc;

use meridian_core::{Entity, EntityKind, Graph, GraphError};

mod common;
use common::{id, member, node, relation, way};

#[test]
fn effective_lookup_prefers_local_layers() {
    let root = Arc::new(Graph::from_entities(vec![node("n1", [0.0, 0.0])]));
    let child = Graph::layer(Arc::clone(&root));

    let Some(original) = child.has_entity(&id("n1")).and_then(Entity::as_node) else {
        unreachable!("n1 seeded in the root")
    };
    let moved = Entity::Node(original.with_loc([5.0, 5.0]));
    let edited = child.replace(moved);

    let Some(seen) = edited.has_entity(&id("n1")).and_then(Entity::as_node) else {
        unreachable!("n1 still resolves")
    };
    assert_eq!(seen.loc(), Some([5.0, 5.0]));
    // The root still serves the original version.
    let Some(in_root) = root.has_entity(&id("n1")).and_then(Entity::as_node) else {
        unreachable!()
    };
    assert_eq!(in_root.loc(), Some([0.0, 0.0]));
}

#[test]
fn tombstone_shadows_base_entity() {
    let root = Arc::new(Graph::from_entities(vec![node("n1", [0.0, 0.0])]));
    let child = Graph::layer(Arc::clone(&root)).remove(&id("n1"));

    assert!(child.has_entity(&id("n1")).is_none());
    assert_eq!(child.entity(&id("n1")), Err(GraphError::NotFound(id("n1"))));
    assert!(root.has_entity(&id("n1")).is_some());
    // The base accessor still reaches through the tombstone.
    assert!(child.base_entity(&id("n1")).is_some());
}

#[test]
fn parent_indices_follow_edits_across_layers() {
    let root = Arc::new(Graph::from_entities(vec![
        node("a", [0.0, 0.0]),
        node("b", [1.0, 0.0]),
        node("c", [2.0, 0.0]),
        way("w1", &["a", "b"]),
    ]));
    assert_eq!(root.parent_ways(&id("a")), &[id("w1")]);

    // In a child layer, retarget the way from b to c.
    let child = Graph::layer(Arc::clone(&root));
    let Some(w) = child.has_entity(&id("w1")).and_then(Entity::as_way) else {
        unreachable!()
    };
    let retargeted = Entity::Way(w.with_nodes(vec![id("a"), id("c")]));
    let edited = child.replace(retargeted);

    assert_eq!(edited.parent_ways(&id("c")), &[id("w1")]);
    assert_eq!(edited.parent_ways(&id("b")), &[] as &[meridian_core::EntityId]);
    // The root's index is untouched by the child's overrides.
    assert_eq!(root.parent_ways(&id("b")), &[id("w1")]);
    assert!(edited.indices_consistent());
}

#[test]
fn parent_relations_index_tracks_membership() {
    let graph = Graph::from_entities(vec![
        node("a", [0.0, 0.0]),
        way("w1", &["a"]),
        relation("r1", vec![member("w1", EntityKind::Way, "outer")]),
    ]);
    assert_eq!(graph.parent_relations(&id("w1")), &[id("r1")]);

    let Some(r) = graph.has_entity(&id("r1")).and_then(Entity::as_relation) else {
        unreachable!()
    };
    let emptied = Entity::Relation(r.remove_members_with_id(&id("w1")));
    let edited = graph.replace(emptied);
    assert_eq!(
        edited.parent_relations(&id("w1")),
        &[] as &[meridian_core::EntityId]
    );
    assert!(edited.indices_consistent());
}

#[test]
fn update_batches_edits_into_one_layer_clone() {
    let graph = Graph::from_entities(vec![node("a", [0.0, 0.0]), node("b", [1.0, 0.0])]);
    let edited = graph.update(|edit| {
        edit.replace(way("w1", &["a", "b"]));
        edit.remove(&id("b"));
    });
    // Reads inside the same batch observed the intermediate state; the
    // final graph reflects both edits.
    assert!(edited.has_entity(&id("w1")).is_some());
    assert!(edited.has_entity(&id("b")).is_none());
    assert_eq!(graph.parent_ways(&id("a")), &[] as &[meridian_core::EntityId]);
}

#[test]
fn mutators_never_touch_the_receiver() {
    let graph = Graph::from_entities(vec![node("a", [0.0, 0.0])]);
    let before = graph.iter_entities().len();
    let _bigger = graph.replace(node("b", [1.0, 1.0]));
    let _smaller = graph.remove(&id("a"));
    assert_eq!(graph.iter_entities().len(), before);
    assert!(graph.has_entity(&id("a")).is_some());
}
