// SPDX-License-Identifier: Apache-2.0

#![allow(missing_docs)]
use meridian_core::actions::{Action, DisabledReason, MergeNodes};
use meridian_core::{Entity, EntityKind, Graph};

mod common;
use common::{assert_loc, id, member, node, relation, tagged_node, tagged_relation, way};

#[test]
fn survivor_is_the_last_id_and_takes_the_mean_location() {
    // Scenario: a(0,0), b(4,4) — merged location is the midpoint.
    let graph = Graph::from_entities(vec![node("a", [0.0, 0.0]), node("b", [4.0, 4.0])]);
    let merged = MergeNodes::new(vec![id("a"), id("b")]).apply(&graph);

    assert!(merged.has_entity(&id("a")).is_none());
    let survivor = merged.has_entity(&id("b")).and_then(Entity::as_node);
    let Some(survivor) = survivor else {
        unreachable!("survivor b must exist")
    };
    assert_loc(survivor.loc(), [2.0, 2.0], 1e-12);
}

#[test]
fn single_interesting_node_wins_location_verbatim() {
    let graph = Graph::from_entities(vec![
        tagged_node("a", [1.5, 2.5], &[("highway", "crossing")]),
        node("b", [9.0, 9.0]),
    ]);
    let merged = MergeNodes::new(vec![id("a"), id("b")]).apply(&graph);
    let Some(survivor) = merged.has_entity(&id("b")).and_then(Entity::as_node) else {
        unreachable!()
    };
    assert_loc(survivor.loc(), [1.5, 2.5], 0.0);
    assert_eq!(
        survivor.tags().get("highway").map(String::as_str),
        Some("crossing")
    );
}

#[test]
fn several_interesting_nodes_average_their_locations_only() {
    let graph = Graph::from_entities(vec![
        tagged_node("a", [0.0, 0.0], &[("amenity", "bench")]),
        node("b", [100.0, 80.0]),
        tagged_node("c", [2.0, 2.0], &[("amenity", "shelter")]),
    ]);
    let merged = MergeNodes::new(vec![id("a"), id("b"), id("c")]).apply(&graph);
    let Some(survivor) = merged.has_entity(&id("c")).and_then(Entity::as_node) else {
        unreachable!()
    };
    // The untagged node's location does not participate.
    assert_loc(survivor.loc(), [1.0, 1.0], 1e-12);
}

#[test]
fn tags_union_with_first_occurrence_winning() {
    let graph = Graph::from_entities(vec![
        tagged_node("a", [0.0, 0.0], &[("name", "old"), ("ref", "A")]),
        tagged_node("b", [1.0, 1.0], &[("name", "new"), ("surface", "paved")]),
    ]);
    let merged = MergeNodes::new(vec![id("a"), id("b")]).apply(&graph);
    let Some(survivor) = merged.has_entity(&id("b")).and_then(Entity::as_node) else {
        unreachable!()
    };
    assert_eq!(survivor.tags().get("name").map(String::as_str), Some("old"));
    assert_eq!(survivor.tags().get("ref").map(String::as_str), Some("A"));
    assert_eq!(
        survivor.tags().get("surface").map(String::as_str),
        Some("paved")
    );
}

#[test]
fn parent_ways_collapse_duplicates_created_by_the_merge() {
    let graph = Graph::from_entities(vec![
        node("a", [0.0, 0.0]),
        node("b", [1.0, 0.0]),
        node("c", [2.0, 0.0]),
        way("w1", &["a", "b", "c"]),
    ]);
    let merged = MergeNodes::new(vec![id("a"), id("b")]).apply(&graph);
    let Some(w) = merged.has_entity(&id("w1")).and_then(Entity::as_way) else {
        unreachable!()
    };
    assert_eq!(w.nodes(), &[id("b"), id("c")]);
    assert!(merged.indices_consistent());
}

#[test]
fn relation_memberships_are_rewritten_to_the_survivor() {
    let graph = Graph::from_entities(vec![
        node("a", [0.0, 0.0]),
        node("b", [1.0, 0.0]),
        relation("r1", vec![member("a", EntityKind::Node, "stop")]),
    ]);
    let merged = MergeNodes::new(vec![id("a"), id("b")]).apply(&graph);
    let Some(r) = merged.has_entity(&id("r1")).and_then(Entity::as_relation) else {
        unreachable!()
    };
    assert_eq!(r.members().len(), 1);
    assert_eq!(r.members()[0].id, id("b"));
    assert_eq!(r.members()[0].role, "stop");
    assert!(merged.has_entity(&id("a")).is_none());
}

#[test]
fn disabled_rejects_underspecified_input() {
    let graph = Graph::from_entities(vec![node("a", [0.0, 0.0])]);
    assert_eq!(
        MergeNodes::new(vec![id("a")]).disabled(&graph),
        Some(DisabledReason::NotEligible)
    );
    assert_eq!(
        MergeNodes::new(vec![id("a"), id("missing")]).disabled(&graph),
        Some(DisabledReason::NotEligible)
    );
}

#[test]
fn disabled_flags_conflicting_roles_in_one_relation() {
    let graph = Graph::from_entities(vec![
        node("a", [0.0, 0.0]),
        node("b", [1.0, 0.0]),
        relation(
            "r1",
            vec![
                member("a", EntityKind::Node, "stop"),
                member("b", EntityKind::Node, "platform"),
            ],
        ),
    ]);
    assert_eq!(
        MergeNodes::new(vec![id("a"), id("b")]).disabled(&graph),
        Some(DisabledReason::Relation)
    );
}

#[test]
fn disabled_protects_turn_restrictions() {
    // a sits on the "from" way, b on the "to" way of a restriction.
    let graph = Graph::from_entities(vec![
        node("a", [0.0, 0.0]),
        node("m", [0.2, 0.0]),
        node("b", [1.0, 0.0]),
        node("v", [0.5, 0.0]),
        way("from", &["a", "m", "v"]),
        way("to", &["v", "b"]),
        tagged_relation(
            "r1",
            vec![
                member("from", EntityKind::Way, "from"),
                member("v", EntityKind::Node, "via"),
                member("to", EntityKind::Way, "to"),
            ],
            &[("type", "restriction"), ("restriction", "no_left_turn")],
        ),
    ]);
    assert_eq!(
        MergeNodes::new(vec![id("a"), id("b")]).disabled(&graph),
        Some(DisabledReason::Restriction)
    );
    // Merging along a single leg is fine.
    assert_eq!(MergeNodes::new(vec![id("a"), id("m")]).disabled(&graph), None);
}

#[test]
fn eligible_merge_passes_the_advisory_check_and_applies_atomically() {
    let graph = Graph::from_entities(vec![
        node("a", [0.0, 0.0]),
        node("b", [4.0, 4.0]),
        way("w1", &["a", "b"]),
    ]);
    let action = MergeNodes::new(vec![id("a"), id("b")]);
    assert_eq!(action.disabled(&graph), None);
    let merged = action.apply(&graph);
    // The pre-call graph is fully intact.
    assert!(graph.has_entity(&id("a")).is_some());
    assert!(merged.has_entity(&id("a")).is_none());
    assert!(merged.indices_consistent());
}
