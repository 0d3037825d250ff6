// SPDX-License-Identifier: Apache-2.0

#![allow(missing_docs)]
use meridian_core::actions::{Action, Reverse};
use meridian_core::{Entity, EntityKind, Graph};

mod common;
use common::{id, member, node, relation, tagged_way, way};

#[test]
fn node_order_reverses_and_double_reverse_restores_it() {
    let graph = Graph::from_entities(vec![
        node("a", [0.0, 0.0]),
        node("b", [1.0, 0.0]),
        node("c", [2.0, 0.0]),
        way("w1", &["a", "b", "c"]),
    ]);
    let once = Reverse::new(id("w1")).apply(&graph);
    assert_eq!(
        once.has_entity(&id("w1"))
            .and_then(Entity::as_way)
            .map_or(&[][..], |w| w.nodes()),
        &[id("c"), id("b"), id("a")]
    );
    let twice = Reverse::new(id("w1")).apply(&once);
    assert_eq!(
        twice
            .has_entity(&id("w1"))
            .and_then(Entity::as_way)
            .map_or(&[][..], |w| w.nodes()),
        &[id("a"), id("b"), id("c")]
    );
}

#[test]
fn oneway_and_sided_keys_flip() {
    let graph = Graph::from_entities(vec![
        node("a", [0.0, 0.0]),
        node("b", [1.0, 0.0]),
        tagged_way(
            "w1",
            &["a", "b"],
            &[
                ("oneway", "yes"),
                ("cycleway:right", "lane"),
                ("turn:lanes:forward", "left|through"),
                ("incline", "up"),
            ],
        ),
    ]);
    let reversed = Reverse::new(id("w1")).apply(&graph);
    let Some(w) = reversed.has_entity(&id("w1")).and_then(Entity::as_way) else {
        unreachable!()
    };
    assert_eq!(w.tags().get("oneway").map(String::as_str), Some("-1"));
    assert_eq!(
        w.tags().get("cycleway:left").map(String::as_str),
        Some("lane")
    );
    assert_eq!(
        w.tags().get("turn:lanes:backward").map(String::as_str),
        Some("left|through")
    );
    assert_eq!(w.tags().get("incline").map(String::as_str), Some("down"));
    assert!(w.tags().get("cycleway:right").is_none());
}

#[test]
fn numeric_incline_negates() {
    let graph = Graph::from_entities(vec![
        node("a", [0.0, 0.0]),
        node("b", [1.0, 0.0]),
        tagged_way("w1", &["a", "b"], &[("incline", "5.2%")]),
    ]);
    let reversed = Reverse::new(id("w1")).apply(&graph);
    let Some(w) = reversed.has_entity(&id("w1")).and_then(Entity::as_way) else {
        unreachable!()
    };
    assert_eq!(w.tags().get("incline").map(String::as_str), Some("-5.2%"));
}

#[test]
fn member_roles_swap_on_parent_relations() {
    let graph = Graph::from_entities(vec![
        node("a", [0.0, 0.0]),
        node("b", [1.0, 0.0]),
        way("w1", &["a", "b"]),
        way("w2", &["b", "a"]),
        relation(
            "r1",
            vec![
                member("w1", EntityKind::Way, "forward"),
                member("w2", EntityKind::Way, "forward"),
            ],
        ),
    ]);
    let reversed = Reverse::new(id("w1")).apply(&graph);
    let Some(r) = reversed.has_entity(&id("r1")).and_then(Entity::as_relation) else {
        unreachable!()
    };
    assert_eq!(r.members()[0].role, "backward");
    // The other way's role is untouched.
    assert_eq!(r.members()[1].role, "forward");
}
