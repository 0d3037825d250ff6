// SPDX-License-Identifier: Apache-2.0
#![allow(dead_code)]

use meridian_core::{Entity, EntityId, EntityKind, Member, Node, Relation, Tags, Way};

/// Shorthand for a raw id.
pub fn id(raw: &str) -> EntityId {
    EntityId::from_raw(raw)
}

/// Builds a tag map from pairs.
pub fn tags(pairs: &[(&str, &str)]) -> Tags {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect()
}

/// An untagged node at `loc`.
pub fn node(raw: &str, loc: [f64; 2]) -> Entity {
    Entity::Node(Node::new(id(raw), Some(loc), Tags::new()))
}

/// A tagged node at `loc`.
pub fn tagged_node(raw: &str, loc: [f64; 2], pairs: &[(&str, &str)]) -> Entity {
    Entity::Node(Node::new(id(raw), Some(loc), tags(pairs)))
}

/// An untagged way over the given node ids.
pub fn way(raw: &str, nodes: &[&str]) -> Entity {
    Entity::Way(Way::new(
        id(raw),
        nodes.iter().map(|n| id(n)).collect(),
        Tags::new(),
    ))
}

/// A tagged way over the given node ids.
pub fn tagged_way(raw: &str, nodes: &[&str], pairs: &[(&str, &str)]) -> Entity {
    Entity::Way(Way::new(
        id(raw),
        nodes.iter().map(|n| id(n)).collect(),
        tags(pairs),
    ))
}

/// A member reference.
pub fn member(raw: &str, kind: EntityKind, role: &str) -> Member {
    Member {
        id: id(raw),
        kind,
        role: role.into(),
    }
}

/// An untagged relation over the given members.
pub fn relation(raw: &str, members: Vec<Member>) -> Entity {
    Entity::Relation(Relation::new(id(raw), members, Tags::new()))
}

/// A tagged relation over the given members.
pub fn tagged_relation(raw: &str, members: Vec<Member>, pairs: &[(&str, &str)]) -> Entity {
    Entity::Relation(Relation::new(id(raw), members, tags(pairs)))
}

/// Asserts two locations agree within `eps` per component.
pub fn assert_loc(actual: Option<[f64; 2]>, expected: [f64; 2], eps: f64) {
    let Some(actual) = actual else {
        unreachable!("expected a location, found none")
    };
    assert!(
        (actual[0] - expected[0]).abs() <= eps && (actual[1] - expected[1]).abs() <= eps,
        "location {actual:?} differs from {expected:?} by more than {eps}"
    );
}
