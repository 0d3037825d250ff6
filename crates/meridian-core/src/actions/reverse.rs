// SPDX-License-Identifier: Apache-2.0
//! Reverse a way, keeping direction-bound tags and roles truthful.

use crate::actions::Action;
use crate::entity::Entity;
use crate::graph::Graph;
use crate::ident::EntityId;
use crate::relation::Member;
use crate::tags::Tags;

/// Key segment swaps, first match wins: suffix forms before infix forms.
const KEY_SWAPS: &[(&str, &str)] = &[
    (":right", ":left"),
    (":left", ":right"),
    (":forward", ":backward"),
    (":backward", ":forward"),
];

/// `oneway` value swaps under reversal.
const ONEWAY_SWAPS: &[(&str, &str)] = &[
    ("yes", "-1"),
    ("1", "-1"),
    ("true", "-1"),
    ("-1", "yes"),
    ("reverse", "yes"),
];

/// Member role swaps on parent relations.
const ROLE_SWAPS: &[(&str, &str)] = &[("forward", "backward"), ("backward", "forward")];

fn swap_suffix_or_infix(key: &str) -> String {
    for (from, to) in KEY_SWAPS {
        if let Some(stem) = key.strip_suffix(from) {
            return format!("{stem}{to}");
        }
        let infix_from = format!("{from}:");
        let infix_to = format!("{to}:");
        if key.contains(&infix_from) {
            return key.replacen(&infix_from, &infix_to, 1);
        }
    }
    key.to_owned()
}

fn reverse_value(key: &str, value: &str) -> String {
    if key == "oneway" {
        for (from, to) in ONEWAY_SWAPS {
            if value == *from {
                return (*to).to_owned();
            }
        }
        return value.to_owned();
    }
    if key == "incline" {
        match value {
            "up" => return "down".to_owned(),
            "down" => return "up".to_owned(),
            _ => {
                if let Some(stripped) = value.strip_prefix('-') {
                    if stripped.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
                        return stripped.to_owned();
                    }
                }
                if value.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
                    return format!("-{value}");
                }
            }
        }
    }
    value.to_owned()
}

/// Reverses a way's node order and rewrites everything whose meaning is
/// bound to that order: `oneway` values, `*:left`/`*:right` and
/// `*:forward`/`*:backward` key forms, `incline`, and `forward`/`backward`
/// member roles in parent relations. For ways without direction-ambiguous
/// tags, reversing twice restores the original.
#[derive(Debug, Clone)]
pub struct Reverse {
    way_id: EntityId,
}

impl Reverse {
    /// Creates the action.
    #[must_use]
    pub fn new(way_id: EntityId) -> Self {
        Self { way_id }
    }

    fn reversed_tags(tags: &Tags) -> Tags {
        tags.iter()
            .map(|(k, v)| (swap_suffix_or_infix(k), reverse_value(k, v)))
            .collect()
    }
}

impl Action for Reverse {
    fn apply(&self, graph: &Graph) -> Graph {
        let Some(way) = graph.has_entity(&self.way_id).and_then(Entity::as_way) else {
            return graph.clone();
        };
        let nodes: Vec<EntityId> = way.nodes().iter().rev().cloned().collect();
        let reversed = way
            .with_nodes(nodes)
            .with_tags(Self::reversed_tags(way.tags()));

        graph.update(|edit| {
            edit.replace(Entity::Way(reversed));
            for relation_id in edit.parent_relations(&self.way_id) {
                let Some(relation) = edit.has_entity(&relation_id).and_then(Entity::as_relation)
                else {
                    continue;
                };
                let members: Vec<Member> = relation
                    .members()
                    .iter()
                    .map(|m| {
                        if m.id != self.way_id {
                            return m.clone();
                        }
                        let role = ROLE_SWAPS
                            .iter()
                            .find(|(from, _)| *from == m.role)
                            .map_or_else(|| m.role.clone(), |(_, to)| (*to).to_owned());
                        Member {
                            id: m.id.clone(),
                            kind: m.kind,
                            role,
                        }
                    })
                    .collect();
                if members != relation.members() {
                    let relation = relation.with_members(members);
                    edit.replace(Entity::Relation(relation));
                }
            }
        })
    }
}
