// SPDX-License-Identifier: Apache-2.0
//! Insert a member into a relation, placing it sensibly when no index is
//! given.

use crate::actions::Action;
use crate::entity::Entity;
use crate::graph::Graph;
use crate::ident::{EntityId, EntityKind};
use crate::relation::{Member, Relation};
use crate::way::Way;

/// Roles that belong to the stop/platform band of a public-transport
/// route. Members carrying these must precede the "line" band (the members
/// carrying the path) regardless of geometric adjacency.
const STOP_BAND_ROLES: &[&str] = &[
    "stop",
    "stop_entry_only",
    "stop_exit_only",
    "platform",
    "platform_entry_only",
    "platform_exit_only",
];

fn in_stop_band(role: &str) -> bool {
    STOP_BAND_ROLES.contains(&role)
}

/// Adds `member` to a relation.
///
/// With an explicit `index`, the member is inserted at that position. With
/// `insert_pair` (substituting one way for two in a route that traverses
/// the original way in both directions), the member is inserted at every
/// position where the substituted way id occurs, preserving relative order.
/// With neither: incomplete relations get a plain append; otherwise the
/// member's way is classified by endpoint connectivity against each
/// existing way member — sharing an endpoint with a member's start inserts
/// immediately before it, with a member's end immediately after it, and no
/// connection appends. Line members never land inside the stop band.
#[derive(Debug, Clone)]
pub struct AddMember {
    relation_id: EntityId,
    member: Member,
    index: Option<usize>,
    insert_pair: Option<EntityId>,
}

impl AddMember {
    /// Creates the action. `insert_pair` names the way id this member
    /// substitutes for, when splitting a doubly-traversed route way.
    #[must_use]
    pub fn new(
        relation_id: EntityId,
        member: Member,
        index: Option<usize>,
        insert_pair: Option<EntityId>,
    ) -> Self {
        Self {
            relation_id,
            member,
            index,
            insert_pair,
        }
    }

    /// Index of the first line-band member (== the end of the stop band).
    fn line_band_start(relation: &Relation) -> usize {
        relation
            .members()
            .iter()
            .position(|m| !in_stop_band(&m.role))
            .unwrap_or(relation.members().len())
    }

    /// Endpoint ids of a way, if it has any nodes.
    fn endpoints(way: &Way) -> Option<(&EntityId, &EntityId)> {
        Some((way.first()?, way.last()?))
    }

    /// Connectivity-based placement: `Some(i)` inserts at `i`, `None`
    /// appends.
    fn placement(&self, graph: &Graph, relation: &Relation) -> Option<usize> {
        let line_start = Self::line_band_start(relation);
        if in_stop_band(&self.member.role) {
            // Stops and platforms extend their own band.
            return Some(line_start);
        }
        if self.member.kind != EntityKind::Way {
            return None;
        }
        if !relation.is_complete(graph) {
            // Unresolvable geometry; adjacency would be guesswork.
            return None;
        }
        let new_way = graph.has_entity(&self.member.id).and_then(Entity::as_way)?;
        let (new_first, new_last) = Self::endpoints(new_way)?;

        for (i, member) in relation.members().iter().enumerate() {
            if member.kind != EntityKind::Way {
                continue;
            }
            let Some(way) = graph.has_entity(&member.id).and_then(Entity::as_way) else {
                continue;
            };
            let Some((first, last)) = Self::endpoints(way) else {
                continue;
            };
            if new_first == first || new_last == first {
                return Some(i.max(line_start));
            }
            if new_first == last || new_last == last {
                return Some((i + 1).max(line_start));
            }
        }
        None
    }
}

impl Action for AddMember {
    fn apply(&self, graph: &Graph) -> Graph {
        let Some(relation) = graph
            .has_entity(&self.relation_id)
            .and_then(Entity::as_relation)
        else {
            return graph.clone();
        };

        let updated = if let Some(original) = &self.insert_pair {
            if !relation.has_member(original) {
                return graph.clone();
            }
            let mut members = Vec::with_capacity(relation.members().len() + 1);
            for m in relation.members() {
                if m.id == *original {
                    members.push(self.member.clone());
                }
                members.push(m.clone());
            }
            relation.with_members(members)
        } else if let Some(index) = self.index {
            relation.add_member(self.member.clone(), Some(index))
        } else {
            let at = self.placement(graph, relation);
            relation.add_member(self.member.clone(), at)
        };

        graph.replace(Entity::Relation(updated))
    }
}
