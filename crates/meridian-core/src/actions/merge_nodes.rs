// SPDX-License-Identifier: Apache-2.0
//! Merge several nodes into one survivor.

use meridian_geom::Vec2;
use rustc_hash::FxHashMap;

use crate::actions::{Action, DisabledReason};
use crate::entity::Entity;
use crate::graph::Graph;
use crate::ident::{EntityId, EntityKind};
use crate::node::Node;
use crate::tags::{merge_tags, Tags};

/// Merges the given nodes into the *last* id of the list (the survivor).
///
/// Location policy: "interesting" nodes are those carrying tags. With
/// exactly one interesting node the survivor takes that node's location
/// verbatim; with several, the arithmetic mean of the interesting
/// locations; with none, the mean of all input locations. Tags from all
/// inputs are unioned onto the survivor, first occurrence (in input order)
/// winning on key conflicts. Parent ways and relations are rewritten to the
/// survivor with adjacent duplicates collapsed, after which the
/// non-survivors hold zero references and are deleted.
#[derive(Debug, Clone)]
pub struct MergeNodes {
    node_ids: Vec<EntityId>,
}

impl MergeNodes {
    /// Creates the action.
    #[must_use]
    pub fn new(node_ids: Vec<EntityId>) -> Self {
        Self { node_ids }
    }

    /// Distinct input ids, in first-occurrence order.
    fn distinct(&self) -> Vec<&EntityId> {
        let mut out: Vec<&EntityId> = Vec::with_capacity(self.node_ids.len());
        for id in &self.node_ids {
            if !out.contains(&id) {
                out.push(id);
            }
        }
        out
    }

    /// Survivor location per the interesting-node policy; `None` leaves the
    /// survivor's own location in place.
    fn survivor_loc(nodes: &[&Node]) -> Option<Vec2> {
        let interesting: Vec<&&Node> = nodes.iter().filter(|n| !n.tags().is_empty()).collect();
        if interesting.len() == 1 {
            return interesting[0].loc();
        }
        let pool: Vec<Vec2> = if interesting.is_empty() {
            nodes.iter().filter_map(|n| n.loc()).collect()
        } else {
            interesting.iter().filter_map(|n| n.loc()).collect()
        };
        if pool.is_empty() {
            return None;
        }
        let n = pool.len() as f64;
        let sum = pool
            .iter()
            .fold([0.0, 0.0], |acc, l| [acc[0] + l[0], acc[1] + l[1]]);
        Some([sum[0] / n, sum[1] / n])
    }
}

impl Action for MergeNodes {
    fn apply(&self, graph: &Graph) -> Graph {
        let ids = self.distinct();
        let Some(survivor_id) = self.node_ids.last().cloned() else {
            return graph.clone();
        };

        let mut nodes: Vec<&Node> = Vec::with_capacity(ids.len());
        for id in &ids {
            match graph.has_entity(id).and_then(Entity::as_node) {
                Some(node) => nodes.push(node),
                None => return graph.clone(),
            }
        }

        let loc = Self::survivor_loc(&nodes);
        let mut tags = Tags::new();
        for node in &nodes {
            merge_tags(&mut tags, node.tags());
        }

        let Some(survivor) = graph.has_entity(&survivor_id).and_then(Entity::as_node) else {
            return graph.clone();
        };
        let mut survivor = survivor.with_tags(tags);
        if let Some(loc) = loc {
            survivor = survivor.with_loc(loc);
        }

        graph.update(|edit| {
            edit.replace(Entity::Node(survivor));
            for id in ids.iter().filter(|id| ***id != survivor_id) {
                for way_id in edit.parent_ways(id) {
                    let Some(way) = edit.has_entity(&way_id).and_then(Entity::as_way) else {
                        continue;
                    };
                    let way = way.replace_node(id, &survivor_id);
                    edit.replace(Entity::Way(way));
                }
                for relation_id in edit.parent_relations(id) {
                    let Some(relation) =
                        edit.has_entity(&relation_id).and_then(Entity::as_relation)
                    else {
                        continue;
                    };
                    let relation =
                        relation.replace_member(id, &survivor_id, EntityKind::Node, false);
                    edit.replace(Entity::Relation(relation));
                }
                // All references now point at the survivor.
                edit.remove(id);
            }
        })
    }

    fn disabled(&self, graph: &Graph) -> Option<DisabledReason> {
        let ids = self.distinct();
        if ids.len() < 2 {
            return Some(DisabledReason::NotEligible);
        }
        for id in &ids {
            if graph.has_entity(id).and_then(Entity::as_node).is_none() {
                return Some(DisabledReason::NotEligible);
            }
        }

        // Two inputs holding different roles in the same relation would
        // leave that relation ambiguous after the merge.
        let mut roles_seen: FxHashMap<EntityId, String> = FxHashMap::default();
        for id in &ids {
            for relation_id in graph.parent_relations(id) {
                let Some(relation) = graph
                    .has_entity(relation_id)
                    .and_then(Entity::as_relation)
                else {
                    continue;
                };
                let Some((_, member)) = relation.member_by_id(id) else {
                    continue;
                };
                match roles_seen.get(relation_id) {
                    Some(role) if *role != member.role => {
                        return Some(DisabledReason::Relation);
                    }
                    Some(_) => {}
                    None => {
                        roles_seen.insert(relation_id.clone(), member.role.clone());
                    }
                }
            }
        }

        // Inputs acting as distinct legs of a turn restriction (directly or
        // through their parent ways) would collapse the restriction.
        let mut restriction_slots: FxHashMap<EntityId, String> = FxHashMap::default();
        for id in &ids {
            let mut carriers: Vec<EntityId> = vec![(*id).clone()];
            carriers.extend(graph.parent_ways(id).iter().cloned());
            for carrier in &carriers {
                for relation_id in graph.parent_relations(carrier) {
                    let Some(relation) = graph
                        .has_entity(relation_id)
                        .and_then(Entity::as_relation)
                    else {
                        continue;
                    };
                    if !relation.is_restriction() {
                        continue;
                    }
                    let Some((_, member)) = relation.member_by_id(carrier) else {
                        continue;
                    };
                    match restriction_slots.get(relation_id) {
                        Some(role) if *role != member.role => {
                            return Some(DisabledReason::Restriction);
                        }
                        Some(_) => {}
                        None => {
                            restriction_slots.insert(relation_id.clone(), member.role.clone());
                        }
                    }
                }
            }
        }

        None
    }
}
