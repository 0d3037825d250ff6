// SPDX-License-Identifier: Apache-2.0
//! Extract a point of interest out of a node or way.

use meridian_geom::{path_midpoint, polygon_centroid, vec_interp, Vec2, Viewport};

use crate::actions::Action;
use crate::entity::Entity;
use crate::graph::Graph;
use crate::ident::EntityId;
use crate::node::Node;
use crate::relation::Member;
use crate::tags::Tags;
use crate::way::Way;

/// Which tag keys migrate from a way onto the node extracted from it.
///
/// The vocabulary is configuration, not algorithm: the default covers
/// representative point-like keys (accessibility, address, level placement)
/// and callers with richer preset knowledge substitute their own table.
#[derive(Debug, Clone)]
pub struct ExtractPolicy {
    point_keys: Vec<String>,
    point_prefixes: Vec<String>,
}

impl Default for ExtractPolicy {
    fn default() -> Self {
        Self {
            point_keys: ["access", "crossing", "entrance", "indoor", "level", "wheelchair"]
                .iter()
                .map(|k| (*k).to_owned())
                .collect(),
            point_prefixes: vec!["addr:".to_owned()],
        }
    }
}

impl ExtractPolicy {
    /// Builds a policy from explicit key and prefix tables.
    #[must_use]
    pub fn new(point_keys: Vec<String>, point_prefixes: Vec<String>) -> Self {
        Self {
            point_keys,
            point_prefixes,
        }
    }

    /// Whether `key` migrates to the extracted node.
    #[must_use]
    pub fn migrates(&self, key: &str) -> bool {
        self.point_keys.iter().any(|k| k == key)
            || self.point_prefixes.iter().any(|p| key.starts_with(p))
    }

    /// Splits `tags` into (migrating, remaining).
    fn partition(&self, tags: &Tags) -> (Tags, Tags) {
        let mut migrating = Tags::new();
        let mut remaining = Tags::new();
        for (k, v) in tags {
            if self.migrates(k) {
                migrating.insert(k.clone(), v.clone());
            } else {
                remaining.insert(k.clone(), v.clone());
            }
        }
        (migrating, remaining)
    }
}

/// Result of running [`Extract`]: the new graph, and the id of the node
/// that now stands alone — `None` when the input had no extractable
/// geometry and the graph came back unchanged.
#[derive(Debug, Clone)]
pub struct ExtractOutcome {
    /// The resulting graph.
    pub graph: Graph,
    /// Id of the free-standing node, when one was produced or detached.
    pub extracted_node_id: Option<EntityId>,
}

/// Extracts a free-standing point from an entity.
///
/// For a node: detaches it from parent ways and relations by substituting a
/// fresh, untagged placeholder node (under `new_id`) in its place; the
/// original node, tags intact, is the extracted point. For a way: a new
/// node (under `new_id`) is synthesized at the way's representative point,
/// point-like tags migrate to it per the policy, and the node is inserted
/// into each parent relation at the way's member position.
///
/// The representative point, by node count: 0 → no-op (no id consumed);
/// 1 → that node's location; 2 → midpoint; 3+ closed → area-weighted
/// polygon centroid; 3+ open → midpoint by cumulative arc length. All but
/// the single-node case are computed in projected viewport space.
#[derive(Debug, Clone)]
pub struct Extract {
    entity_id: EntityId,
    new_id: EntityId,
    viewport: Viewport,
    policy: ExtractPolicy,
}

impl Extract {
    /// Creates the action. `new_id` must be a freshly allocated node id.
    #[must_use]
    pub fn new(entity_id: EntityId, new_id: EntityId, viewport: Viewport) -> Self {
        Self {
            entity_id,
            new_id,
            viewport,
            policy: ExtractPolicy::default(),
        }
    }

    /// Replaces the tag-migration policy.
    #[must_use]
    pub fn with_policy(mut self, policy: ExtractPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Runs the action, reporting the extracted node id alongside the graph.
    #[must_use]
    pub fn run(&self, graph: &Graph) -> ExtractOutcome {
        match graph.has_entity(&self.entity_id) {
            Some(Entity::Node(node)) => self.run_node(graph, node),
            Some(Entity::Way(way)) => self.run_way(graph, way),
            _ => ExtractOutcome {
                graph: graph.clone(),
                extracted_node_id: None,
            },
        }
    }

    fn run_node(&self, graph: &Graph, node: &Node) -> ExtractOutcome {
        if graph.parent_ways(&self.entity_id).is_empty()
            && graph.parent_relations(&self.entity_id).is_empty()
        {
            // Already free-standing; nothing to detach from.
            return ExtractOutcome {
                graph: graph.clone(),
                extracted_node_id: Some(self.entity_id.clone()),
            };
        }

        let replacement = Node::new(self.new_id.clone(), node.loc(), Tags::new());
        let graph = graph.update(|edit| {
            edit.replace(Entity::Node(replacement));
            for way_id in edit.parent_ways(&self.entity_id) {
                let Some(way) = edit.has_entity(&way_id).and_then(Entity::as_way) else {
                    continue;
                };
                let way = way.replace_node(&self.entity_id, &self.new_id);
                edit.replace(Entity::Way(way));
            }
            for relation_id in edit.parent_relations(&self.entity_id) {
                let Some(relation) = edit.has_entity(&relation_id).and_then(Entity::as_relation)
                else {
                    continue;
                };
                let relation = relation.replace_member(
                    &self.entity_id,
                    &self.new_id,
                    crate::ident::EntityKind::Node,
                    true,
                );
                edit.replace(Entity::Relation(relation));
            }
        });
        ExtractOutcome {
            graph,
            extracted_node_id: Some(self.entity_id.clone()),
        }
    }

    /// Representative point of a way, in lon/lat.
    fn representative_loc(&self, graph: &Graph, way: &Way) -> Option<Vec2> {
        let locs: Vec<Vec2> = way
            .nodes()
            .iter()
            .filter_map(|id| graph.has_entity(id).and_then(Entity::as_node))
            .filter_map(Node::loc)
            .collect();
        match locs.len() {
            0 => None,
            1 => Some(locs[0]),
            2 => {
                let a = self.viewport.project(locs[0]);
                let b = self.viewport.project(locs[1]);
                Some(self.viewport.invert(vec_interp(a, b, 0.5)))
            }
            _ => {
                let points: Vec<Vec2> = locs.iter().map(|l| self.viewport.project(*l)).collect();
                let point = if way.is_closed() {
                    // Drop the closing repeat; the centroid is of the ring.
                    polygon_centroid(&points[..points.len() - 1])?
                } else {
                    path_midpoint(&points)?
                };
                Some(self.viewport.invert(point))
            }
        }
    }

    fn run_way(&self, graph: &Graph, way: &Way) -> ExtractOutcome {
        let Some(loc) = self.representative_loc(graph, way) else {
            return ExtractOutcome {
                graph: graph.clone(),
                extracted_node_id: None,
            };
        };

        let (migrating, remaining) = self.policy.partition(way.tags());
        let point = Node::new(self.new_id.clone(), Some(loc), migrating);

        let graph = graph.update(|edit| {
            edit.replace(Entity::Node(point));
            edit.replace(Entity::Way(way.with_tags(remaining)));
            for relation_id in edit.parent_relations(&self.entity_id) {
                let Some(relation) = edit.has_entity(&relation_id).and_then(Entity::as_relation)
                else {
                    continue;
                };
                let Some((index, member)) = relation.member_by_id(&self.entity_id) else {
                    continue;
                };
                let point_member = Member {
                    id: self.new_id.clone(),
                    kind: crate::ident::EntityKind::Node,
                    role: member.role.clone(),
                };
                let relation = relation.add_member(point_member, Some(index));
                edit.replace(Entity::Relation(relation));
            }
        });
        ExtractOutcome {
            graph,
            extracted_node_id: Some(self.new_id.clone()),
        }
    }
}

impl Action for Extract {
    fn apply(&self, graph: &Graph) -> Graph {
        self.run(graph).graph
    }
}
