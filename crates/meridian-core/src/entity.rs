// SPDX-License-Identifier: Apache-2.0
//! The closed entity sum type shared by every graph operation.

use rustc_hash::FxHashMap;

use crate::changeset::Changeset;
use crate::graph::{Graph, GraphError};
use crate::ident::{EntityId, EntityKind, IdSequence};
use crate::node::Node;
use crate::relation::{Member, Relation};
use crate::tags::Tags;
use crate::way::Way;

/// Memo table for [`Entity::copy`]: original id → copied id.
///
/// Sharing one registry across several `copy` calls makes the copies share
/// children the same way the originals did; member cycles terminate because
/// an id is registered before its children are visited.
pub type CopyRegistry = FxHashMap<EntityId, EntityId>;

/// How an entity renders, given its structure and surroundings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Geometry {
    /// Free-standing node.
    Point,
    /// Node that participates in at least one way.
    Vertex,
    /// Open (or untagged closed) way.
    Line,
    /// Closed way with area-suggesting tags, or a multipolygon relation.
    Area,
    /// Any other relation.
    Relation,
}

/// A Node, Way, Relation, or Changeset value.
///
/// A closed tagged variant rather than a class hierarchy: every consumer
/// matches exhaustively, so adding a kind is a compile-visible event.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "lowercase"))]
pub enum Entity {
    /// A point.
    Node(Node),
    /// A polyline or polygon-by-reference.
    Way(Way),
    /// A grouped relation.
    Relation(Relation),
    /// A tags-only upload envelope.
    Changeset(Changeset),
}

impl Entity {
    /// The entity's id.
    #[must_use]
    pub fn id(&self) -> &EntityId {
        match self {
            Self::Node(n) => n.id(),
            Self::Way(w) => w.id(),
            Self::Relation(r) => r.id(),
            Self::Changeset(c) => c.id(),
        }
    }

    /// The entity's kind.
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Node(_) => EntityKind::Node,
            Self::Way(_) => EntityKind::Way,
            Self::Relation(_) => EntityKind::Relation,
            Self::Changeset(_) => EntityKind::Changeset,
        }
    }

    /// The entity's tags.
    #[must_use]
    pub fn tags(&self) -> &Tags {
        match self {
            Self::Node(n) => n.tags(),
            Self::Way(w) => w.tags(),
            Self::Relation(r) => r.tags(),
            Self::Changeset(c) => c.tags(),
        }
    }

    /// Local revision counter.
    #[must_use]
    pub fn v(&self) -> u32 {
        match self {
            Self::Node(n) => n.v(),
            Self::Way(w) => w.v(),
            Self::Relation(r) => r.v(),
            Self::Changeset(c) => c.v(),
        }
    }

    /// Returns a copy with `tags` replacing the tag map, revision bumped.
    #[must_use]
    pub fn with_tags(&self, tags: Tags) -> Self {
        match self {
            Self::Node(n) => Self::Node(n.with_tags(tags)),
            Self::Way(w) => Self::Way(w.with_tags(tags)),
            Self::Relation(r) => Self::Relation(r.with_tags(tags)),
            Self::Changeset(c) => Self::Changeset(c.with_tags(tags)),
        }
    }

    /// `true` when the id was synthesized locally.
    #[must_use]
    pub fn is_new(&self) -> bool {
        self.id().is_new()
    }

    /// `true` when any tag is more than provenance bookkeeping.
    #[must_use]
    pub fn has_interesting_tags(&self) -> bool {
        crate::tags::has_interesting_tags(self.tags())
    }

    /// The node inside, if this is a node.
    #[must_use]
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Self::Node(n) => Some(n),
            _ => None,
        }
    }

    /// The way inside, if this is a way.
    #[must_use]
    pub fn as_way(&self) -> Option<&Way> {
        match self {
            Self::Way(w) => Some(w),
            _ => None,
        }
    }

    /// The relation inside, if this is a relation.
    #[must_use]
    pub fn as_relation(&self) -> Option<&Relation> {
        match self {
            Self::Relation(r) => Some(r),
            _ => None,
        }
    }

    /// How this entity renders in `graph`; `None` for changesets, which
    /// have no geometry.
    #[must_use]
    pub fn geometry(&self, graph: &Graph) -> Option<Geometry> {
        match self {
            Self::Node(n) => {
                if graph.parent_ways(n.id()).is_empty() {
                    Some(Geometry::Point)
                } else {
                    Some(Geometry::Vertex)
                }
            }
            Self::Way(w) => {
                if w.is_area() {
                    Some(Geometry::Area)
                } else {
                    Some(Geometry::Line)
                }
            }
            Self::Relation(r) => {
                if r.is_multipolygon() {
                    Some(Geometry::Area)
                } else {
                    Some(Geometry::Relation)
                }
            }
            Self::Changeset(_) => None,
        }
    }

    /// Produces a structurally independent copy under a fresh id,
    /// recursively copying referenced children.
    ///
    /// Copied entities accumulate in `out` (children before parents). The
    /// `registry` memoizes original→copy ids so that a node shared by two
    /// ways is copied once with both ways pointing at the same copy, and so
    /// that relation member cycles terminate. Unresolvable relation members
    /// keep their original (dangling) reference — incompleteness is
    /// preserved, not repaired.
    ///
    /// # Errors
    ///
    /// `GraphError::NotFound` when a way references a node absent from
    /// `graph`; way geometry cannot be copied around a hole.
    pub fn copy(
        &self,
        graph: &Graph,
        ids: &mut IdSequence,
        registry: &mut CopyRegistry,
        out: &mut Vec<Entity>,
    ) -> Result<EntityId, GraphError> {
        if let Some(done) = registry.get(self.id()) {
            return Ok(done.clone());
        }
        let new_id = ids.next(self.kind());
        registry.insert(self.id().clone(), new_id.clone());

        match self {
            Self::Node(n) => {
                out.push(Self::Node(n.duplicate(new_id.clone())));
            }
            Self::Way(w) => {
                let mut nodes = Vec::with_capacity(w.nodes().len());
                for node_id in w.nodes() {
                    let child = graph.entity(node_id)?;
                    nodes.push(child.copy(graph, ids, registry, out)?);
                }
                out.push(Self::Way(Way::new(new_id.clone(), nodes, w.tags().clone())));
            }
            Self::Relation(r) => {
                let mut members = Vec::with_capacity(r.members().len());
                for m in r.members() {
                    match graph.has_entity(&m.id) {
                        Some(child) => members.push(Member {
                            id: child.copy(graph, ids, registry, out)?,
                            kind: m.kind,
                            role: m.role.clone(),
                        }),
                        None => members.push(m.clone()),
                    }
                }
                out.push(Self::Relation(Relation::new(
                    new_id.clone(),
                    members,
                    r.tags().clone(),
                )));
            }
            Self::Changeset(c) => {
                out.push(Self::Changeset(Changeset::new(
                    new_id.clone(),
                    c.tags().clone(),
                )));
            }
        }
        Ok(new_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    fn node(id: &str, loc: [f64; 2]) -> Entity {
        Entity::Node(Node::new(EntityId::from_raw(id), Some(loc), Tags::new()))
    }

    fn way(id: &str, nodes: &[&str]) -> Entity {
        Entity::Way(Way::new(
            EntityId::from_raw(id),
            nodes.iter().map(|n| EntityId::from_raw(n)).collect(),
            Tags::new(),
        ))
    }

    #[test]
    fn copy_shares_children_through_the_registry() {
        let graph = Graph::from_entities(vec![
            node("a", [0.0, 0.0]),
            node("b", [1.0, 0.0]),
            node("c", [2.0, 0.0]),
            way("w1", &["a", "b"]),
            way("w2", &["b", "c"]),
        ]);
        let mut ids = IdSequence::new();
        let mut registry = CopyRegistry::default();
        let mut out = Vec::new();

        let Ok(w1_copy) = graph
            .entity(&EntityId::from_raw("w1"))
            .and_then(|e| e.copy(&graph, &mut ids, &mut registry, &mut out))
        else {
            unreachable!("w1 and its nodes resolve")
        };
        let Ok(w2_copy) = graph
            .entity(&EntityId::from_raw("w2"))
            .and_then(|e| e.copy(&graph, &mut ids, &mut registry, &mut out))
        else {
            unreachable!("w2 and its nodes resolve")
        };

        // 3 node copies + 2 way copies; the shared node copied exactly once.
        assert_eq!(out.len(), 5);
        let shared_b = registry.get(&EntityId::from_raw("b"));
        let find_way = |id: &EntityId| {
            out.iter()
                .find(|e| e.id() == id)
                .and_then(Entity::as_way)
                .map(|w| w.nodes().to_vec())
        };
        let Some(w1_nodes) = find_way(&w1_copy) else {
            unreachable!()
        };
        let Some(w2_nodes) = find_way(&w2_copy) else {
            unreachable!()
        };
        assert_eq!(Some(&w1_nodes[1]), shared_b);
        assert_eq!(Some(&w2_nodes[0]), shared_b);
    }

    #[test]
    fn copy_terminates_on_member_cycles() {
        let r1 = Entity::Relation(Relation::new(
            EntityId::from_raw("r1"),
            vec![Member {
                id: EntityId::from_raw("r2"),
                kind: EntityKind::Relation,
                role: String::new(),
            }],
            Tags::new(),
        ));
        let r2 = Entity::Relation(Relation::new(
            EntityId::from_raw("r2"),
            vec![Member {
                id: EntityId::from_raw("r1"),
                kind: EntityKind::Relation,
                role: String::new(),
            }],
            Tags::new(),
        ));
        let graph = Graph::from_entities(vec![r1, r2]);
        let mut ids = IdSequence::new();
        let mut registry = CopyRegistry::default();
        let mut out = Vec::new();

        let copied = graph
            .entity(&EntityId::from_raw("r1"))
            .and_then(|e| e.copy(&graph, &mut ids, &mut registry, &mut out));
        assert!(copied.is_ok());
        assert_eq!(out.len(), 2);
    }
}
