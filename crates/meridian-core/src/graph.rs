// SPDX-License-Identifier: Apache-2.0
//! Persistent, versioned entity container with derived parent indices.
//!
//! A graph is an immutable `base` (possibly another graph) plus a `local`
//! overlay mapping ids to entities or to an explicit tombstone. Effective
//! lookup is: local override if present, else base, else absent. The derived
//! `parent_ways`/`parent_relations` indices live in the same layered shape
//! and are maintained from the reference deltas of each edit, never rebuilt
//! from the whole entity set.
//!
//! Every mutator returns a new graph; graphs already handed out (history
//! entries, in-flight reads) are never invalidated. Chaining a child layer
//! with [`Graph::layer`] is an O(1) allocation regardless of graph size.

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

use crate::entity::Entity;
use crate::ident::EntityId;
use crate::record::EntityRecord;

/// Lookup failure for [`Graph::entity`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The id resolves in no layer (or is tombstoned).
    #[error("entity not found: {0}")]
    NotFound(EntityId),
}

/// Overlay slot: a live entity, or `None` for a tombstone ("deleted here,
/// even if present in base").
type Slot = Option<Arc<Entity>>;

/// Parent-index bucket. `Arc` so an unchanged bucket is shared with the
/// layer below instead of copied.
type Bucket = Arc<Vec<EntityId>>;

/// Persistent container of entities plus derived parent-reference indices.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    base: Option<Arc<Graph>>,
    entities: FxHashMap<EntityId, Slot>,
    parent_ways: FxHashMap<EntityId, Bucket>,
    parent_relations: FxHashMap<EntityId, Bucket>,
}

impl Graph {
    /// An empty root graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a root graph from fully formed entities.
    #[must_use]
    pub fn from_entities(entities: Vec<Entity>) -> Self {
        Self::default().update(|edit| {
            for entity in entities {
                edit.replace(entity);
            }
        })
    }

    /// Builds a root graph from normalized parser records.
    #[must_use]
    pub fn from_records(records: Vec<EntityRecord>) -> Self {
        Self::from_entities(records.into_iter().map(Entity::from).collect())
    }

    /// Creates a child layer over `base`: an empty overlay whose effective
    /// content starts identical to `base`.
    #[must_use]
    pub fn layer(base: Arc<Self>) -> Self {
        Self {
            base: Some(base),
            entities: FxHashMap::default(),
            parent_ways: FxHashMap::default(),
            parent_relations: FxHashMap::default(),
        }
    }

    /// Effective slot lookup across the layer chain.
    fn effective(&self, id: &EntityId) -> Option<&Arc<Entity>> {
        let mut graph = self;
        loop {
            if let Some(slot) = graph.entities.get(id) {
                return slot.as_ref();
            }
            graph = graph.base.as_deref()?;
        }
    }

    /// The entity under `id`, or `None` — never an error. Tombstones read
    /// as absent.
    #[must_use]
    pub fn has_entity(&self, id: &EntityId) -> Option<&Entity> {
        self.effective(id).map(Arc::as_ref)
    }

    /// The entity under `id`.
    ///
    /// # Errors
    ///
    /// `GraphError::NotFound` when the id resolves in no layer.
    pub fn entity(&self, id: &EntityId) -> Result<&Entity, GraphError> {
        self.has_entity(id)
            .ok_or_else(|| GraphError::NotFound(id.clone()))
    }

    fn bucket_lookup<'a>(
        mut graph: Option<&'a Self>,
        ways: bool,
        id: &EntityId,
    ) -> Option<&'a Bucket> {
        while let Some(g) = graph {
            let map = if ways { &g.parent_ways } else { &g.parent_relations };
            if let Some(bucket) = map.get(id) {
                return Some(bucket);
            }
            graph = g.base.as_deref();
        }
        None
    }

    /// Ids of the ways whose node lists reference `id`; empty if none.
    #[must_use]
    pub fn parent_ways(&self, id: &EntityId) -> &[EntityId] {
        Self::bucket_lookup(Some(self), true, id).map_or(&[], |b| b.as_slice())
    }

    /// Ids of the relations whose member lists reference `id`; empty if
    /// none.
    #[must_use]
    pub fn parent_relations(&self, id: &EntityId) -> &[EntityId] {
        Self::bucket_lookup(Some(self), false, id).map_or(&[], |b| b.as_slice())
    }

    /// The root snapshot of the layer chain (the graph seeded from the
    /// remote store, before any local edit).
    #[must_use]
    pub fn base(&self) -> &Self {
        let mut graph = self;
        while let Some(b) = graph.base.as_deref() {
            graph = b;
        }
        graph
    }

    /// The root snapshot's version of `id`, ignoring every local layer.
    #[must_use]
    pub fn base_entity(&self, id: &EntityId) -> Option<&Entity> {
        self.base().has_entity(id)
    }

    /// Every live entity in the effective view.
    ///
    /// Intended for seeding consumers and diagnostics; editing code paths
    /// stay on the id-addressed lookups.
    #[must_use]
    pub fn iter_entities(&self) -> Vec<&Entity> {
        let mut seen: FxHashSet<&EntityId> = FxHashSet::default();
        let mut out = Vec::new();
        let mut graph = Some(self);
        while let Some(g) = graph {
            for (id, slot) in &g.entities {
                if seen.insert(id) {
                    if let Some(entity) = slot {
                        out.push(entity.as_ref());
                    }
                }
            }
            graph = g.base.as_deref();
        }
        out
    }

    /// Applies a batch of edits against a single overlay clone and freezes
    /// the result. `replace`/`remove` are one-edit conveniences over this.
    #[must_use]
    pub fn update<F: FnOnce(&mut GraphEdit<'_>)>(&self, edits: F) -> Self {
        let mut next = self.clone();
        edits(&mut GraphEdit { graph: &mut next });
        next
    }

    /// Returns a new graph with `entity` added or updated; index
    /// maintenance is proportional to the entity's reference delta.
    #[must_use]
    pub fn replace(&self, entity: Entity) -> Self {
        self.update(|edit| edit.replace(entity))
    }

    /// Returns a new graph with all of `entities` added or updated.
    #[must_use]
    pub fn replace_many<I: IntoIterator<Item = Entity>>(&self, entities: I) -> Self {
        self.update(|edit| {
            for entity in entities {
                edit.replace(entity);
            }
        })
    }

    /// Returns a new graph with `id` tombstoned and its reference
    /// contributions retracted from the parent indices.
    #[must_use]
    pub fn remove(&self, id: &EntityId) -> Self {
        self.update(|edit| edit.remove(id))
    }

    /// Diagnostic: whether the parent indices agree exactly with the
    /// reference lists of the live entities. Edits maintain this
    /// incrementally; the full recomputation here is for tests and debug
    /// assertions, not hot paths.
    #[must_use]
    pub fn indices_consistent(&self) -> bool {
        let mut expected_ways: FxHashMap<EntityId, Vec<EntityId>> = FxHashMap::default();
        let mut expected_relations: FxHashMap<EntityId, Vec<EntityId>> = FxHashMap::default();
        let live = self.iter_entities();
        for entity in &live {
            match entity {
                Entity::Way(w) => {
                    for n in w.nodes() {
                        let bucket = expected_ways.entry(n.clone()).or_default();
                        if !bucket.contains(w.id()) {
                            bucket.push(w.id().clone());
                        }
                    }
                }
                Entity::Relation(r) => {
                    for m in r.members() {
                        let bucket = expected_relations.entry(m.id.clone()).or_default();
                        if !bucket.contains(r.id()) {
                            bucket.push(r.id().clone());
                        }
                    }
                }
                Entity::Node(_) | Entity::Changeset(_) => {}
            }
        }

        let agrees = |expected: &FxHashMap<EntityId, Vec<EntityId>>, ways: bool| {
            for entity in &live {
                let id = entity.id();
                let actual = if ways {
                    self.parent_ways(id)
                } else {
                    self.parent_relations(id)
                };
                let want = expected.get(id).map_or(&[][..], Vec::as_slice);
                if actual.len() != want.len() {
                    return false;
                }
                if !actual.iter().all(|p| want.contains(p)) {
                    return false;
                }
            }
            true
        };
        agrees(&expected_ways, true) && agrees(&expected_relations, false)
    }
}

/// Mutable view over one in-flight overlay clone, handed to
/// [`Graph::update`] closures. Reads observe edits already applied in the
/// same batch.
pub struct GraphEdit<'a> {
    graph: &'a mut Graph,
}

impl GraphEdit<'_> {
    /// See [`Graph::has_entity`].
    #[must_use]
    pub fn has_entity(&self, id: &EntityId) -> Option<&Entity> {
        self.graph.has_entity(id)
    }

    /// See [`Graph::entity`].
    ///
    /// # Errors
    ///
    /// `GraphError::NotFound` when the id resolves in no layer.
    pub fn entity(&self, id: &EntityId) -> Result<&Entity, GraphError> {
        self.graph.entity(id)
    }

    /// See [`Graph::parent_ways`].
    #[must_use]
    pub fn parent_ways(&self, id: &EntityId) -> Vec<EntityId> {
        self.graph.parent_ways(id).to_vec()
    }

    /// See [`Graph::parent_relations`].
    #[must_use]
    pub fn parent_relations(&self, id: &EntityId) -> Vec<EntityId> {
        self.graph.parent_relations(id).to_vec()
    }

    /// Adds or updates `entity`, adjusting indices for its reference delta.
    pub fn replace(&mut self, entity: Entity) {
        let id = entity.id().clone();
        let old = self.graph.effective(&id).cloned();
        self.apply_reference_delta(old.as_deref(), Some(&entity));
        self.graph.entities.insert(id, Some(Arc::new(entity)));
    }

    /// Tombstones `id` and retracts its reference contributions.
    ///
    /// When no layer below holds the id, the overlay entry is physically
    /// dropped instead — nothing in the chain needs a tombstone for an
    /// entity that never existed outside this layer.
    pub fn remove(&mut self, id: &EntityId) {
        let old = self.graph.effective(id).cloned();
        if let Some(old) = old {
            self.apply_reference_delta(Some(&old), None);
        }
        let below = self
            .graph
            .base
            .as_deref()
            .and_then(|b| b.effective(id))
            .is_some();
        if below {
            self.graph.entities.insert(id.clone(), None);
        } else {
            self.graph.entities.remove(id);
        }
    }

    /// Distinct referenced ids of an entity's reference list.
    fn referenced(entity: &Entity) -> (Vec<EntityId>, bool) {
        match entity {
            Entity::Way(w) => {
                let mut ids: Vec<EntityId> = Vec::with_capacity(w.nodes().len());
                for n in w.nodes() {
                    if !ids.contains(n) {
                        ids.push(n.clone());
                    }
                }
                (ids, true)
            }
            Entity::Relation(r) => {
                let mut ids: Vec<EntityId> = Vec::with_capacity(r.members().len());
                for m in r.members() {
                    if !ids.contains(&m.id) {
                        ids.push(m.id.clone());
                    }
                }
                (ids, false)
            }
            Entity::Node(_) | Entity::Changeset(_) => (Vec::new(), true),
        }
    }

    /// Adjusts the parent indices for the change `old → new` of a single
    /// entity. Cost is proportional to the ids added to or dropped from the
    /// entity's reference list.
    fn apply_reference_delta(&mut self, old: Option<&Entity>, new: Option<&Entity>) {
        let (old_refs, old_ways) = old.map_or((Vec::new(), true), Self::referenced);
        let (new_refs, new_ways) = new.map_or((Vec::new(), true), Self::referenced);
        let parent_id = match (old, new) {
            (_, Some(e)) => e.id().clone(),
            (Some(e), _) => e.id().clone(),
            (None, None) => return,
        };

        for dropped in old_refs.iter().filter(|r| !new_refs.contains(r)) {
            Self::bucket_retract(self.graph, old_ways, dropped, &parent_id);
        }
        for added in new_refs.iter().filter(|r| !old_refs.contains(r)) {
            Self::bucket_extend(self.graph, new_ways, added, &parent_id);
        }
    }

    /// Adds `parent_id` to the child's bucket, copy-on-write.
    fn bucket_extend(graph: &mut Graph, ways: bool, child: &EntityId, parent_id: &EntityId) {
        let Graph {
            base,
            parent_ways,
            parent_relations,
            ..
        } = graph;
        let map = if ways { parent_ways } else { parent_relations };
        if let Some(bucket) = map.get_mut(child) {
            let vec = Arc::make_mut(bucket);
            if !vec.contains(parent_id) {
                vec.push(parent_id.clone());
            }
            return;
        }
        let mut vec = Graph::bucket_lookup(base.as_deref(), ways, child)
            .map_or_else(Vec::new, |b| b.as_ref().clone());
        if !vec.contains(parent_id) {
            vec.push(parent_id.clone());
        }
        map.insert(child.clone(), Arc::new(vec));
    }

    /// Drops `parent_id` from the child's bucket, copy-on-write. An empty
    /// result stays in the overlay as an override shadowing the base bucket.
    fn bucket_retract(graph: &mut Graph, ways: bool, child: &EntityId, parent_id: &EntityId) {
        let Graph {
            base,
            parent_ways,
            parent_relations,
            ..
        } = graph;
        let map = if ways { parent_ways } else { parent_relations };
        if let Some(bucket) = map.get_mut(child) {
            Arc::make_mut(bucket).retain(|p| p != parent_id);
            return;
        }
        let Some(below) = Graph::bucket_lookup(base.as_deref(), ways, child) else {
            return;
        };
        let vec: Vec<EntityId> = below.iter().filter(|p| *p != parent_id).cloned().collect();
        map.insert(child.clone(), Arc::new(vec));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ident::EntityKind;
    use crate::node::Node;
    use crate::relation::{Member, Relation};
    use crate::tags::Tags;
    use crate::way::Way;

    fn id(raw: &str) -> EntityId {
        EntityId::from_raw(raw)
    }

    fn node(raw: &str) -> Entity {
        Entity::Node(Node::new(id(raw), Some([0.0, 0.0]), Tags::new()))
    }

    fn way(raw: &str, nodes: &[&str]) -> Entity {
        Entity::Way(Way::new(
            id(raw),
            nodes.iter().map(|n| id(n)).collect(),
            Tags::new(),
        ))
    }

    fn relation(raw: &str, members: &[(&str, EntityKind)]) -> Entity {
        Entity::Relation(Relation::new(
            id(raw),
            members
                .iter()
                .map(|(m, kind)| Member {
                    id: id(m),
                    kind: *kind,
                    role: String::new(),
                })
                .collect(),
            Tags::new(),
        ))
    }

    #[test]
    fn entity_vs_has_entity_on_missing_ids() {
        let graph = Graph::from_entities(vec![node("n1")]);
        assert!(graph.has_entity(&id("n1")).is_some());
        assert!(graph.has_entity(&id("n9")).is_none());
        assert_eq!(graph.entity(&id("n9")), Err(GraphError::NotFound(id("n9"))));
    }

    #[test]
    fn replace_maintains_parent_ways_incrementally() {
        let graph = Graph::from_entities(vec![
            node("a"),
            node("b"),
            node("c"),
            way("w1", &["a", "b"]),
        ]);
        assert_eq!(graph.parent_ways(&id("a")), &[id("w1")]);
        assert_eq!(graph.parent_ways(&id("c")), &[] as &[EntityId]);

        // Swap node b for c: b's bucket empties, c's gains the way.
        let Ok(w) = graph.entity(&id("w1")).map(Clone::clone) else {
            unreachable!()
        };
        let Some(w) = w.as_way().map(|w| w.with_nodes(vec![id("a"), id("c")])) else {
            unreachable!()
        };
        let next = graph.replace(Entity::Way(w));
        assert_eq!(next.parent_ways(&id("b")), &[] as &[EntityId]);
        assert_eq!(next.parent_ways(&id("c")), &[id("w1")]);
        // The original graph is untouched.
        assert_eq!(graph.parent_ways(&id("b")), &[id("w1")]);
        assert!(next.indices_consistent());
    }

    #[test]
    fn remove_tombstones_and_retracts_indices() {
        let graph = Graph::from_entities(vec![
            node("a"),
            node("b"),
            way("w1", &["a", "b"]),
            relation("r1", &[("w1", EntityKind::Way)]),
        ]);
        let next = graph.remove(&id("w1"));
        assert!(next.has_entity(&id("w1")).is_none());
        assert_eq!(next.parent_ways(&id("a")), &[] as &[EntityId]);
        assert_eq!(next.parent_relations(&id("w1")), &[id("r1")]);
        assert!(graph.has_entity(&id("w1")).is_some());
    }

    #[test]
    fn layered_edit_is_invisible_to_the_parent() {
        let root = Arc::new(Graph::from_entities(vec![node("a")]));
        let child = Graph::layer(Arc::clone(&root));
        let edited = child.replace(node("b"));
        assert!(edited.has_entity(&id("b")).is_some());
        assert!(root.has_entity(&id("b")).is_none());
        // The root entity is visible through the chain without copying.
        assert!(edited.has_entity(&id("a")).is_some());
    }

    #[test]
    fn base_entity_ignores_local_layers() {
        let root = Arc::new(Graph::from_entities(vec![node("a")]));
        let child = Graph::layer(Arc::clone(&root));
        let Some(original) = root.has_entity(&id("a")).cloned() else {
            unreachable!()
        };
        let Some(moved) = child
            .has_entity(&id("a"))
            .and_then(Entity::as_node)
            .map(|n| Entity::Node(n.with_loc([9.0, 9.0])))
        else {
            unreachable!()
        };
        let edited = child.replace(moved);
        assert_eq!(edited.base_entity(&id("a")), Some(&original));
    }

    #[test]
    fn locally_created_then_removed_leaves_no_tombstone() {
        let graph = Graph::new().replace(node("n-1")).remove(&id("n-1"));
        assert!(graph.has_entity(&id("n-1")).is_none());
        assert!(graph.entities.is_empty());
    }
}
