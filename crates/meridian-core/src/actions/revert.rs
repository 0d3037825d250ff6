// SPDX-License-Identifier: Apache-2.0
//! Restore one entity to its base-snapshot state.

use crate::actions::Action;
use crate::entity::Entity;
use crate::graph::Graph;
use crate::ident::EntityId;

/// Three-way reconciliation between the local layers and the base snapshot
/// for a single id, with cascading structural repair:
///
/// - Local-only (new) entity → delete it; every parent way's node list and
///   parent relation's member list loses that reference, preserving
///   surrounding order (the only duplicate collapses are those the removal
///   itself creates).
/// - Base entity updated locally → replace with the exact base version.
///   Structural references go by id, so nothing else changes.
/// - Base entity deleted locally (tombstoned) → restore the base version,
///   likewise without side effects elsewhere.
#[derive(Debug, Clone)]
pub struct Revert {
    entity_id: EntityId,
}

impl Revert {
    /// Creates the action.
    #[must_use]
    pub fn new(entity_id: EntityId) -> Self {
        Self { entity_id }
    }
}

impl Action for Revert {
    fn apply(&self, graph: &Graph) -> Graph {
        let base = graph.base_entity(&self.entity_id).cloned();
        let current = graph.has_entity(&self.entity_id);

        match (current, base) {
            // Created locally: remove it and every reference to it.
            (Some(_), None) => graph.update(|edit| {
                for way_id in edit.parent_ways(&self.entity_id) {
                    let Some(way) = edit.has_entity(&way_id).and_then(Entity::as_way) else {
                        continue;
                    };
                    let way = way.remove_node(&self.entity_id);
                    edit.replace(Entity::Way(way));
                }
                for relation_id in edit.parent_relations(&self.entity_id) {
                    let Some(relation) =
                        edit.has_entity(&relation_id).and_then(Entity::as_relation)
                    else {
                        continue;
                    };
                    let relation = relation.remove_members_with_id(&self.entity_id);
                    edit.replace(Entity::Relation(relation));
                }
                edit.remove(&self.entity_id);
            }),
            // Updated or deleted locally: the base version comes back and
            // id-based references need no repair.
            (_, Some(base)) => graph.replace(base),
            // Never existed: nothing to do.
            (None, None) => graph.clone(),
        }
    }
}
