// SPDX-License-Identifier: Apache-2.0
//! Delete a way, cleaning up memberships and orphaned child nodes.

use crate::actions::delete_relation::delete_relation;
use crate::actions::Action;
use crate::entity::Entity;
use crate::graph::{Graph, GraphEdit};
use crate::ident::EntityId;

/// Deletes a way: parent relations lose the membership (relations left
/// empty are deleted in turn), the way is removed, and child nodes that end
/// up unreferenced and carrying no interesting tags are swept away with it.
#[derive(Debug, Clone)]
pub struct DeleteWay {
    way_id: EntityId,
}

impl DeleteWay {
    /// Creates the action.
    #[must_use]
    pub fn new(way_id: EntityId) -> Self {
        Self { way_id }
    }
}

impl Action for DeleteWay {
    fn apply(&self, graph: &Graph) -> Graph {
        graph.update(|edit| delete_way(edit, &self.way_id))
    }
}

/// `true` when nothing references the entity and its tags are pure
/// bookkeeping — safe for a cascade to sweep.
pub(crate) fn expendable(edit: &GraphEdit<'_>, id: &EntityId) -> bool {
    if !edit.parent_ways(id).is_empty() || !edit.parent_relations(id).is_empty() {
        return false;
    }
    edit.has_entity(id)
        .is_some_and(|e| !e.has_interesting_tags())
}

/// Cascade body, shared with the other delete actions.
pub(crate) fn delete_way(edit: &mut GraphEdit<'_>, way_id: &EntityId) {
    let Some(way) = edit.has_entity(way_id).and_then(Entity::as_way).cloned() else {
        return;
    };

    for relation_id in edit.parent_relations(way_id) {
        let Some(relation) = edit.has_entity(&relation_id).and_then(Entity::as_relation) else {
            continue;
        };
        let relation = relation.remove_members_with_id(way_id);
        let degenerate = relation.is_degenerate();
        edit.replace(Entity::Relation(relation));
        if degenerate {
            delete_relation(edit, &relation_id);
        }
    }

    // Removing the way first releases its node references, so the orphan
    // check below sees the post-delete reference counts.
    edit.remove(way_id);

    let mut swept: Vec<EntityId> = Vec::new();
    for node_id in way.nodes() {
        if swept.contains(node_id) {
            continue;
        }
        if expendable(edit, node_id) {
            edit.remove(node_id);
            swept.push(node_id.clone());
        }
    }
}
