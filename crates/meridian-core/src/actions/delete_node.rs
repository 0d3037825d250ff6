// SPDX-License-Identifier: Apache-2.0
//! Delete a node, repairing every structure that referenced it.

use crate::actions::delete_relation::delete_relation;
use crate::actions::delete_way::delete_way;
use crate::actions::Action;
use crate::entity::Entity;
use crate::graph::{Graph, GraphEdit};
use crate::ident::EntityId;

/// Deletes a node: parent ways lose the reference (ways left degenerate are
/// deleted in turn), parent relations lose the membership (relations left
/// empty likewise), then the node itself is removed.
#[derive(Debug, Clone)]
pub struct DeleteNode {
    node_id: EntityId,
}

impl DeleteNode {
    /// Creates the action.
    #[must_use]
    pub fn new(node_id: EntityId) -> Self {
        Self { node_id }
    }
}

impl Action for DeleteNode {
    fn apply(&self, graph: &Graph) -> Graph {
        graph.update(|edit| delete_node(edit, &self.node_id))
    }
}

/// Cascade body, shared with the other delete actions.
pub(crate) fn delete_node(edit: &mut GraphEdit<'_>, node_id: &EntityId) {
    if edit.has_entity(node_id).is_none() {
        return;
    }

    for way_id in edit.parent_ways(node_id) {
        let Some(way) = edit.has_entity(&way_id).and_then(Entity::as_way) else {
            continue;
        };
        let way = way.remove_node(node_id);
        let degenerate = way.is_degenerate();
        edit.replace(Entity::Way(way));
        if degenerate {
            delete_way(edit, &way_id);
        }
    }

    for relation_id in edit.parent_relations(node_id) {
        let Some(relation) = edit.has_entity(&relation_id).and_then(Entity::as_relation) else {
            continue;
        };
        let relation = relation.remove_members_with_id(node_id);
        let degenerate = relation.is_degenerate();
        edit.replace(Entity::Relation(relation));
        if degenerate {
            delete_relation(edit, &relation_id);
        }
    }

    edit.remove(node_id);
}
