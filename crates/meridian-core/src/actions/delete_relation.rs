// SPDX-License-Identifier: Apache-2.0
//! Delete a relation, cleaning up memberships and orphaned members.

use crate::actions::delete_way::{delete_way, expendable};
use crate::actions::Action;
use crate::entity::Entity;
use crate::graph::{Graph, GraphEdit};
use crate::ident::EntityId;

/// Deletes a relation: parent relations lose the membership (and are
/// deleted in turn when left empty), the relation is removed, and former
/// members that end up unreferenced and uninteresting are swept away,
/// cascading per their kind.
#[derive(Debug, Clone)]
pub struct DeleteRelation {
    relation_id: EntityId,
}

impl DeleteRelation {
    /// Creates the action.
    #[must_use]
    pub fn new(relation_id: EntityId) -> Self {
        Self { relation_id }
    }
}

impl Action for DeleteRelation {
    fn apply(&self, graph: &Graph) -> Graph {
        graph.update(|edit| delete_relation(edit, &self.relation_id))
    }
}

/// Cascade body, shared with the other delete actions. Terminates on member
/// cycles because the relation is tombstoned before its members are swept.
pub(crate) fn delete_relation(edit: &mut GraphEdit<'_>, relation_id: &EntityId) {
    let Some(relation) = edit
        .has_entity(relation_id)
        .and_then(Entity::as_relation)
        .cloned()
    else {
        return;
    };

    for parent_id in edit.parent_relations(relation_id) {
        let Some(parent) = edit.has_entity(&parent_id).and_then(Entity::as_relation) else {
            continue;
        };
        let parent = parent.remove_members_with_id(relation_id);
        let degenerate = parent.is_degenerate();
        edit.replace(Entity::Relation(parent));
        if degenerate {
            delete_relation(edit, &parent_id);
        }
    }

    edit.remove(relation_id);

    let mut swept: Vec<EntityId> = Vec::new();
    for member in relation.members() {
        if swept.contains(&member.id) {
            continue;
        }
        if !expendable(edit, &member.id) {
            continue;
        }
        swept.push(member.id.clone());
        let Some(entity) = edit.has_entity(&member.id) else {
            continue;
        };
        match entity {
            Entity::Node(_) | Entity::Changeset(_) => edit.remove(&member.id),
            Entity::Way(_) => delete_way(edit, &member.id),
            Entity::Relation(_) => delete_relation(edit, &member.id),
        }
    }
}
