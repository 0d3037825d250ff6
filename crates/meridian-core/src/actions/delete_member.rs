// SPDX-License-Identifier: Apache-2.0
//! Remove one member slot from a relation.

use crate::actions::delete_relation::delete_relation;
use crate::actions::Action;
use crate::entity::Entity;
use crate::graph::Graph;
use crate::ident::EntityId;

/// Removes the member at a slot index. A relation left with no members is
/// degenerate and is deleted through the relation cascade.
#[derive(Debug, Clone)]
pub struct DeleteMember {
    relation_id: EntityId,
    index: usize,
}

impl DeleteMember {
    /// Creates the action.
    #[must_use]
    pub fn new(relation_id: EntityId, index: usize) -> Self {
        Self { relation_id, index }
    }
}

impl Action for DeleteMember {
    fn apply(&self, graph: &Graph) -> Graph {
        graph.update(|edit| {
            let Some(relation) = edit
                .has_entity(&self.relation_id)
                .and_then(Entity::as_relation)
            else {
                return;
            };
            let relation = relation.remove_member(self.index);
            let degenerate = relation.is_degenerate();
            edit.replace(Entity::Relation(relation));
            if degenerate {
                delete_relation(edit, &self.relation_id);
            }
        })
    }
}
