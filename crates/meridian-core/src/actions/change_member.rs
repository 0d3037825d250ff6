// SPDX-License-Identifier: Apache-2.0
//! Overwrite one member slot of a relation.

use crate::actions::Action;
use crate::entity::Entity;
use crate::graph::Graph;
use crate::ident::EntityId;
use crate::relation::{Member, RelationError};

/// Replaces the member at a given slot index.
#[derive(Debug, Clone)]
pub struct ChangeMember {
    relation_id: EntityId,
    member: Member,
    index: usize,
}

impl ChangeMember {
    /// Creates the action.
    #[must_use]
    pub fn new(relation_id: EntityId, member: Member, index: usize) -> Self {
        Self {
            relation_id,
            member,
            index,
        }
    }

    /// Applies with a structural error surfaced instead of swallowed.
    ///
    /// # Errors
    ///
    /// `RelationError::IndexOutOfRange` when the slot index addresses no
    /// member.
    pub fn try_apply(&self, graph: &Graph) -> Result<Graph, RelationError> {
        let Some(relation) = graph
            .has_entity(&self.relation_id)
            .and_then(Entity::as_relation)
        else {
            return Ok(graph.clone());
        };
        let relation = relation.update_member(self.member.clone(), self.index)?;
        Ok(graph.replace(Entity::Relation(relation)))
    }
}

impl Action for ChangeMember {
    fn apply(&self, graph: &Graph) -> Graph {
        self.try_apply(graph).unwrap_or_else(|_| graph.clone())
    }
}
