// SPDX-License-Identifier: Apache-2.0
//! Wholesale tag replacement on one entity.

use crate::actions::Action;
use crate::graph::Graph;
use crate::ident::EntityId;
use crate::tags::Tags;

/// Replaces an entity's tag map.
#[derive(Debug, Clone)]
pub struct ChangeTags {
    entity_id: EntityId,
    tags: Tags,
}

impl ChangeTags {
    /// Creates the action.
    #[must_use]
    pub fn new(entity_id: EntityId, tags: Tags) -> Self {
        Self { entity_id, tags }
    }
}

impl Action for ChangeTags {
    fn apply(&self, graph: &Graph) -> Graph {
        if let Some(entity) = graph.has_entity(&self.entity_id) {
            graph.replace(entity.with_tags(self.tags.clone()))
        } else {
            graph.clone()
        }
    }
}
