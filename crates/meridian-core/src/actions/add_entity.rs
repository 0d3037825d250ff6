// SPDX-License-Identifier: Apache-2.0
//! Insert a fully formed entity.

use crate::actions::Action;
use crate::entity::Entity;
use crate::graph::Graph;

/// Adds (or overwrites) one entity.
#[derive(Debug, Clone)]
pub struct AddEntity {
    entity: Entity,
}

impl AddEntity {
    /// Creates the action.
    #[must_use]
    pub fn new(entity: Entity) -> Self {
        Self { entity }
    }
}

impl Action for AddEntity {
    fn apply(&self, graph: &Graph) -> Graph {
        graph.replace(self.entity.clone())
    }
}
