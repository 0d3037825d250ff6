// SPDX-License-Identifier: Apache-2.0
//! Insert an existing node into a way's node list.

use crate::actions::Action;
use crate::entity::Entity;
use crate::graph::Graph;
use crate::ident::EntityId;
use crate::way::WayError;

/// Inserts a node reference into a way at an index (default: the end).
#[derive(Debug, Clone)]
pub struct AddVertex {
    way_id: EntityId,
    node_id: EntityId,
    index: Option<usize>,
}

impl AddVertex {
    /// Creates the action.
    #[must_use]
    pub fn new(way_id: EntityId, node_id: EntityId, index: Option<usize>) -> Self {
        Self {
            way_id,
            node_id,
            index,
        }
    }

    /// Applies with a structural error surfaced instead of swallowed.
    ///
    /// # Errors
    ///
    /// `WayError::IndexOutOfRange` when the index lies outside the way's
    /// operable range. A missing way or node id is not an error here; it
    /// falls under the advisory-precondition contract and returns the graph
    /// unchanged.
    pub fn try_apply(&self, graph: &Graph) -> Result<Graph, WayError> {
        let Some(way) = graph.has_entity(&self.way_id).and_then(Entity::as_way) else {
            return Ok(graph.clone());
        };
        if graph.has_entity(&self.node_id).is_none() {
            return Ok(graph.clone());
        }
        let way = way.add_node(self.node_id.clone(), self.index)?;
        Ok(graph.replace(Entity::Way(way)))
    }
}

impl Action for AddVertex {
    fn apply(&self, graph: &Graph) -> Graph {
        self.try_apply(graph).unwrap_or_else(|_| graph.clone())
    }
}
