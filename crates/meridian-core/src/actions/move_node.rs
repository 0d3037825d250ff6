// SPDX-License-Identifier: Apache-2.0
//! Move one node to a target location.

use meridian_geom::{vec_interp, Vec2};

use crate::actions::Action;
use crate::entity::Entity;
use crate::graph::Graph;
use crate::ident::EntityId;

/// Moves a node to `loc`.
///
/// Transitionable: `t` interpolates along the straight line from the
/// current location to the target.
#[derive(Debug, Clone)]
pub struct MoveNode {
    node_id: EntityId,
    loc: Vec2,
}

impl MoveNode {
    /// Creates the action.
    #[must_use]
    pub fn new(node_id: EntityId, loc: Vec2) -> Self {
        Self { node_id, loc }
    }
}

impl Action for MoveNode {
    fn apply(&self, graph: &Graph) -> Graph {
        self.apply_at(graph, 1.0)
    }

    fn transitionable(&self) -> bool {
        true
    }

    fn apply_at(&self, graph: &Graph, t: f64) -> Graph {
        let Some(node) = graph.has_entity(&self.node_id).and_then(Entity::as_node) else {
            return graph.clone();
        };
        // A degenerate node has no origin to interpolate from; it lands on
        // the target directly.
        let target = node
            .loc()
            .map_or(self.loc, |from| vec_interp(from, self.loc, t));
        graph.replace(Entity::Node(node.with_loc(target)))
    }
}
