// SPDX-License-Identifier: Apache-2.0
//! Mirror selected geometry across an axis of its bounding rectangle.

use meridian_geom::{smallest_surrounding_rectangle, vec_interp, Vec2, Viewport};

use crate::actions::Action;
use crate::entity::Entity;
use crate::graph::Graph;
use crate::ident::EntityId;

/// Reflects the nodes of the selected entities across the long or short
/// axis of their smallest surrounding rectangle, computed in projected
/// viewport space.
///
/// Transitionable: `t` linearly interpolates each node between its original
/// (`t = 0`) and fully reflected (`t = 1`) location, so intermediate values
/// produce smooth previews. No nodes are added, removed, or reparented —
/// only locations change.
#[derive(Debug, Clone)]
pub struct Reflect {
    entity_ids: Vec<EntityId>,
    viewport: Viewport,
    use_long_axis: bool,
}

impl Reflect {
    /// Creates the action. `use_long_axis` selects which rectangle axis is
    /// the mirror.
    #[must_use]
    pub fn new(entity_ids: Vec<EntityId>, viewport: Viewport, use_long_axis: bool) -> Self {
        Self {
            entity_ids,
            viewport,
            use_long_axis,
        }
    }

    /// Distinct node ids referenced by the selection, in first-occurrence
    /// order.
    fn selected_nodes(&self, graph: &Graph) -> Vec<EntityId> {
        let mut out: Vec<EntityId> = Vec::new();
        let mut push = |id: &EntityId| {
            if !out.contains(id) {
                out.push(id.clone());
            }
        };
        for id in &self.entity_ids {
            match graph.has_entity(id) {
                Some(Entity::Node(_)) => push(id),
                Some(Entity::Way(w)) => {
                    for n in w.nodes() {
                        push(n);
                    }
                }
                _ => {}
            }
        }
        out
    }
}

impl Action for Reflect {
    fn apply(&self, graph: &Graph) -> Graph {
        self.apply_at(graph, 1.0)
    }

    fn transitionable(&self) -> bool {
        true
    }

    fn apply_at(&self, graph: &Graph, t: f64) -> Graph {
        let node_ids = self.selected_nodes(graph);
        let located: Vec<(EntityId, Vec2)> = node_ids
            .iter()
            .filter_map(|id| {
                let node = graph.has_entity(id).and_then(Entity::as_node)?;
                Some((id.clone(), node.loc()?))
            })
            .collect();
        let points: Vec<Vec2> = located
            .iter()
            .map(|(_, loc)| self.viewport.project(*loc))
            .collect();
        let Some(rect) = smallest_surrounding_rectangle(&points) else {
            return graph.clone();
        };
        let (p, q) = if self.use_long_axis {
            rect.long_axis()
        } else {
            rect.short_axis()
        };

        graph.update(|edit| {
            for (id, loc) in &located {
                let Some(node) = edit.has_entity(id).and_then(Entity::as_node) else {
                    continue;
                };
                let reflected = meridian_geom::reflect_across(self.viewport.project(*loc), p, q);
                let target = self.viewport.invert(reflected);
                let node = node.with_loc(vec_interp(*loc, target, t));
                edit.replace(Entity::Node(node));
            }
        })
    }
}
