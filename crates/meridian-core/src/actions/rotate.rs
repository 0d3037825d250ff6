// SPDX-License-Identifier: Apache-2.0
//! Rotate selected geometry around a pivot.

use meridian_geom::{rotate_about, Vec2, Viewport};

use crate::actions::Action;
use crate::entity::Entity;
use crate::graph::Graph;
use crate::ident::EntityId;

/// Rotates the nodes of the selected entities by `angle` radians around a
/// pivot given in projected viewport coordinates.
#[derive(Debug, Clone)]
pub struct Rotate {
    entity_ids: Vec<EntityId>,
    pivot: Vec2,
    angle: f64,
    viewport: Viewport,
}

impl Rotate {
    /// Creates the action. `pivot` is in projected space, `angle` in
    /// radians.
    #[must_use]
    pub fn new(entity_ids: Vec<EntityId>, pivot: Vec2, angle: f64, viewport: Viewport) -> Self {
        Self {
            entity_ids,
            pivot,
            angle,
            viewport,
        }
    }
}

impl Action for Rotate {
    fn apply(&self, graph: &Graph) -> Graph {
        graph.update(|edit| {
            let mut done: Vec<EntityId> = Vec::new();
            let mut rotate = |edit: &mut crate::graph::GraphEdit<'_>, id: &EntityId| {
                if done.contains(id) {
                    return;
                }
                done.push(id.clone());
                let Some(node) = edit.has_entity(id).and_then(Entity::as_node) else {
                    return;
                };
                let Some(loc) = node.loc() else {
                    return;
                };
                let turned = rotate_about(self.viewport.project(loc), self.pivot, self.angle);
                let node = node.with_loc(self.viewport.invert(turned));
                edit.replace(Entity::Node(node));
            };

            for id in &self.entity_ids {
                match edit.has_entity(id).cloned() {
                    Some(Entity::Node(_)) => rotate(&mut *edit, id),
                    Some(Entity::Way(w)) => {
                        for n in w.nodes() {
                            rotate(&mut *edit, n);
                        }
                    }
                    _ => {}
                }
            }
        })
    }
}
