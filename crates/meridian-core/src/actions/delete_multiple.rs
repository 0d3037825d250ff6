// SPDX-License-Identifier: Apache-2.0
//! Delete a batch of entities with one composed cascade.

use crate::actions::delete_node::delete_node;
use crate::actions::delete_relation::delete_relation;
use crate::actions::delete_way::delete_way;
use crate::actions::Action;
use crate::graph::Graph;
use crate::ident::{EntityId, EntityKind};

/// Deletes several entities, ordering the work relations → ways → nodes so
/// each per-kind cascade composes without double-processing: by the time a
/// way is deleted, the relations that referenced it are already gone, and
/// so on down to nodes.
#[derive(Debug, Clone)]
pub struct DeleteMultiple {
    ids: Vec<EntityId>,
}

impl DeleteMultiple {
    /// Creates the action.
    #[must_use]
    pub fn new(ids: Vec<EntityId>) -> Self {
        Self { ids }
    }
}

impl Action for DeleteMultiple {
    fn apply(&self, graph: &Graph) -> Graph {
        graph.update(|edit| {
            for pass in [EntityKind::Relation, EntityKind::Way, EntityKind::Node] {
                for id in &self.ids {
                    // An earlier pass may already have swept this id.
                    let Some(entity) = edit.has_entity(id) else {
                        continue;
                    };
                    if entity.kind() != pass {
                        continue;
                    }
                    match pass {
                        EntityKind::Relation => delete_relation(edit, id),
                        EntityKind::Way => delete_way(edit, id),
                        EntityKind::Node | EntityKind::Changeset => delete_node(edit, id),
                    }
                }
            }
        })
    }
}
