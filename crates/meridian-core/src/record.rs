// SPDX-License-Identifier: Apache-2.0
//! Normalized entity records: the boundary with wire-format parsers.
//!
//! Parsers hand the graph flat records — `type`, `id`, `tags`, and the
//! type-specific field — already normalized; nothing here re-validates wire
//! syntax. Records exist so [`crate::Graph::from_records`] can seed a root
//! snapshot without the parser knowing anything about graph internals.

use meridian_geom::Vec2;

use crate::changeset::Changeset;
use crate::entity::Entity;
use crate::ident::EntityId;
use crate::node::Node;
use crate::relation::{Member, Relation};
use crate::tags::Tags;
use crate::way::Way;

/// One normalized record from a format parser.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "lowercase"))]
pub enum EntityRecord {
    /// A point record.
    Node {
        /// Rendered entity id (`n…`).
        id: EntityId,
        /// Tag map; defaults to empty.
        #[cfg_attr(feature = "serde", serde(default))]
        tags: Tags,
        /// Longitude/latitude, absent for degenerate nodes.
        #[cfg_attr(feature = "serde", serde(default))]
        loc: Option<Vec2>,
    },
    /// A polyline/polygon record.
    Way {
        /// Rendered entity id (`w…`).
        id: EntityId,
        /// Tag map; defaults to empty.
        #[cfg_attr(feature = "serde", serde(default))]
        tags: Tags,
        /// Ordered node references.
        nodes: Vec<EntityId>,
    },
    /// A grouped-relation record.
    Relation {
        /// Rendered entity id (`r…`).
        id: EntityId,
        /// Tag map; defaults to empty.
        #[cfg_attr(feature = "serde", serde(default))]
        tags: Tags,
        /// Ordered, role-carrying member references.
        members: Vec<Member>,
    },
    /// A tags-only changeset record.
    Changeset {
        /// Rendered entity id (`c…`).
        id: EntityId,
        /// Tag map; defaults to empty.
        #[cfg_attr(feature = "serde", serde(default))]
        tags: Tags,
    },
}

impl From<EntityRecord> for Entity {
    fn from(record: EntityRecord) -> Self {
        match record {
            EntityRecord::Node { id, tags, loc } => Self::Node(Node::new(id, loc, tags)),
            EntityRecord::Way { id, tags, nodes } => Self::Way(Way::new(id, nodes, tags)),
            EntityRecord::Relation { id, tags, members } => {
                Self::Relation(Relation::new(id, members, tags))
            }
            EntityRecord::Changeset { id, tags } => Self::Changeset(Changeset::new(id, tags)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    #[test]
    fn records_seed_a_root_graph() {
        let graph = Graph::from_records(vec![
            EntityRecord::Node {
                id: EntityId::from_raw("n1"),
                tags: Tags::new(),
                loc: Some([0.0, 0.0]),
            },
            EntityRecord::Node {
                id: EntityId::from_raw("n2"),
                tags: Tags::new(),
                loc: Some([1.0, 1.0]),
            },
            EntityRecord::Way {
                id: EntityId::from_raw("w1"),
                tags: Tags::new(),
                nodes: vec![EntityId::from_raw("n1"), EntityId::from_raw("n2")],
            },
        ]);
        assert!(graph.has_entity(&EntityId::from_raw("w1")).is_some());
        assert_eq!(
            graph.parent_ways(&EntityId::from_raw("n1")),
            &[EntityId::from_raw("w1")]
        );
        assert!(graph.indices_consistent());
    }
}
