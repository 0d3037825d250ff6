// SPDX-License-Identifier: Apache-2.0
//! Point entities.

use meridian_geom::Vec2;

use crate::ident::EntityId;
use crate::tags::{has_interesting_tags, Tags};

/// A point with an optional location.
///
/// Immutable after construction: the `with_*` methods clone, apply the
/// override, and bump `v`. The revision counter exists purely as a
/// change-detection shortcut; nothing orders by it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    id: EntityId,
    #[cfg_attr(feature = "serde", serde(default))]
    tags: Tags,
    #[cfg_attr(feature = "serde", serde(default))]
    v: u32,
    loc: Option<Vec2>,
}

impl Node {
    /// Creates a node at revision 0.
    #[must_use]
    pub fn new(id: EntityId, loc: Option<Vec2>, tags: Tags) -> Self {
        Self {
            id,
            tags,
            v: 0,
            loc,
        }
    }

    /// The node's id.
    #[must_use]
    pub fn id(&self) -> &EntityId {
        &self.id
    }

    /// The node's tags.
    #[must_use]
    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    /// Local revision counter.
    #[must_use]
    pub fn v(&self) -> u32 {
        self.v
    }

    /// The node's location, absent for degenerate placeholder nodes.
    #[must_use]
    pub fn loc(&self) -> Option<Vec2> {
        self.loc
    }

    /// Returns a copy moved to `loc`, revision bumped.
    #[must_use]
    pub fn with_loc(&self, loc: Vec2) -> Self {
        let mut next = self.clone();
        next.loc = Some(loc);
        next.v += 1;
        next
    }

    /// Returns a copy with `tags` replacing the tag map, revision bumped.
    #[must_use]
    pub fn with_tags(&self, tags: Tags) -> Self {
        let mut next = self.clone();
        next.tags = tags;
        next.v += 1;
        next
    }

    /// Returns a structural copy under a fresh id at revision 0.
    #[must_use]
    pub(crate) fn duplicate(&self, id: EntityId) -> Self {
        Self::new(id, self.loc, self.tags.clone())
    }

    /// A node is degenerate when it has no usable location.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.loc.map_or(true, |loc| {
            !loc[0].is_finite()
                || !loc[1].is_finite()
                || loc[0].abs() > 180.0
                || loc[1].abs() > 90.0
        })
    }

    /// `true` when any tag is more than provenance bookkeeping.
    #[must_use]
    pub fn has_interesting_tags(&self) -> bool {
        has_interesting_tags(&self.tags)
    }
}
