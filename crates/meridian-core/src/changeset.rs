// SPDX-License-Identifier: Apache-2.0
//! Changesets: tags-only upload envelopes, no geometry.

use crate::ident::EntityId;
use crate::tags::Tags;

/// A tags-only entity grouping edits for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Changeset {
    id: EntityId,
    #[cfg_attr(feature = "serde", serde(default))]
    tags: Tags,
    #[cfg_attr(feature = "serde", serde(default))]
    v: u32,
}

impl Changeset {
    /// Creates a changeset at revision 0.
    #[must_use]
    pub fn new(id: EntityId, tags: Tags) -> Self {
        Self { id, tags, v: 0 }
    }

    /// The changeset's id.
    #[must_use]
    pub fn id(&self) -> &EntityId {
        &self.id
    }

    /// The changeset's tags.
    #[must_use]
    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    /// Local revision counter.
    #[must_use]
    pub fn v(&self) -> u32 {
        self.v
    }

    /// Returns a copy with `tags` replacing the tag map, revision bumped.
    #[must_use]
    pub fn with_tags(&self, tags: Tags) -> Self {
        let mut next = self.clone();
        next.tags = tags;
        next.v += 1;
        next
    }
}
