// SPDX-License-Identifier: Apache-2.0
//! Grouped relations: ordered, role-carrying member references.
//!
//! Referential integrity is soft: a member may reference an entity absent
//! from the graph. Such relations are "incomplete" and several algorithms
//! (member placement, copies) degrade gracefully around the holes.

use thiserror::Error;

use crate::graph::Graph;
use crate::ident::{EntityId, EntityKind};
use crate::tags::{has_interesting_tags, Tags};

/// Error returned by index-addressed member operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelationError {
    /// The provided index addresses no member slot.
    #[error("member index {index} out of range 0..={max}")]
    IndexOutOfRange {
        /// The rejected index.
        index: usize,
        /// Largest addressable member index.
        max: usize,
    },
}

/// One slot of a relation's ordered member list.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Member {
    /// Referenced entity id (resolution may fail; see module docs).
    pub id: EntityId,
    /// Kind the reference claims; trusted even when unresolvable.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: EntityKind,
    /// Free-form role string, empty for plain members.
    #[cfg_attr(feature = "serde", serde(default))]
    pub role: String,
}

/// An ordered list of typed, role-carrying member references.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Relation {
    id: EntityId,
    #[cfg_attr(feature = "serde", serde(default))]
    tags: Tags,
    #[cfg_attr(feature = "serde", serde(default))]
    v: u32,
    members: Vec<Member>,
}

impl Relation {
    /// Creates a relation at revision 0.
    #[must_use]
    pub fn new(id: EntityId, members: Vec<Member>, tags: Tags) -> Self {
        Self {
            id,
            tags,
            v: 0,
            members,
        }
    }

    /// The relation's id.
    #[must_use]
    pub fn id(&self) -> &EntityId {
        &self.id
    }

    /// The relation's tags.
    #[must_use]
    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    /// Local revision counter.
    #[must_use]
    pub fn v(&self) -> u32 {
        self.v
    }

    /// The ordered member list.
    #[must_use]
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// First member referencing `id`, with its index.
    #[must_use]
    pub fn member_by_id(&self, id: &EntityId) -> Option<(usize, &Member)> {
        self.members.iter().enumerate().find(|(_, m)| &m.id == id)
    }

    /// First member carrying `role`, with its index.
    #[must_use]
    pub fn member_by_role(&self, role: &str) -> Option<(usize, &Member)> {
        self.members.iter().enumerate().find(|(_, m)| m.role == role)
    }

    /// `true` when any member references `id`.
    #[must_use]
    pub fn has_member(&self, id: &EntityId) -> bool {
        self.members.iter().any(|m| &m.id == id)
    }

    /// Returns a copy with `tags` replacing the tag map, revision bumped.
    #[must_use]
    pub fn with_tags(&self, tags: Tags) -> Self {
        let mut next = self.clone();
        next.tags = tags;
        next.v += 1;
        next
    }

    /// Returns a copy with `members` replacing the member list, revision
    /// bumped.
    #[must_use]
    pub fn with_members(&self, members: Vec<Member>) -> Self {
        let mut next = self.clone();
        next.members = members;
        next.v += 1;
        next
    }

    /// Inserts `member` at `index`, or appends when `index` is `None` or
    /// past the end.
    #[must_use]
    pub fn add_member(&self, member: Member, index: Option<usize>) -> Self {
        let mut members = self.members.clone();
        let at = index.unwrap_or(members.len()).min(members.len());
        members.insert(at, member);
        self.with_members(members)
    }

    /// Overwrites the member slot at `index`.
    ///
    /// # Errors
    ///
    /// `RelationError::IndexOutOfRange` when `index` addresses no slot.
    pub fn update_member(&self, member: Member, index: usize) -> Result<Self, RelationError> {
        if index >= self.members.len() {
            return Err(RelationError::IndexOutOfRange {
                index,
                max: self.members.len().saturating_sub(1),
            });
        }
        let mut members = self.members.clone();
        members[index] = member;
        Ok(self.with_members(members))
    }

    /// Removes the member slot at `index`; out-of-range indices are a no-op.
    #[must_use]
    pub fn remove_member(&self, index: usize) -> Self {
        if index >= self.members.len() {
            return self.clone();
        }
        let mut members = self.members.clone();
        members.remove(index);
        self.with_members(members)
    }

    /// Removes every member referencing `id`, preserving the order of the
    /// remaining members.
    #[must_use]
    pub fn remove_members_with_id(&self, id: &EntityId) -> Self {
        if !self.has_member(id) {
            return self.clone();
        }
        let members = self
            .members
            .iter()
            .filter(|m| &m.id != id)
            .cloned()
            .collect();
        self.with_members(members)
    }

    /// Redirects every member referencing `needle` to `replacement`
    /// (keeping each slot's role). Unless `keep_duplicates` is set, a
    /// redirect that would duplicate an existing `(replacement, role)` pair
    /// is dropped instead.
    #[must_use]
    pub fn replace_member(
        &self,
        needle: &EntityId,
        replacement: &EntityId,
        replacement_kind: EntityKind,
        keep_duplicates: bool,
    ) -> Self {
        if !self.has_member(needle) {
            return self.clone();
        }
        let mut members: Vec<Member> = Vec::with_capacity(self.members.len());
        for m in &self.members {
            if &m.id != needle {
                members.push(m.clone());
                continue;
            }
            let redirected = Member {
                id: replacement.clone(),
                kind: replacement_kind,
                role: m.role.clone(),
            };
            if keep_duplicates
                || !members
                    .iter()
                    .any(|e| e.id == redirected.id && e.role == redirected.role)
            {
                members.push(redirected);
            }
        }
        self.with_members(members)
    }

    /// A relation with no members is degenerate.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.members.is_empty()
    }

    /// `true` when every member resolves in `graph`.
    #[must_use]
    pub fn is_complete(&self, graph: &Graph) -> bool {
        self.members.iter().all(|m| graph.has_entity(&m.id).is_some())
    }

    /// Turn-restriction relations (`type=restriction` and its variants).
    #[must_use]
    pub fn is_restriction(&self) -> bool {
        self.tags
            .get("type")
            .is_some_and(|t| t.starts_with("restriction"))
    }

    /// Multipolygon relations.
    #[must_use]
    pub fn is_multipolygon(&self) -> bool {
        self.tags.get("type").is_some_and(|t| t == "multipolygon")
    }

    /// `true` when any tag is more than provenance bookkeeping.
    #[must_use]
    pub fn has_interesting_tags(&self) -> bool {
        has_interesting_tags(&self.tags)
    }
}
