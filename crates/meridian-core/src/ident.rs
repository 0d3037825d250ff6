// SPDX-License-Identifier: Apache-2.0
//! Entity identifiers and the local id allocator.
use std::fmt;
use std::sync::Arc;

/// The four entity kinds of the data model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EntityKind {
    /// A point with an optional location.
    Node,
    /// An ordered list of node references.
    Way,
    /// An ordered list of typed, role-carrying member references.
    Relation,
    /// A tags-only upload envelope.
    Changeset,
}

impl EntityKind {
    /// Single-character id prefix for this kind (`n`, `w`, `r`, `c`).
    #[must_use]
    pub fn prefix(self) -> char {
        match self {
            Self::Node => 'n',
            Self::Way => 'w',
            Self::Relation => 'r',
            Self::Changeset => 'c',
        }
    }

    fn from_prefix(prefix: char) -> Option<Self> {
        match prefix {
            'n' => Some(Self::Node),
            'w' => Some(Self::Way),
            'r' => Some(Self::Relation),
            'c' => Some(Self::Changeset),
            _ => None,
        }
    }
}

/// Stable string key for an entity, unique within one effective graph view.
///
/// Ids sourced from the remote store render as the kind prefix followed by
/// the store's numeric id (`n1`, `w7`, `r3`, `c9`). Locally synthesized
/// entities carry a negative numeric part (`n-1`) so the two populations
/// never collide; [`EntityId::is_new`] distinguishes them.
///
/// The string is reference-counted: ids are copied into node lists, member
/// lists, and parent-index buckets constantly, and cloning must stay cheap.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(Arc<str>);

impl EntityId {
    /// Id for an entity sourced from the remote store.
    #[must_use]
    pub fn from_osm(kind: EntityKind, id: u64) -> Self {
        Self(format!("{}{id}", kind.prefix()).into())
    }

    /// Wraps an already-rendered id string (the normalized parser boundary).
    #[must_use]
    pub fn from_raw(id: &str) -> Self {
        Self(id.into())
    }

    /// The rendered id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The kind encoded in the id prefix, when the prefix is well-formed.
    #[must_use]
    pub fn kind(&self) -> Option<EntityKind> {
        self.0.chars().next().and_then(EntityKind::from_prefix)
    }

    /// `true` when the id was synthesized locally (negative numeric part)
    /// rather than sourced from the remote store.
    #[must_use]
    pub fn is_new(&self) -> bool {
        self.0.as_bytes().get(1) == Some(&b'-')
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for EntityId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for EntityId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = <String as serde::Deserialize<'_>>::deserialize(deserializer)?;
        Ok(Self(raw.into()))
    }
}

/// Monotonic allocator for locally synthesized ids.
///
/// Owned by the caller (the surrounding editor), never global state: two
/// sequences started from the same point issue the same ids, which keeps
/// actions that synthesize entities referentially pure.
///
/// # Invariants
/// - Issued numeric parts start at 1 and only grow; `n-1` is the first node
///   id a fresh sequence produces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdSequence {
    next: u64,
}

impl IdSequence {
    /// Creates a sequence whose first issued id has numeric part 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the next local id for `kind`.
    pub fn next(&mut self, kind: EntityKind) -> EntityId {
        self.next += 1;
        EntityId(format!("{}-{}", kind.prefix(), self.next).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn osm_ids_render_with_kind_prefix() {
        let id = EntityId::from_osm(EntityKind::Way, 42);
        assert_eq!(id.as_str(), "w42");
        assert_eq!(id.kind(), Some(EntityKind::Way));
        assert!(!id.is_new());
    }

    #[test]
    fn sequence_ids_are_new_and_monotonic() {
        let mut ids = IdSequence::new();
        let a = ids.next(EntityKind::Node);
        let b = ids.next(EntityKind::Node);
        assert_eq!(a.as_str(), "n-1");
        assert_eq!(b.as_str(), "n-2");
        assert!(a.is_new());
        assert_ne!(a, b);
    }

    #[test]
    fn two_sequences_issue_identical_ids() {
        let mut a = IdSequence::new();
        let mut b = IdSequence::new();
        assert_eq!(a.next(EntityKind::Relation), b.next(EntityKind::Relation));
    }
}
