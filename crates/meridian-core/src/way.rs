// SPDX-License-Identifier: Apache-2.0
//! Polyline/polygon-by-reference entities and their node-list surgery.
//!
//! Every mutator upholds the list invariant: no two *consecutive* equal ids,
//! except a closed way's deliberate first==last pair. Operations that could
//! create an accidental duplicate (insert, replace, remove) collapse it
//! before returning.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::ident::EntityId;
use crate::tags::{has_interesting_tags, is_sided, suggests_area, suggests_one_way, Tags};

/// Error returned by index-addressed node-list operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WayError {
    /// The provided index lies outside the operable range.
    #[error("index {index} out of range 0..={max}")]
    IndexOutOfRange {
        /// The rejected index.
        index: usize,
        /// Largest index the operation accepts.
        max: usize,
    },
}

/// Which end of a way another entity sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affix {
    /// The entity is the way's first node.
    Prefix,
    /// The entity is the way's last node.
    Suffix,
}

/// An ordered sequence of node references.
///
/// Duplicates and closure (first id == last id) are meaningful; see the
/// module docs for the adjacency invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Way {
    id: EntityId,
    #[cfg_attr(feature = "serde", serde(default))]
    tags: Tags,
    #[cfg_attr(feature = "serde", serde(default))]
    v: u32,
    nodes: Vec<EntityId>,
}

/// Collapses consecutive duplicate ids in place.
fn collapse_adjacent(nodes: &mut Vec<EntityId>) {
    nodes.dedup();
}

impl Way {
    /// Creates a way at revision 0. Accidental consecutive duplicates in
    /// `nodes` are collapsed so the invariant holds from birth.
    #[must_use]
    pub fn new(id: EntityId, nodes: Vec<EntityId>, tags: Tags) -> Self {
        let mut nodes = nodes;
        collapse_adjacent(&mut nodes);
        Self {
            id,
            tags,
            v: 0,
            nodes,
        }
    }

    /// The way's id.
    #[must_use]
    pub fn id(&self) -> &EntityId {
        &self.id
    }

    /// The way's tags.
    #[must_use]
    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    /// Local revision counter.
    #[must_use]
    pub fn v(&self) -> u32 {
        self.v
    }

    /// The ordered node id list.
    #[must_use]
    pub fn nodes(&self) -> &[EntityId] {
        &self.nodes
    }

    /// First node id, if any.
    #[must_use]
    pub fn first(&self) -> Option<&EntityId> {
        self.nodes.first()
    }

    /// Last node id, if any.
    #[must_use]
    pub fn last(&self) -> Option<&EntityId> {
        self.nodes.last()
    }

    /// `true` when `id` occurs anywhere in the node list.
    #[must_use]
    pub fn contains(&self, id: &EntityId) -> bool {
        self.nodes.contains(id)
    }

    /// Whether `id` is this way's first or last node.
    #[must_use]
    pub fn affix(&self, id: &EntityId) -> Option<Affix> {
        if self.first() == Some(id) {
            return Some(Affix::Prefix);
        }
        if self.last() == Some(id) {
            return Some(Affix::Suffix);
        }
        None
    }

    /// Closed = non-degenerate sequence whose ends match.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.nodes.len() > 1 && self.first() == self.last()
    }

    /// Degenerate = too few distinct nodes to span its geometry (two for a
    /// line, three for an area).
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        let distinct: BTreeSet<&EntityId> = self.nodes.iter().collect();
        distinct.len() < if self.is_area() { 3 } else { 2 }
    }

    /// Area = closed and tagged with something the area tables recognize.
    #[must_use]
    pub fn is_area(&self) -> bool {
        self.is_closed() && suggests_area(&self.tags)
    }

    /// One-way per the explicit `oneway` tag or the implied-oneway tables.
    #[must_use]
    pub fn is_one_way(&self) -> bool {
        suggests_one_way(&self.tags)
    }

    /// Sided = tagged as a feature with a meaningful left/right.
    #[must_use]
    pub fn is_sided(&self) -> bool {
        is_sided(&self.tags)
    }

    /// `true` when any tag is more than provenance bookkeeping.
    #[must_use]
    pub fn has_interesting_tags(&self) -> bool {
        has_interesting_tags(&self.tags)
    }

    /// Returns a copy with `tags` replacing the tag map, revision bumped.
    #[must_use]
    pub fn with_tags(&self, tags: Tags) -> Self {
        let mut next = self.clone();
        next.tags = tags;
        next.v += 1;
        next
    }

    /// Returns a copy with `nodes` replacing the node list (consecutive
    /// duplicates collapsed), revision bumped.
    #[must_use]
    pub fn with_nodes(&self, nodes: Vec<EntityId>) -> Self {
        let mut next = self.clone();
        next.nodes = nodes;
        collapse_adjacent(&mut next.nodes);
        next.v += 1;
        next
    }

    /// Closes the way by appending its first node. Idempotent:
    /// `close(close(w)) == close(w)`.
    #[must_use]
    pub fn close(&self) -> Self {
        if self.is_closed() || self.nodes.is_empty() {
            return self.clone();
        }
        let mut nodes = self.nodes.clone();
        collapse_adjacent(&mut nodes);
        if let Some(first) = nodes.first().cloned() {
            if nodes.last() != Some(&first) || nodes.len() == 1 {
                nodes.push(first);
            }
        }
        let mut next = self.clone();
        next.nodes = nodes;
        next.v += 1;
        next
    }

    /// Removes the closing pair (and any stray repeats of the connector at
    /// the tail). Idempotent: `unclose(unclose(w)) == unclose(w)`.
    #[must_use]
    pub fn unclose(&self) -> Self {
        if !self.is_closed() {
            return self.clone();
        }
        let mut nodes = self.nodes.clone();
        let connector = nodes[0].clone();
        while nodes.len() > 1 && nodes.last() == Some(&connector) {
            nodes.pop();
        }
        collapse_adjacent(&mut nodes);
        let mut next = self.clone();
        next.nodes = nodes;
        next.v += 1;
        next
    }

    /// Normalizes a closed way to its open form for index surgery: strips
    /// connector repeats at either end, shifting `index` to track the node
    /// it addressed.
    fn strip_connectors(nodes: &mut Vec<EntityId>, index: &mut usize) {
        let connector = nodes[0].clone();
        // Leading repeats of the connector after position 0.
        while nodes.len() > 2 && nodes.get(1) == Some(&connector) {
            nodes.remove(1);
            if *index > 1 {
                *index -= 1;
            }
        }
        // Trailing connectors, the deliberate closing one included.
        while nodes.len() > 1 && nodes.last() == Some(&connector) {
            nodes.pop();
            if *index > nodes.len() {
                *index = nodes.len();
            }
        }
    }

    /// Inserts `id` at `index` (default: append for open ways, append before
    /// the closing node for closed ways).
    ///
    /// # Errors
    ///
    /// `WayError::IndexOutOfRange` when `index` exceeds the operable range —
    /// `0..=len` for open ways, `0..=len-1` for closed ways (the closing
    /// node's slot is not addressable; closure is maintained internally).
    pub fn add_node(&self, id: EntityId, index: Option<usize>) -> Result<Self, WayError> {
        let is_closed = self.is_closed();
        let max = if is_closed {
            self.nodes.len() - 1
        } else {
            self.nodes.len()
        };
        let mut index = index.unwrap_or(max);
        if index > max {
            return Err(WayError::IndexOutOfRange { index, max });
        }

        let mut nodes = self.nodes.clone();
        if is_closed {
            Self::strip_connectors(&mut nodes, &mut index);
        }
        nodes.insert(index.min(nodes.len()), id);
        collapse_adjacent(&mut nodes);
        if is_closed {
            if let Some(first) = nodes.first().cloned() {
                if nodes.last() != Some(&first) || nodes.len() == 1 {
                    nodes.push(first);
                }
            }
        }

        let mut next = self.clone();
        next.nodes = nodes;
        next.v += 1;
        Ok(next)
    }

    /// Replaces the node at `index` with `id`.
    ///
    /// # Errors
    ///
    /// `WayError::IndexOutOfRange` when `index` addresses no node
    /// (`0..=len-1`).
    pub fn update_node(&self, id: EntityId, index: usize) -> Result<Self, WayError> {
        if self.nodes.is_empty() || index > self.nodes.len() - 1 {
            return Err(WayError::IndexOutOfRange {
                index,
                max: self.nodes.len().saturating_sub(1),
            });
        }
        let is_closed = self.is_closed();
        let mut index = index;
        let mut nodes = self.nodes.clone();
        if is_closed {
            Self::strip_connectors(&mut nodes, &mut index);
            if index >= nodes.len() {
                index = 0;
            }
        }
        nodes[index] = id;
        collapse_adjacent(&mut nodes);
        if is_closed {
            if let Some(first) = nodes.first().cloned() {
                if nodes.last() != Some(&first) || nodes.len() == 1 {
                    nodes.push(first);
                }
            }
        }

        let mut next = self.clone();
        next.nodes = nodes;
        next.v += 1;
        Ok(next)
    }

    /// Substitutes every occurrence of `needle` with `replacement`, then
    /// collapses any duplicates the substitution made adjacent. No-op when
    /// `needle` is absent.
    #[must_use]
    pub fn replace_node(&self, needle: &EntityId, replacement: &EntityId) -> Self {
        if !self.contains(needle) {
            return self.clone();
        }
        let mut nodes: Vec<EntityId> = self
            .nodes
            .iter()
            .map(|n| {
                if n == needle {
                    replacement.clone()
                } else {
                    n.clone()
                }
            })
            .collect();
        collapse_adjacent(&mut nodes);
        let mut next = self.clone();
        next.nodes = nodes;
        next.v += 1;
        next
    }

    /// Removes every occurrence of `id`, collapses duplicates the removal
    /// made adjacent, and re-closes a way that was closed before.
    #[must_use]
    pub fn remove_node(&self, id: &EntityId) -> Self {
        let is_closed = self.is_closed();
        let mut nodes: Vec<EntityId> = self.nodes.iter().filter(|n| *n != id).cloned().collect();
        collapse_adjacent(&mut nodes);
        if is_closed && nodes.len() > 1 && nodes.first() != nodes.last() {
            if let Some(first) = nodes.first().cloned() {
                nodes.push(first);
            }
        }
        let mut next = self.clone();
        next.nodes = nodes;
        next.v += 1;
        next
    }
}
