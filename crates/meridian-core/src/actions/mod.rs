// SPDX-License-Identifier: Apache-2.0
//! The action algebra: pure edit values over [`Graph`].
//!
//! An action is a value. Applying it to a graph yields a new graph; applying
//! it to the same graph with the same parameters yields a structurally equal
//! result, every time. Actions that synthesize entities take pre-allocated
//! ids as parameters (the caller owns the [`crate::IdSequence`]) and report
//! what they produced through typed outcome values — there are no stateful
//! side channels to interrogate afterwards.
//!
//! `disabled` is advisory: callers check it before applying, and the action
//! itself does not re-validate. An apply whose preconditions turn out broken
//! degrades to returning the input graph unchanged — copy-on-write makes
//! every action atomic, so "nothing happened" is always a sound fallback.

use crate::graph::Graph;

mod add_entity;
mod add_member;
mod add_vertex;
mod change_member;
mod change_tags;
mod delete_member;
mod delete_multiple;
mod delete_node;
mod delete_relation;
mod delete_way;
mod extract;
mod merge_nodes;
mod move_node;
mod reflect;
mod revert;
mod reverse;
mod rotate;

pub use add_entity::AddEntity;
pub use add_member::AddMember;
pub use add_vertex::AddVertex;
pub use change_member::ChangeMember;
pub use change_tags::ChangeTags;
pub use delete_member::DeleteMember;
pub use delete_multiple::DeleteMultiple;
pub use delete_node::DeleteNode;
pub use delete_relation::DeleteRelation;
pub use delete_way::DeleteWay;
pub use extract::{Extract, ExtractOutcome, ExtractPolicy};
pub use merge_nodes::MergeNodes;
pub use move_node::MoveNode;
pub use reflect::Reflect;
pub use revert::Revert;
pub use reverse::Reverse;
pub use rotate::Rotate;

/// Advisory precondition failure, reported as a code instead of an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisabledReason {
    /// The inputs don't qualify for the operation at all.
    NotEligible,
    /// The inputs hold conflicting memberships of the same relation.
    Relation,
    /// The operation would corrupt a turn restriction.
    Restriction,
}

impl DisabledReason {
    /// Stable string code for UI layers.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::NotEligible => "not_eligible",
            Self::Relation => "relation",
            Self::Restriction => "restriction",
        }
    }
}

impl core::fmt::Display for DisabledReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

/// One edit over a graph.
///
/// Object-safe so History/UI layers can hold heterogeneous action lists and
/// inspect only the advisory metadata.
pub trait Action {
    /// Applies the edit, returning the resulting graph.
    fn apply(&self, graph: &Graph) -> Graph;

    /// Advisory precondition check; `None` means the action may be applied.
    fn disabled(&self, graph: &Graph) -> Option<DisabledReason> {
        let _ = graph;
        None
    }

    /// Whether [`Action::apply_at`] supports fractional `t` for animated
    /// previews.
    fn transitionable(&self) -> bool {
        false
    }

    /// Applies the edit interpolated by `t` in `[0, 1]`.
    ///
    /// Non-transitionable actions ignore `t` and behave like
    /// [`Action::apply`].
    fn apply_at(&self, graph: &Graph, t: f64) -> Graph {
        let _ = t;
        self.apply(graph)
    }
}
