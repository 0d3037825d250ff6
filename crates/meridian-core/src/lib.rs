// SPDX-License-Identifier: Apache-2.0
//! meridian-core: immutable entity graph and action algebra for map editing.
//!
//! The crate has three layers. Entities (nodes, ways, relations,
//! changesets) are immutable values. [`Graph`] is a persistent, layered
//! container of entities with derived parent-reference indices. Actions are
//! pure edit values over graphs — apply one and a new graph comes back,
//! every prior graph intact. The surrounding editor sequences those graphs
//! into an undo history and performs all I/O; nothing here suspends,
//! locks, or touches the outside world.
#![forbid(unsafe_code)]
#![deny(missing_docs, rust_2018_idioms, unused_must_use)]
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
#![allow(
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::unreadable_literal,
    clippy::missing_const_for_fn,
    clippy::suboptimal_flops,
    clippy::redundant_pub_crate,
    clippy::many_single_char_names,
    clippy::module_name_repetitions,
    clippy::use_self
)]

/// The action algebra: pure edit values over [`Graph`].
pub mod actions;

mod changeset;
mod entity;
mod graph;
mod ident;
mod node;
mod record;
mod relation;
mod tags;
mod way;

// Re-exports for stable public API
/// Tags-only upload envelopes.
pub use changeset::Changeset;
/// The closed entity sum type, copy machinery, and geometry classification.
pub use entity::{CopyRegistry, Entity, Geometry};
/// Persistent layered graph, batched edits, and lookup errors.
pub use graph::{Graph, GraphEdit, GraphError};
/// Entity identifiers and the caller-owned local id allocator.
pub use ident::{EntityId, EntityKind, IdSequence};
/// Point entities.
pub use node::Node;
/// Normalized parser records seeding root graphs.
pub use record::EntityRecord;
/// Grouped relations, members, and member-slot errors.
pub use relation::{Member, Relation, RelationError};
/// Tag maps and the classification tables over them.
pub use tags::{
    has_interesting_tags, is_interesting_key, is_sided, merge_tags, suggests_area,
    suggests_one_way, Tags,
};
/// Polyline/polygon entities and node-list surgery errors.
pub use way::{Affix, Way, WayError};
