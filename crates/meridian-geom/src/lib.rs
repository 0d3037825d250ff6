// SPDX-License-Identifier: Apache-2.0
//! meridian-geom: planar geometry for the Meridian editing core.
//!
//! Everything here operates on projected viewport coordinates (or raw
//! lon/lat pairs on the projection boundary). Transcendentals go through
//! `libm` rather than platform intrinsics so that projection and rotation
//! produce identical bit patterns across platforms.
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
    clippy::many_single_char_names,
    clippy::module_name_repetitions,
    clippy::use_self
)]

mod hull;
mod path;
mod polygon;
mod vec2;
mod viewport;

/// Convex hull and smallest-surrounding-rectangle scaffolding.
pub use hull::{convex_hull, smallest_surrounding_rectangle, SurroundingRectangle};
/// Arc-length helpers for open polylines.
pub use path::{path_length, path_midpoint};
/// Ring area and area-weighted centroid.
pub use polygon::{polygon_area, polygon_centroid};
/// Planar vector helpers and isometries.
pub use vec2::{
    reflect_across, rotate_about, vec_add, vec_dot, vec_equal, vec_interp, vec_length, vec_scale,
    vec_sub, Vec2,
};
/// Spherical-Mercator viewport projection.
pub use viewport::Viewport;
