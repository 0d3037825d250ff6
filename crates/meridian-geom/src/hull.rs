// SPDX-License-Identifier: Apache-2.0
//! Convex hull and smallest surrounding rectangle.
//!
//! The rectangle scan drives axis selection for reflection: the minimum-area
//! enclosing rectangle of a point set always has one side collinear with a
//! hull edge, so it suffices to rotate the hull flat against each edge in
//! turn and keep the tightest axis-aligned extent.

use crate::vec2::{vec_interp, vec_length, vec_scale, vec_sub, Vec2};

/// Cross product of `OA × OB`; positive when `a → b` turns counter-clockwise
/// around `o`.
fn cross(o: Vec2, a: Vec2, b: Vec2) -> f64 {
    (a[0] - o[0]) * (b[1] - o[1]) - (a[1] - o[1]) * (b[0] - o[0])
}

/// Computes the convex hull of `points` via Andrew's monotone chain.
///
/// Returns hull vertices in counter-clockwise order without repeating the
/// first vertex. Fewer than three distinct input points yield the distinct
/// points themselves (sorted), which downstream rectangle code treats as a
/// degenerate hull.
pub fn convex_hull(points: &[Vec2]) -> Vec<Vec2> {
    let mut pts: Vec<Vec2> = points.to_vec();
    pts.sort_by(|a, b| a[0].total_cmp(&b[0]).then(a[1].total_cmp(&b[1])));
    pts.dedup();
    let n = pts.len();
    if n < 3 {
        return pts;
    }

    let mut hull: Vec<Vec2> = Vec::with_capacity(2 * n);
    for &p in &pts {
        while hull.len() >= 2 && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0 {
            hull.pop();
        }
        hull.push(p);
    }
    let lower_len = hull.len() + 1;
    for &p in pts.iter().rev().skip(1) {
        while hull.len() >= lower_len && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0
        {
            hull.pop();
        }
        hull.push(p);
    }
    hull.pop();
    hull
}

/// Minimum-area rectangle enclosing a point set.
///
/// `poly` holds the four corners plus a repeat of the first (a closed ring),
/// oriented so that side `0→1` is collinear with the hull edge that produced
/// the minimum. `angle` is that edge's angle in radians.
#[derive(Debug, Clone, PartialEq)]
pub struct SurroundingRectangle {
    /// Closed corner ring: five points, `poly[4] == poly[0]`.
    pub poly: [Vec2; 5],
    /// Angle of the rectangle's `0→1` side, radians.
    pub angle: f64,
}

impl SurroundingRectangle {
    /// Midpoints of the two sides perpendicular to `0→1`: the axis running
    /// along the rectangle's `0→1` direction.
    #[must_use]
    pub fn axis_a(&self) -> (Vec2, Vec2) {
        (
            vec_interp(self.poly[0], self.poly[1], 0.5),
            vec_interp(self.poly[2], self.poly[3], 0.5),
        )
    }

    /// Midpoints of the two sides parallel to `0→1`: the perpendicular axis.
    #[must_use]
    pub fn axis_b(&self) -> (Vec2, Vec2) {
        (
            vec_interp(self.poly[1], self.poly[2], 0.5),
            vec_interp(self.poly[3], self.poly[4], 0.5),
        )
    }

    /// The longer of the two axes (ties resolve to `axis_a`).
    #[must_use]
    pub fn long_axis(&self) -> (Vec2, Vec2) {
        let a = self.axis_a();
        let b = self.axis_b();
        if vec_length(a.0, a.1) >= vec_length(b.0, b.1) {
            a
        } else {
            b
        }
    }

    /// The shorter of the two axes (ties resolve to `axis_b`).
    #[must_use]
    pub fn short_axis(&self) -> (Vec2, Vec2) {
        let a = self.axis_a();
        let b = self.axis_b();
        if vec_length(a.0, a.1) >= vec_length(b.0, b.1) {
            b
        } else {
            a
        }
    }
}

/// Computes the smallest surrounding rectangle of `points`.
///
/// Returns `None` for an empty input. A single distinct point yields a
/// zero-size rectangle at that point; two distinct points (or a collinear
/// set) yield a zero-width rectangle along the segment.
pub fn smallest_surrounding_rectangle(points: &[Vec2]) -> Option<SurroundingRectangle> {
    let hull = convex_hull(points);
    let first = *hull.first()?;
    if hull.len() == 1 {
        return Some(SurroundingRectangle {
            poly: [first; 5],
            angle: 0.0,
        });
    }

    // Pivot for the trial rotations; any fixed point works since the extent
    // is rotated back around the same pivot.
    let mut centroid = [0.0, 0.0];
    for p in &hull {
        centroid[0] += p[0];
        centroid[1] += p[1];
    }
    centroid = vec_scale(centroid, 1.0 / hull.len() as f64);

    let mut best_area = f64::INFINITY;
    let mut best_angle = 0.0;
    let mut best_extent = [[0.0; 2]; 2];

    let mut c1 = first;
    for i in 0..hull.len() {
        let c2 = hull[(i + 1) % hull.len()];
        let edge = vec_sub(c2, c1);
        let angle = libm::atan2(edge[1], edge[0]);
        let (sin, cos) = libm::sincos(-angle);

        let mut min = [f64::INFINITY, f64::INFINITY];
        let mut max = [f64::NEG_INFINITY, f64::NEG_INFINITY];
        for p in &hull {
            let x = p[0] - centroid[0];
            let y = p[1] - centroid[1];
            let rx = x * cos - y * sin;
            let ry = x * sin + y * cos;
            min[0] = min[0].min(rx);
            min[1] = min[1].min(ry);
            max[0] = max[0].max(rx);
            max[1] = max[1].max(ry);
        }

        let area = (max[0] - min[0]) * (max[1] - min[1]);
        if area < best_area {
            best_area = area;
            best_angle = angle;
            best_extent = [min, max];
        }
        c1 = c2;
    }

    // Rotate the winning extent's corners back into the original frame.
    let (sin, cos) = libm::sincos(best_angle);
    let [min, max] = best_extent;
    let corners = [
        [min[0], min[1]],
        [max[0], min[1]],
        [max[0], max[1]],
        [min[0], max[1]],
        [min[0], min[1]],
    ];
    let mut poly = [[0.0; 2]; 5];
    for (slot, c) in poly.iter_mut().zip(corners) {
        *slot = [
            c[0] * cos - c[1] * sin + centroid[0],
            c[0] * sin + c[1] * cos + centroid[1],
        ];
    }

    Some(SurroundingRectangle {
        poly,
        angle: best_angle,
    })
}
