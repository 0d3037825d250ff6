// SPDX-License-Identifier: Apache-2.0
//! Ring area and centroid.

use crate::vec2::{vec_equal, vec_scale, Vec2};

/// Signed shoelace area of a ring.
///
/// Accepts rings with or without an explicit closing point (a trailing
/// repeat of the first vertex contributes a zero term either way, because
/// the iteration is cyclic). Counter-clockwise rings have positive area in a
/// y-up frame; viewport space is y-down, so screen-clockwise rings come out
/// positive there. Callers that only need magnitude take `abs()`.
pub fn polygon_area(ring: &[Vec2]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..ring.len() {
        let a = ring[i];
        let b = ring[(i + 1) % ring.len()];
        sum += a[0] * b[1] - b[0] * a[1];
    }
    sum / 2.0
}

/// Area-weighted centroid of a ring.
///
/// This is the true polygon centroid (each triangle fan segment weighted by
/// its signed area), not a vertex average — concave rings and rings with
/// unevenly spaced vertices come out correct. Rings whose area vanishes
/// (degenerate or collinear) fall back to the vertex mean so the result is
/// always a finite point for non-empty input.
pub fn polygon_centroid(ring: &[Vec2]) -> Option<Vec2> {
    let first = *ring.first()?;
    // Drop an explicit closing point so the vertex-mean fallback is unbiased.
    let open = if ring.len() > 1 && vec_equal(ring[ring.len() - 1], first, 0.0) {
        &ring[..ring.len() - 1]
    } else {
        ring
    };

    let area = polygon_area(open);
    if area.abs() > f64::EPSILON {
        let mut cx = 0.0;
        let mut cy = 0.0;
        for i in 0..open.len() {
            let a = open[i];
            let b = open[(i + 1) % open.len()];
            let w = a[0] * b[1] - b[0] * a[1];
            cx += (a[0] + b[0]) * w;
            cy += (a[1] + b[1]) * w;
        }
        return Some([cx / (6.0 * area), cy / (6.0 * area)]);
    }

    let mut mean = [0.0, 0.0];
    for p in open {
        mean[0] += p[0];
        mean[1] += p[1];
    }
    Some(vec_scale(mean, 1.0 / open.len() as f64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec2::vec_equal;

    #[test]
    fn unit_square_centroid_is_center() {
        let ring = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
        assert!((polygon_area(&ring) - 1.0).abs() < 1e-12);
        let Some(c) = polygon_centroid(&ring) else {
            unreachable!("non-empty ring has a centroid")
        };
        assert!(vec_equal(c, [0.5, 0.5], 1e-12));
    }

    #[test]
    fn closing_point_does_not_change_the_result() {
        let open = [[0.0, 0.0], [4.0, 0.0], [4.0, 2.0], [0.0, 2.0]];
        let closed = [[0.0, 0.0], [4.0, 0.0], [4.0, 2.0], [0.0, 2.0], [0.0, 0.0]];
        let Some(a) = polygon_centroid(&open) else {
            unreachable!()
        };
        let Some(b) = polygon_centroid(&closed) else {
            unreachable!()
        };
        assert!(vec_equal(a, b, 1e-12));
    }

    #[test]
    fn concave_ring_centroid_is_not_the_vertex_mean() {
        // An L-shape: the vertex mean sits noticeably off the area centroid.
        let ring = [
            [0.0, 0.0],
            [4.0, 0.0],
            [4.0, 1.0],
            [1.0, 1.0],
            [1.0, 4.0],
            [0.0, 4.0],
        ];
        let Some(c) = polygon_centroid(&ring) else {
            unreachable!()
        };
        // Area = 7; decompose into 4x1 bar (centroid 2,0.5) + 1x3 stem
        // (centroid 0.5,2.5): c = (4*[2,.5] + 3*[.5,2.5]) / 7.
        assert!(vec_equal(c, [9.5 / 7.0, 9.5 / 7.0], 1e-12));
    }

    #[test]
    fn collinear_ring_falls_back_to_vertex_mean() {
        let ring = [[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]];
        let Some(c) = polygon_centroid(&ring) else {
            unreachable!()
        };
        assert!(vec_equal(c, [1.0, 1.0], 1e-12));
    }
}
