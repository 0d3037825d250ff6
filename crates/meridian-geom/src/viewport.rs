// SPDX-License-Identifier: Apache-2.0
//! Spherical-Mercator viewport projection.
//!
//! The projection maps `[lon, lat]` degrees into a planar y-down pixel frame:
//! `x = λ·k + tx`, `y = -ln(tan(π/4 + φ/2))·k + ty`. Geometric actions only
//! ever compose `project` with `invert`, so the scale and translation merely
//! have to be self-consistent; defaults give a web-mercator frame at zoom 0.
//!
//! Transcendentals (`tan`, `log`, `exp`, `atan`) go through `libm` per the
//! workspace determinism policy — platform `f64` intrinsics may differ by a
//! ULP across targets, which is enough to make two editors disagree about a
//! reflected coordinate.

use core::f64::consts::{FRAC_PI_2, FRAC_PI_4, TAU};

use crate::vec2::Vec2;

/// Maximum latitude representable in spherical Mercator, in degrees.
///
/// `atan(sinh(π))` — beyond this the projection diverges; inputs are clamped.
const MAX_LATITUDE: f64 = 85.0511287798066;

/// A planar viewport over lon/lat space.
///
/// Cheap to copy; actions receive one by value and treat it as part of their
/// parameters, so an identical `(graph, params, t)` triple always sees the
/// same planar frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Pixels per radian of longitude.
    k: f64,
    /// Horizontal translation of the frame origin.
    x: f64,
    /// Vertical translation of the frame origin.
    y: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        // 256px world tile at zoom 0, origin at the frame center.
        Self::new(256.0 / TAU, 128.0, 128.0)
    }
}

impl Viewport {
    /// Creates a viewport with scale `k` (pixels per radian) and a pixel
    /// translation of the origin.
    #[must_use]
    pub fn new(k: f64, x: f64, y: f64) -> Self {
        Self { k, x, y }
    }

    /// Returns the projection scale in pixels per radian.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.k
    }

    /// Projects `[lon, lat]` degrees into the planar frame.
    ///
    /// Latitudes beyond the Mercator singularity are clamped to
    /// [`MAX_LATITUDE`]; longitude is taken as-is (callers normalize).
    pub fn project(&self, loc: Vec2) -> Vec2 {
        let lambda = loc[0].to_radians();
        let phi = loc[1].clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
        let y = libm::log(libm::tan(FRAC_PI_4 + phi / 2.0));
        [lambda * self.k + self.x, -y * self.k + self.y]
    }

    /// Inverts a planar point back to `[lon, lat]` degrees.
    pub fn invert(&self, point: Vec2) -> Vec2 {
        let lambda = (point[0] - self.x) / self.k;
        let y = -(point[1] - self.y) / self.k;
        let phi = 2.0 * libm::atan(libm::exp(y)) - FRAC_PI_2;
        [lambda.to_degrees(), phi.to_degrees()]
    }
}
