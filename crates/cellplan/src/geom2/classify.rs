//! Vertex classification: which vertical extensions leave a vertex into free space.
//!
//! Convention
//! - Polygons are re-wound so the blocked region (obstacle interior, or the
//!   outside of the boundary) always sits in the wedge swept from
//!   `next - v` to `prev - v` in the positive (`cross > 0`) sense.
//! - Angles are full range `[0, 2π)` from `atan2(cross, dot)`.
//! - A probe is valid iff its angle from `next - v` strictly exceeds the
//!   blocked wedge angle. No tolerance band (see DESIGN.md).
//! - Probes lean by `probe_shear`: up = `(shear, -1)`, down = `(-shear, 1)`.
//!   That matches sweeping vertices in `(x, y)` order and settles rays that
//!   run exactly along a vertical edge.

use std::f64::consts::TAU;

use nalgebra::Vector2;

use super::types::{cross, Point};

/// Valid vertical extensions at a vertex.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Extension {
    None,
    UpOnly,
    DownOnly,
    Both,
}

impl Extension {
    #[inline]
    pub fn from_flags(up: bool, down: bool) -> Self {
        match (up, down) {
            (false, false) => Extension::None,
            (true, false) => Extension::UpOnly,
            (false, true) => Extension::DownOnly,
            (true, true) => Extension::Both,
        }
    }

    #[inline]
    pub fn up(self) -> bool {
        matches!(self, Extension::UpOnly | Extension::Both)
    }

    #[inline]
    pub fn down(self) -> bool {
        matches!(self, Extension::DownOnly | Extension::Both)
    }
}

/// Angle from `u` to `w` in the positive sense, in `[0, 2π)`.
#[inline]
pub fn full_angle(u: Vector2<f64>, w: Vector2<f64>) -> f64 {
    let a = cross(u, w).atan2(u.dot(&w));
    if a < 0.0 {
        a + TAU
    } else {
        a
    }
}

#[inline]
pub fn probe_up(shear: f64) -> Vector2<f64> {
    Vector2::new(shear, -1.0)
}

#[inline]
pub fn probe_down(shear: f64) -> Vector2<f64> {
    Vector2::new(-shear, 1.0)
}

/// True iff `dir` leaves `vertex` outside the blocked wedge.
#[inline]
pub fn departs_free(vertex: Point, prev: Point, next: Point, dir: Vector2<f64>) -> bool {
    let first = next - vertex;
    let blocked = full_angle(first, prev - vertex);
    full_angle(first, dir) > blocked
}

/// Classify `vertex` given its neighbours in the normalised winding.
pub fn classify(vertex: Point, prev: Point, next: Point, shear: f64) -> Extension {
    let up = departs_free(vertex, prev, next, probe_up(shear));
    let down = departs_free(vertex, prev, next, probe_down(shear));
    Extension::from_flags(up, down)
}
