//! Basic 2D value types: points, segments, and affine maps.
//!
//! - `Point`: nalgebra column vector in screen coordinates (y grows downward).
//! - `Segment`: ordered endpoint pair with the slope/intercept helpers the
//!   kernel relies on.
//! - `Affine2`: `x ↦ M x + t`, used for the map layout transform.

use nalgebra::{Matrix2, Vector2};

/// World/screen point. "Up" is decreasing `y`.
pub type Point = Vector2<f64>;

/// Ordered endpoint pair; a polygon edge, a cut, or a cast ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub a: Point,
    pub b: Point,
}

impl Segment {
    #[inline]
    pub fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    #[inline]
    pub fn length(&self) -> f64 {
        (self.b - self.a).norm()
    }

    #[inline]
    pub fn is_vertical(&self, eps: f64) -> bool {
        (self.b.x - self.a.x).abs() < eps
    }

    #[inline]
    pub fn is_horizontal(&self, eps: f64) -> bool {
        (self.b.y - self.a.y).abs() < eps
    }

    /// Line `y = m x + c` through the segment as `(m, c)`.
    ///
    /// Pre: not vertical; callers branch on `is_vertical` first.
    #[inline]
    pub fn line(&self) -> (f64, f64) {
        let m = (self.b.y - self.a.y) / (self.b.x - self.a.x);
        (m, self.a.y - m * self.a.x)
    }

    /// Height of the supporting line at `x` (non-vertical segments only).
    #[inline]
    pub fn y_at(&self, x: f64) -> f64 {
        let (m, c) = self.line();
        m * x + c
    }

    /// Scalar projection of `p - a` onto the unit direction `a → b`.
    #[inline]
    pub fn projection(&self, p: Point) -> f64 {
        let d = self.b - self.a;
        (p - self.a).dot(&d) / d.norm()
    }

    #[inline]
    pub fn min_x(&self) -> f64 {
        self.a.x.min(self.b.x)
    }

    #[inline]
    pub fn max_x(&self) -> f64 {
        self.a.x.max(self.b.x)
    }

    /// Signed perpendicular distance of `p` from the directed line `a → b`.
    /// Positive on the side `cross(b - a, p - a) > 0`.
    #[inline]
    pub fn signed_distance(&self, p: Point) -> f64 {
        let d = self.b - self.a;
        cross(d, p - self.a) / d.norm()
    }
}

/// Planar cross product `u.x v.y - u.y v.x`.
#[inline]
pub fn cross(u: Vector2<f64>, v: Vector2<f64>) -> f64 {
    u.x * v.y - u.y * v.x
}

/// 2D affine map: `x ↦ M x + t`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine2 {
    pub m: Matrix2<f64>,
    pub t: Vector2<f64>,
}

impl Affine2 {
    /// Uniform scale, translate, and flip of the y-axis: `(x, y) ↦ (s x + ox, oy - s y)`.
    #[inline]
    pub fn screen(scale: f64, offset_x: f64, offset_y: f64) -> Self {
        Self {
            m: Matrix2::new(scale, 0.0, 0.0, -scale),
            t: Vector2::new(offset_x, offset_y),
        }
    }

    #[inline]
    pub fn apply(&self, p: Point) -> Point {
        self.m * p + self.t
    }

    #[inline]
    pub fn inverse(&self) -> Option<Self> {
        self.m.try_inverse().map(|minv| Self {
            m: minv,
            t: -minv * self.t,
        })
    }
}
