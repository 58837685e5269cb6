//! Segment–segment intersection (line intersect, then clip to extents).
//!
//! Method
//! - Each non-vertical segment becomes `y = m x + c`; the intersection `x`
//!   comes from equating the two lines, or from the fixed `x` of a vertical
//!   segment. The candidate is then kept only if its scalar projection onto
//!   each segment's unit direction lies in `[-eps, len + eps]`.
//! - Cell boundaries are computed with this exact two-stage recipe, so the
//!   decomposition's coordinates depend on it; do not swap in a parametric
//!   solver.
//!
//! Tolerances: slope/vertical decisions use the tight epsilon; clipping uses
//! the caller's epsilon (`COINCIDE_EPS` for the sweep, `TIGHT_EPS` for exact
//! tests).

use super::types::{Point, Segment};
use crate::cfg::{COINCIDE_EPS, TIGHT_EPS};

/// Why a pair of segments has no well-defined crossing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Degeneracy {
    BothVertical,
    BothHorizontal,
    EqualSlope,
    ZeroLength,
}

/// Outcome of `classify_segments`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SegmentIntersection {
    Point(Point),
    Degenerate(Degeneracy),
    Disjoint,
}

impl SegmentIntersection {
    #[inline]
    pub fn point(self) -> Option<Point> {
        match self {
            SegmentIntersection::Point(p) => Some(p),
            _ => None,
        }
    }
}

/// Full classification with explicit tolerances.
pub fn classify_segments(
    s1: &Segment,
    s2: &Segment,
    eps_slope: f64,
    eps_clip: f64,
) -> SegmentIntersection {
    if s1.length() < eps_slope || s2.length() < eps_slope {
        return SegmentIntersection::Degenerate(Degeneracy::ZeroLength);
    }
    let v1 = s1.is_vertical(eps_slope);
    let v2 = s2.is_vertical(eps_slope);
    if v1 && v2 {
        return SegmentIntersection::Degenerate(Degeneracy::BothVertical);
    }
    if s1.is_horizontal(eps_slope) && s2.is_horizontal(eps_slope) {
        return SegmentIntersection::Degenerate(Degeneracy::BothHorizontal);
    }

    let p = if v1 {
        let (m2, c2) = s2.line();
        let x = s1.a.x;
        Point::new(x, m2 * x + c2)
    } else if v2 {
        let (m1, c1) = s1.line();
        let x = s2.a.x;
        Point::new(x, m1 * x + c1)
    } else {
        let (m1, c1) = s1.line();
        let (m2, c2) = s2.line();
        if (m1 - m2).abs() < eps_slope {
            return SegmentIntersection::Degenerate(Degeneracy::EqualSlope);
        }
        let x = (c2 - c1) / (m1 - m2);
        Point::new(x, m1 * x + c1)
    };

    for s in [s1, s2] {
        let proj = s.projection(p);
        if proj < -eps_clip || proj > s.length() + eps_clip {
            return SegmentIntersection::Disjoint;
        }
    }
    SegmentIntersection::Point(p)
}

/// Intersection point with the decomposition tolerance (clip slack 1e-3).
#[inline]
pub fn intersect(s1: &Segment, s2: &Segment) -> Option<Point> {
    classify_segments(s1, s2, TIGHT_EPS, COINCIDE_EPS).point()
}

/// Intersection point with the exact-test tolerance (clip slack 1e-4).
#[inline]
pub fn intersect_strict(s1: &Segment, s2: &Segment) -> Option<Point> {
    classify_segments(s1, s2, TIGHT_EPS, TIGHT_EPS).point()
}
