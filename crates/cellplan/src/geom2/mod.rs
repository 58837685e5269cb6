//! 2D geometry kernel for the sweep.
//!
//! Purpose
//! - Segment intersection with explicit degenerate cases (`intersect`).
//! - Vertex classification against the sweep direction (`classify`).
//! - Polygons, validated scenes, and the flat-list map layout (`polygon`).
//!
//! Conventions
//! - Screen coordinates: y grows downward; "up" is decreasing y.
//! - Tolerances come from `crate::cfg` (tight 1e-4, coincidence 1e-3).

pub mod classify;
pub mod intersect;
pub mod polygon;
mod types;

pub use classify::{classify, full_angle, Extension};
pub use intersect::{
    classify_segments, intersect, intersect_strict, Degeneracy, SegmentIntersection,
};
pub use polygon::{MapLayout, Polygon, Scene};
pub use types::{cross, Affine2, Point, Segment};

#[cfg(test)]
mod tests;
