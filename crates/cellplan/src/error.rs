//! Errors surfaced by decomposition and queries.
//!
//! Build-time kinds (`UnclassifiableVertex`, `OpenRegion`, `InvalidLayout`)
//! abort the one-shot build. Query kinds (`PointOutsideRegion`,
//! `PathUnreachable`) fail a single query and leave the decomposition usable.
//! Degenerate segment pairs are not errors; see `geom2::SegmentIntersection`.

use std::fmt;

use crate::geom2::Point;

#[derive(Clone, Debug, PartialEq)]
pub enum PlanError {
    /// A polygon is too small or self-intersecting, a vertex has a
    /// zero-length incident edge, or an obstacle vertex sits on a boundary corner.
    UnclassifiableVertex {
        polygon: usize,
        vertex: usize,
        reason: &'static str,
    },
    /// A valid vertical extension struck no edge: the boundary does not enclose the vertex.
    OpenRegion { vertex: Point },
    /// Flat input does not match the fixed polygon layout.
    InvalidLayout { expected: usize, found: usize },
    /// No cell contains the query point.
    PointOutsideRegion { point: Point },
    /// The search frontier emptied before reaching the goal.
    PathUnreachable { from: Point, to: Point },
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanError::UnclassifiableVertex {
                polygon,
                vertex,
                reason,
            } => write!(
                f,
                "vertex {vertex} of polygon {polygon} cannot be classified: {reason}"
            ),
            PlanError::OpenRegion { vertex } => write!(
                f,
                "vertical extension from ({:.3}, {:.3}) leaves the mapped region",
                vertex.x, vertex.y
            ),
            PlanError::InvalidLayout { expected, found } => {
                write!(f, "map layout expects {expected} points, found {found}")
            }
            PlanError::PointOutsideRegion { point } => write!(
                f,
                "point ({:.3}, {:.3}) lies outside the free region",
                point.x, point.y
            ),
            PlanError::PathUnreachable { from, to } => write!(
                f,
                "no path from ({:.3}, {:.3}) to ({:.3}, {:.3})",
                from.x, from.y, to.x, to.y
            ),
        }
    }
}

impl std::error::Error for PlanError {}
