//! Curated surface for callers that load maps and draw results.
//!
//! One-shot build, then read-only queries. Everything here is a thin
//! wrapper over `Decomposition`; prefer these names in front ends.

// Geometry
pub use crate::geom2::{
    classify, intersect, intersect_strict, Extension, MapLayout, Point, Polygon, Scene, Segment,
};
// Decomposition and graph
pub use crate::decomp::{BoundaryKind, BuildEvent, BuildObserver, Cell, CellId, EventLog};
pub use crate::graph::{Graph, NodeId};
pub use crate::planner::{Decomposition, PlannedPath};

use crate::cfg::PlanCfg;
use crate::error::PlanError;

/// Decompose `scene` and build its graph.
pub fn build_decomposition(scene: &Scene, cfg: PlanCfg) -> Result<Decomposition, PlanError> {
    Decomposition::build(scene, cfg)
}

/// Same as `build_decomposition`, reporting every step to `obs`.
pub fn build_decomposition_observed(
    scene: &Scene,
    cfg: PlanCfg,
    obs: &mut dyn BuildObserver,
) -> Result<Decomposition, PlanError> {
    Decomposition::build_observed(scene, cfg, obs)
}

/// Cell containing `p`, or `PointOutsideRegion`.
pub fn locate(decomp: &Decomposition, p: Point) -> Result<CellId, PlanError> {
    decomp.locate(p)
}

/// Waypoints from `start` to `goal`, or `PointOutsideRegion` / `PathUnreachable`.
pub fn shortest_path(
    decomp: &Decomposition,
    start: Point,
    goal: Point,
) -> Result<PlannedPath, PlanError> {
    decomp.shortest_path(start, goal)
}
