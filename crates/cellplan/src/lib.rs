//! Exact cell decomposition and shortest-path planning among polygonal obstacles.
//!
//! Pipeline: `Scene` (boundary + obstacles) → vertical sweep (`decomp`) →
//! trapezoidal `Cell`s → adjacency `Graph` with merged nodes (`graph`) →
//! point location + Dijkstra (`planner`).
//!
//! Coordinates follow the screen convention of the map layout: y grows
//! downward, "up" means decreasing y.

pub mod api;
pub mod cfg;
pub mod decomp;
pub mod error;
pub mod fixtures;
pub mod geom2;
pub mod graph;
pub mod planner;
pub mod sample;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use cfg::PlanCfg;
pub use error::PlanError;
pub use nalgebra::Vector2 as Vec2;
pub use planner::{Decomposition, PlannedPath};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::api::{build_decomposition, locate, shortest_path};
    pub use crate::cfg::PlanCfg;
    pub use crate::decomp::{BoundaryKind, Cell, CellId, EdgeId, Span};
    pub use crate::error::PlanError;
    pub use crate::geom2::{MapLayout, Point, Polygon, Scene, Segment};
    pub use crate::graph::{Graph, NodeId};
    pub use crate::planner::{Decomposition, PlannedPath};
    pub use crate::sample::{FreeSpaceSampler, ReplayToken};
}
