//! Cell adjacency graph, point location, and shortest paths.
//!
//! Purpose
//! - Turn the sweep's cells into a roadmap: three nodes per cell (left
//!   midpoint, center, right midpoint), links across open boundaries,
//!   coincident nodes merged into one identity.
//! - Locate query points in cells and connect them with Dijkstra.

mod build;
mod locate;
mod search;
mod types;

pub use build::build_graph;
pub use locate::{cell_contains, locate_cell};
pub use search::{dijkstra, Route};
pub use types::{CellNodes, Graph, NodeId};

#[cfg(test)]
mod tests;
