//! The built decomposition and the query entry points.
//!
//! `Decomposition` is assembled once (sweep, then graph) and never mutated;
//! queries borrow it immutably, so it can be shared across threads as is.

use tracing::debug;

use crate::cfg::PlanCfg;
use crate::decomp::{sweep, BuildObserver, Cell, CellId, Cut};
use crate::error::PlanError;
use crate::geom2::{Point, Scene};
use crate::graph::{build_graph, dijkstra, locate_cell, Graph, NodeId};

/// Cells, their graph, and the inputs they came from.
#[derive(Clone, Debug)]
pub struct Decomposition {
    scene: Scene,
    cells: Vec<Cell>,
    graph: Graph,
    unmatched: Vec<Cut>,
    cfg: PlanCfg,
}

/// Answer of `Decomposition::shortest_path`.
#[derive(Clone, Debug, PartialEq)]
pub struct PlannedPath {
    /// `start`, intermediate node coordinates, `goal`.
    pub waypoints: Vec<Point>,
    /// Graph nodes visited (empty when both points share a cell).
    pub nodes: Vec<NodeId>,
    pub start_cell: CellId,
    pub goal_cell: CellId,
    pub length: f64,
}

impl PlannedPath {
    /// Waypoints strictly between start and goal.
    #[inline]
    pub fn internal_waypoints(&self) -> &[Point] {
        &self.waypoints[1..self.waypoints.len() - 1]
    }
}

impl Decomposition {
    pub fn build(scene: &Scene, cfg: PlanCfg) -> Result<Self, PlanError> {
        Self::build_observed(scene, cfg, &mut ())
    }

    pub fn build_observed(
        scene: &Scene,
        cfg: PlanCfg,
        obs: &mut dyn BuildObserver,
    ) -> Result<Self, PlanError> {
        let out = sweep(scene, cfg, obs)?;
        let graph = build_graph(&out.cells, cfg, obs);
        Ok(Self {
            scene: scene.clone(),
            cells: out.cells,
            graph,
            unmatched: out.unmatched,
            cfg,
        })
    }

    #[inline]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// `None` for an id from another decomposition.
    #[inline]
    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(id.0)
    }

    #[inline]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    #[inline]
    pub fn unmatched(&self) -> &[Cut] {
        &self.unmatched
    }

    #[inline]
    pub fn cfg(&self) -> PlanCfg {
        self.cfg
    }

    /// Sum of cell areas; equals `scene().free_area()` for a closed scene.
    pub fn covered_area(&self) -> f64 {
        self.cells.iter().map(Cell::area).sum()
    }

    /// Cell containing `p`.
    pub fn locate(&self, p: Point) -> Result<CellId, PlanError> {
        locate_cell(&self.cells, p, self.cfg.eps_tight, self.cfg.eps_coincide)
            .ok_or(PlanError::PointOutsideRegion { point: p })
    }

    /// Shortest path through cell centers; direct when both points share a cell.
    pub fn shortest_path(&self, start: Point, goal: Point) -> Result<PlannedPath, PlanError> {
        let start_cell = self.locate(start)?;
        let goal_cell = self.locate(goal)?;
        if start_cell == goal_cell {
            return Ok(PlannedPath {
                waypoints: vec![start, goal],
                nodes: Vec::new(),
                start_cell,
                goal_cell,
                length: (goal - start).norm(),
            });
        }
        let from = self.graph.cell_nodes[start_cell.0].center;
        let to = self.graph.cell_nodes[goal_cell.0].center;
        let route = dijkstra(&self.graph, from, to).ok_or(PlanError::PathUnreachable {
            from: start,
            to: goal,
        })?;
        let mut waypoints = Vec::with_capacity(route.nodes.len() + 2);
        waypoints.push(start);
        waypoints.extend(route.nodes.iter().map(|&n| self.graph.position(n)));
        waypoints.push(goal);
        let length = waypoints.windows(2).map(|w| (w[1] - w[0]).norm()).sum();
        debug!(
            start_cell = start_cell.0,
            goal_cell = goal_cell.0,
            hops = route.nodes.len(),
            length,
            "path found"
        );
        Ok(PlannedPath {
            waypoints,
            nodes: route.nodes,
            start_cell,
            goal_cell,
            length,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::reference_scene;

    #[test]
    fn disconnected_graph_is_unreachable() {
        let mut d = Decomposition::build(&reference_scene().unwrap(), PlanCfg::default()).unwrap();
        for nbrs in &mut d.graph.adj {
            nbrs.clear();
        }
        let (a, b) = (Point::new(150.0, 300.0), Point::new(680.0, 300.0));
        assert_eq!(
            d.shortest_path(a, b),
            Err(PlanError::PathUnreachable { from: a, to: b })
        );
        // same-cell queries never touch the graph
        assert!(d.shortest_path(a, Point::new(120.0, 500.0)).is_ok());
    }

    #[test]
    fn cell_lookup_is_bounds_checked() {
        let d = Decomposition::build(&reference_scene().unwrap(), PlanCfg::default()).unwrap();
        let last = CellId(d.cells().len() - 1);
        assert_eq!(d.cell(last), d.cells().last());
        assert_eq!(d.cell(CellId(d.cells().len())), None);
        assert_eq!(d.cell(CellId(usize::MAX)), None);
    }
}
