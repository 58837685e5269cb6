//! JSON shapes written by the subcommands.

use cellplan::decomp::{BoundaryKind, Cell, Span};
use cellplan::geom2::{MapLayout, Point};
use cellplan::{Decomposition, PlannedPath};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SpanOut {
    pub x: f64,
    pub y_top: f64,
    pub y_bottom: f64,
    pub open: bool,
}

impl SpanOut {
    fn new(s: &Span, kind: BoundaryKind) -> Self {
        Self {
            x: s.x,
            y_top: s.y_top,
            y_bottom: s.y_bottom,
            open: kind.is_open(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CellOut {
    pub id: usize,
    pub upper_edge: usize,
    pub lower_edge: usize,
    pub left: SpanOut,
    pub right: SpanOut,
    pub area: f64,
    pub center: [f64; 2],
}

impl CellOut {
    fn new(id: usize, c: &Cell) -> Self {
        Self {
            id,
            upper_edge: c.upper.0,
            lower_edge: c.lower.0,
            left: SpanOut::new(&c.left, c.left_kind),
            right: SpanOut::new(&c.right, c.right_kind),
            area: c.area(),
            center: xy(c.center()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GraphOut {
    pub nodes: Vec<[f64; 2]>,
    pub edges: Vec<[usize; 2]>,
    /// `[left, center, right]` node ids per cell.
    pub cell_nodes: Vec<[usize; 3]>,
}

#[derive(Debug, Serialize)]
pub struct DecompositionOut {
    pub cells: Vec<CellOut>,
    pub graph: GraphOut,
    pub free_area: f64,
    pub covered_area: f64,
    pub unmatched_cuts: usize,
}

impl DecompositionOut {
    pub fn new(d: &Decomposition) -> Self {
        let g = d.graph();
        let edges = g
            .adj
            .iter()
            .enumerate()
            .flat_map(|(a, nbrs)| nbrs.iter().filter(move |b| b.0 > a).map(move |b| [a, b.0]))
            .collect();
        Self {
            cells: d
                .cells()
                .iter()
                .enumerate()
                .map(|(i, c)| CellOut::new(i, c))
                .collect(),
            graph: GraphOut {
                nodes: g.nodes.iter().map(|&p| xy(p)).collect(),
                edges,
                cell_nodes: g
                    .cell_nodes
                    .iter()
                    .map(|n| [n.left.0, n.center.0, n.right.0])
                    .collect(),
            },
            free_area: d.scene().free_area(),
            covered_area: d.covered_area(),
            unmatched_cuts: d.unmatched().len(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PathOut {
    pub start_cell: usize,
    pub goal_cell: usize,
    pub length: f64,
    pub nodes: Vec<usize>,
    pub waypoints: Vec<[f64; 2]>,
    /// Waypoints mapped back through the layout; present for `--world` queries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub world_waypoints: Option<Vec<[f64; 2]>>,
}

impl PathOut {
    pub fn new(path: &PlannedPath, world: Option<&MapLayout>) -> Self {
        Self {
            start_cell: path.start_cell.0,
            goal_cell: path.goal_cell.0,
            length: path.length,
            nodes: path.nodes.iter().map(|n| n.0).collect(),
            waypoints: path.waypoints.iter().map(|&p| xy(p)).collect(),
            world_waypoints: world.map(|layout| {
                path.waypoints
                    .iter()
                    .map(|&p| xy(layout.to_world(p).unwrap_or(p)))
                    .collect()
            }),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SampleOut {
    pub seed: u64,
    pub points: Vec<[f64; 2]>,
    pub cells: Vec<usize>,
    /// Paths between consecutive point pairs `(0, 1), (2, 3), ...`.
    pub paths: Vec<PathOut>,
}

#[inline]
pub fn xy(p: Point) -> [f64; 2] {
    [p.x, p.y]
}
