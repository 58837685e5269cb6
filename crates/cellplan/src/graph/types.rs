//! Data types for the cell adjacency graph.

use crate::geom2::Point;

/// Node identity after the coincidence merge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// The three (merged) node ids of one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellNodes {
    pub left: NodeId,
    pub center: NodeId,
    pub right: NodeId,
}

/// Undirected graph over cell nodes. Adjacency lists are sorted and
/// free of duplicates and self-loops.
#[derive(Clone, Debug, PartialEq)]
pub struct Graph {
    pub nodes: Vec<Point>,
    pub adj: Vec<Vec<NodeId>>,
    pub cell_nodes: Vec<CellNodes>,
}

impl Graph {
    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_edges(&self) -> usize {
        self.adj.iter().map(Vec::len).sum::<usize>() / 2
    }

    #[inline]
    pub fn position(&self, id: NodeId) -> Point {
        self.nodes[id.0]
    }

    #[inline]
    pub fn neighbors(&self, id: NodeId) -> &[NodeId] {
        &self.adj[id.0]
    }

    #[inline]
    pub fn edge_length(&self, a: NodeId, b: NodeId) -> f64 {
        (self.nodes[a.0] - self.nodes[b.0]).norm()
    }
}
