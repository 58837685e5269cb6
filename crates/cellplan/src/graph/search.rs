//! Dijkstra over the merged graph with Euclidean edge weights.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::types::{Graph, NodeId};

/// Frontier entry; reversed ordering turns `BinaryHeap` into a min-heap.
#[derive(Clone, Copy, Debug)]
struct Frontier {
    cost: f64,
    node: NodeId,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.node == other.node
    }
}

impl Eq for Frontier {}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .partial_cmp(&self.cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Node sequence from start to goal plus its total length.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    pub nodes: Vec<NodeId>,
    pub length: f64,
}

/// Shortest route from `start` to `goal`; `None` when the frontier empties first.
pub fn dijkstra(graph: &Graph, start: NodeId, goal: NodeId) -> Option<Route> {
    let n = graph.num_nodes();
    if start.0 >= n || goal.0 >= n {
        return None;
    }
    let mut dist = vec![f64::INFINITY; n];
    let mut prev: Vec<Option<NodeId>> = vec![None; n];
    let mut done = vec![false; n];
    let mut heap = BinaryHeap::new();
    dist[start.0] = 0.0;
    heap.push(Frontier {
        cost: 0.0,
        node: start,
    });

    while let Some(Frontier { cost, node }) = heap.pop() {
        if done[node.0] {
            continue;
        }
        done[node.0] = true;
        if node == goal {
            break;
        }
        for &next in graph.neighbors(node) {
            if done[next.0] {
                continue;
            }
            let nd = cost + graph.edge_length(node, next);
            if nd < dist[next.0] {
                dist[next.0] = nd;
                prev[next.0] = Some(node);
                heap.push(Frontier {
                    cost: nd,
                    node: next,
                });
            }
        }
    }

    if !done[goal.0] {
        return None;
    }
    let mut nodes = vec![goal];
    let mut cur = goal;
    while cur != start {
        cur = prev[cur.0]?;
        nodes.push(cur);
    }
    nodes.reverse();
    Some(Route {
        nodes,
        length: dist[goal.0],
    })
}
