//! Graph construction: per-cell nodes, cross-cell links, coincidence merge.

use std::collections::BTreeSet;

use tracing::debug;

use super::types::{CellNodes, Graph, NodeId};
use crate::cfg::PlanCfg;
use crate::decomp::{BuildEvent, BuildObserver, Cell};
use crate::geom2::Point;

/// Build the merged adjacency graph over `cells`.
///
/// Raw node `3 i + {0, 1, 2}` is the left midpoint, center, and right
/// midpoint of cell `i`. Both the cross-cell scan and the merge are
/// all-pairs; maps here have tens of cells.
pub fn build_graph(cells: &[Cell], cfg: PlanCfg, obs: &mut dyn BuildObserver) -> Graph {
    let mut pts: Vec<Point> = Vec::with_capacity(3 * cells.len());
    let mut adj: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); 3 * cells.len()];
    for (i, c) in cells.iter().enumerate() {
        pts.extend([c.left.midpoint(), c.center(), c.right.midpoint()]);
        let base = 3 * i;
        if c.left_kind.is_open() {
            link(&mut adj, base, base + 1);
        }
        if c.right_kind.is_open() {
            link(&mut adj, base + 1, base + 2);
        }
    }
    for (i, a) in cells.iter().enumerate() {
        if !a.right_kind.is_open() {
            continue;
        }
        for (j, b) in cells.iter().enumerate() {
            if i == j || !b.left_kind.is_open() {
                continue;
            }
            if (a.right.x - b.left.x).abs() < cfg.eps_coincide
                && a.right.overlap(&b.left) > cfg.eps_coincide
            {
                link(&mut adj, 3 * i + 2, 3 * j);
            }
        }
    }
    let raw_edges: usize = adj.iter().map(BTreeSet::len).sum::<usize>() / 2;
    let graph = merge_coincident(&pts, &adj, cells.len(), cfg.eps_coincide, obs);
    debug!(
        raw_nodes = pts.len(),
        raw_edges,
        nodes = graph.num_nodes(),
        edges = graph.num_edges(),
        "graph built"
    );
    graph
}

#[inline]
fn link(adj: &mut [BTreeSet<usize>], a: usize, b: usize) {
    adj[a].insert(b);
    adj[b].insert(a);
}

/// Fold nodes closer than `eps` into the lowest-index survivor, then compact ids.
fn merge_coincident(
    pts: &[Point],
    adj: &[BTreeSet<usize>],
    num_cells: usize,
    eps: f64,
    obs: &mut dyn BuildObserver,
) -> Graph {
    let n = pts.len();
    let mut rep: Vec<usize> = (0..n).collect();
    for i in 0..n {
        if rep[i] != i {
            continue;
        }
        for j in (i + 1)..n {
            if rep[j] == j && (pts[i] - pts[j]).norm() < eps {
                rep[j] = i;
                obs.on_event(&BuildEvent::NodesMerged {
                    survivor: i,
                    dropped: j,
                });
            }
        }
    }

    // survivors always precede the nodes folded into them
    let mut compact: Vec<usize> = vec![0; n];
    let mut nodes: Vec<Point> = Vec::new();
    for i in 0..n {
        if rep[i] == i {
            compact[i] = nodes.len();
            nodes.push(pts[i]);
        } else {
            compact[i] = compact[rep[i]];
        }
    }
    let id_of = |raw: usize| compact[raw];

    let mut merged: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); nodes.len()];
    for (i, nbrs) in adj.iter().enumerate() {
        let a = id_of(i);
        for &j in nbrs {
            let b = id_of(j);
            if a != b {
                merged[a].insert(b);
                merged[b].insert(a);
            }
        }
    }
    let cell_nodes = (0..num_cells)
        .map(|c| CellNodes {
            left: NodeId(id_of(3 * c)),
            center: NodeId(id_of(3 * c + 1)),
            right: NodeId(id_of(3 * c + 2)),
        })
        .collect();
    Graph {
        nodes,
        adj: merged
            .into_iter()
            .map(|s| s.into_iter().map(NodeId).collect())
            .collect(),
        cell_nodes,
    }
}
