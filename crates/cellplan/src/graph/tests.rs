use super::*;
use crate::cfg::PlanCfg;
use crate::decomp::{sweep, BoundaryKind, BuildEvent, Cell, EdgeId, EventLog, Span};
use crate::fixtures::reference_scene;
use crate::geom2::{Point, Segment};
use proptest::prelude::*;

fn reference_cells() -> Vec<Cell> {
    sweep(&reference_scene().unwrap(), PlanCfg::default(), &mut ())
        .unwrap()
        .cells
}

fn reference_graph() -> Graph {
    build_graph(&reference_cells(), PlanCfg::default(), &mut ())
}

fn span(x: f64, top: f64, bottom: f64) -> Span {
    Span::new(x, top, bottom, 0.0).unwrap()
}

fn linked(g: &Graph, a: NodeId, b: NodeId) -> bool {
    g.neighbors(a).contains(&b)
}

fn rect_cell(x0: f64, x1: f64, left: BoundaryKind, right: BoundaryKind) -> Cell {
    Cell::new(
        EdgeId(0),
        EdgeId(1),
        span(x0, 0.0, 10.0),
        span(x1, 0.0, 10.0),
        left,
        right,
    )
    .unwrap()
}

/// Two boxes meeting at `x = 10 + gap`, open towards each other.
fn pair(gap: f64) -> Vec<Cell> {
    vec![
        rect_cell(0.0, 10.0, BoundaryKind::ClosedByObstacle, BoundaryKind::Open),
        rect_cell(10.0 + gap, 20.0, BoundaryKind::Open, BoundaryKind::ClosedByObstacle),
    ]
}

/// Node chain center, right, left, center, ... through `cells` in order.
fn detour(g: &Graph, cells: &[usize]) -> f64 {
    let mut chain: Vec<NodeId> = Vec::new();
    for (k, &c) in cells.iter().enumerate() {
        let n = g.cell_nodes[c];
        if k > 0 {
            chain.push(n.left);
        }
        chain.push(n.center);
        if k + 1 < cells.len() {
            chain.push(n.right);
        }
    }
    chain.dedup();
    chain
        .windows(2)
        .map(|w| {
            assert!(linked(g, w[0], w[1]), "no edge {:?} - {:?}", w[0], w[1]);
            g.edge_length(w[0], w[1])
        })
        .sum()
}

#[test]
fn reference_graph_shape() {
    let g = reference_graph();
    assert_eq!(g.num_nodes(), 33);
    assert_eq!(g.num_edges(), 32);
    assert_eq!(g.cell_nodes.len(), 13);
    // outer walls of the first and last cell lead nowhere
    assert!(g.neighbors(g.cell_nodes[0].left).is_empty());
    assert!(g.neighbors(g.cell_nodes[12].right).is_empty());
    assert_eq!(g.position(g.cell_nodes[0].center), Point::new(145.0, 360.0));
}

#[test]
fn adjacency_is_sorted_symmetric_and_loop_free() {
    let g = reference_graph();
    for (i, nbrs) in g.adj.iter().enumerate() {
        let me = NodeId(i);
        assert!(nbrs.windows(2).all(|w| w[0] < w[1]), "node {i} not sorted");
        assert!(!nbrs.contains(&me));
        for &n in nbrs {
            assert!(linked(&g, n, me));
        }
    }
}

#[test]
fn shared_boundaries_become_one_node() {
    let g = reference_graph();
    // cell 1 ends exactly where cell 3 starts
    assert_eq!(g.cell_nodes[1].right, g.cell_nodes[3].left);
    assert_eq!(g.cell_nodes[2].right, g.cell_nodes[4].left);
    // full-height neighbours do not share a midpoint with the split side
    assert_ne!(g.cell_nodes[0].right, g.cell_nodes[1].left);
    assert!(linked(&g, g.cell_nodes[0].right, g.cell_nodes[1].left));
    assert!(linked(&g, g.cell_nodes[0].right, g.cell_nodes[2].left));
}

#[test]
fn merge_events_match_node_count() {
    let cells = reference_cells();
    let mut log = EventLog::default();
    let g = build_graph(&cells, PlanCfg::default(), &mut log);
    let merged = log.count(|e| matches!(e, BuildEvent::NodesMerged { .. }));
    assert_eq!(3 * cells.len() - merged, g.num_nodes());
}

#[test]
fn merge_respects_coincidence_tolerance() {
    let cfg = PlanCfg::default();
    let close = build_graph(&pair(5e-4), cfg, &mut ());
    assert_eq!(close.num_nodes(), 5);
    assert_eq!(close.cell_nodes[0].right, close.cell_nodes[1].left);
    assert_eq!(close.num_edges(), 2);

    let apart = build_graph(&pair(2e-3), cfg, &mut ());
    assert_eq!(apart.num_nodes(), 6);
    assert_eq!(apart.num_edges(), 2);
    let from = apart.cell_nodes[0].center;
    let to = apart.cell_nodes[1].center;
    assert!(dijkstra(&apart, from, to).is_none());

    // a looser tolerance joins them again
    let loose = build_graph(&pair(2e-3), cfg.with_coincide(1e-2), &mut ());
    assert_eq!(loose.num_nodes(), 5);
    assert!(dijkstra(&loose, loose.cell_nodes[0].center, loose.cell_nodes[1].center).is_some());
}

#[test]
fn closed_sides_get_no_center_link() {
    let g = build_graph(&pair(0.0), PlanCfg::default(), &mut ());
    let a = g.cell_nodes[0];
    assert!(!linked(&g, a.center, a.left));
    assert!(linked(&g, a.center, a.right));
}

#[test]
fn dijkstra_on_reference_map() {
    let g = reference_graph();
    let from = g.cell_nodes[0].center;
    let to = g.cell_nodes[12].center;
    let route = dijkstra(&g, from, to).unwrap();
    assert_eq!(route.nodes.first(), Some(&from));
    assert_eq!(route.nodes.last(), Some(&to));
    assert_eq!(route.nodes.len(), 17);
    assert!((route.length - 1024.1655096565175).abs() < 1e-6);
    let summed: f64 = route
        .nodes
        .windows(2)
        .map(|w| {
            assert!(linked(&g, w[0], w[1]));
            g.edge_length(w[0], w[1])
        })
        .sum();
    assert!((summed - route.length).abs() < 1e-9);

    let below = detour(&g, &[0, 1, 3, 5, 6, 9, 11, 12]);
    let above = detour(&g, &[0, 2, 4, 6, 7, 8, 10, 12]);
    assert!(route.length <= below + 1e-9);
    assert!(route.length <= above + 1e-9);
}

#[test]
fn dijkstra_trivial_and_invalid() {
    let g = reference_graph();
    let c = g.cell_nodes[5].center;
    let r = dijkstra(&g, c, c).unwrap();
    assert_eq!(r.nodes, vec![c]);
    assert_eq!(r.length, 0.0);
    assert!(dijkstra(&g, c, NodeId(g.num_nodes())).is_none());
    // isolated wall midpoint
    assert!(dijkstra(&g, c, g.cell_nodes[0].left).is_none());
}

#[test]
fn dijkstra_on_hand_built_graph() {
    // 0 - 1 - 3 is shorter than 0 - 2 - 3; 4 is unreachable
    let g = Graph {
        nodes: vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 5.0),
            Point::new(2.0, 0.0),
            Point::new(9.0, 9.0),
        ],
        adj: vec![
            vec![NodeId(1), NodeId(2)],
            vec![NodeId(0), NodeId(3)],
            vec![NodeId(0), NodeId(3)],
            vec![NodeId(1), NodeId(2)],
            vec![],
        ],
        cell_nodes: vec![],
    };
    let r = dijkstra(&g, NodeId(0), NodeId(3)).unwrap();
    assert_eq!(r.nodes, vec![NodeId(0), NodeId(1), NodeId(3)]);
    assert!((r.length - 2.0).abs() < 1e-12);
    assert!(dijkstra(&g, NodeId(0), NodeId(4)).is_none());
}

#[test]
fn locate_reference_points() {
    let cells = reference_cells();
    let at = |x: f64, y: f64| locate_cell(&cells, Point::new(x, y), 1e-4, 1e-3).map(|c| c.0);
    assert_eq!(at(150.0, 300.0), Some(0));
    assert_eq!(at(680.0, 300.0), Some(12));
    assert_eq!(at(300.0, 550.0), Some(3));
    assert_eq!(at(500.0, 500.0), Some(9));
    assert_eq!(at(250.0, 250.0), Some(2));
    assert_eq!(at(105.0, 125.0), Some(0));
    // inside the right obstacle, and outside the boundary
    assert_eq!(at(600.0, 350.0), None);
    assert_eq!(at(50.0, 300.0), None);
    assert_eq!(at(400.0, 700.0), None);
}

#[test]
fn locate_ignores_collapsed_sides() {
    let tri = Cell::new(
        EdgeId(0),
        EdgeId(1),
        span(0.0, 5.0, 5.0),
        span(8.0, 0.0, 10.0),
        BoundaryKind::ClosedByObstacle,
        BoundaryKind::Open,
    )
    .unwrap();
    assert!(cell_contains(&tri, Point::new(4.0, 5.0), 1e-4, 1e-3));
    assert!(cell_contains(&tri, Point::new(0.0, 5.0), 1e-4, 1e-3));
    assert!(!cell_contains(&tri, Point::new(1.0, 1.0), 1e-4, 1e-3));
    assert!(!cell_contains(&tri, Point::new(9.0, 5.0), 1e-4, 1e-3));
}

fn near_segment(p: Point, s: &Segment, d: f64) -> bool {
    let ab = s.b - s.a;
    let t = ((p - s.a).dot(&ab) / ab.norm_squared()).clamp(0.0, 1.0);
    (s.a + ab * t - p).norm() < d
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn interior_points_have_exactly_one_cell(x in 100.0f64..700.0, y in 120.0f64..600.0) {
        let scene = reference_scene().unwrap();
        let cells = reference_cells();
        let p = Point::new(x, y);
        let margin = 0.05;
        let on_edge = scene
            .polygons()
            .flat_map(|poly| poly.edges())
            .any(|e| near_segment(p, &e, margin));
        let on_wall = cells
            .iter()
            .any(|c| (c.left.x - x).abs() < margin || (c.right.x - x).abs() < margin);
        prop_assume!(!on_edge && !on_wall);

        let free = scene.boundary().contains(p) && !scene.obstacles().iter().any(|o| o.contains(p));
        let hits = cells.iter().filter(|c| cell_contains(c, p, 1e-4, 1e-3)).count();
        prop_assert_eq!(hits, usize::from(free));
    }
}
