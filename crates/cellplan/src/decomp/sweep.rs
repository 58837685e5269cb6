//! Vertical sweep: vertices in `(x, y)` order, rays to the nearest edge,
//! cuts paired into trapezoidal cells.
//!
//! Per vertex
//! - Classify the vertex (`geom2::classify`).
//! - Split the two incident edges into left-going and right-going, each
//!   ordered top to bottom.
//! - Cast the valid rays and emit cuts: closing cuts for the cells that end
//!   at this x, opening cuts for the cells that start here.
//!
//! Pairing
//! - An opening cut waits in `open` under its `(upper, lower)` key. The
//!   closing cut with the same key turns the pair into a cell. Pairs that
//!   meet at the same x (corners on vertical edges) or enclose no area are
//!   consumed silently.
//! - Correctness relies on strict `(x, y)` processing order; there is no
//!   event queue.
//!
//! Contact
//! - A ray may start on another polygon's edge (a vertex touching a wall or
//!   a neighbouring obstacle). Such a hit at distance zero counts only when
//!   the touched edge blocks the ray's direction; otherwise the ray passes
//!   on to the next edge.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use nalgebra::Vector2;
use tracing::{debug, trace, warn};

use super::observe::{BuildEvent, BuildObserver};
use super::types::{BoundaryKind, Cell, CellId, Cut, CutSide, EdgeId, Span};
use crate::cfg::PlanCfg;
use crate::error::PlanError;
use crate::geom2::classify::{departs_free, probe_down, probe_up};
use crate::geom2::{
    classify, classify_segments, cross, Degeneracy, Point, Scene, Segment, SegmentIntersection,
};

/// Cells plus any cuts that never found a partner.
#[derive(Clone, Debug)]
pub struct SweepOutput {
    pub cells: Vec<Cell>,
    pub unmatched: Vec<Cut>,
}

#[derive(Clone, Copy, Debug)]
struct SweepVertex {
    p: Point,
    prev: Point,
    next: Point,
    e_in: EdgeId,  // prev → p
    e_out: EdgeId, // p → next
}

/// Polygon edge `a → b` with the vertex before `a` and the one after `b`.
#[derive(Clone, Copy, Debug)]
struct SweepEdge {
    seg: Segment,
    before: Point,
    after: Point,
}

impl SweepEdge {
    /// Whether a ray leaving `at` (a point on this edge) along `dir` runs
    /// into blocked space.
    fn blocks(&self, at: Point, dir: Vector2<f64>, eps: f64) -> bool {
        let Segment { a, b } = self.seg;
        if (at - a).norm() < eps {
            !departs_free(a, self.before, b, dir)
        } else if (at - b).norm() < eps {
            !departs_free(b, a, self.after, dir)
        } else {
            cross(b - a, dir) > 0.0
        }
    }

    /// Vertical edge on the line `x = p.x` whose y-range holds `p`.
    fn runs_through(&self, p: Point, eps: f64) -> bool {
        let Segment { a, b } = self.seg;
        (a.x - p.x).abs() < eps
            && (b.x - p.x).abs() < eps
            && p.y >= a.y.min(b.y) - eps
            && p.y <= a.y.max(b.y) + eps
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Ray {
    Up,
    Down,
}

#[derive(Clone, Copy, Debug)]
struct Hit {
    edge: EdgeId,
    y: f64,
}

/// Run the sweep over a validated scene.
pub fn sweep(
    scene: &Scene,
    cfg: PlanCfg,
    obs: &mut dyn BuildObserver,
) -> Result<SweepOutput, PlanError> {
    let edges = sweep_edges(scene);
    let mut verts = sweep_vertices(scene);
    verts.sort_by(|a, b| match a.p.x.partial_cmp(&b.p.x) {
        Some(Ordering::Equal) | None => a.p.y.partial_cmp(&b.p.y).unwrap_or(Ordering::Equal),
        Some(o) => o,
    });

    let mut open: BTreeMap<(EdgeId, EdgeId), Cut> = BTreeMap::new();
    let mut cells: Vec<Cell> = Vec::new();
    let mut unmatched: Vec<Cut> = Vec::new();

    for v in &verts {
        let ext = classify(v.p, v.prev, v.next, cfg.probe_shear);
        trace!(x = v.p.x, y = v.p.y, ?ext, "vertex");
        obs.on_event(&BuildEvent::VertexVisited {
            vertex: v.p,
            extension: ext,
        });

        let up = if ext.up() {
            Some(cast(&edges, v, Ray::Up, &cfg, obs)?)
        } else {
            None
        };
        let down = if ext.down() {
            Some(cast(&edges, v, Ray::Down, &cfg, obs)?)
        } else {
            None
        };

        let (left, right) = split_incident(v, cfg.probe_shear);
        for cut in side_cuts(&left, up, down, v.p, CutSide::Closes, &cfg, obs) {
            let Some(start) = open.remove(&cut.key()) else {
                warn!(
                    upper = cut.upper.0,
                    lower = cut.lower.0,
                    x = cut.span.x,
                    "closing cut has no partner"
                );
                obs.on_event(&BuildEvent::CutUnmatched(cut));
                unmatched.push(cut);
                continue;
            };
            match close_cell(&start, &cut, cfg.eps_coincide) {
                Some(cell) => {
                    obs.on_event(&BuildEvent::CellClosed {
                        cell: CellId(cells.len()),
                        upper: cut.upper,
                        lower: cut.lower,
                    });
                    cells.push(cell);
                }
                None => obs.on_event(&BuildEvent::DegeneratePair {
                    upper: cut.upper,
                    lower: cut.lower,
                    x: cut.span.x,
                }),
            }
        }
        for cut in side_cuts(&right, up, down, v.p, CutSide::Opens, &cfg, obs) {
            obs.on_event(&BuildEvent::CutOpened(cut));
            if let Some(stale) = open.insert(cut.key(), cut) {
                warn!(
                    upper = stale.upper.0,
                    lower = stale.lower.0,
                    x = stale.span.x,
                    "opening cut replaced"
                );
                obs.on_event(&BuildEvent::CutUnmatched(stale));
                unmatched.push(stale);
            }
        }
    }

    for (_, cut) in open {
        warn!(upper = cut.upper.0, lower = cut.lower.0, x = cut.span.x, "cut left open");
        obs.on_event(&BuildEvent::CutUnmatched(cut));
        unmatched.push(cut);
    }

    let kinds = boundary_kinds(&cells, cfg.eps_coincide);
    for (cell, (left_kind, right_kind)) in cells.iter_mut().zip(kinds) {
        cell.left_kind = left_kind;
        cell.right_kind = right_kind;
    }
    debug!(
        vertices = verts.len(),
        edges = edges.len(),
        cells = cells.len(),
        unmatched = unmatched.len(),
        "sweep done"
    );
    Ok(SweepOutput { cells, unmatched })
}

fn sweep_vertices(scene: &Scene) -> Vec<SweepVertex> {
    let mut out = Vec::new();
    let mut base = 0;
    for poly in scene.polygons() {
        let n = poly.len();
        for (i, &p) in poly.vertices().iter().enumerate() {
            out.push(SweepVertex {
                p,
                prev: poly.prev(i),
                next: poly.next(i),
                e_in: EdgeId(base + (i + n - 1) % n),
                e_out: EdgeId(base + i),
            });
        }
        base += n;
    }
    out
}

fn sweep_edges(scene: &Scene) -> Vec<SweepEdge> {
    let mut out = Vec::new();
    for poly in scene.polygons() {
        let n = poly.len();
        for (i, seg) in poly.edges().enumerate() {
            out.push(SweepEdge {
                seg,
                before: poly.prev(i),
                after: poly.next((i + 1) % n),
            });
        }
    }
    out
}

/// Cell between a waiting opening cut and its closing partner; `None` when
/// the pair encloses no area. Boundary kinds are settled after the sweep.
pub(super) fn close_cell(start: &Cut, end: &Cut, eps: f64) -> Option<Cell> {
    let thin = end.span.x - start.span.x <= eps;
    let flat = start.span.length() <= eps && end.span.length() <= eps;
    if thin || flat {
        return None;
    }
    Cell::new(
        end.upper,
        end.lower,
        start.span,
        end.span,
        BoundaryKind::ClosedByObstacle,
        BoundaryKind::ClosedByObstacle,
    )
}

/// Incident edges as `(left-going, right-going)`, each ordered top to bottom.
///
/// A vertical edge counts as right-going when it points down, left-going
/// when it points up (same shear as the probes).
fn split_incident(v: &SweepVertex, shear: f64) -> (Vec<EdgeId>, Vec<EdgeId>) {
    let mut left: Vec<(f64, EdgeId)> = Vec::with_capacity(2);
    let mut right: Vec<(f64, EdgeId)> = Vec::with_capacity(2);
    for (other, edge) in [(v.prev, v.e_in), (v.next, v.e_out)] {
        let d = other - v.p;
        let dx = d.x + shear * d.y;
        let slope = d.y / dx;
        if dx > 0.0 {
            right.push((slope, edge));
        } else {
            left.push((slope, edge));
        }
    }
    // right side: smaller slope is higher; left side: larger slope is higher
    right.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
    left.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
    (
        left.into_iter().map(|(_, e)| e).collect(),
        right.into_iter().map(|(_, e)| e).collect(),
    )
}

/// Nearest non-incident edge struck by the vertical ray from `v`.
///
/// Ties at a shared endpoint go to the edge that continues on the ray's
/// sheared side: to the right of `v.x` going up, to the left going down.
/// A vertical edge touched by the vertex wins any tie.
fn cast(
    edges: &[SweepEdge],
    v: &SweepVertex,
    ray: Ray,
    cfg: &PlanCfg,
    obs: &mut dyn BuildObserver,
) -> Result<Hit, PlanError> {
    let x = v.p.x;
    let (far, dir) = match ray {
        Ray::Up => (Point::new(x, -cfg.ray_reach), probe_up(cfg.probe_shear)),
        Ray::Down => (Point::new(x, cfg.ray_reach), probe_down(cfg.probe_shear)),
    };
    let probe = Segment::new(v.p, far);
    let mut best: Option<((f64, f64), Hit)> = None;
    for (i, e) in edges.iter().enumerate() {
        let id = EdgeId(i);
        if id == v.e_in || id == v.e_out {
            continue;
        }
        let p = match classify_segments(&e.seg, &probe, cfg.eps_tight, cfg.eps_coincide) {
            SegmentIntersection::Point(p) => p,
            SegmentIntersection::Degenerate(Degeneracy::BothVertical)
                if e.runs_through(v.p, cfg.eps_tight) =>
            {
                v.p
            }
            _ => continue,
        };
        let vertical = e.seg.is_vertical(cfg.eps_tight);
        let behind = match ray {
            Ray::Up => p.y > v.p.y,
            Ray::Down => p.y < v.p.y,
        };
        if (p.y - v.p.y).abs() < cfg.eps_tight {
            if !e.blocks(p, dir, cfg.eps_coincide) {
                continue;
            }
        } else if behind {
            continue;
        }
        let off_side = match ray {
            Ray::Up => e.seg.max_x() < x + cfg.eps_tight,
            Ray::Down => e.seg.min_x() > x - cfg.eps_tight,
        };
        if !vertical && off_side {
            continue;
        }
        let key = match ray {
            Ray::Up if vertical => (-p.y, f64::NEG_INFINITY),
            Ray::Up => (-p.y, -e.seg.y_at(x + cfg.eps_coincide)),
            Ray::Down if vertical => (p.y, f64::NEG_INFINITY),
            Ray::Down => (p.y, e.seg.y_at(x - cfg.eps_coincide)),
        };
        let better = match &best {
            None => true,
            Some((k, _)) if (key.0 - k.0).abs() < cfg.eps_tight => key.1 < k.1,
            Some((k, _)) => key.0 < k.0,
        };
        if better {
            best = Some((key, Hit { edge: id, y: p.y }));
        }
    }
    let (_, hit) = best.ok_or(PlanError::OpenRegion { vertex: v.p })?;
    obs.on_event(&BuildEvent::RayHit {
        from: v.p,
        edge: hit.edge,
        at: Point::new(x, hit.y),
    });
    Ok(hit)
}

/// Cuts on one side of a vertex, given that side's incident edges (top to bottom).
///
/// A span that comes out inverted beyond the coincidence tolerance bounds
/// nothing; it is reported as a degenerate pair and skipped.
fn side_cuts(
    incident: &[EdgeId],
    up: Option<Hit>,
    down: Option<Hit>,
    v: Point,
    side: CutSide,
    cfg: &PlanCfg,
    obs: &mut dyn BuildObserver,
) -> Vec<Cut> {
    let mut bounds: Vec<(EdgeId, EdgeId, f64, f64)> = Vec::with_capacity(2);
    match (incident.first(), incident.last()) {
        (Some(&top), Some(&bottom)) => {
            if let Some(t) = up {
                bounds.push((t.edge, top, t.y, v.y));
            }
            if let Some(b) = down {
                bounds.push((bottom, b.edge, v.y, b.y));
            }
            // free wedge between two same-side edges: zero-length seed cut
            if incident.len() == 2 && up.is_none() && down.is_none() {
                bounds.push((top, bottom, v.y, v.y));
            }
        }
        _ => {
            if let (Some(t), Some(b)) = (up, down) {
                bounds.push((t.edge, b.edge, t.y, b.y));
            }
        }
    }
    let mut out = Vec::with_capacity(bounds.len());
    for (upper, lower, y_top, y_bottom) in bounds {
        match Span::new(v.x, y_top, y_bottom, cfg.eps_coincide) {
            Some(span) => out.push(Cut {
                upper,
                lower,
                span,
                side,
            }),
            None => {
                trace!(upper = upper.0, lower = lower.0, y_top, y_bottom, "inverted cut");
                obs.on_event(&BuildEvent::DegeneratePair {
                    upper,
                    lower,
                    x: v.x,
                });
            }
        }
    }
    out
}

/// A boundary is open iff it has length and another cell faces it across
/// the same x with a positive common y-range.
fn boundary_kinds(cells: &[Cell], eps: f64) -> Vec<(BoundaryKind, BoundaryKind)> {
    let faces = |span: &Span, me: usize, left_side: bool| -> BoundaryKind {
        if span.length() <= eps {
            return BoundaryKind::ClosedByObstacle;
        }
        let touching = cells.iter().enumerate().any(|(j, t)| {
            let other = if left_side { &t.right } else { &t.left };
            j != me && (other.x - span.x).abs() < eps && span.overlap(other) > eps
        });
        if touching {
            BoundaryKind::Open
        } else {
            BoundaryKind::ClosedByObstacle
        }
    };
    cells
        .iter()
        .enumerate()
        .map(|(i, t)| (faces(&t.left, i, true), faces(&t.right, i, false)))
        .collect()
}
