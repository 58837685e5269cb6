//! Point location by signed half-plane tests against each cell's four sides.

use crate::decomp::{Cell, CellId};
use crate::geom2::{Point, Segment};

/// True iff `p` is on the inner side (within `eps_tight`) of every side of
/// `cell` longer than `eps_edge`.
///
/// Corners run left-top, right-top, right-bottom, left-bottom; in screen
/// coordinates the inside has positive signed distance.
pub fn cell_contains(cell: &Cell, p: Point, eps_tight: f64, eps_edge: f64) -> bool {
    let c = cell.corners();
    (0..4).all(|k| {
        let side = Segment::new(c[k], c[(k + 1) % 4]);
        side.length() < eps_edge || side.signed_distance(p) >= -eps_tight
    })
}

/// First cell containing `p`, if any.
pub fn locate_cell(cells: &[Cell], p: Point, eps_tight: f64, eps_edge: f64) -> Option<CellId> {
    cells
        .iter()
        .position(|c| cell_contains(c, p, eps_tight, eps_edge))
        .map(CellId)
}
