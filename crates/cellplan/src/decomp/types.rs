//! Cuts, spans, and cells produced by the sweep.
//!
//! Kept small and explicit; the sweep and the graph builder only talk
//! through these types.

use crate::geom2::Point;

/// Index into the concatenated edge list (boundary first, then obstacles).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub usize);

/// Position of a cell in `Decomposition::cells`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub usize);

/// Vertical interval `x = const, y_top ..= y_bottom` (screen y grows downward).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Span {
    pub x: f64,
    pub y_top: f64,
    pub y_bottom: f64,
}

impl Span {
    /// Validated constructor: `None` if `y_top` exceeds `y_bottom` by more
    /// than `eps`; smaller inversions are clamped to a point.
    pub fn new(x: f64, y_top: f64, y_bottom: f64, eps: f64) -> Option<Self> {
        if y_top > y_bottom + eps {
            return None;
        }
        Some(Self {
            x,
            y_top: y_top.min(y_bottom),
            y_bottom,
        })
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.y_bottom - self.y_top
    }

    #[inline]
    pub fn top(&self) -> Point {
        Point::new(self.x, self.y_top)
    }

    #[inline]
    pub fn bottom(&self) -> Point {
        Point::new(self.x, self.y_bottom)
    }

    #[inline]
    pub fn midpoint(&self) -> Point {
        Point::new(self.x, 0.5 * (self.y_top + self.y_bottom))
    }

    /// Signed length of the common y-range (negative when disjoint).
    #[inline]
    pub fn overlap(&self, other: &Span) -> f64 {
        self.y_bottom.min(other.y_bottom) - self.y_top.max(other.y_top)
    }
}

/// Which neighbour of the vertex a cut bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CutSide {
    /// Left wall of a cell that continues to the right.
    Opens,
    /// Right wall of a cell that started further left.
    Closes,
}

/// Candidate vertical boundary between the `upper` and `lower` edges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cut {
    pub upper: EdgeId,
    pub lower: EdgeId,
    pub span: Span,
    pub side: CutSide,
}

impl Cut {
    /// Pairing key: the two edges bounding the cell.
    #[inline]
    pub fn key(&self) -> (EdgeId, EdgeId) {
        (self.upper, self.lower)
    }
}

/// Whether a cell boundary borders another cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundaryKind {
    Open,
    ClosedByObstacle,
}

impl BoundaryKind {
    #[inline]
    pub fn is_open(self) -> bool {
        matches!(self, BoundaryKind::Open)
    }
}

/// Trapezoid between two vertical spans, bounded above by `upper` and below by `lower`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub upper: EdgeId,
    pub lower: EdgeId,
    pub left: Span,
    pub right: Span,
    pub left_kind: BoundaryKind,
    pub right_kind: BoundaryKind,
}

impl Cell {
    /// Validated constructor: requires `left.x < right.x`.
    pub fn new(
        upper: EdgeId,
        lower: EdgeId,
        left: Span,
        right: Span,
        left_kind: BoundaryKind,
        right_kind: BoundaryKind,
    ) -> Option<Self> {
        if left.x >= right.x {
            return None;
        }
        Some(Self {
            upper,
            lower,
            left,
            right,
            left_kind,
            right_kind,
        })
    }

    /// Corners in boundary order: left-top, right-top, right-bottom, left-bottom.
    #[inline]
    pub fn corners(&self) -> [Point; 4] {
        [
            self.left.top(),
            self.right.top(),
            self.right.bottom(),
            self.left.bottom(),
        ]
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.right.x - self.left.x
    }

    #[inline]
    pub fn area(&self) -> f64 {
        0.5 * self.width() * (self.left.length() + self.right.length())
    }

    /// Average of the four corners; inside the cell even when one side is a point.
    #[inline]
    pub fn center(&self) -> Point {
        let c = self.corners();
        (c[0] + c[1] + c[2] + c[3]) * 0.25
    }
}
