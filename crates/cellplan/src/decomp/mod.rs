//! Exact (vertical trapezoidal) cell decomposition.
//!
//! Purpose
//! - Sweep the scene's vertices left to right, extend vertical rays from
//!   each vertex to the nearest edge, and pair the resulting cuts into
//!   trapezoidal cells.
//! - Report progress through an explicit `BuildObserver` rather than global
//!   debug state.
//!
//! Invariants
//! - Every cut is paired or reported as unmatched (none for closed scenes).
//! - Cells satisfy `left.x < right.x` and `y_top <= y_bottom` on both spans.
//! - Cell areas sum to the scene's free area.

mod observe;
mod sweep;
mod types;

pub use observe::{BuildEvent, BuildObserver, EventLog};
pub use sweep::{sweep, SweepOutput};
pub use types::{BoundaryKind, Cell, CellId, Cut, CutSide, EdgeId, Span};
