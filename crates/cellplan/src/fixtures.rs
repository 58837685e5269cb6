//! Reference map: boundary rectangle plus two pentagons, in world units.
//!
//! Flat layout as read from a map file: 4 boundary points, then 5 + 5
//! obstacle points. `MapLayout::reference()` turns it into screen space.

use nalgebra::Vector2;

use crate::error::PlanError;
use crate::geom2::{MapLayout, Point, Scene};

pub const REFERENCE_MAP: [(f64, f64); 14] = [
    (0.0, 0.0),
    (10.0, 0.0),
    (10.0, 8.0),
    (0.0, 8.0),
    (2.0, 2.0),
    (4.0, 1.5),
    (5.0, 3.5),
    (3.5, 5.5),
    (1.5, 4.0),
    (6.0, 4.0),
    (8.5, 3.0),
    (9.0, 6.0),
    (7.5, 7.0),
    (6.5, 6.2),
];

pub fn reference_points() -> Vec<Point> {
    REFERENCE_MAP
        .iter()
        .map(|&(x, y)| Vector2::new(x, y))
        .collect()
}

/// Reference map in screen coordinates.
pub fn reference_scene() -> Result<Scene, PlanError> {
    MapLayout::reference().scene_from_flat(&reference_points())
}
