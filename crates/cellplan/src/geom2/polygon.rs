//! Polygons, scenes, and the fixed flat-list map layout.
//!
//! A `Scene` holds one boundary polygon (free space inside) and any number
//! of obstacles (free space outside). `Scene::new` validates every polygon
//! and re-winds it: obstacles to positive signed area, the boundary to
//! negative, so the blocked side is uniform for the classifier.
//!
//! Obstacles may touch the boundary or each other along edges and at
//! vertices, but no obstacle vertex may sit on a boundary corner.

use super::intersect::intersect_strict;
use super::types::{cross, Affine2, Point, Segment};
use crate::cfg::{COINCIDE_EPS, TIGHT_EPS};
use crate::error::PlanError;

/// Ordered cyclic vertex list.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    /// Wrap a vertex list as is; `Scene::new` validates.
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Shoelace area; positive when `cross(p_i, p_{i+1})` sums positive.
    pub fn signed_area(&self) -> f64 {
        let n = self.vertices.len();
        (0..n)
            .map(|i| cross(self.vertices[i], self.vertices[(i + 1) % n]))
            .sum::<f64>()
            * 0.5
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Edge `i` runs from vertex `i` to vertex `i + 1` (wrapping).
    pub fn edges(&self) -> impl Iterator<Item = Segment> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| Segment::new(self.vertices[i], self.vertices[(i + 1) % n]))
    }

    #[inline]
    pub fn prev(&self, i: usize) -> Point {
        let n = self.vertices.len();
        self.vertices[(i + n - 1) % n]
    }

    #[inline]
    pub fn next(&self, i: usize) -> Point {
        self.vertices[(i + 1) % self.vertices.len()]
    }

    /// Even-odd containment (ray crossing); used for fixture checks and sampling bounds.
    pub fn contains(&self, p: Point) -> bool {
        let n = self.vertices.len();
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let (a, b) = (self.vertices[i], self.vertices[j]);
            if (a.y > p.y) != (b.y > p.y) {
                let x = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
                if p.x < x {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// Axis-aligned bounds as `(min, max)` corners.
    pub fn bounds(&self) -> (Point, Point) {
        let mut lo = Point::new(f64::INFINITY, f64::INFINITY);
        let mut hi = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for v in &self.vertices {
            lo = lo.inf(v);
            hi = hi.sup(v);
        }
        (lo, hi)
    }

    fn validate(&self, polygon: usize) -> Result<(), PlanError> {
        if self.vertices.len() < 3 {
            return Err(PlanError::UnclassifiableVertex {
                polygon,
                vertex: 0,
                reason: "polygon needs at least 3 vertices",
            });
        }
        for (vertex, edge) in self.edges().enumerate() {
            if edge.length() < TIGHT_EPS {
                return Err(PlanError::UnclassifiableVertex {
                    polygon,
                    vertex,
                    reason: "zero-length adjacent edge",
                });
            }
        }
        let n = self.vertices.len();
        let edges: Vec<Segment> = self.edges().collect();
        for i in 0..n {
            // skip the neighbours, which share an endpoint with edge i
            for j in i + 2..n {
                if i == 0 && j == n - 1 {
                    continue;
                }
                if intersect_strict(&edges[i], &edges[j]).is_some() {
                    return Err(PlanError::UnclassifiableVertex {
                        polygon,
                        vertex: i,
                        reason: "self-intersecting polygon",
                    });
                }
            }
        }
        Ok(())
    }

    fn wound(mut self, positive: bool) -> Self {
        if (self.signed_area() > 0.0) != positive {
            self.vertices.reverse();
        }
        self
    }
}

/// Boundary plus obstacles, validated and consistently wound.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    boundary: Polygon,
    obstacles: Vec<Polygon>,
}

impl Scene {
    pub fn new(boundary: Polygon, obstacles: Vec<Polygon>) -> Result<Self, PlanError> {
        boundary.validate(0)?;
        for (k, o) in obstacles.iter().enumerate() {
            o.validate(k + 1)?;
            let on_corner = o.vertices.iter().position(|v| {
                boundary
                    .vertices
                    .iter()
                    .any(|c| (v - c).norm() < COINCIDE_EPS)
            });
            if let Some(vertex) = on_corner {
                return Err(PlanError::UnclassifiableVertex {
                    polygon: k + 1,
                    vertex,
                    reason: "obstacle vertex on a boundary corner",
                });
            }
        }
        Ok(Self {
            boundary: boundary.wound(false),
            obstacles: obstacles.into_iter().map(|o| o.wound(true)).collect(),
        })
    }

    #[inline]
    pub fn boundary(&self) -> &Polygon {
        &self.boundary
    }

    #[inline]
    pub fn obstacles(&self) -> &[Polygon] {
        &self.obstacles
    }

    /// Boundary first, then obstacles; this order defines `EdgeId`s.
    pub fn polygons(&self) -> impl Iterator<Item = &Polygon> + '_ {
        std::iter::once(&self.boundary).chain(self.obstacles.iter())
    }

    /// Boundary area minus obstacle areas.
    pub fn free_area(&self) -> f64 {
        self.boundary.area() - self.obstacles.iter().map(Polygon::area).sum::<f64>()
    }
}

/// Fixed positional layout of a flat point list plus its screen transform.
#[derive(Clone, Debug, PartialEq)]
pub struct MapLayout {
    /// Vertex count per polygon; the first polygon is the boundary.
    pub counts: Vec<usize>,
    pub transform: Affine2,
}

impl MapLayout {
    /// Boundary rectangle, two pentagons; `(x, y) ↦ (60x + 100, 600 - 60y)`.
    pub fn reference() -> Self {
        Self {
            counts: vec![4, 5, 5],
            transform: Affine2::screen(60.0, 100.0, 600.0),
        }
    }

    #[inline]
    pub fn expected_points(&self) -> usize {
        self.counts.iter().sum()
    }

    #[inline]
    pub fn to_screen(&self, p: Point) -> Point {
        self.transform.apply(p)
    }

    /// Inverse transform; `None` for a singular layout transform.
    #[inline]
    pub fn to_world(&self, p: Point) -> Option<Point> {
        self.transform.inverse().map(|inv| inv.apply(p))
    }

    /// Split and transform a flat world-coordinate list into a scene.
    pub fn scene_from_flat(&self, points: &[Point]) -> Result<Scene, PlanError> {
        let expected = self.expected_points();
        if points.len() != expected || self.counts.is_empty() {
            return Err(PlanError::InvalidLayout {
                expected,
                found: points.len(),
            });
        }
        let mut polys = Vec::with_capacity(self.counts.len());
        let mut at = 0;
        for &n in &self.counts {
            let verts = points[at..at + n].iter().map(|&p| self.to_screen(p)).collect();
            polys.push(Polygon::new(verts));
            at += n;
        }
        let boundary = polys.remove(0);
        Scene::new(boundary, polys)
    }
}
