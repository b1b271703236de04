use super::{cross, Point2d};
use cgmath::prelude::*;

/// Relative tolerance used when classifying points near an edge.
/// Scaled by the length of the triangle's longest edge.
pub const EDGE_TOLERANCE: f64 = 1e-9;

/// A triangle in 2D space.
///
/// Containment is boundary inclusive: points lying on an edge or vertex
/// (within [EDGE_TOLERANCE]) are inside, whatever the winding order.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Triangle2d {
    vertices: [Point2d; 3],
}

impl Triangle2d {
    /// Creates a new triangle from its three vertices.
    pub const fn new(a: Point2d, b: Point2d, c: Point2d) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    /// Gets the vertices of the triangle, in construction order.
    pub fn vertices(&self) -> &[Point2d; 3] {
        &self.vertices
    }

    /// Gets the three edges of the triangle as pairs of end points.
    pub fn edges(&self) -> [[Point2d; 2]; 3] {
        let [a, b, c] = self.vertices;
        [[a, b], [b, c], [c, a]]
    }

    /// The signed area of the triangle.
    /// Positive when the vertices wind counter-clockwise.
    pub fn signed_area(&self) -> f64 {
        let [a, b, c] = self.vertices;
        0.5 * cross(b - a, c - a)
    }

    /// The length of the longest edge.
    fn extent(&self) -> f64 {
        self.edges()
            .iter()
            .map(|[p, q]| p.distance(*q))
            .fold(0.0, f64::max)
    }

    /// Returns true if the point lies inside the triangle or on its boundary.
    pub fn contains(&self, point: Point2d) -> bool {
        let extent = self.extent();
        let margin = EDGE_TOLERANCE * extent;
        let tol = margin * extent;

        // Reject points outside the bounding box first; this also keeps
        // collapsed triangles from claiming their whole supporting line.
        let [a, b, c] = self.vertices;
        let min_x = a.x.min(b.x).min(c.x) - margin;
        let max_x = a.x.max(b.x).max(c.x) + margin;
        let min_y = a.y.min(b.y).min(c.y) - margin;
        let max_y = a.y.max(b.y).max(c.y) + margin;
        if point.x < min_x || point.x > max_x || point.y < min_y || point.y > max_y {
            return false;
        }

        let mut has_pos = false;
        let mut has_neg = false;
        for [p, q] in self.edges() {
            let side = cross(q - p, point - p);
            has_pos |= side > tol;
            has_neg |= side < -tol;
        }
        !(has_pos && has_neg)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::{Rng, SeedableRng};

    fn unit() -> Triangle2d {
        Triangle2d::new(
            Point2d::new(0.0, 0.0),
            Point2d::new(4.0, 0.0),
            Point2d::new(0.0, 4.0),
        )
    }

    #[test]
    fn interior_and_exterior() {
        let tri = unit();
        assert!(tri.contains(Point2d::new(1.0, 1.0)));
        assert!(!tri.contains(Point2d::new(3.0, 3.0)));
        assert!(!tri.contains(Point2d::new(-0.5, 1.0)));
        assert!(!tri.contains(Point2d::new(5.0, 0.0)));
    }

    #[test]
    fn boundary_is_inside() {
        let tri = unit();
        for p in [
            Point2d::new(0.0, 0.0),
            Point2d::new(4.0, 0.0),
            Point2d::new(2.0, 0.0),
            Point2d::new(0.0, 2.0),
            Point2d::new(2.0, 2.0),
        ] {
            assert!(tri.contains(p), "{:?} should be on the boundary", p);
        }
    }

    #[test]
    fn winding_does_not_matter() {
        let [a, b, c] = *unit().vertices();
        let reversed = Triangle2d::new(c, b, a);
        assert!(unit().signed_area() > 0.0);
        assert!(reversed.signed_area() < 0.0);

        let mut rng = rand::rngs::StdRng::from_seed(*b"Vegemite sandwhich is not fun...");
        for _i in 0..200 {
            let p = Point2d::new(rng.gen_range(-1.0..5.0), rng.gen_range(-1.0..5.0));
            assert_eq!(unit().contains(p), reversed.contains(p));
        }
    }

    #[test]
    fn collapsed_triangle() {
        let tri = Triangle2d::new(
            Point2d::new(0.0, 0.0),
            Point2d::new(1.0, 1.0),
            Point2d::new(2.0, 2.0),
        );
        assert_eq!(tri.signed_area(), 0.0);
        assert!(tri.contains(Point2d::new(1.5, 1.5)));
        assert!(!tri.contains(Point2d::new(3.0, 3.0)));
        assert!(!tri.contains(Point2d::new(1.0, 0.0)));
    }
}
