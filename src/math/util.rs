use super::{Point2d, Vector2d};

/// Rotates a vector 90 degrees counter-clockwise.
pub fn rot90(vec: Vector2d) -> Vector2d {
    Vector2d::new(-vec.y, vec.x)
}

/// The z-component of the cross product of two vectors.
/// Positive when `b` is counter-clockwise from `a`.
#[inline(always)]
pub fn cross(a: Vector2d, b: Vector2d) -> f64 {
    a.x * b.y - a.y * b.x
}

/// The unit vector pointing along `angle`, in radians from the positive x-axis.
#[inline(always)]
pub fn heading(angle: f64) -> Vector2d {
    let (sin, cos) = angle.sin_cos();
    Vector2d::new(cos, sin)
}

/// The point `distance` away from `origin` along the heading `angle`.
pub fn polar_offset(origin: Point2d, angle: f64, distance: f64) -> Point2d {
    origin + distance * heading(angle)
}

/// Returns true if both coordinates of the point are finite.
pub fn is_finite(point: Point2d) -> bool {
    point.x.is_finite() && point.y.is_finite()
}
