use crate::math::{polar_offset, Point2d, Triangle2d};

/// The area covered by a sensor's field of view.
///
/// The circular sector swept by the field of view is approximated by two
/// triangles sharing the chord between the ends of the boundary rays:
/// the `core` wedge from the sensor to the chord, and the `far` cap from
/// the chord to the point at full range straight ahead.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DetectionRegion {
    core: Triangle2d,
    far: Triangle2d,
}

impl DetectionRegion {
    /// Computes the detection region of a sensor.
    ///
    /// # Parameters
    /// * `position` - The position of the sensor
    /// * `orientation` - The heading of the sensor in radians
    /// * `field_of_view` - The full angular width of the field of view in radians
    /// * `range` - The maximum detection distance
    pub fn new(position: Point2d, orientation: f64, field_of_view: f64, range: f64) -> Self {
        let half = 0.5 * field_of_view;
        let far_center = polar_offset(position, orientation, range);
        let left_boundary = polar_offset(position, orientation - half, range);
        let right_boundary = polar_offset(position, orientation + half, range);
        Self {
            core: Triangle2d::new(position, left_boundary, right_boundary),
            far: Triangle2d::new(left_boundary, right_boundary, far_center),
        }
    }

    /// The wedge between the sensor and the chord joining the boundary rays.
    pub fn core(&self) -> &Triangle2d {
        &self.core
    }

    /// The cap between the chord and the point at full range straight ahead.
    pub fn far(&self) -> &Triangle2d {
        &self.far
    }

    pub fn triangles(&self) -> [&Triangle2d; 2] {
        [&self.core, &self.far]
    }

    /// The point at full range along the sensor's heading.
    pub fn far_center(&self) -> Point2d {
        self.far.vertices()[2]
    }

    /// Returns true if the point lies within either triangle, boundaries included.
    pub fn contains(&self, point: Point2d) -> bool {
        self.core.contains(point) || self.far.contains(point)
    }
}
