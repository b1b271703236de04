//! Cone detection by onboard sensors.

use crate::math::Point2d;
use crate::Cone;
pub use camera::{Camera, CameraParams};
pub use region::DetectionRegion;

mod camera;
mod region;

/// Anything with a world space position that a sensor can test against its region.
pub trait Locate {
    /// The world space position of the object.
    fn location(&self) -> Point2d;
}

impl Locate for Point2d {
    fn location(&self) -> Point2d {
        *self
    }
}

impl Locate for Cone {
    fn location(&self) -> Point2d {
        self.position()
    }
}

impl<T: Locate + ?Sized> Locate for &T {
    fn location(&self) -> Point2d {
        (**self).location()
    }
}
