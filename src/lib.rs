//! Track cones, vehicle containers and camera-based cone detection for
//! offline Formula Student simulation.

pub use car::{Car, CarState, CarStructure};
pub use cgmath;
pub use cone::{Cone, ConeArray, ConeKind};
#[cfg(feature = "debug")]
pub use debug::take_debug_frame;
pub use detection::{Camera, CameraParams, DetectionRegion, Locate};
pub use error::{Result, ValidationError};

mod car;
mod cone;
mod debug;
pub mod detection;
pub mod error;
pub mod math;
