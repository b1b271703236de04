use crate::detection::Camera;
use crate::math::Point2d;
use crate::ConeArray;

/// The state of the car at a given instant of a run.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CarState {
    /// The position of the car in m.
    pub position: Point2d,
    /// The heading of the front of the car in radians.
    pub orientation: f64,
    /// The steering angle of the front wheels in radians.
    pub steering: f64,
    /// The speed of the car in m/s.
    pub speed: f64,
    /// The acceleration of the car in m/s^2.
    pub acceleration: f64,
    /// The torque of the engine in Nm.
    pub torque: f64,
}

impl Default for CarState {
    fn default() -> Self {
        Self {
            position: Point2d::new(0.0, 0.0),
            orientation: 0.0,
            steering: 0.0,
            speed: 0.0,
            acceleration: 0.0,
            torque: 0.0,
        }
    }
}

/// The static, time-independent dimensions and limits of the car.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CarStructure {
    /// Distance from the back of the car to the rear axle in m.
    pub back_to_wheel: f64,
    /// The car length in m.
    pub length: f64,
    /// The maximum acceleration in m/s^2.
    pub max_acceleration: f64,
    /// The maximum downsteering angle in radians.
    pub max_downsteering: f64,
    /// The maximum speed in m/s.
    pub max_speed: f64,
    /// The maximum steering angle in radians.
    pub max_steering: f64,
    /// The minimum speed in m/s.
    pub min_speed: f64,
    /// Distance between the left and right wheels in m.
    pub tread: f64,
    /// Distance between the front and rear axles in m.
    pub wheel_base: f64,
    /// The wheel length in m.
    pub wheel_length: f64,
    /// The wheel width in m.
    pub wheel_width: f64,
    /// The car width in m.
    pub width: f64,
}

/// A car on track, with its current state, structure and detection hardware.
#[derive(Clone, Debug)]
pub struct Car {
    pub state: CarState,
    pub structure: CarStructure,
    camera: Option<Camera>,
}

impl Car {
    /// Creates a new car without a camera.
    pub fn new(state: CarState, structure: CarStructure) -> Self {
        Self {
            state,
            structure,
            camera: None,
        }
    }

    /// Mounts a camera on the car.
    pub fn with_camera(mut self, camera: Camera) -> Self {
        self.camera = Some(camera);
        self
    }

    pub fn camera(&self) -> Option<&Camera> {
        self.camera.as_ref()
    }

    pub fn camera_mut(&mut self) -> Option<&mut Camera> {
        self.camera.as_mut()
    }

    /// Removes the camera from the car and returns it.
    pub fn take_camera(&mut self) -> Option<Camera> {
        self.camera.take()
    }

    /// Runs the camera over the cone arrays, returning the detections,
    /// or `None` if the car has no camera.
    pub fn detect(&mut self, cone_arrays: &[&ConeArray]) -> Option<&[ConeArray]> {
        let camera = self.camera.as_mut()?;
        camera.detect(cone_arrays);
        Some(camera.detected())
    }
}
