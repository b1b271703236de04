use super::{DetectionRegion, Locate};
use crate::debug::{debug_point, debug_triangle};
use crate::error::{Result, ValidationError};
use crate::math::{is_finite, Point2d};
use crate::ConeArray;
use itertools::Itertools;
use smallvec::SmallVec;
use std::f64::consts::TAU;
use std::fmt;

/// The pose and field of view of a camera.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CameraParams {
    /// The position of the centre of the lens.
    pub position: Point2d,
    /// The heading of the lens in radians.
    pub orientation: f64,
    /// The full angular width of the field of view in radians, within [0, 2π].
    pub field_of_view: f64,
    /// The maximum detection distance, non-negative.
    pub range: f64,
}

/// An onboard camera which detects the cones within its field of view.
///
/// The detection region is rebuilt whenever a parameter changes,
/// so it always matches the current parameters.
#[derive(Clone, Debug)]
pub struct Camera {
    /// The validated camera parameters.
    params: CameraParams,
    /// The area in which cones are detected.
    region: DetectionRegion,
    /// The cones found by the last call to `detect`, grouped by input array.
    detected: SmallVec<[ConeArray; 4]>,
}

impl Camera {
    /// Creates a new camera.
    pub fn new(params: CameraParams) -> Result<Self> {
        let position = check_position(params.position)?;
        let orientation = check_orientation(params.orientation)?;
        let field_of_view = check_field_of_view(params.field_of_view)?;
        let range = check_range(params.range)?;
        let params = CameraParams {
            position,
            orientation,
            field_of_view,
            range,
        };
        Ok(Self {
            params,
            region: build_region(&params),
            detected: SmallVec::new(),
        })
    }

    /// Gets the camera parameters.
    pub fn params(&self) -> &CameraParams {
        &self.params
    }

    pub fn position(&self) -> Point2d {
        self.params.position
    }

    pub fn orientation(&self) -> f64 {
        self.params.orientation
    }

    pub fn field_of_view(&self) -> f64 {
        self.params.field_of_view
    }

    pub fn range(&self) -> f64 {
        self.params.range
    }

    /// Gets the current detection region.
    pub fn region(&self) -> &DetectionRegion {
        &self.region
    }

    /// Moves the camera.
    pub fn set_position(&mut self, position: Point2d) -> Result<()> {
        self.params.position = check_position(position)?;
        self.update_region();
        Ok(())
    }

    /// Turns the camera to face `orientation` radians.
    pub fn set_orientation(&mut self, orientation: f64) -> Result<()> {
        self.params.orientation = check_orientation(orientation)?;
        self.update_region();
        Ok(())
    }

    /// Sets the full angular width of the field of view.
    pub fn set_field_of_view(&mut self, field_of_view: f64) -> Result<()> {
        self.params.field_of_view = check_field_of_view(field_of_view)?;
        self.update_region();
        Ok(())
    }

    /// Sets the maximum detection distance.
    pub fn set_range(&mut self, range: f64) -> Result<()> {
        self.params.range = check_range(range)?;
        self.update_region();
        Ok(())
    }

    /// Moves and turns the camera, rebuilding the region once.
    /// Neither value is applied if either is invalid.
    pub fn set_pose(&mut self, position: Point2d, orientation: f64) -> Result<()> {
        let position = check_position(position)?;
        let orientation = check_orientation(orientation)?;
        self.params.position = position;
        self.params.orientation = orientation;
        self.update_region();
        Ok(())
    }

    /// Returns true if the object lies within the detection region.
    pub fn contains(&self, item: impl Locate) -> bool {
        self.region.contains(item.location())
    }

    /// Filters each cone array down to the cones within the detection region
    /// and stores the results, replacing those of any previous call.
    ///
    /// Passing no arrays clears the detections.
    pub fn detect(&mut self, cone_arrays: &[&ConeArray]) {
        self.detect_all(cone_arrays.iter().copied())
    }

    /// Like [Camera::detect], but accepts any iterator of cone arrays.
    pub fn detect_all<'a>(&mut self, cone_arrays: impl IntoIterator<Item = &'a ConeArray>) {
        let region = &self.region;
        self.detected = cone_arrays
            .into_iter()
            .map(|array| array.filtered(|cone| region.contains(cone.position())))
            .collect();
        log::trace!(
            "camera detected [{}] cones",
            self.detected.iter().map(ConeArray::len).format(", ")
        );
    }

    /// Gets the cone arrays found by the last detection, in input order.
    pub fn detected(&self) -> &[ConeArray] {
        &self.detected
    }

    /// The total number of cones found by the last detection.
    pub fn detected_count(&self) -> usize {
        self.detected.iter().map(ConeArray::len).sum()
    }

    /// Records the detection region and detected cones in the debug frame.
    pub fn draw_debug(&self) {
        for (name, triangle) in ["camera_core", "camera_far"].into_iter().zip(self.region.triangles()) {
            debug_triangle(name, triangle);
        }
        for cone in self.detected.iter().flatten() {
            debug_point("camera_detected", cone.position());
        }
    }

    fn update_region(&mut self) {
        self.region = build_region(&self.params);
    }
}

fn build_region(params: &CameraParams) -> DetectionRegion {
    log::debug!(
        "rebuilding camera region at ({:.3}, {:.3}) heading {:.3} fov {:.3} range {:.3}",
        params.position.x,
        params.position.y,
        params.orientation,
        params.field_of_view,
        params.range
    );
    DetectionRegion::new(
        params.position,
        params.orientation,
        params.field_of_view,
        params.range,
    )
}

fn check_position(position: Point2d) -> Result<Point2d> {
    if is_finite(position) {
        Ok(position)
    } else {
        Err(ValidationError::NonFinite { field: "position" })
    }
}

fn check_finite(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NonFinite { field })
    }
}

fn check_within(field: &'static str, value: f64, min: f64, max: f64) -> Result<f64> {
    let value = check_finite(field, value)?;
    if value >= min && value <= max {
        Ok(value)
    } else {
        Err(ValidationError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

fn check_orientation(orientation: f64) -> Result<f64> {
    check_finite("orientation", orientation)
}

fn check_field_of_view(field_of_view: f64) -> Result<f64> {
    check_within("field_of_view", field_of_view, 0.0, TAU)
}

fn check_range(range: f64) -> Result<f64> {
    check_within("range", range, 0.0, f64::INFINITY)
}

impl fmt::Display for Camera {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.params;
        writeln!(f, "Camera(")?;
        writeln!(f, "    x: {},", p.position.x)?;
        writeln!(f, "    y: {},", p.position.y)?;
        writeln!(f, "    orientation: {},", p.orientation)?;
        writeln!(f, "    field_of_view: {},", p.field_of_view)?;
        writeln!(f, "    range: {},", p.range)?;
        writeln!(f, "    detected: ({})", self.detected.iter().format(", "))?;
        write!(f, ")")
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Cone, ConeKind};
    use rand::{Rng, SeedableRng};
    use std::f64::consts::{FRAC_PI_2, PI};

    fn params() -> CameraParams {
        CameraParams {
            position: Point2d::new(0.0, 0.0),
            orientation: 0.0,
            field_of_view: FRAC_PI_2,
            range: 10.0,
        }
    }

    fn random_array(rng: &mut impl Rng, kind: ConeKind, n: usize) -> ConeArray {
        ConeArray::from_positions(
            kind,
            (0..n).map(|_| Point2d::new(rng.gen_range(-15.0..15.0), rng.gen_range(-15.0..15.0))),
        )
        .unwrap()
    }

    #[test]
    fn rejects_invalid_params() {
        let bad = [
            (
                CameraParams { range: -1.0, ..params() },
                ValidationError::OutOfRange { field: "range", value: -1.0, min: 0.0, max: f64::INFINITY },
            ),
            (
                CameraParams { field_of_view: 7.0, ..params() },
                ValidationError::OutOfRange { field: "field_of_view", value: 7.0, min: 0.0, max: TAU },
            ),
            (
                CameraParams { orientation: f64::NAN, ..params() },
                ValidationError::NonFinite { field: "orientation" },
            ),
            (
                CameraParams { position: Point2d::new(f64::INFINITY, 0.0), ..params() },
                ValidationError::NonFinite { field: "position" },
            ),
            (
                CameraParams { range: f64::INFINITY, ..params() },
                ValidationError::NonFinite { field: "range" },
            ),
        ];
        for (params, expected) in bad {
            assert_eq!(Camera::new(params).unwrap_err(), expected);
        }
    }

    #[test]
    fn failed_setter_leaves_camera_untouched() {
        let mut camera = Camera::new(params()).unwrap();
        let region = *camera.region();
        assert!(camera.set_range(-5.0).is_err());
        assert!(camera.set_field_of_view(f64::NAN).is_err());
        assert!(camera.set_pose(Point2d::new(3.0, 3.0), f64::INFINITY).is_err());
        assert_eq!(*camera.params(), params());
        assert_eq!(*camera.region(), region);
    }

    #[test]
    fn region_tracks_every_setter() {
        let mut rng = rand::rngs::StdRng::from_seed(*b"Vegemite sandwhich is not fun...");
        let mut camera = Camera::new(params()).unwrap();
        for _i in 0..100 {
            let result = match rng.gen_range(0..5) {
                0 => camera.set_position(Point2d::new(rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0))),
                1 => camera.set_orientation(rng.gen_range(-PI..PI)),
                2 => camera.set_field_of_view(rng.gen_range(0.0..TAU)),
                3 => camera.set_range(rng.gen_range(0.0..30.0)),
                _ => camera.set_pose(Point2d::new(rng.gen_range(-5.0..5.0), 0.0), rng.gen_range(0.0..TAU)),
            };
            result.unwrap();
            let p = camera.params();
            let expected = DetectionRegion::new(p.position, p.orientation, p.field_of_view, p.range);
            assert_eq!(*camera.region(), expected);
        }
    }

    #[test]
    fn contains_points_and_cones() {
        let camera = Camera::new(params()).unwrap();
        assert!(camera.contains(Point2d::new(5.0, 0.0)));
        assert!(!camera.contains(Point2d::new(0.0, -5.0)));
        let cone = Cone::new(Point2d::new(5.0, 1.0), ConeKind::Blue).unwrap();
        assert!(camera.contains(cone));
        assert!(camera.contains(&cone));
    }

    #[test]
    fn detect_is_idempotent() {
        let mut rng = rand::rngs::StdRng::from_seed(*b"Vegemite sandwhich is not fun...");
        let blue = random_array(&mut rng, ConeKind::Blue, 50);
        let yellow = random_array(&mut rng, ConeKind::Yellow, 50);
        let mut camera = Camera::new(params()).unwrap();

        camera.detect(&[&blue, &yellow]);
        let first = camera.detected().to_vec();
        camera.detect(&[&blue, &yellow]);
        assert_eq!(camera.detected(), &first[..]);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn larger_range_never_loses_cones() {
        let mut rng = rand::rngs::StdRng::from_seed(*b"Vegemite sandwhich is not fun...");
        for _i in 0..20 {
            let cones = random_array(&mut rng, ConeKind::Orange, 100);
            let mut camera = Camera::new(CameraParams {
                position: Point2d::new(rng.gen_range(-2.0..2.0), rng.gen_range(-2.0..2.0)),
                orientation: rng.gen_range(-PI..PI),
                field_of_view: rng.gen_range(0.1..PI),
                range: rng.gen_range(1.0..10.0),
            })
            .unwrap();

            camera.detect(&[&cones]);
            let before = camera.detected()[0].clone();
            camera.set_range(camera.range() * 1.5).unwrap();
            camera.detect(&[&cones]);
            let after = &camera.detected()[0];

            assert!(before.iter().all(|cone| after.iter().any(|c| c == cone)));
            assert!(after.len() >= before.len());
        }
    }

    #[test]
    fn empty_detect_clears() {
        let cones = ConeArray::from_positions(ConeKind::Blue, [Point2d::new(3.0, 0.0)]).unwrap();
        let mut camera = Camera::new(params()).unwrap();
        camera.detect(&[&cones]);
        assert_eq!(camera.detected_count(), 1);
        camera.detect(&[]);
        assert!(camera.detected().is_empty());
        assert_eq!(camera.detected_count(), 0);
    }

    #[test]
    fn display_lists_detections() {
        let cones = ConeArray::from_positions(ConeKind::Blue, [Point2d::new(3.0, 0.0)]).unwrap();
        let mut camera = Camera::new(params()).unwrap();
        camera.detect(&[&cones]);
        let text = camera.to_string();
        assert!(text.contains("range: 10,"));
        assert!(text.contains("Cone(3, 0, blue)"));
    }
}
