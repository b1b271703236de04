use std::f64::consts::{FRAC_PI_2, TAU};
use std::time::Instant;

use fs_mapping::cgmath::InnerSpace;
use fs_mapping::math::{heading, rot90, Point2d};
use fs_mapping::{Camera, CameraParams, Car, CarState, CarStructure, ConeArray, ConeKind};

const TRACK_WIDTH: f64 = 3.0; // m
const CONE_SPACING: usize = 120;

/// Samples the centre line of an oval track.
fn centre_line(t: f64) -> Point2d {
    Point2d::new(40.0 * t.cos(), 20.0 * t.sin())
}

fn main() -> fs_mapping::Result<()> {
    let ts = (0..CONE_SPACING).map(|i| TAU * i as f64 / CONE_SPACING as f64);
    let boundary = |side: f64| {
        ts.clone().map(move |t| {
            let tan = (centre_line(t + 1e-3) - centre_line(t)).normalize();
            centre_line(t) + side * 0.5 * TRACK_WIDTH * rot90(tan)
        })
    };
    let blue = ConeArray::from_positions(ConeKind::Blue, boundary(1.0))?;
    let yellow = ConeArray::from_positions(ConeKind::Yellow, boundary(-1.0))?;

    let camera = Camera::new(CameraParams {
        position: centre_line(0.0),
        orientation: FRAC_PI_2,
        field_of_view: 0.6 * std::f64::consts::PI,
        range: 10.0,
    })?;
    let mut car = Car::new(CarState::default(), CarStructure::default()).with_camera(camera);

    println!("Simulating...");
    const NUM_FRAMES: usize = 1000;
    let start = Instant::now();
    let mut total = 0;
    for frame in 0..NUM_FRAMES {
        let t = TAU * frame as f64 / NUM_FRAMES as f64;
        let dir = centre_line(t + 1e-3) - centre_line(t);
        car.state.position = centre_line(t);
        car.state.orientation = dir.y.atan2(dir.x);

        let (position, orientation) = (car.state.position, car.state.orientation);
        if let Some(camera) = car.camera_mut() {
            camera.set_pose(position, orientation)?;
        }
        let counts = car
            .detect(&[&blue, &yellow])
            .map(|arrays| arrays.iter().map(ConeArray::len).collect::<Vec<_>>())
            .unwrap_or_default();
        total += counts.iter().sum::<usize>();

        if frame % 100 == 0 {
            let ahead = car.state.position + heading(car.state.orientation);
            println!(
                "Frame {:4}: at ({:6.2}, {:6.2}) facing ({:5.2}, {:5.2}) --> {:?} cones",
                frame, car.state.position.x, car.state.position.y, ahead.x, ahead.y, counts
            );
        }
    }
    let frame = start.elapsed() / NUM_FRAMES as u32;
    println!(
        "Avg. frame: {:?} ({:.1} cones detected per frame)",
        frame,
        total as f64 / NUM_FRAMES as f64
    );
    Ok(())
}
