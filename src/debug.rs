//! Debug drawing, recorded as JSON into a per-thread frame when the
//! `debug` feature is enabled and compiled away otherwise.

use crate::math::{Point2d, Triangle2d};
#[cfg(feature = "debug")]
use serde_json::json;

#[cfg(feature = "debug")]
thread_local!(
    static DEBUG_FRAME: std::cell::RefCell<Vec<serde_json::Value>> = Default::default();
);

#[allow(unused)]
pub fn debug_line(name: &str, p1: Point2d, p2: Point2d) {
    #[cfg(feature = "debug")]
    DEBUG_FRAME.with(|frame| {
        frame.borrow_mut().push(json!({
            "type": "line",
            "name": name,
            "p1": [p1.x, p1.y],
            "p2": [p2.x, p2.y],
        }))
    })
}

#[allow(unused)]
pub fn debug_point(name: &str, point: Point2d) {
    #[cfg(feature = "debug")]
    DEBUG_FRAME.with(|frame| {
        frame.borrow_mut().push(json!({
            "type": "point",
            "name": name,
            "p": [point.x, point.y],
        }))
    })
}

/// Records the three edges of a triangle as lines.
pub fn debug_triangle(name: &str, triangle: &Triangle2d) {
    for [p1, p2] in triangle.edges() {
        debug_line(name, p1, p2);
    }
}

/// Drains the debug frame recorded on this thread as a JSON array.
#[cfg(feature = "debug")]
pub fn take_debug_frame() -> serde_json::Value {
    json!(DEBUG_FRAME.with(|frame| frame.take()))
}
