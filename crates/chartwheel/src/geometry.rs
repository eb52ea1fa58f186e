//! Angular geometry on the chart wheel.
//!
//! All longitudes are degrees and may arrive unnormalized (negative or past
//! 360°); every function here normalizes at read time.

use serde::{Deserialize, Serialize};

/// Full turn in degrees
pub const FULL_CIRCLE: f64 = 360.0;
/// Half turn in degrees, the largest possible angular gap
pub const HALF_CIRCLE: f64 = 180.0;

/// Cartesian point on the drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / HALF_CIRCLE
}

pub fn radians_to_degrees(radians: f64) -> f64 {
    radians * HALF_CIRCLE / std::f64::consts::PI
}

/// Wrap any real angle into [0, 360).
///
/// Idempotent: `normalize_degrees(normalize_degrees(a)) == normalize_degrees(a)`.
pub fn normalize_degrees(angle: f64) -> f64 {
    ((angle % FULL_CIRCLE) + FULL_CIRCLE) % FULL_CIRCLE
}

/// Cartesian coordinates of `angle_degrees` on a circle around `(cx, cy)`.
///
/// A zero radius always yields the center.
pub fn point_on_circle(cx: f64, cy: f64, radius: f64, angle_degrees: f64) -> Point {
    if radius == 0.0 {
        return Point { x: cx, y: cy };
    }
    let angle_rad = degrees_to_radians(normalize_degrees(angle_degrees));
    Point {
        x: cx + radius * angle_rad.cos(),
        y: cy + radius * angle_rad.sin(),
    }
}

/// Unsigned shortest distance between two angles, in [0, 180].
pub fn angular_gap(a: f64, b: f64) -> f64 {
    let d = (normalize_degrees(a) - normalize_degrees(b)).abs();
    if d > HALF_CIRCLE {
        FULL_CIRCLE - d
    } else {
        d
    }
}

/// Signed shortest delta that carries `from` onto `to`, in (-180, 180].
pub fn shortest_delta(from: f64, to: f64) -> f64 {
    let diff = normalize_degrees(to - from);
    if diff > HALF_CIRCLE {
        diff - FULL_CIRCLE
    } else {
        diff
    }
}
