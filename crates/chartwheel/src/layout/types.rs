use crate::geometry::{normalize_degrees, point_on_circle, Point};
use serde::{Deserialize, Serialize};

/// Bounding circle for a layout pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Universe {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    /// Rotation added to every longitude before projecting (0° longitude sits here)
    #[serde(default)]
    pub shift: f64,
}

impl Universe {
    pub fn new(cx: f64, cy: f64, radius: f64) -> Self {
        Self {
            cx,
            cy,
            radius,
            shift: 0.0,
        }
    }

    pub fn with_shift(mut self, shift: f64) -> Self {
        self.shift = shift;
        self
    }

    /// Project a chart angle at the given display radius
    pub fn project(&self, radius: f64, angle: f64) -> Point {
        point_on_circle(self.cx, self.cy, radius, angle + self.shift)
    }
}

/// A body placed in chart space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocatedPoint {
    pub name: String,
    /// Display angle after collision resolution, in [0, 360)
    pub angle: f64,
    /// Angle the body was originally placed at, before any nudge
    pub pointer: Option<f64>,
    pub x: f64,
    pub y: f64,
    /// Display radius the point sits on
    pub radius: f64,
    #[serde(default)]
    pub retrograde: bool,
}

impl LocatedPoint {
    /// Place a body at its semantic angle; `pointer` remembers that angle.
    pub fn new(name: impl Into<String>, angle: f64, radius: f64, universe: &Universe) -> Self {
        let angle = normalize_degrees(angle);
        let pos = universe.project(radius, angle);
        Self {
            name: name.into(),
            angle,
            pointer: Some(angle),
            x: pos.x,
            y: pos.y,
            radius,
            retrograde: false,
        }
    }

    pub fn with_retrograde(mut self, retrograde: bool) -> Self {
        self.retrograde = retrograde;
        self
    }

    /// Angle collision decisions reason about: `pointer` if present, else `angle`
    pub fn reference_angle(&self) -> f64 {
        self.pointer.unwrap_or(self.angle)
    }

    /// Recompute `x`/`y` from the current angle
    pub fn reproject(&mut self, universe: &Universe) {
        let pos = universe.project(self.radius, self.angle);
        self.x = pos.x;
        self.y = pos.y;
    }
}
