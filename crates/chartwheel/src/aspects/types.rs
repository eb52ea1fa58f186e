use serde::{Deserialize, Serialize};

/// A recognized angular relationship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectDefinition {
    /// Aspect name: "conjunction", "square", etc.
    pub name: String,
    /// Target separation in degrees (0, 90, 120, 180, ...)
    pub degree: f64,
    /// Full orb width; a gap matches within `orbit / 2` on either side
    pub orbit: f64,
    /// Display hint for the renderer
    #[serde(default = "default_aspect_color")]
    pub color: String,
}

fn default_aspect_color() -> String {
    "transparent".to_string()
}

impl AspectDefinition {
    pub fn new(name: impl Into<String>, degree: f64, orbit: f64, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            degree,
            orbit,
            color: color.into(),
        }
    }

    /// Whether an angular gap falls inside this aspect's orb
    pub fn matches_gap(&self, gap: f64) -> bool {
        let half = self.orbit / 2.0;
        self.degree - half <= gap && gap <= self.degree + half
    }
}

/// One side of a detected aspect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectPoint {
    pub name: String,
    pub position: f64,
}

/// A detected aspect between two named bodies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectMatch {
    pub aspect: AspectDefinition,
    pub point: AspectPoint,
    pub to_point: AspectPoint,
    /// Actual gap minus target degree, rounded to 4 decimals.
    /// In transit mode: negative while applying, positive while separating.
    pub precision: f64,
}

impl AspectMatch {
    /// Precision formatted to 4 decimal places, e.g. "-1.2500"
    pub fn formatted_precision(&self) -> String {
        format!("{:.4}", self.precision)
    }

    /// Whether the transiting body is still approaching exactness
    pub fn is_applying(&self) -> bool {
        self.precision < 0.0
    }

    /// Same aspect between the same two names, regardless of side
    pub fn same_pair(&self, other: &AspectMatch) -> bool {
        self.aspect.name == other.aspect.name
            && ((self.point.name == other.point.name && self.to_point.name == other.to_point.name)
                || (self.point.name == other.to_point.name
                    && self.to_point.name == other.point.name))
    }
}

/// Round to the 4 decimals precision is reported with; never yields -0.0
pub fn round_precision(value: f64) -> f64 {
    let rounded = (value * 10_000.0).round() / 10_000.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}
