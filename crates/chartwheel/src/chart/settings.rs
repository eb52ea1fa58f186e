use crate::aspects::AspectDefinition;
use crate::layout::Universe;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Could not read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid settings TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid settings value: {0}")]
    Invalid(String),
}

/// Read-only chart configuration. The engine only ever borrows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    // Layout
    pub margin: f64,
    pub padding: f64,
    pub symbol_scale: f64,
    /// Where 0° longitude sits before the ascendant shift (180 is West)
    pub shift_in_degrees: f64,

    // Radii Ratios
    pub indoor_circle_radius_ratio: f64,
    pub inner_circle_radius_ratio: f64,
    pub ruler_radius: f64,

    /// Minimum angular separation between two bodies on a ring, in degrees
    pub collision_radius: f64,

    // Aspects, checked in this order
    pub aspects: Vec<AspectDefinition>,

    /// Extra whole turns the cusp wheel makes during a transit animation
    pub animation_cusps_rotation_speed: u32,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            margin: 50.0,
            padding: 18.0,
            symbol_scale: 1.0,
            shift_in_degrees: 180.0,

            indoor_circle_radius_ratio: 2.0,
            inner_circle_radius_ratio: 8.0,
            ruler_radius: 4.0,

            collision_radius: 6.0,

            aspects: vec![
                AspectDefinition::new("conjunction", 0.0, 10.0, "transparent"),
                AspectDefinition::new("square", 90.0, 8.0, "#FF4500"),
                AspectDefinition::new("trine", 120.0, 8.0, "#27AE60"),
                AspectDefinition::new("opposition", 180.0, 10.0, "#27AE60"),
            ],

            animation_cusps_rotation_speed: 0,
        }
    }
}

impl ChartSettings {
    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        let settings: ChartSettings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.collision_radius > 0.0 && self.collision_radius < 360.0) {
            return Err(SettingsError::Invalid(format!(
                "collision_radius must be in (0, 360), got {}",
                self.collision_radius
            )));
        }
        if self.symbol_scale <= 0.0 {
            return Err(SettingsError::Invalid(
                "symbol_scale must be positive".to_string(),
            ));
        }
        if self.inner_circle_radius_ratio <= 0.0 || self.ruler_radius <= 0.0 {
            return Err(SettingsError::Invalid(
                "radius ratios must be positive".to_string(),
            ));
        }
        for aspect in &self.aspects {
            if aspect.name.is_empty() {
                return Err(SettingsError::Invalid("aspect name must not be empty".to_string()));
            }
            if !(0.0..=180.0).contains(&aspect.degree) {
                return Err(SettingsError::Invalid(format!(
                    "aspect \"{}\" degree must be in [0, 180], got {}",
                    aspect.name, aspect.degree
                )));
            }
            if aspect.orbit < 0.0 {
                return Err(SettingsError::Invalid(format!(
                    "aspect \"{}\" orbit must not be negative",
                    aspect.name
                )));
            }
        }
        Ok(())
    }

    /// Wheel for a drawing surface of the given size
    pub fn universe(&self, width: f64, height: f64) -> Universe {
        let radius = (width.min(height) / 2.0 - self.margin).max(0.0);
        Universe::new(width / 2.0, height / 2.0, radius)
    }

    fn ruler_width(&self, radius: f64) -> f64 {
        (radius / self.inner_circle_radius_ratio) / self.ruler_radius
    }

    /// Ring radix bodies are drawn on, inside the zodiac ruler
    pub fn radix_point_radius(&self, radius: f64) -> f64 {
        radius
            - (radius / self.inner_circle_radius_ratio
                + 2.0 * self.ruler_width(radius)
                + self.padding * self.symbol_scale)
    }

    /// Ring transit bodies are drawn on, outside the radix wheel
    pub fn transit_point_radius(&self, radius: f64) -> f64 {
        radius + radius / self.inner_circle_radius_ratio + self.padding * self.symbol_scale
    }
}
