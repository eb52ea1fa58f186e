use crate::geometry::normalize_degrees;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name -> position, iterated in name order so every pass is deterministic
pub type Positions = BTreeMap<String, PositionEntry>;

/// One tracked body. Serialized as `[longitude]` or `[longitude, speed]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct PositionEntry {
    /// Longitude in degrees, not necessarily normalized
    pub longitude: f64,
    /// Degrees per day; `None` when motion is irrelevant
    pub speed: Option<f64>,
}

impl PositionEntry {
    pub fn new(longitude: f64) -> Self {
        Self {
            longitude,
            speed: None,
        }
    }

    pub fn with_speed(longitude: f64, speed: f64) -> Self {
        Self {
            longitude,
            speed: Some(speed),
        }
    }

    pub fn is_retrograde(&self) -> bool {
        self.speed.is_some_and(|s| s < 0.0)
    }

    pub fn normalized_longitude(&self) -> f64 {
        normalize_degrees(self.longitude)
    }
}

impl TryFrom<Vec<f64>> for PositionEntry {
    type Error = String;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        match values.as_slice() {
            [longitude] => Ok(Self::new(*longitude)),
            [longitude, speed] => Ok(Self::with_speed(*longitude, *speed)),
            other => Err(format!(
                "position has to be [longitude] or [longitude, speed], got {} values",
                other.len()
            )),
        }
    }
}

impl From<PositionEntry> for Vec<f64> {
    fn from(entry: PositionEntry) -> Self {
        match entry.speed {
            Some(speed) => vec![entry.longitude, speed],
            None => vec![entry.longitude],
        }
    }
}

/// Bodies and house cusps for one chart layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub planets: Positions,
    /// Exactly 12 longitudes when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cusps: Option<Vec<f64>>,
}

impl ChartData {
    pub fn new(planets: Positions) -> Self {
        Self {
            planets,
            cusps: None,
        }
    }

    pub fn with_cusps(mut self, cusps: Vec<f64>) -> Self {
        self.cusps = Some(cusps);
        self
    }

    /// First house cusp (the ascendant), if cusps are known
    pub fn first_cusp(&self) -> Option<f64> {
        self.cusps.as_ref().and_then(|c| c.first().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_entry_from_json_arrays() {
        let entry: PositionEntry = serde_json::from_str("[120.5]").unwrap();
        assert_eq!(entry, PositionEntry::new(120.5));
        assert!(!entry.is_retrograde());

        let entry: PositionEntry = serde_json::from_str("[10.0, -0.2]").unwrap();
        assert_eq!(entry.speed, Some(-0.2));
        assert!(entry.is_retrograde());
    }

    #[test]
    fn test_position_entry_rejects_bad_length() {
        assert!(serde_json::from_str::<PositionEntry>("[]").is_err());
        assert!(serde_json::from_str::<PositionEntry>("[1.0, 2.0, 3.0]").is_err());
    }

    #[test]
    fn test_position_entry_serializes_as_array() {
        let json = serde_json::to_string(&PositionEntry::with_speed(1.0, 0.5)).unwrap();
        assert_eq!(json, "[1.0,0.5]");
    }

    #[test]
    fn test_zero_speed_is_not_retrograde() {
        assert!(!PositionEntry::with_speed(5.0, 0.0).is_retrograde());
    }
}
