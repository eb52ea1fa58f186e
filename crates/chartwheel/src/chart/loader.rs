use crate::chart::data::ChartData;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Number of house cusps a chart must carry when it carries any
pub const CUSP_COUNT: usize = 12;

/// Outcome of checking raw chart data before it reaches the engine
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationStatus {
    pub has_error: bool,
    pub messages: Vec<String>,
}

impl ValidationStatus {
    fn push(&mut self, message: impl Into<String>) {
        self.has_error = true;
        self.messages.push(message.into());
    }
}

impl std::fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.messages.join(" "))
    }
}

/// Errors that can occur when loading chart data
#[derive(Error, Debug)]
pub enum ChartDataError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),
    #[error("Invalid chart data: {0}")]
    Validation(ValidationStatus),
}

/// Load chart data from a JSON string like
/// `{"planets": {"Sun": [12.5], "Moon": [200.1, -0.4]}, "cusps": [..12 values..]}`
pub fn load_chart_data_from_json(json: &str) -> Result<ChartData, ChartDataError> {
    let parsed: Value =
        serde_json::from_str(json).map_err(|e| ChartDataError::InvalidJson(e.to_string()))?;

    let status = validate_chart_data(&parsed);
    if status.has_error {
        return Err(ChartDataError::Validation(status));
    }

    serde_json::from_value(parsed).map_err(|e| ChartDataError::InvalidJson(e.to_string()))
}

/// Validate raw chart data. Collects every problem instead of stopping at the first.
pub fn validate_chart_data(data: &Value) -> ValidationStatus {
    let mut status = ValidationStatus::default();

    let Some(obj) = data.as_object() else {
        status.push("Data is not set.");
        return status;
    };

    match obj.get("planets") {
        None | Some(Value::Null) => status.push("There is not property \"planets\"."),
        Some(Value::Object(planets)) => {
            for (name, value) in planets {
                validate_planet(name, value, &mut status);
            }
        }
        Some(_) => status.push("Property \"planets\" has to be Object."),
    }

    match obj.get("cusps") {
        None | Some(Value::Null) => {}
        Some(Value::Array(cusps)) => {
            if cusps.len() != CUSP_COUNT {
                status.push("Count of \"cusps\" values has to be 12.");
            }
            if cusps.iter().any(|c| !c.is_number()) {
                status.push("Property \"cusps\" has to contain numbers only.");
            }
        }
        Some(_) => status.push("Property \"cusps\" has to be Array."),
    }

    status
}

fn validate_planet(name: &str, value: &Value, status: &mut ValidationStatus) {
    let Some(values) = value.as_array() else {
        status.push(format!("The planets property \"{}\" has to be Array.", name));
        return;
    };
    if values.is_empty() || values.len() > 2 || values.iter().any(|v| !v.is_number()) {
        status.push(format!(
            "The planets property \"{}\" has to be [longitude] or [longitude, speed].",
            name
        ));
    }
}
