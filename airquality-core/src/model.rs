use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use thiserror::Error;

/// The single location a report is requested for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CityRequest {
    pub city: String,
    pub state: String,
    pub country: String,
}

impl Default for CityRequest {
    fn default() -> Self {
        Self {
            city: "Bengaluru".to_string(),
            state: "Karnataka".to_string(),
            country: "India".to_string(),
        }
    }
}

impl std::fmt::Display for CityRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}, {}", self.city, self.state, self.country)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("response is missing field `{path}`")]
    MissingField { path: String },
}

/// The summary fields pulled out of an AirVisual `/v2/city` payload.
///
/// Values are taken as they are, whatever their JSON type; see
/// [`display_field`] for how they print.
#[derive(Debug, Clone, PartialEq)]
pub struct CityReport {
    pub city: Value,
    pub temperature_c: Value,
    pub aqi_us: Value,
    pub timestamp: Value,
}

const CITY: &[&str] = &["data", "city"];
const TEMPERATURE: &[&str] = &["data", "current", "weather", "tp"];
const AQI_US: &[&str] = &["data", "current", "pollution", "aqius"];
const TIMESTAMP: &[&str] = &["data", "current", "pollution", "ts"];

impl CityReport {
    /// Extract the four fields in order: city, temperature, AQI, timestamp.
    /// The first missing field aborts extraction.
    pub fn from_payload(payload: &Value) -> Result<Self, ExtractError> {
        let city = lookup(payload, CITY)?.clone();
        let temperature_c = lookup(payload, TEMPERATURE)?.clone();
        let aqi_us = lookup(payload, AQI_US)?.clone();
        let timestamp = lookup(payload, TIMESTAMP)?.clone();

        Ok(Self {
            city,
            temperature_c,
            aqi_us,
            timestamp,
        })
    }
}

/// Strings print bare, anything else as compact JSON (`27`, `27.5`, `null`).
pub fn display_field(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s),
        other => Cow::Owned(other.to_string()),
    }
}

fn lookup<'a>(payload: &'a Value, path: &[&str]) -> Result<&'a Value, ExtractError> {
    path.iter().try_fold(payload, |node, key| {
        node.get(key).ok_or_else(|| ExtractError::MissingField { path: path.join(".") })
    })
}
