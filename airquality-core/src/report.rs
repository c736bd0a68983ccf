//! Human-readable rendering of a city report.

use serde_json::Value;
use std::io::{self, Write};

use crate::model::{CityReport, display_field};

pub const SEPARATOR: &str = "________________________________________";

/// Write the summary lines, the separator, then the whole payload
/// pretty-printed with 2-space indentation.
pub fn render<W: Write>(report: &CityReport, payload: &Value, out: &mut W) -> io::Result<()> {
    writeln!(out, "City: {}", display_field(&report.city))?;
    writeln!(out, "Temperature: {}°C", display_field(&report.temperature_c))?;
    writeln!(out, "Air Quality Index (US): {}", display_field(&report.aqi_us))?;
    writeln!(out, "Time: {}", display_field(&report.timestamp))?;
    writeln!(out, "{SEPARATOR}")?;

    serde_json::to_writer_pretty(&mut *out, payload)?;
    writeln!(out)
}
