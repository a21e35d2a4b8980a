//! Display formatting for raw forecast values.
//!
//! Every function here is total: bad or missing input yields [`PLACEHOLDER`]
//! (or, for timestamps that cannot be parsed, the raw input) instead of an error.

use chrono::{DateTime, NaiveDateTime};
use chrono_tz::Tz;

use crate::codes;

/// Shown in place of a missing value.
pub const PLACEHOLDER: &str = "--";

/// pt-BR `day/month hour:minute`.
const TIME_FORMAT: &str = "%d/%m %H:%M";

/// Naive layouts the forecast service uses for local timestamps.
const NAIVE_LAYOUTS: &[&str] = &["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Round to the nearest integer (half away from zero) and append `unit` verbatim.
pub fn format_number(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) if v.is_finite() => {
            // `as` saturates; -0.4 rounds to -0.0 which prints as 0 once cast.
            let rounded = v.round() as i64;
            format!("{rounded}{unit}")
        }
        _ => PLACEHOLDER.to_string(),
    }
}

/// Render an ISO timestamp as `dd/mm HH:MM`.
///
/// Timestamps carrying an offset are shifted into `timezone` when it names an
/// IANA zone. Naive timestamps are taken to be local to `timezone` already.
pub fn format_time(iso: Option<&str>, timezone: &str) -> String {
    let Some(raw) = iso.filter(|s| !s.trim().is_empty()) else {
        return PLACEHOLDER.to_string();
    };
    let trimmed = raw.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return match timezone.parse::<Tz>() {
            Ok(tz) => instant.with_timezone(&tz).format(TIME_FORMAT).to_string(),
            Err(_) => instant.format(TIME_FORMAT).to_string(),
        };
    }

    NAIVE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(trimmed, layout).ok())
        .map(|local| local.format(TIME_FORMAT).to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Description for a weather code, `"Código <code>"` when the table has no entry.
pub fn describe_code(code: Option<i64>) -> String {
    match code {
        Some(code) => codes::description(code)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Código {code}")),
        None => PLACEHOLDER.to_string(),
    }
}

/// `"12 km/h (180°)"`; the direction is dropped when unknown.
pub fn format_wind(speed: Option<f64>, direction: Option<f64>) -> String {
    let speed = format_number(speed, " km/h");
    if speed == PLACEHOLDER {
        return speed;
    }

    match direction.filter(|d| d.is_finite()) {
        Some(_) => format!("{speed} ({})", format_number(direction, "°")),
        None => speed,
    }
}
