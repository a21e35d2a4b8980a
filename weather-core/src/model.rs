use serde::{Deserialize, Serialize};

/// Timezone value asking the forecast service to pick the zone from the coordinates.
pub const AUTO_TIMEZONE: &str = "auto";

/// First geocoding match for a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceResult {
    /// `"<name>, <region> - <country>"`, segments dropped when absent.
    pub display_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
}

/// Snapshot of the forecast service's `current` block.
///
/// Values are passed through untouched; anything the service omitted or sent
/// as `null` stays `None` and is rendered as a placeholder.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub observed_at: Option<String>,
    pub temperature: Option<f64>,
    pub apparent_temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub pressure: Option<f64>,
    pub precipitation: Option<f64>,
    pub cloud_cover: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_direction: Option<f64>,
    pub weather_code: Option<i64>,
    pub timezone: String,
}
