use crate::{
    format::{describe_code, format_number, format_time, format_wind},
    model::{CurrentConditions, PlaceResult},
};

/// How a status message should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// Display surface driven by the orchestrator.
///
/// Implementations only copy what they are given onto the screen. They are
/// shared by reference across submissions, so interior state must be
/// synchronised by the implementation.
pub trait View: Send + Sync {
    /// Overwrite every result field.
    fn render(&self, card: &WeatherCard);

    /// Replace the status text; an empty string clears it.
    fn set_status(&self, text: &str, severity: Severity);

    /// Show or hide the results region.
    fn set_visible(&self, visible: bool);
}

/// The ten display strings of the results region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherCard {
    pub location: String,
    pub observed_at: String,
    pub temperature: String,
    pub condition: String,
    pub wind: String,
    pub humidity: String,
    pub apparent_temperature: String,
    pub pressure: String,
    pub precipitation: String,
    pub cloud_cover: String,
}

impl WeatherCard {
    /// Format one place and the conditions fetched for it.
    pub fn new(place: &PlaceResult, current: &CurrentConditions) -> Self {
        Self {
            location: place.display_name.clone(),
            observed_at: format_time(current.observed_at.as_deref(), &current.timezone),
            temperature: format_number(current.temperature, "°C"),
            condition: describe_code(current.weather_code),
            wind: format_wind(current.wind_speed, current.wind_direction),
            humidity: format_number(current.humidity, "%"),
            apparent_temperature: format_number(current.apparent_temperature, "°C"),
            pressure: format_number(current.pressure, " hPa"),
            precipitation: format_number(current.precipitation, " mm"),
            cloud_cover: format_number(current.cloud_cover, "%"),
        }
    }

    /// `(label, value)` pairs in display order.
    pub fn fields(&self) -> [(&'static str, &str); 10] {
        [
            ("Local", self.location.as_str()),
            ("Atualizado em", self.observed_at.as_str()),
            ("Temperatura", self.temperature.as_str()),
            ("Condição", self.condition.as_str()),
            ("Vento", self.wind.as_str()),
            ("Umidade", self.humidity.as_str()),
            ("Sensação térmica", self.apparent_temperature.as_str()),
            ("Pressão", self.pressure.as_str()),
            ("Precipitação", self.precipitation.as_str()),
            ("Nebulosidade", self.cloud_cover.as_str()),
        ]
    }
}
