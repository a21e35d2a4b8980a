use crate::{
    Config, WeatherError,
    model::{CurrentConditions, PlaceResult},
    provider::{forecast::ForecastClient, geocoding::GeocodingClient},
};
use async_trait::async_trait;
use reqwest::Response;
use std::fmt::Debug;

pub mod forecast;
pub mod geocoding;

/// Resolves a free-text place name to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// First match for `query`; `query` is expected to be trimmed and non-empty.
    async fn resolve(&self, query: &str) -> Result<PlaceResult, WeatherError>;
}

/// Fetches the current conditions at a coordinate.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    /// `timezone` falls back to automatic detection when `None` or empty.
    async fn fetch_current(
        &self,
        latitude: f64,
        longitude: f64,
        timezone: Option<&str>,
    ) -> Result<CurrentConditions, WeatherError>;
}

/// Construct both Open-Meteo clients from config.
pub fn clients_from_config(config: &Config) -> (GeocodingClient, ForecastClient) {
    (
        GeocodingClient::new(config.geocoding_url(), config.language()),
        ForecastClient::new(config.forecast_url()),
    )
}

/// Read a response body, turning non-2xx statuses into `Network` errors.
async fn success_body(res: Response, service: &str) -> Result<String, WeatherError> {
    let status = res.status();
    let body = res.text().await.map_err(|e| {
        WeatherError::network(format!("failed to read {service} response body: {e}"))
    })?;

    if !status.is_success() {
        return Err(WeatherError::network(format!(
            "{service} request failed with status {status}: {}",
            truncate_body(&body)
        )));
    }

    Ok(body)
}

fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
