use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use crate::{
    WeatherError,
    model::{AUTO_TIMEZONE, CurrentConditions},
};

use super::{WeatherSource, endpoint, success_body};

/// Fields requested in the `current` block, in request order.
pub const CURRENT_FIELDS: &[&str] = &[
    "temperature_2m",
    "apparent_temperature",
    "relative_humidity_2m",
    "pressure_msl",
    "precipitation",
    "cloud_cover",
    "weather_code",
    "wind_speed_10m",
    "wind_direction_10m",
];

/// Open-Meteo forecast API client, current conditions only.
#[derive(Debug, Clone)]
pub struct ForecastClient {
    http: Client,
    base_url: String,
}

impl ForecastClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    timezone: Option<String>,
    current: Option<OmCurrent>,
}

#[derive(Debug, Deserialize)]
struct OmCurrent {
    time: Option<String>,
    temperature_2m: Option<f64>,
    apparent_temperature: Option<f64>,
    relative_humidity_2m: Option<f64>,
    pressure_msl: Option<f64>,
    precipitation: Option<f64>,
    cloud_cover: Option<f64>,
    weather_code: Option<i64>,
    wind_speed_10m: Option<f64>,
    wind_direction_10m: Option<f64>,
}

#[async_trait]
impl WeatherSource for ForecastClient {
    #[instrument(skip(self), level = "debug")]
    async fn fetch_current(
        &self,
        latitude: f64,
        longitude: f64,
        timezone: Option<&str>,
    ) -> Result<CurrentConditions, WeatherError> {
        let url = endpoint(&self.base_url, "/v1/forecast");
        let timezone = timezone
            .map(str::trim)
            .filter(|tz| !tz.is_empty())
            .unwrap_or(AUTO_TIMEZONE);

        tracing::debug!(%url, timezone, "requesting current conditions");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("timezone", timezone.to_string()),
                ("current", CURRENT_FIELDS.join(",")),
            ])
            .send()
            .await
            .map_err(|e| WeatherError::network(format!("forecast request failed: {e}")))?;

        let body = success_body(res, "forecast").await?;

        let parsed: OmForecastResponse = serde_json::from_str(&body)
            .map_err(|e| WeatherError::network(format!("invalid forecast response: {e}")))?;

        let current = parsed
            .current
            .ok_or_else(|| WeatherError::network("forecast response has no current block"))?;

        Ok(CurrentConditions {
            observed_at: current.time,
            temperature: current.temperature_2m,
            apparent_temperature: current.apparent_temperature,
            humidity: current.relative_humidity_2m,
            pressure: current.pressure_msl,
            precipitation: current.precipitation,
            cloud_cover: current.cloud_cover,
            wind_speed: current.wind_speed_10m,
            wind_direction: current.wind_direction_10m,
            weather_code: current.weather_code,
            timezone: parsed.timezone.unwrap_or_else(|| timezone.to_string()),
        })
    }
}
