use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use crate::{
    WeatherError,
    model::{AUTO_TIMEZONE, PlaceResult},
};

use super::{Geocoder, endpoint, success_body};

/// Open-Meteo geocoding API client.
#[derive(Debug, Clone)]
pub struct GeocodingClient {
    http: Client,
    base_url: String,
    language: String,
}

impl GeocodingClient {
    pub fn new(base_url: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            language: language.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn language(&self) -> &str {
        &self.language
    }
}

#[derive(Debug, Deserialize)]
struct GeoSearchResponse {
    // Absent entirely when nothing matched.
    #[serde(default)]
    results: Option<Vec<GeoMatch>>,
}

#[derive(Debug, Deserialize)]
struct GeoMatch {
    name: String,
    admin1: Option<String>,
    country: Option<String>,
    latitude: f64,
    longitude: f64,
    timezone: Option<String>,
}

impl GeoMatch {
    fn into_place(self) -> PlaceResult {
        let display_name =
            compose_display_name(&self.name, self.admin1.as_deref(), self.country.as_deref());
        let timezone = self
            .timezone
            .filter(|tz| !tz.is_empty())
            .unwrap_or_else(|| AUTO_TIMEZONE.to_string());

        PlaceResult {
            display_name,
            latitude: self.latitude,
            longitude: self.longitude,
            timezone,
        }
    }
}

/// `"<name>, <region> - <country>"`, skipping empty segments.
fn compose_display_name(name: &str, region: Option<&str>, country: Option<&str>) -> String {
    let mut out = name.to_string();
    if let Some(region) = region.filter(|r| !r.is_empty()) {
        out.push_str(", ");
        out.push_str(region);
    }
    if let Some(country) = country.filter(|c| !c.is_empty()) {
        out.push_str(" - ");
        out.push_str(country);
    }
    out
}

#[async_trait]
impl Geocoder for GeocodingClient {
    #[instrument(skip(self), level = "debug")]
    async fn resolve(&self, query: &str) -> Result<PlaceResult, WeatherError> {
        let url = endpoint(&self.base_url, "/v1/search");

        tracing::debug!(%url, language = %self.language, "requesting geocoding");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("name", query),
                ("count", "1"),
                ("language", self.language.as_str()),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(|e| WeatherError::network(format!("geocoding request failed: {e}")))?;

        let body = success_body(res, "geocoding").await?;

        let parsed: GeoSearchResponse = serde_json::from_str(&body)
            .map_err(|e| WeatherError::network(format!("invalid geocoding response: {e}")))?;

        let place = parsed
            .results
            .and_then(|results| results.into_iter().next())
            .map(GeoMatch::into_place)
            .ok_or_else(|| WeatherError::NotFound(query.to_string()))?;

        tracing::info!(
            place = %place.display_name,
            latitude = place.latitude,
            longitude = place.longitude,
            "resolved place"
        );

        Ok(place)
    }
}
