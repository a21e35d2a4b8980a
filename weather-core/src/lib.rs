//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration handling
//! - Open-Meteo geocoding and forecast clients behind provider traits
//! - Display formatting and the weather-code dictionary
//! - The search orchestrator and the `View` it drives
//!
//! It is used by `weather-cli`, but can also be reused by other front ends
//! that implement [`View`].

pub mod codes;
pub mod config;
pub mod error;
pub mod format;
pub mod model;
pub mod orchestrator;
pub mod provider;
pub mod view;

pub use config::Config;
pub use error::WeatherError;
pub use model::{CurrentConditions, PlaceResult};
pub use orchestrator::{Orchestrator, SearchState};
pub use provider::{
    Geocoder, WeatherSource, clients_from_config, forecast::ForecastClient,
    geocoding::GeocodingClient,
};
pub use view::{Severity, View, WeatherCard};
