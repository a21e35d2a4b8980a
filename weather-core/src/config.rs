use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const DEFAULT_CITY: &str = "São Paulo";
pub const DEFAULT_LANGUAGE: &str = "pt";
pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com";
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com";

/// Overrides the geocoding base URL, e.g. to point at a local mock.
pub const GEOCODING_URL_ENV: &str = "WEATHER_GEOCODING_URL";
/// Overrides the forecast base URL.
pub const FORECAST_URL_ENV: &str = "WEATHER_FORECAST_URL";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// default_city = "Recife"
/// language = "pt"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// City searched on startup when no query was given.
    pub default_city: Option<String>,

    /// Language code sent to the geocoding service.
    pub language: Option<String>,

    pub geocoding_url: Option<String>,
    pub forecast_url: Option<String>,
}

impl Config {
    pub fn default_city(&self) -> &str {
        non_empty(&self.default_city).unwrap_or(DEFAULT_CITY)
    }

    pub fn language(&self) -> &str {
        non_empty(&self.language).unwrap_or(DEFAULT_LANGUAGE)
    }

    pub fn geocoding_url(&self) -> &str {
        non_empty(&self.geocoding_url).unwrap_or(DEFAULT_GEOCODING_URL)
    }

    pub fn forecast_url(&self) -> &str {
        non_empty(&self.forecast_url).unwrap_or(DEFAULT_FORECAST_URL)
    }

    /// Store the default city; blank input resets it.
    pub fn set_default_city(&mut self, city: &str) {
        self.default_city = Some(city.trim().to_string()).filter(|c| !c.is_empty());
    }

    pub fn set_language(&mut self, language: &str) {
        self.language = Some(language.trim().to_string()).filter(|l| !l.is_empty());
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Copy with endpoint environment overrides applied, for the current run only.
    /// Save the config it was derived from, not this copy.
    pub fn with_env_overrides(&self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from(&self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = self.clone();
        if let Some(url) = lookup(GEOCODING_URL_ENV).filter(|u| !u.is_empty()) {
            tracing::debug!(%url, "geocoding URL overridden from environment");
            cfg.geocoding_url = Some(url);
        }
        if let Some(url) = lookup(FORECAST_URL_ENV).filter(|u| !u.is_empty()) {
            tracing::debug!(%url, "forecast URL overridden from environment");
            cfg.forecast_url = Some(url);
        }
        cfg
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
