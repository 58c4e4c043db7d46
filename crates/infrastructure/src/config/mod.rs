//! Application configuration
//!
//! Layered: built-in defaults, then an optional TOML file, then environment
//! variables such as `SKYCAST_WEATHER__API_KEY`.

use std::path::Path;

use application::SearchConfig;
use domain::UnitSystem;
use integration_weather::WeatherConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Prefix of environment variable overrides
pub const ENV_PREFIX: &str = "SKYCAST";

/// Separator between nested keys in environment variables
pub const ENV_SEPARATOR: &str = "__";

/// File looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "skycast";

// ==============================
// Weather Configuration
// ==============================

/// Weather provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherAppConfig {
    /// OpenWeatherMap API base URL
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,

    /// API key (sensitive - uses `SecretString`)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Per-request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_secs: u64,

    /// Unit system for all temperatures
    #[serde(default)]
    pub units: UnitSystem,
}

fn default_weather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

const fn default_weather_timeout() -> u64 {
    10
}

impl Default for WeatherAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            api_key: None,
            timeout_secs: default_weather_timeout(),
            units: UnitSystem::default(),
        }
    }
}

impl WeatherAppConfig {
    /// Whether a non-blank API key is configured
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().trim().is_empty())
    }

    /// Convert to the integration client configuration
    #[must_use]
    pub fn to_weather_config(&self) -> WeatherConfig {
        WeatherConfig {
            base_url: self.base_url.clone(),
            api_key: self
                .api_key
                .as_ref()
                .map(|key| key.expose_secret().trim().to_string())
                .unwrap_or_default(),
            timeout_secs: self.timeout_secs,
        }
    }
}

// ==============================
// Search Configuration
// ==============================

/// Search behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchAppConfig {
    /// Overall time budget of one search in seconds
    #[serde(default = "default_search_timeout")]
    pub timeout_secs: u64,

    /// Samples in the hourly strip
    #[serde(default = "default_hourly_entries")]
    pub hourly_entries: usize,

    /// Keep the forecast when only the air-quality lookup fails
    #[serde(default)]
    pub keep_forecast_on_air_quality_failure: bool,
}

const fn default_search_timeout() -> u64 {
    15
}

const fn default_hourly_entries() -> usize {
    application::DEFAULT_HOURLY_ENTRIES
}

impl Default for SearchAppConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_search_timeout(),
            hourly_entries: default_hourly_entries(),
            keep_forecast_on_air_quality_failure: false,
        }
    }
}

impl SearchAppConfig {
    /// Convert to the search service configuration
    #[must_use]
    pub const fn to_search_config(&self, units: UnitSystem) -> SearchConfig {
        SearchConfig {
            timeout_secs: self.timeout_secs,
            units,
            hourly_entries: self.hourly_entries,
            keep_forecast_on_air_quality_failure: self.keep_forecast_on_air_quality_failure,
        }
    }
}

// ==============================
// Logging Configuration
// ==============================

/// Log output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive (e.g. "warn,application=debug")
    #[serde(default = "default_log_filter")]
    pub filter: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

// ==============================
// Application Configuration
// ==============================

/// A problem found by [`AppConfig::validate`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigIssue {
    /// No API key configured
    #[error("weather.api_key is not set (use SKYCAST_WEATHER__API_KEY or the config file)")]
    MissingApiKey,

    /// A timeout of zero would fail every request
    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    /// The base URL is not an http(s) URL
    #[error("weather.base_url must start with http:// or https:// (got {0})")]
    InvalidBaseUrl(String),
}

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Weather provider
    #[serde(default)]
    pub weather: WeatherAppConfig,

    /// Search behavior
    #[serde(default)]
    pub search: SearchAppConfig,

    /// Logging
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from defaults, an optional file and the environment
    ///
    /// With `path` set the file must exist; otherwise `skycast.toml` in the
    /// working directory is read if present.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        Self::load_with_env(path, Self::environment())
    }

    /// Environment source with the SkyCast prefix and separators
    ///
    /// Values stay strings so keys that look numeric keep their exact text;
    /// numeric and boolean fields are converted during deserialization.
    #[must_use]
    pub fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator(ENV_SEPARATOR)
            .try_parsing(false)
    }

    /// Load with an explicit environment source
    pub fn load_with_env(
        path: Option<&Path>,
        env: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let builder = config::Config::builder()
            // Start with defaults
            .set_default("weather.base_url", default_weather_base_url())?
            .set_default("weather.timeout_secs", default_weather_timeout())?
            .set_default("weather.units", UnitSystem::default().as_str())?
            .set_default("search.timeout_secs", default_search_timeout())?
            .set_default("logging.filter", default_log_filter())?
            // Load from file if exists
            .add_source(file)
            // Override with environment variables (e.g., SKYCAST_WEATHER__UNITS)
            .add_source(env);

        let config: Self = builder.build()?.try_deserialize()?;
        debug!(
            base_url = %config.weather.base_url,
            units = %config.weather.units,
            has_api_key = config.weather.has_api_key(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Check the configuration for values that would make every search fail
    #[must_use]
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if !self.weather.has_api_key() {
            issues.push(ConfigIssue::MissingApiKey);
        }
        if !(self.weather.base_url.starts_with("http://")
            || self.weather.base_url.starts_with("https://"))
        {
            issues.push(ConfigIssue::InvalidBaseUrl(self.weather.base_url.clone()));
        }
        if self.weather.timeout_secs == 0 {
            issues.push(ConfigIssue::ZeroTimeout("weather.timeout_secs"));
        }
        if self.search.timeout_secs == 0 {
            issues.push(ConfigIssue::ZeroTimeout("search.timeout_secs"));
        }

        issues
    }

    /// Search service configuration in the configured unit system
    #[must_use]
    pub const fn search_config(&self) -> SearchConfig {
        self.search.to_search_config(self.weather.units)
    }
}
