//! OpenWeatherMap client
//!
//! HTTP client for the OpenWeatherMap 5-day forecast and air-pollution APIs.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::models::{AirPollutionResponse, ApiErrorBody, ForecastResponse};

/// Weather client errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Connection to the weather service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the weather service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The request did not complete within the HTTP timeout
    #[error("Request timed out")]
    Timeout,

    /// The service rejected the request with its own explanation
    #[error("API error (HTTP {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Provider-supplied message, e.g. "city not found"
        message: String,
    },

    /// Failed to parse response from weather service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid coordinates provided
    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,

    /// No API key configured
    #[error("Missing API key")]
    MissingApiKey,

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

impl WeatherError {
    /// Message supplied by the provider, if any
    #[must_use]
    pub fn provider_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } => Some(message),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for WeatherError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_connect() {
            Self::ConnectionFailed(e.to_string())
        } else if e.is_decode() {
            Self::ParseError(e.to_string())
        } else {
            Self::RequestFailed(e.to_string())
        }
    }
}

/// Weather service configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// API base URL (default: <https://api.openweathermap.org/data/2.5>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// OpenWeatherMap API key, sent as the `appid` query parameter
    #[serde(default)]
    pub api_key: String,

    /// Per-request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

const fn default_timeout() -> u64 {
    10
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            timeout_secs: default_timeout(),
        }
    }
}

impl fmt::Debug for WeatherConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Weather client trait for fetching weather data
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Get the 5-day / 3-hour forecast for a city
    ///
    /// `units` is passed through as the `units` query parameter
    /// ("metric", "imperial" or "standard").
    async fn get_forecast(&self, city: &str, units: &str)
    -> Result<ForecastResponse, WeatherError>;

    /// Get current air pollution for a location
    async fn get_air_pollution(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<AirPollutionResponse, WeatherError>;
}

/// OpenWeatherMap HTTP client implementation
#[derive(Debug)]
pub struct OpenWeatherMapClient {
    client: Client,
    config: WeatherConfig,
}

impl OpenWeatherMapClient {
    /// Create a new client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns `MissingApiKey` if no key is configured, or an error if the
    /// HTTP client cannot be initialized.
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        if config.api_key.trim().is_empty() {
            return Err(WeatherError::MissingApiKey);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Current configuration
    #[must_use]
    pub const fn config(&self) -> &WeatherConfig {
        &self.config
    }

    /// Validate coordinates
    fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), WeatherError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(WeatherError::InvalidCoordinates);
        }
        Ok(())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.config.base_url.trim_end_matches('/'))
    }

    /// Send a GET request and decode a JSON body
    ///
    /// The API key is appended here so it never shows up in logged URLs.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, WeatherError> {
        let url = self.endpoint(path);
        debug!(url = %url, "Sending weather request");

        let response = self
            .client
            .get(&url)
            .query(query)
            .query(&[("appid", self.config.api_key.as_str())])
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| WeatherError::ParseError(e.to_string()))
    }

    /// Map non-success responses to errors, keeping the provider message
    async fn check_status(response: Response) -> Result<Response, WeatherError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = ApiErrorBody::message_from(&body);
        warn!(status = %status, message = ?message, "Weather service returned an error");

        // A body message wins over the status class
        Err(match message {
            Some(message) => WeatherError::Api {
                status: status.as_u16(),
                message,
            },
            None if status == StatusCode::TOO_MANY_REQUESTS => WeatherError::RateLimitExceeded,
            None if status.is_server_error() => {
                WeatherError::ServiceUnavailable(format!("HTTP {status}"))
            },
            None => WeatherError::RequestFailed(format!("HTTP {status}")),
        })
    }
}

#[async_trait]
impl WeatherClient for OpenWeatherMapClient {
    #[instrument(skip(self), fields(city = %city, units = %units))]
    async fn get_forecast(
        &self,
        city: &str,
        units: &str,
    ) -> Result<ForecastResponse, WeatherError> {
        let forecast: ForecastResponse = self
            .get_json(
                "forecast",
                &[("q", city.to_string()), ("units", units.to_string())],
            )
            .await?;

        debug!(
            entries = forecast.list.len(),
            city = %forecast.city.name,
            "Forecast received"
        );
        Ok(forecast)
    }

    #[instrument(skip(self), fields(lat = %latitude, lon = %longitude))]
    async fn get_air_pollution(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<AirPollutionResponse, WeatherError> {
        Self::validate_coordinates(latitude, longitude)?;

        let pollution: AirPollutionResponse = self
            .get_json(
                "air_pollution",
                &[("lat", latitude.to_string()), ("lon", longitude.to_string())],
            )
            .await?;

        debug!(entries = pollution.list.len(), "Air pollution received");
        Ok(pollution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> WeatherConfig {
        WeatherConfig {
            api_key: "test-key".to_string(),
            ..WeatherConfig::default()
        }
    }

    #[test]
    fn test_config_defaults() {
        let config = WeatherConfig::default();
        assert_eq!(config.base_url, "https://api.openweathermap.org/data/2.5");
        assert_eq!(config.timeout_secs, 10);
        assert!(config.api_key.is_empty());
    }

    #[test]
    fn test_config_debug_redacts_key() {
        let debug = format!("{:?}", config());
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("test-key"));
    }

    #[test]
    fn test_config_deserialize_defaults() {
        let config: WeatherConfig = serde_json::from_str(r#"{"api_key":"abc"}"#).unwrap();
        assert_eq!(config.api_key, "abc");
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_missing_api_key_rejected() {
        let result = OpenWeatherMapClient::new(WeatherConfig::default());
        assert!(matches!(result, Err(WeatherError::MissingApiKey)));

        let blank = WeatherConfig {
            api_key: "   ".to_string(),
            ..WeatherConfig::default()
        };
        assert!(matches!(
            OpenWeatherMapClient::new(blank),
            Err(WeatherError::MissingApiKey)
        ));
    }

    #[test]
    fn test_validate_coordinates() {
        assert!(OpenWeatherMapClient::validate_coordinates(0.0, 0.0).is_ok());
        assert!(OpenWeatherMapClient::validate_coordinates(90.0, 180.0).is_ok());
        assert!(OpenWeatherMapClient::validate_coordinates(-90.0, -180.0).is_ok());
        assert!(OpenWeatherMapClient::validate_coordinates(91.0, 0.0).is_err());
        assert!(OpenWeatherMapClient::validate_coordinates(0.0, -181.0).is_err());
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = OpenWeatherMapClient::new(WeatherConfig {
            base_url: "http://localhost:1234/data/2.5/".to_string(),
            ..config()
        })
        .unwrap();
        assert_eq!(
            client.endpoint("forecast"),
            "http://localhost:1234/data/2.5/forecast"
        );
    }

    #[test]
    fn test_provider_message() {
        let err = WeatherError::Api {
            status: 404,
            message: "city not found".to_string(),
        };
        assert_eq!(err.provider_message(), Some("city not found"));
        assert_eq!(err.to_string(), "API error (HTTP 404): city not found");
        assert!(WeatherError::RateLimitExceeded.provider_message().is_none());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(WeatherError::Timeout.to_string(), "Request timed out");
        assert_eq!(WeatherError::MissingApiKey.to_string(), "Missing API key");
        assert_eq!(
            WeatherError::ServiceUnavailable("HTTP 503".into()).to_string(),
            "Service unavailable: HTTP 503"
        );
    }
}
