//! City search service
//!
//! Runs one search as a strictly sequential chain: forecast first, then air
//! quality at the coordinates the forecast resolved, then derives the report.

use std::sync::Arc;
use std::time::Duration;

use domain::{CityName, GeoLocation, UnitSystem};
use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::{debug, info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{AirQualityPort, ForecastPort};
use crate::report::{AirQualityStatus, DEFAULT_HOURLY_ENTRIES, WeatherReport};

/// Default overall time budget for one search in seconds
const DEFAULT_SEARCH_TIMEOUT_SECS: u64 = 15;

/// Configuration for search behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Overall time budget for forecast plus air quality (default: 15)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Unit system requested from the provider (default: metric)
    #[serde(default)]
    pub units: UnitSystem,

    /// Samples in the hourly strip (default: 8)
    #[serde(default = "default_hourly_entries")]
    pub hourly_entries: usize,

    /// Keep the forecast when only the air-quality lookup fails
    ///
    /// When `false` (default) any failure discards the whole search.
    #[serde(default)]
    pub keep_forecast_on_air_quality_failure: bool,
}

const fn default_timeout() -> u64 {
    DEFAULT_SEARCH_TIMEOUT_SECS
}

const fn default_hourly_entries() -> usize {
    DEFAULT_HOURLY_ENTRIES
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            units: UnitSystem::default(),
            hourly_entries: default_hourly_entries(),
            keep_forecast_on_air_quality_failure: false,
        }
    }
}

impl SearchConfig {
    /// Time budget as a `Duration`
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Service answering city searches
#[derive(Clone)]
pub struct SearchService {
    forecast: Arc<dyn ForecastPort>,
    air_quality: Arc<dyn AirQualityPort>,
    config: SearchConfig,
    budget: Duration,
}

impl std::fmt::Debug for SearchService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SearchService {
    /// Create a service with default configuration
    #[must_use]
    pub fn new(forecast: Arc<dyn ForecastPort>, air_quality: Arc<dyn AirQualityPort>) -> Self {
        Self::with_config(forecast, air_quality, SearchConfig::default())
    }

    /// Create a service with custom configuration
    #[must_use]
    pub fn with_config(
        forecast: Arc<dyn ForecastPort>,
        air_quality: Arc<dyn AirQualityPort>,
        config: SearchConfig,
    ) -> Self {
        let budget = config.timeout();
        Self {
            forecast,
            air_quality,
            config,
            budget,
        }
    }

    /// Override the time budget with sub-second precision
    #[must_use]
    pub const fn with_budget(mut self, budget: Duration) -> Self {
        self.budget = budget;
        self
    }

    /// Current configuration
    #[must_use]
    pub const fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Validate free-text input and search for it
    ///
    /// An empty city is rejected before any request is made.
    pub async fn search_text(&self, input: &str) -> Result<WeatherReport, ApplicationError> {
        let city = CityName::new(input)?;
        self.search(&city).await
    }

    /// Search for a validated city
    #[instrument(skip(self, city), fields(city = %city, units = %self.config.units))]
    pub async fn search(&self, city: &CityName) -> Result<WeatherReport, ApplicationError> {
        let result = timeout(self.budget, self.run(city)).await.map_err(|_| {
            warn!(budget_ms = self.budget.as_millis(), "Search timed out");
            ApplicationError::Timeout(self.budget)
        })?;

        match &result {
            Ok(report) => info!(
                location = %report.location.label(),
                days = report.daily.len(),
                animation = %report.current_animation,
                "Search completed"
            ),
            Err(e) => debug!(error = %e, "Search failed"),
        }

        result
    }

    /// Look up air quality for coordinates on its own
    #[instrument(skip(self, location), fields(location = %location))]
    pub async fn air_quality(
        &self,
        location: &GeoLocation,
    ) -> Result<AirQualityStatus, ApplicationError> {
        let readings = timeout(self.budget, self.air_quality.fetch_air_quality(location))
            .await
            .map_err(|_| ApplicationError::Timeout(self.budget))??;
        Ok(AirQualityStatus::from_readings(&readings))
    }

    async fn run(&self, city: &CityName) -> Result<WeatherReport, ApplicationError> {
        let series = self.forecast.fetch_forecast(city, self.config.units).await?;
        let coordinates = series.location().coordinates;
        debug!(samples = series.len(), %coordinates, "Forecast received");

        let air_quality = match self.air_quality.fetch_air_quality(&coordinates).await {
            Ok(readings) => AirQualityStatus::from_readings(&readings),
            Err(e) if self.config.keep_forecast_on_air_quality_failure => {
                warn!(error = %e, "Air quality lookup failed, keeping forecast");
                AirQualityStatus::Failed {
                    message: e.user_message(),
                }
            },
            Err(e) => return Err(e),
        };

        Ok(WeatherReport::build(
            &series,
            air_quality,
            self.config.units,
            self.config.hourly_entries,
        ))
    }
}
