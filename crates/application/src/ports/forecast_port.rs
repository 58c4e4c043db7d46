//! Forecast service port
//!
//! Defines the interface for retrieving a forecast series by city name.

use async_trait::async_trait;
use domain::{CityName, ForecastSeries, UnitSystem};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for forecast retrieval
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ForecastPort: Send + Sync {
    /// Fetch the multi-day forecast for a city
    ///
    /// The returned series carries the resolved location, including the
    /// coordinates used for the air-quality lookup.
    async fn fetch_forecast(
        &self,
        city: &CityName,
        units: UnitSystem,
    ) -> Result<ForecastSeries, ApplicationError>;
}
