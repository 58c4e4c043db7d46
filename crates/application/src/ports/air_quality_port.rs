//! Air-quality service port

use async_trait::async_trait;
use domain::{AirQualityReading, GeoLocation};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for air-quality retrieval
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AirQualityPort: Send + Sync {
    /// Fetch the air-quality readings for a set of coordinates
    ///
    /// Providers may return several readings; callers use the first.
    async fn fetch_air_quality(
        &self,
        location: &GeoLocation,
    ) -> Result<Vec<AirQualityReading>, ApplicationError>;
}
