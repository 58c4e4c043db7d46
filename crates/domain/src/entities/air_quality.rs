//! Air-quality entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classification::AirQualityLevel;
use crate::value_objects::GeoLocation;

/// Pollutant concentrations in μg/m³
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PollutantComponents {
    /// Carbon monoxide
    pub co: f64,
    /// Nitrogen monoxide
    pub no: f64,
    /// Nitrogen dioxide
    pub no2: f64,
    /// Ozone
    pub o3: f64,
    /// Sulphur dioxide
    pub so2: f64,
    /// Fine particles
    pub pm2_5: f64,
    /// Coarse particles
    pub pm10: f64,
    /// Ammonia
    pub nh3: f64,
}

/// One air-quality observation for a set of coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQualityReading {
    /// Provider index, nominally 1 (best) to 5 (worst)
    pub index: i64,
    /// Where the reading applies
    pub coordinates: GeoLocation,
    /// Observation time
    pub observed_at: DateTime<Utc>,
    /// Pollutant breakdown
    pub components: PollutantComponents,
}

impl AirQualityReading {
    /// Severity level for the index
    #[must_use]
    pub const fn level(&self) -> AirQualityLevel {
        AirQualityLevel::from_index(self.index)
    }
}
