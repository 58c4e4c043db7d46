//! Forecast entities
//!
//! A forecast arrives as one flat, time-ordered list of samples for a single
//! location. Nothing here is mutated after construction.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::GeoLocation;

/// Base URL for provider-hosted condition icons
const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// Temperatures of a single sample, in the unit system that was requested
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    /// Temperature at the sample time
    pub current: f64,
    /// Minimum expected within the sample window
    pub min: f64,
    /// Maximum expected within the sample window
    pub max: f64,
    /// Perceived temperature
    pub feels_like: f64,
}

/// One timestamped forecast entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    /// Sample time (provider local-naive, UTC for OpenWeatherMap)
    pub timestamp: NaiveDateTime,
    /// Temperatures
    pub temperature: Temperature,
    /// Relative humidity percentage
    pub humidity: u8,
    /// Free-text weather description (e.g. "light rain")
    pub description: String,
    /// Provider icon code (e.g. "10d")
    pub icon: String,
}

impl ForecastSample {
    /// Calendar date of the sample
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Time of day of the sample
    #[must_use]
    pub fn time(&self) -> NaiveTime {
        self.timestamp.time()
    }

    /// URL of the provider-hosted icon for this sample
    #[must_use]
    pub fn icon_url(&self) -> String {
        format!("{ICON_BASE_URL}/{}.png", self.icon)
    }
}

/// Where a forecast applies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// City name as resolved by the provider
    pub name: String,
    /// ISO country code
    pub country: String,
    /// Coordinates used for follow-up lookups
    pub coordinates: GeoLocation,
}

impl Location {
    /// "City, Country" label
    #[must_use]
    pub fn label(&self) -> String {
        if self.country.is_empty() {
            self.name.clone()
        } else {
            format!("{}, {}", self.name, self.country)
        }
    }
}

/// A non-empty, timestamp-ascending list of samples for one location
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastSeries {
    location: Location,
    samples: Vec<ForecastSample>,
}

impl ForecastSeries {
    /// Create a series from provider samples
    ///
    /// Samples are kept in the order given; the provider is trusted to
    /// deliver them ascending by timestamp.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptySeries` if `samples` is empty.
    pub fn new(location: Location, samples: Vec<ForecastSample>) -> Result<Self, DomainError> {
        if samples.is_empty() {
            return Err(DomainError::EmptySeries);
        }
        Ok(Self { location, samples })
    }

    /// Location metadata
    #[must_use]
    pub const fn location(&self) -> &Location {
        &self.location
    }

    /// All samples in series order
    #[must_use]
    pub fn samples(&self) -> &[ForecastSample] {
        &self.samples
    }

    /// Current conditions: the sample at position 0
    #[must_use]
    pub fn current(&self) -> &ForecastSample {
        // Non-empty by construction
        &self.samples[0]
    }

    /// The first `n` samples, fewer if the series is shorter
    #[must_use]
    pub fn hourly(&self, n: usize) -> &[ForecastSample] {
        let end = n.min(self.samples.len());
        &self.samples[..end]
    }

    /// Number of samples
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false; kept for API symmetry with `len`
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
