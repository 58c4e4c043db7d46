//! View-ready weather report
//!
//! Everything the rendering layer needs for one search, derived once from the
//! raw forecast series and air-quality readings.

use domain::{
    AirQualityLevel, AirQualityReading, AnimationCategory, DailySummary, ForecastSample,
    ForecastSeries, Location, PollutantComponents, UnitSystem, build_daily_summaries,
    classify_animation,
};
use serde::Serialize;

/// Number of samples in the hourly strip (24 hours at 3-hour granularity)
pub const DEFAULT_HOURLY_ENTRIES: usize = 8;

/// Air-quality part of a report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirQualitySummary {
    /// Raw provider index
    pub index: i64,
    /// Severity level
    pub level: AirQualityLevel,
    /// Severity label ("Good" ... "Very Poor", "Unknown")
    pub label: &'static str,
    /// Pollutant breakdown
    pub components: PollutantComponents,
}

impl From<&AirQualityReading> for AirQualitySummary {
    fn from(reading: &AirQualityReading) -> Self {
        let level = reading.level();
        Self {
            index: reading.index,
            level,
            label: level.label(),
            components: reading.components,
        }
    }
}

/// Outcome of the air-quality lookup for a report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AirQualityStatus {
    /// First reading returned by the provider
    Available(AirQualitySummary),
    /// The provider returned no readings
    Missing,
    /// The lookup failed but the forecast was kept
    Failed {
        /// User-facing failure message
        message: String,
    },
}

impl AirQualityStatus {
    /// Build the status from provider readings, using only the first
    #[must_use]
    pub fn from_readings(readings: &[AirQualityReading]) -> Self {
        readings
            .first()
            .map_or(Self::Missing, |r| Self::Available(r.into()))
    }

    /// The summary, if one is available
    #[must_use]
    pub const fn summary(&self) -> Option<&AirQualitySummary> {
        match self {
            Self::Available(summary) => Some(summary),
            Self::Missing | Self::Failed { .. } => None,
        }
    }
}

/// Everything one search produces for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    /// Resolved location
    pub location: Location,
    /// Unit system of all temperatures
    pub units: UnitSystem,
    /// Current conditions (first sample of the series)
    pub current: ForecastSample,
    /// Animation category for the current description
    pub current_animation: AnimationCategory,
    /// Leading samples for the hourly strip
    pub hourly: Vec<ForecastSample>,
    /// One representative sample per calendar date
    pub daily: Vec<DailySummary>,
    /// Air-quality outcome
    pub air_quality: AirQualityStatus,
}

impl WeatherReport {
    /// Derive a report from a forecast series and an air-quality outcome
    #[must_use]
    pub fn build(
        series: &ForecastSeries,
        air_quality: AirQualityStatus,
        units: UnitSystem,
        hourly_entries: usize,
    ) -> Self {
        let current = series.current().clone();
        let current_animation = classify_animation(&current.description);

        Self {
            location: series.location().clone(),
            units,
            current,
            current_animation,
            hourly: series.hourly(hourly_entries).to_vec(),
            daily: build_daily_summaries(series),
            air_quality,
        }
    }
}
