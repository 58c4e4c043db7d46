//! Daily aggregation of a flat forecast series
//!
//! The provider delivers samples at a fixed interval (three hours for
//! OpenWeatherMap). A multi-day view needs one entry per calendar date; the
//! entry chosen is the first sample seen for that date.

use chrono::NaiveDate;
use itertools::Itertools;
use serde::Serialize;

use crate::entities::{ForecastSample, ForecastSeries};

/// The representative sample of one calendar date
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    /// Calendar date
    pub date: NaiveDate,
    /// First sample of `date` in series order
    pub sample: ForecastSample,
}

/// Build one summary per distinct date, in first-occurrence order
///
/// The series is not re-sorted. A series spanning fewer days than a typical
/// week simply yields fewer summaries.
#[must_use]
pub fn build_daily_summaries(series: &ForecastSeries) -> Vec<DailySummary> {
    series
        .samples()
        .iter()
        .unique_by(|sample| sample.date())
        .map(|sample| DailySummary {
            date: sample.date(),
            sample: sample.clone(),
        })
        .collect()
}
