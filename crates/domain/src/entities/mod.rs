//! Domain entities - request-scoped data received from the weather provider

mod air_quality;
pub(crate) mod forecast;

pub use air_quality::{AirQualityReading, PollutantComponents};
pub use forecast::{ForecastSample, ForecastSeries, Location, Temperature};
