//! Ports - interfaces the application expects adapters to implement

mod air_quality_port;
mod forecast_port;

pub use air_quality_port::AirQualityPort;
#[cfg(test)]
pub use air_quality_port::MockAirQualityPort;
pub use forecast_port::ForecastPort;
#[cfg(test)]
pub use forecast_port::MockForecastPort;
