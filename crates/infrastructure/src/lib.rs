//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer on top of the
//! OpenWeatherMap integration, and provides configuration loading and
//! logging setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{
    AppConfig, ConfigIssue, LoggingConfig, SearchAppConfig, WeatherAppConfig,
};
pub use telemetry::{TelemetryError, init_logging};
