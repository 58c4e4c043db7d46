//! Logging infrastructure
//!
//! Installs the `tracing` subscriber from [`LoggingConfig`](crate::config::LoggingConfig).

mod logging;

pub use logging::{TelemetryError, build_filter, init_logging};
