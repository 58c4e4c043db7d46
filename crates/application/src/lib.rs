//! Application layer - Use cases and orchestration
//!
//! Contains the search use case, the ports it drives and the view state a
//! rendering layer consumes.

pub mod error;
pub mod ports;
pub mod report;
pub mod search_state;
pub mod services;

pub use error::{ApplicationError, GENERIC_FETCH_ERROR};
pub use ports::*;
pub use report::{AirQualityStatus, AirQualitySummary, DEFAULT_HOURLY_ENTRIES, WeatherReport};
pub use search_state::{SearchEvent, SearchSession, SearchState, SearchTicket};
pub use services::*;
