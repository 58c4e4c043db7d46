//! Domain layer for SkyCast
//!
//! Forecast entities, the daily aggregation of a forecast series and the
//! classification of conditions into animation categories and air-quality
//! levels. Nothing in this crate performs I/O.

pub mod aggregation;
pub mod classification;
pub mod entities;
pub mod errors;
pub mod value_objects;

pub use aggregation::{DailySummary, build_daily_summaries};
pub use classification::{
    AirQualityLevel, AnimationCategory, classify_air_quality, classify_animation,
};
pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
