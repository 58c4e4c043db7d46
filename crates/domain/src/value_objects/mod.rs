//! Value Objects - Immutable, identity-less domain primitives

mod city_name;
mod geo_location;
mod unit_system;

pub use city_name::{CityName, EMPTY_CITY_MESSAGE};
pub use geo_location::{GeoLocation, InvalidCoordinates};
pub use unit_system::UnitSystem;
