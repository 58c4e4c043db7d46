//! City name value object
//!
//! The free-text city a search is submitted for. The only validation is that
//! something other than whitespace was entered; spelling is the weather
//! provider's concern.
//!
//! # Examples
//!
//! ```
//! use domain::CityName;
//!
//! let city = CityName::new("  Lisbon ").unwrap();
//! assert_eq!(city.as_str(), "Lisbon");
//!
//! assert!(CityName::new("   ").is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Message shown when a search is submitted without a city
pub const EMPTY_CITY_MESSAGE: &str = "Please enter a city name!";

/// A trimmed, non-empty city name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CityName(String);

impl CityName {
    /// Create a city name, trimming surrounding whitespace
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ValidationError` if the name is empty after trimming.
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::ValidationError(EMPTY_CITY_MESSAGE.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the city name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CityName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CityName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CityName> for String {
    fn from(city: CityName) -> Self {
        city.0
    }
}
