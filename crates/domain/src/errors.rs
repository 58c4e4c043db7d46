//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),

    /// A forecast series was constructed without any samples
    #[error("Forecast series is empty")]
    EmptySeries,

    /// Unknown unit system name
    #[error("Invalid unit system: {0}")]
    InvalidUnitSystem(String),
}

impl DomainError {
    /// Message suitable for showing to the person who triggered the error
    ///
    /// Validation messages are shown verbatim, everything else keeps its
    /// category prefix.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::ValidationError(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}
