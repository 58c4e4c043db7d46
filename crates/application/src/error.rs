//! Application-level errors

use std::time::Duration;

use domain::DomainError;
use thiserror::Error;

/// Fallback text when the provider did not explain what went wrong
pub const GENERIC_FETCH_ERROR: &str = "Error fetching data. Please try again.";

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The provider answered with an error message
    #[error("External service error: {0}")]
    ExternalService(String),

    /// The provider could not be reached or answered without a usable message
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// The search did not finish within its time budget
    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Text shown to the person who started the search
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Domain(e) => e.user_message(),
            Self::ExternalService(msg) if !msg.trim().is_empty() => format!("Error: {msg}"),
            Self::Timeout(budget) => {
                format!("Request timed out after {budget:?}. Please try again.")
            },
            Self::Configuration(msg) => format!("Configuration error: {msg}"),
            _ => GENERIC_FETCH_ERROR.to_string(),
        }
    }
}
