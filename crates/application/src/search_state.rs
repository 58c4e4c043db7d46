//! Search view state
//!
//! The state a rendering layer binds to. Each transition consumes the old
//! state and returns a new one; completions carry the ticket of the search
//! they belong to, and a completion for anything but the search currently
//! loading is dropped so a slow, older search can never overwrite a newer
//! result.

use std::fmt;

use domain::{CityName, DomainError};
use serde::Serialize;
use tracing::debug;

use crate::error::ApplicationError;
use crate::report::WeatherReport;

/// Identifies one submitted search
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SearchTicket(u64);

impl SearchTicket {
    /// Raw ticket number
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SearchTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What the screen currently shows
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SearchState {
    /// Nothing searched yet
    #[default]
    Idle,
    /// A search is in flight
    Loading {
        /// City being searched
        city: CityName,
        /// Ticket of the in-flight search
        ticket: SearchTicket,
    },
    /// The last search succeeded
    Success {
        /// Ticket of the completed search
        ticket: SearchTicket,
        /// Report to render
        report: Box<WeatherReport>,
    },
    /// The last search failed
    Error {
        /// Ticket of the failed search
        ticket: SearchTicket,
        /// User-facing message
        message: String,
    },
}

/// A discrete input to the state machine
#[derive(Debug, Clone)]
pub enum SearchEvent {
    /// A validated search was started
    Submitted {
        /// City being searched
        city: CityName,
        /// Ticket assigned to the search
        ticket: SearchTicket,
    },
    /// A search finished with a report
    Succeeded {
        /// Ticket of the finished search
        ticket: SearchTicket,
        /// Resulting report
        report: Box<WeatherReport>,
    },
    /// A search failed
    Failed {
        /// Ticket of the failed search
        ticket: SearchTicket,
        /// User-facing message
        message: String,
    },
}

impl SearchState {
    /// Apply an event, returning the next state
    ///
    /// A new submission always moves to `Loading`. Completions only apply
    /// while loading the same ticket; otherwise the state is returned
    /// unchanged.
    #[must_use]
    pub fn apply(self, event: SearchEvent) -> Self {
        match (self, event) {
            (_, SearchEvent::Submitted { city, ticket }) => Self::Loading { city, ticket },
            (Self::Loading { ticket: current, .. }, SearchEvent::Succeeded { ticket, report })
                if current == ticket =>
            {
                Self::Success { ticket, report }
            },
            (Self::Loading { ticket: current, .. }, SearchEvent::Failed { ticket, message })
                if current == ticket =>
            {
                Self::Error { ticket, message }
            },
            (state, event) => {
                debug!(?event, "Ignoring stale search completion");
                state
            },
        }
    }

    /// Whether a search is in flight
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    /// The report of the last successful search
    #[must_use]
    pub fn report(&self) -> Option<&WeatherReport> {
        match self {
            Self::Success { report, .. } => Some(&**report),
            _ => None,
        }
    }
}

/// Owns the current `SearchState` and hands out tickets
#[derive(Debug, Default)]
pub struct SearchSession {
    state: SearchState,
    last_ticket: u64,
}

impl SearchSession {
    /// Create an idle session
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> &SearchState {
        &self.state
    }

    /// Validate the input and start a search
    ///
    /// Invalid input leaves the state untouched.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ValidationError` if the city name is empty.
    pub fn submit(&mut self, input: &str) -> Result<(CityName, SearchTicket), DomainError> {
        let city = CityName::new(input)?;
        self.last_ticket += 1;
        let ticket = SearchTicket(self.last_ticket);
        self.transition(SearchEvent::Submitted {
            city: city.clone(),
            ticket,
        });
        Ok((city, ticket))
    }

    /// Record the outcome of a search
    ///
    /// Returns `true` if the outcome was applied, `false` if it belonged to a
    /// superseded search.
    pub fn resolve(
        &mut self,
        ticket: SearchTicket,
        outcome: Result<WeatherReport, ApplicationError>,
    ) -> bool {
        if !self.is_current(ticket) {
            debug!(%ticket, "Dropping result of superseded search");
            return false;
        }
        let event = match outcome {
            Ok(report) => SearchEvent::Succeeded {
                ticket,
                report: Box::new(report),
            },
            Err(e) => SearchEvent::Failed {
                ticket,
                message: e.user_message(),
            },
        };
        self.transition(event);
        true
    }

    /// Whether `ticket` is the search currently loading
    #[must_use]
    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        matches!(self.state, SearchState::Loading { ticket: current, .. } if current == ticket)
    }

    fn transition(&mut self, event: SearchEvent) {
        let state = std::mem::take(&mut self.state);
        self.state = state.apply(event);
    }
}
