//! Application services - Use case implementations

mod search_service;

pub use search_service::{SearchConfig, SearchService};
