//! SkyCast terminal client
//!
//! Argument parsing, text rendering of reports and the interactive search
//! loop. The `skycast` binary wires these to the infrastructure layer.

pub mod cli;
pub mod interactive;
pub mod render;

pub use cli::{Cli, Commands, log_filter_from_verbosity};
