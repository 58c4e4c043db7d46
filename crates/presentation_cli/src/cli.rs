//! Command-line arguments

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use domain::UnitSystem;

/// SkyCast CLI
#[derive(Debug, Parser)]
#[command(name = "skycast")]
#[command(author, version, about = "City weather forecasts and air quality", long_about = None)]
pub struct Cli {
    /// Verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file (default: ./skycast.toml if present)
    #[arg(short, long, global = true, env = "SKYCAST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Unit system, overriding the configuration
    #[arg(short, long, global = true)]
    pub units: Option<UnitSystem>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the forecast and air quality for a city
    ///
    /// Example: skycast search New York
    Search {
        /// City name; multiple words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        city: Vec<String>,
    },

    /// Read city names from stdin and search each one
    ///
    /// Entering a new city cancels a search that is still running.
    /// Type "quit" or press Ctrl-D to exit.
    Interactive,

    /// Show air quality for coordinates
    ///
    /// Example: skycast aqi --lat 51.5085 --lon -0.1257
    Aqi {
        /// Latitude (-90 to 90)
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude (-180 to 180)
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },
}

impl Commands {
    /// City text of a search command
    #[must_use]
    pub fn city_text(&self) -> Option<String> {
        match self {
            Self::Search { city } => Some(city.join(" ")),
            Self::Interactive | Self::Aqi { .. } => None,
        }
    }
}

/// Log filter for a verbosity count; `None` keeps the configured filter
#[must_use]
pub const fn log_filter_from_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}
