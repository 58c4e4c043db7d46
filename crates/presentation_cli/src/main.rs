//! SkyCast CLI
//!
//! City weather forecasts and air quality from OpenWeatherMap.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::sync::Arc;

use anyhow::{Context, bail};
use application::SearchService;
use clap::Parser;
use domain::GeoLocation;
use infrastructure::{AppConfig, WeatherAdapter, init_logging};
use presentation_cli::render::{render_air_quality, render_report};
use presentation_cli::{Cli, Commands, interactive, log_filter_from_verbosity};
use tokio::io::BufReader;
use tracing::debug;

/// Load configuration and apply command-line overrides
fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(units) = cli.units {
        config.weather.units = units;
    }

    let issues = config.validate();
    if !issues.is_empty() {
        let details = issues
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        bail!("Invalid configuration: {details}");
    }

    Ok(config)
}

fn build_service(config: &AppConfig) -> anyhow::Result<SearchService> {
    let adapter = Arc::new(
        WeatherAdapter::with_config(config.weather.to_weather_config())
            .context("Failed to create weather client")?,
    );
    Ok(SearchService::with_config(
        adapter.clone(),
        adapter,
        config.search_config(),
    ))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    init_logging(&config.logging, log_filter_from_verbosity(cli.verbose))?;
    debug!(?cli, "Starting");

    let service = build_service(&config)?;

    match &cli.command {
        command @ Commands::Search { .. } => {
            let city = command.city_text().unwrap_or_default();
            match service.search_text(&city).await {
                Ok(report) if cli.json => {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                },
                Ok(report) => print!("{}", render_report(&report)),
                Err(e) => {
                    eprintln!("{}", e.user_message());
                    std::process::exit(1);
                },
            }
        },

        Commands::Interactive => {
            let input = BufReader::new(tokio::io::stdin());
            let mut output = std::io::stdout();
            interactive::run(&service, input, &mut output, cli.json).await?;
        },

        Commands::Aqi { lat, lon } => {
            let location = GeoLocation::new(*lat, *lon)?;
            match service.air_quality(&location).await {
                Ok(status) if cli.json => {
                    println!("{}", serde_json::to_string_pretty(&status)?);
                },
                Ok(status) => println!("{location}\n{}", render_air_quality(&status)),
                Err(e) => {
                    eprintln!("{}", e.user_message());
                    std::process::exit(1);
                },
            }
        },
    }

    Ok(())
}
