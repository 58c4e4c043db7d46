//! OpenWeatherMap integration
//!
//! Client for the OpenWeatherMap API (<https://openweathermap.org/api>).
//! Provides the 5-day / 3-hour forecast by city name and current air
//! pollution by coordinates. Requires an API key.

pub mod client;
mod models;

pub use client::{OpenWeatherMapClient, WeatherClient, WeatherConfig, WeatherError};
pub use models::{
    AirPollutionItem, AirPollutionResponse, AirQualityMain, City, Components, Coord,
    ForecastItem, ForecastResponse, MainReadings, WeatherDescription,
};
