//! Weather data models
//!
//! Wire types for the OpenWeatherMap 5-day forecast and air-pollution
//! responses. Unknown fields are ignored.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Format of the forecast `dt_txt` field
const DT_TXT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Latitude/longitude pair as sent by the API
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

/// Resolved city of a forecast response
#[derive(Debug, Clone, Deserialize)]
pub struct City {
    pub name: String,
    #[serde(default)]
    pub country: String,
    pub coord: Coord,
}

/// Temperature and humidity block of a forecast entry
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    #[serde(default)]
    pub humidity: u8,
}

/// Condition block of a forecast entry
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherDescription {
    pub id: u16,
    pub main: String,
    pub description: String,
    pub icon: String,
}

/// One 3-hour forecast entry
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastItem {
    /// Unix timestamp (UTC)
    pub dt: i64,
    pub main: MainReadings,
    #[serde(default)]
    pub weather: Vec<WeatherDescription>,
    /// "YYYY-MM-DD HH:MM:SS" in UTC
    #[serde(default)]
    pub dt_txt: String,
}

impl ForecastItem {
    /// Timestamp of the entry
    ///
    /// Reads `dt_txt` and falls back to the unix `dt` field.
    #[must_use]
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.dt_txt, DT_TXT_FORMAT)
            .ok()
            .or_else(|| DateTime::from_timestamp(self.dt, 0).map(|dt| dt.naive_utc()))
    }

    /// The primary condition; the API lists it first
    #[must_use]
    pub fn primary_weather(&self) -> Option<&WeatherDescription> {
        self.weather.first()
    }
}

/// Response of the `/forecast` endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    pub list: Vec<ForecastItem>,
    pub city: City,
}

/// AQI block of an air-pollution entry
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct AirQualityMain {
    pub aqi: i64,
}

/// Pollutant concentrations in μg/m³
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct Components {
    pub co: f64,
    pub no: f64,
    pub no2: f64,
    pub o3: f64,
    pub so2: f64,
    pub pm2_5: f64,
    pub pm10: f64,
    pub nh3: f64,
}

/// One air-pollution entry
#[derive(Debug, Clone, Deserialize)]
pub struct AirPollutionItem {
    /// Unix timestamp (UTC)
    pub dt: i64,
    pub main: AirQualityMain,
    #[serde(default)]
    pub components: Components,
}

/// Response of the `/air_pollution` endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct AirPollutionResponse {
    pub coord: Coord,
    #[serde(default)]
    pub list: Vec<AirPollutionItem>,
}

/// Error body, e.g. `{"cod": "404", "message": "city not found"}`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
}

impl ApiErrorBody {
    /// Extract a non-empty `message` from a raw body
    pub(crate) fn message_from(body: &str) -> Option<String> {
        serde_json::from_str::<Self>(body)
            .ok()
            .and_then(|b| b.message)
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
    }
}
