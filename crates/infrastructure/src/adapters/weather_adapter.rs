//! Weather adapter - Implements ForecastPort and AirQualityPort using integration_weather

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::{AirQualityPort, ForecastPort};
use async_trait::async_trait;
use chrono::DateTime;
use domain::{
    AirQualityReading, CityName, DomainError, ForecastSample, ForecastSeries, GeoLocation,
    Location, PollutantComponents, Temperature, UnitSystem,
};
use integration_weather::{
    AirPollutionItem, AirPollutionResponse, Components, Coord, ForecastItem, ForecastResponse,
    OpenWeatherMapClient, WeatherClient, WeatherConfig, WeatherError,
};
use tracing::{debug, instrument};

/// Adapter for the OpenWeatherMap forecast and air-pollution APIs
pub struct WeatherAdapter {
    client: Arc<dyn WeatherClient>,
}

impl std::fmt::Debug for WeatherAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherAdapter")
            .field("client", &"dyn WeatherClient")
            .finish()
    }
}

impl WeatherAdapter {
    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is configured or the HTTP client fails
    /// to initialize.
    pub fn with_config(config: WeatherConfig) -> Result<Self, ApplicationError> {
        let client = OpenWeatherMapClient::new(config).map_err(Self::map_error)?;
        Ok(Self::from_client(Arc::new(client)))
    }

    /// Wrap an existing client
    #[must_use]
    pub fn from_client(client: Arc<dyn WeatherClient>) -> Self {
        Self { client }
    }

    /// Map integration weather error to application error
    fn map_error(err: WeatherError) -> ApplicationError {
        match err {
            WeatherError::Api { message, .. } => ApplicationError::ExternalService(message),
            WeatherError::ConnectionFailed(e)
            | WeatherError::RequestFailed(e)
            | WeatherError::ServiceUnavailable(e) => ApplicationError::ServiceUnavailable(e),
            WeatherError::Timeout => {
                ApplicationError::ServiceUnavailable("request timed out".into())
            },
            WeatherError::ParseError(e) => ApplicationError::Internal(e),
            e @ WeatherError::InvalidCoordinates => {
                ApplicationError::Domain(DomainError::ValidationError(e.to_string()))
            },
            WeatherError::MissingApiKey => {
                ApplicationError::Configuration("weather.api_key is not set".into())
            },
            WeatherError::RateLimitExceeded => ApplicationError::RateLimited,
        }
    }

    fn map_coordinates(coord: Coord) -> Result<GeoLocation, ApplicationError> {
        GeoLocation::new(coord.lat, coord.lon).map_err(|e| ApplicationError::Internal(e.to_string()))
    }

    /// Convert one forecast entry to a domain sample
    fn map_sample(item: &ForecastItem) -> Result<ForecastSample, ApplicationError> {
        let timestamp = item.timestamp().ok_or_else(|| {
            ApplicationError::Internal(format!("Invalid forecast timestamp: {}", item.dt_txt))
        })?;
        let (description, icon) = item
            .primary_weather()
            .map(|w| (w.description.clone(), w.icon.clone()))
            .unwrap_or_default();

        Ok(ForecastSample {
            timestamp,
            temperature: Temperature {
                current: item.main.temp,
                min: item.main.temp_min,
                max: item.main.temp_max,
                feels_like: item.main.feels_like,
            },
            humidity: item.main.humidity,
            description,
            icon,
        })
    }

    /// Convert a forecast response to a non-empty series
    fn map_forecast(response: &ForecastResponse) -> Result<ForecastSeries, ApplicationError> {
        let location = Location {
            name: response.city.name.clone(),
            country: response.city.country.clone(),
            coordinates: Self::map_coordinates(response.city.coord)?,
        };
        let samples = response
            .list
            .iter()
            .map(Self::map_sample)
            .collect::<Result<Vec<_>, _>>()?;

        ForecastSeries::new(location, samples).map_err(|e| match e {
            DomainError::EmptySeries => {
                ApplicationError::Internal("Forecast response contained no entries".into())
            },
            other => ApplicationError::Domain(other),
        })
    }

    const fn map_components(c: Components) -> PollutantComponents {
        PollutantComponents {
            co: c.co,
            no: c.no,
            no2: c.no2,
            o3: c.o3,
            so2: c.so2,
            pm2_5: c.pm2_5,
            pm10: c.pm10,
            nh3: c.nh3,
        }
    }

    fn map_reading(
        item: &AirPollutionItem,
        coordinates: GeoLocation,
    ) -> Result<AirQualityReading, ApplicationError> {
        let observed_at = DateTime::from_timestamp(item.dt, 0).ok_or_else(|| {
            ApplicationError::Internal(format!("Invalid air quality timestamp: {}", item.dt))
        })?;

        Ok(AirQualityReading {
            index: item.main.aqi,
            coordinates,
            observed_at,
            components: Self::map_components(item.components),
        })
    }

    /// Convert an air-pollution response, keeping provider order
    ///
    /// Falls back to the requested coordinates if the echoed ones are invalid.
    fn map_air_pollution(
        response: &AirPollutionResponse,
        requested: GeoLocation,
    ) -> Result<Vec<AirQualityReading>, ApplicationError> {
        let coordinates = Self::map_coordinates(response.coord).unwrap_or(requested);
        response
            .list
            .iter()
            .map(|item| Self::map_reading(item, coordinates))
            .collect()
    }
}

#[async_trait]
impl ForecastPort for WeatherAdapter {
    #[instrument(skip(self, city), fields(city = %city, units = %units))]
    async fn fetch_forecast(
        &self,
        city: &CityName,
        units: UnitSystem,
    ) -> Result<ForecastSeries, ApplicationError> {
        let result = self
            .client
            .get_forecast(city.as_str(), units.as_str())
            .await
            .map_err(Self::map_error)
            .and_then(|response| Self::map_forecast(&response));

        match &result {
            Ok(series) => {
                debug!(
                    samples = series.len(),
                    location = %series.location().label(),
                    "Retrieved forecast"
                );
            },
            Err(e) => {
                debug!(error = %e, "Failed to get forecast");
            },
        }

        result
    }
}

#[async_trait]
impl AirQualityPort for WeatherAdapter {
    #[instrument(skip(self, location), fields(location = %location))]
    async fn fetch_air_quality(
        &self,
        location: &GeoLocation,
    ) -> Result<Vec<AirQualityReading>, ApplicationError> {
        let result = self
            .client
            .get_air_pollution(location.latitude(), location.longitude())
            .await
            .map_err(Self::map_error)
            .and_then(|response| Self::map_air_pollution(&response, *location));

        match &result {
            Ok(readings) => {
                debug!(readings = readings.len(), "Retrieved air quality");
            },
            Err(e) => {
                debug!(error = %e, "Failed to get air quality");
            },
        }

        result
    }
}
