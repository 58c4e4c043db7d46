//! Integration tests for infrastructure crate
//!
//! Tests cover:
//! - Weather adapter against a mock OpenWeatherMap server
//! - Full search flow through `SearchService`
//! - Configuration wiring

use std::sync::Arc;
use std::time::Duration;

use application::{AirQualityStatus, ApplicationError, GENERIC_FETCH_ERROR, SearchService};
use domain::{AnimationCategory, CityName, GeoLocation, UnitSystem};
use infrastructure::{AppConfig, WeatherAdapter};
use secrecy::SecretString;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "integration-key";

/// 40 three-hourly entries over 5 days starting 2024-05-10 00:00
fn forecast_body(description: &str) -> serde_json::Value {
    let list: Vec<serde_json::Value> = (0..40)
        .map(|i| {
            let day = 10 + i / 8;
            let hour = (i % 8) * 3;
            serde_json::json!({
                "dt": 1_715_299_200 + i * 10_800,
                "main": {
                    "temp": 15.0 + f64::from(i) / 10.0,
                    "feels_like": 14.0,
                    "temp_min": 13.0,
                    "temp_max": 18.0,
                    "humidity": 55
                },
                "weather": [{"id": 500, "main": "Rain", "description": description, "icon": "10d"}],
                "dt_txt": format!("2024-05-{day:02} {hour:02}:00:00")
            })
        })
        .collect();

    serde_json::json!({
        "cod": "200",
        "cnt": 40,
        "list": list,
        "city": {
            "name": "Lisbon",
            "country": "PT",
            "coord": {"lat": 38.7167, "lon": -9.1333},
            "timezone": 3600
        }
    })
}

fn air_pollution_body(aqi: i64) -> serde_json::Value {
    serde_json::json!({
        "coord": {"lon": -9.1333, "lat": 38.7167},
        "list": [{"main": {"aqi": aqi}, "components": {"pm2_5": 5.5}, "dt": 1_715_299_200}]
    })
}

fn app_config(mock_server: &MockServer) -> AppConfig {
    let mut config = AppConfig::default();
    config.weather.base_url = mock_server.uri();
    config.weather.api_key = Some(SecretString::from(API_KEY));
    config.weather.timeout_secs = 5;
    config
}

fn service(config: &AppConfig) -> SearchService {
    #[allow(clippy::expect_used)]
    let adapter = Arc::new(
        WeatherAdapter::with_config(config.weather.to_weather_config())
            .expect("adapter should build"),
    );
    SearchService::with_config(adapter.clone(), adapter, config.search_config())
}

// ============================================================================
// Search Flow Tests
// ============================================================================

mod search_flow_tests {
    use super::*;

    #[tokio::test]
    async fn search_builds_full_report() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .and(query_param("q", "Lisbon"))
            .and(query_param("units", "metric"))
            .and(query_param("appid", API_KEY))
            .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body("moderate rain")))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/air_pollution"))
            .and(query_param("lat", "38.7167"))
            .and(query_param("lon", "-9.1333"))
            .respond_with(ResponseTemplate::new(200).set_body_json(air_pollution_body(2)))
            .expect(1)
            .mount(&mock_server)
            .await;

        let report = service(&app_config(&mock_server))
            .search_text("  Lisbon ")
            .await
            .unwrap();

        assert_eq!(report.location.label(), "Lisbon, PT");
        assert_eq!(report.current_animation, AnimationCategory::Rain);
        assert_eq!(report.hourly.len(), 8);
        assert_eq!(report.daily.len(), 5);
        assert_eq!(report.daily[1].sample.timestamp.format("%d %H").to_string(), "11 00");

        let aq = report.air_quality.summary().unwrap();
        assert_eq!(aq.index, 2);
        assert_eq!(aq.label, "Fair");
    }

    #[tokio::test]
    async fn imperial_units_are_requested() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .and(query_param("units", "imperial"))
            .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body("clear sky")))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/air_pollution"))
            .respond_with(ResponseTemplate::new(200).set_body_json(air_pollution_body(1)))
            .mount(&mock_server)
            .await;

        let mut config = app_config(&mock_server);
        config.weather.units = UnitSystem::Imperial;

        let report = service(&config).search_text("Lisbon").await.unwrap();
        assert_eq!(report.units, UnitSystem::Imperial);
        assert_eq!(report.current_animation, AnimationCategory::Sun);
    }

    #[tokio::test]
    async fn city_not_found_shows_provider_message() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({"cod": "404", "message": "city not found"})),
            )
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/air_pollution"))
            .respond_with(ResponseTemplate::new(200).set_body_json(air_pollution_body(1)))
            .expect(0)
            .mount(&mock_server)
            .await;

        let err = service(&app_config(&mock_server))
            .search_text("Atlantis")
            .await
            .unwrap_err();

        assert_eq!(err.user_message(), "Error: city not found");
    }

    #[tokio::test]
    async fn rate_limit_and_server_errors_show_provider_message() {
        for (status, message) in [
            (429, "Your account is temporary blocked"),
            (500, "Internal error"),
        ] {
            let mock_server = MockServer::start().await;

            Mock::given(method("GET"))
                .and(path("/forecast"))
                .respond_with(
                    ResponseTemplate::new(status)
                        .set_body_json(serde_json::json!({"cod": status, "message": message})),
                )
                .mount(&mock_server)
                .await;

            let err = service(&app_config(&mock_server))
                .search_text("Lisbon")
                .await
                .unwrap_err();

            assert_eq!(err.user_message(), format!("Error: {message}"));
        }
    }

    #[tokio::test]
    async fn air_quality_failure_drops_search_by_default() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body("mist")))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/air_pollution"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let err = service(&app_config(&mock_server))
            .search_text("Lisbon")
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::ServiceUnavailable(_)));
        assert_eq!(err.user_message(), GENERIC_FETCH_ERROR);
    }

    #[tokio::test]
    async fn air_quality_failure_kept_when_configured() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body("mist")))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/air_pollution"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(serde_json::json!({"cod": 401, "message": "Invalid API key"})),
            )
            .mount(&mock_server)
            .await;

        let mut config = app_config(&mock_server);
        config.search.keep_forecast_on_air_quality_failure = true;

        let report = service(&config).search_text("Lisbon").await.unwrap();
        assert_eq!(report.daily.len(), 5);
        assert_eq!(
            report.air_quality,
            AirQualityStatus::Failed {
                message: "Error: Invalid API key".to_string()
            }
        );
    }

    #[tokio::test]
    async fn empty_forecast_list_is_an_error() {
        let mock_server = MockServer::start().await;

        let mut body = forecast_body("mist");
        body["list"] = serde_json::json!([]);
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&mock_server)
            .await;

        let err = service(&app_config(&mock_server))
            .search_text("Lisbon")
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Internal(_)));
        assert_eq!(err.user_message(), GENERIC_FETCH_ERROR);
    }

    #[tokio::test]
    async fn slow_provider_hits_search_budget() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(forecast_body("mist"))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&mock_server)
            .await;

        let service = service(&app_config(&mock_server)).with_budget(Duration::from_millis(200));
        let city = CityName::new("Lisbon").unwrap();
        let err = service.search(&city).await.unwrap_err();

        assert!(matches!(err, ApplicationError::Timeout(_)));
    }
}

// ============================================================================
// Air Quality Lookup Tests
// ============================================================================

mod air_quality_tests {
    use super::*;

    #[tokio::test]
    async fn standalone_lookup_returns_first_reading() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/air_pollution"))
            .and(query_param("lat", "10.5"))
            .and(query_param("lon", "20.25"))
            .respond_with(ResponseTemplate::new(200).set_body_json(air_pollution_body(5)))
            .expect(1)
            .mount(&mock_server)
            .await;

        let location = GeoLocation::new(10.5, 20.25).unwrap();
        let status = service(&app_config(&mock_server))
            .air_quality(&location)
            .await
            .unwrap();

        let summary = status.summary().unwrap();
        assert_eq!(summary.index, 5);
        assert_eq!(summary.label, "Very Poor");
    }

    #[tokio::test]
    async fn empty_list_is_missing() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/air_pollution"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({"coord": {"lon": 0.0, "lat": 0.0}, "list": []}),
            ))
            .mount(&mock_server)
            .await;

        let status = service(&app_config(&mock_server))
            .air_quality(&GeoLocation::new_unchecked(0.0, 0.0))
            .await
            .unwrap();
        assert_eq!(status, AirQualityStatus::Missing);
    }
}

// ============================================================================
// Configuration Tests
// ============================================================================

mod config_tests {
    use super::*;

    #[test]
    fn adapter_requires_api_key() {
        let config = AppConfig::default();
        let err = WeatherAdapter::with_config(config.weather.to_weather_config()).unwrap_err();
        assert!(matches!(err, ApplicationError::Configuration(_)));
        assert!(err.user_message().starts_with("Configuration error"));
    }
}
