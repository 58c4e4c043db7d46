//! Text rendering of reports and search state

use application::{AirQualityStatus, SearchState, WeatherReport};
use domain::{AnimationCategory, ForecastSample, UnitSystem};

/// Animation asset shown next to the current conditions
#[must_use]
pub const fn animation_asset(category: AnimationCategory) -> Option<&'static str> {
    match category {
        AnimationCategory::Snow => Some("assets/animations/snowy.json"),
        AnimationCategory::Rain => Some("assets/animations/rainy.json"),
        AnimationCategory::Cloud => Some("assets/animations/cloudy.json"),
        AnimationCategory::Sun => Some("assets/animations/sunny.json"),
        AnimationCategory::Thunderstorm => Some("assets/animations/thunderstorm.json"),
        AnimationCategory::None => None,
    }
}

/// Temperature with one decimal and the unit symbol, e.g. "18.3°C"
#[must_use]
pub fn format_temperature(value: f64, units: UnitSystem) -> String {
    format!("{value:.1}{}", units.temperature_symbol())
}

/// "AQI: n (Label)", or why no index is shown
#[must_use]
pub fn render_air_quality(status: &AirQualityStatus) -> String {
    match status {
        AirQualityStatus::Available(summary) => {
            format!("AQI: {} ({})", summary.index, summary.label)
        },
        AirQualityStatus::Missing => "AQI: not available".to_string(),
        AirQualityStatus::Failed { message } => format!("AQI: {message}"),
    }
}

fn render_hourly(sample: &ForecastSample, units: UnitSystem) -> String {
    format!(
        "  {}  {:<4} {}",
        sample.time().format("%H:%M"),
        sample.icon,
        format_temperature(sample.temperature.current, units)
    )
}

fn render_daily(sample: &ForecastSample, units: UnitSystem) -> String {
    format!(
        "  {}  {:<4} {} - {}",
        sample.date().format("%Y-%m-%d"),
        sample.icon,
        format_temperature(sample.temperature.min, units),
        format_temperature(sample.temperature.max, units)
    )
}

/// Full text rendering of a report
#[must_use]
pub fn render_report(report: &WeatherReport) -> String {
    let units = report.units;
    let current = &report.current;
    let mut out = String::new();

    out.push_str(&format!("{}\n", report.location.label()));
    out.push_str(&format!(
        "{}  {}\n",
        format_temperature(current.temperature.current, units),
        current.description
    ));
    out.push_str(&format!(
        "Feels like {}, humidity {}%\n",
        format_temperature(current.temperature.feels_like, units),
        current.humidity
    ));
    if let Some(asset) = animation_asset(report.current_animation) {
        out.push_str(&format!("Animation: {asset}\n"));
    }
    out.push_str(&format!("Icon: {}\n", current.icon_url()));

    out.push_str("\nAir Quality Index\n");
    out.push_str(&format!("  {}\n", render_air_quality(&report.air_quality)));

    out.push_str("\nHourly Forecast\n");
    for sample in &report.hourly {
        out.push_str(&render_hourly(sample, units));
        out.push('\n');
    }

    out.push_str(&format!("\n{}-Day Forecast\n", report.daily.len()));
    for day in &report.daily {
        out.push_str(&render_daily(&day.sample, units));
        out.push('\n');
    }

    out
}

/// Text for the current search state
#[must_use]
pub fn render_state(state: &SearchState) -> String {
    match state {
        SearchState::Idle => "Enter city name".to_string(),
        SearchState::Loading { city, .. } => format!("Loading weather for {city}..."),
        SearchState::Success { report, .. } => render_report(report),
        SearchState::Error { message, .. } => message.clone(),
    }
}

#[cfg(test)]
mod tests {
    use application::{AirQualitySummary, DEFAULT_HOURLY_ENTRIES};
    use chrono::{Duration, NaiveDate};
    use domain::{
        AirQualityLevel, ForecastSeries, GeoLocation, Location, PollutantComponents, Temperature,
    };

    use super::*;

    fn series(count: usize) -> ForecastSeries {
        let origin = NaiveDate::from_ymd_opt(2024, 7, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap();
        let samples = (0..count)
            .map(|i| ForecastSample {
                timestamp: origin + Duration::hours(3 * i64::try_from(i).unwrap()),
                temperature: Temperature {
                    current: 21.26,
                    min: 19.04,
                    max: 24.5,
                    feels_like: 20.0,
                },
                humidity: 48,
                description: "scattered clouds".to_string(),
                icon: "03d".to_string(),
            })
            .collect();
        let location = Location {
            name: "Madrid".to_string(),
            country: "ES".to_string(),
            coordinates: GeoLocation::new_unchecked(40.4165, -3.7026),
        };
        ForecastSeries::new(location, samples).unwrap()
    }

    fn report(air_quality: AirQualityStatus) -> WeatherReport {
        WeatherReport::build(
            &series(16),
            air_quality,
            UnitSystem::Metric,
            DEFAULT_HOURLY_ENTRIES,
        )
    }

    fn summary(index: i64) -> AirQualitySummary {
        let level = AirQualityLevel::from_index(index);
        AirQualitySummary {
            index,
            level,
            label: level.label(),
            components: PollutantComponents::default(),
        }
    }

    #[test]
    fn every_animated_category_has_an_asset() {
        for category in [
            AnimationCategory::Snow,
            AnimationCategory::Rain,
            AnimationCategory::Cloud,
            AnimationCategory::Sun,
            AnimationCategory::Thunderstorm,
        ] {
            assert!(animation_asset(category).is_some_and(|a| a.ends_with(".json")));
        }
        assert_eq!(animation_asset(AnimationCategory::None), None);
        assert_eq!(
            animation_asset(AnimationCategory::Rain),
            Some("assets/animations/rainy.json")
        );
    }

    #[test]
    fn temperature_has_one_decimal_and_symbol() {
        assert_eq!(format_temperature(21.26, UnitSystem::Metric), "21.3°C");
        assert_eq!(format_temperature(70.0, UnitSystem::Imperial), "70.0°F");
        assert_eq!(format_temperature(293.0, UnitSystem::Standard), "293.0K");
    }

    #[test]
    fn air_quality_lines() {
        assert_eq!(
            render_air_quality(&AirQualityStatus::Available(summary(3))),
            "AQI: 3 (Moderate)"
        );
        assert_eq!(
            render_air_quality(&AirQualityStatus::Available(summary(7))),
            "AQI: 7 (Unknown)"
        );
        assert_eq!(
            render_air_quality(&AirQualityStatus::Missing),
            "AQI: not available"
        );
    }

    #[test]
    fn report_contains_all_sections() {
        let text = render_report(&report(AirQualityStatus::Available(summary(1))));

        assert!(text.starts_with("Madrid, ES\n"));
        assert!(text.contains("21.3°C  scattered clouds"));
        assert!(text.contains("Animation: assets/animations/cloudy.json"));
        assert!(text.contains("Icon: https://openweathermap.org/img/wn/03d.png"));
        assert!(text.contains("AQI: 1 (Good)"));
        assert!(text.contains("  03:00  03d  21.3°C"));
        assert!(text.contains("2-Day Forecast"));
        assert!(text.contains("  2024-07-02  03d  19.0°C - 24.5°C"));
        assert_eq!(text.matches("°C - ").count(), 2);
    }

    #[test]
    fn report_shows_air_quality_failure() {
        let text = render_report(&report(AirQualityStatus::Failed {
            message: "Error: Invalid API key".to_string(),
        }));
        assert!(text.contains("AQI: Error: Invalid API key"));
    }

    #[test]
    fn state_lines() {
        assert_eq!(render_state(&SearchState::Idle), "Enter city name");

        let mut session = application::SearchSession::new();
        session.submit("Madrid").unwrap();
        assert_eq!(render_state(session.state()), "Loading weather for Madrid...");
    }
}
