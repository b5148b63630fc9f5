//! Weather data access
//!
//! The page handlers only see the [`WeatherService`] trait; [`OpenMeteoClient`]
//! is the production implementation.

use async_trait::async_trait;

use crate::error::WeatherError;
use crate::models::{DailyBrief, Location};

pub mod open_meteo;

pub use open_meteo::OpenMeteoClient;

/// Read-only weather lookups used by the brief page
#[async_trait]
pub trait WeatherService: Send + Sync {
    /// Resolve a city name to its best matching location
    async fn geocode(&self, city: &str) -> Result<Location, WeatherError>;

    /// Fetch `days` days of daily aggregates for the given coordinates
    async fn daily_forecast(
        &self,
        latitude: f64,
        longitude: f64,
        days: u32,
    ) -> Result<Vec<DailyBrief>, WeatherError>;
}

/// Short label for a WMO weather code
#[must_use]
pub fn weather_text(code: i32) -> &'static str {
    match code {
        0 => "Clear sky",
        1..=3 => "Cloudy",
        45 | 48 => "Fog",
        61 | 63 | 65 => "Rain",
        71 | 73 | 75 => "Snow",
        80..=82 => "Showers",
        95 => "Thunderstorm",
        _ => "Mixed conditions",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, "Clear sky")]
    #[case(1, "Cloudy")]
    #[case(2, "Cloudy")]
    #[case(3, "Cloudy")]
    #[case(45, "Fog")]
    #[case(48, "Fog")]
    #[case(61, "Rain")]
    #[case(63, "Rain")]
    #[case(65, "Rain")]
    #[case(71, "Snow")]
    #[case(73, "Snow")]
    #[case(75, "Snow")]
    #[case(80, "Showers")]
    #[case(81, "Showers")]
    #[case(82, "Showers")]
    #[case(95, "Thunderstorm")]
    fn test_known_codes(#[case] code: i32, #[case] expected: &str) {
        assert_eq!(weather_text(code), expected);
    }

    #[test]
    fn test_unknown_codes_fall_back() {
        let known = [0, 1, 2, 3, 45, 48, 61, 63, 65, 71, 73, 75, 80, 81, 82, 95];
        for code in (-10..=120).filter(|code| !known.contains(code)) {
            assert_eq!(weather_text(code), "Mixed conditions", "code {code}");
        }
        assert_eq!(weather_text(i32::MAX), "Mixed conditions");
        assert_eq!(weather_text(i32::MIN), "Mixed conditions");
    }
}
