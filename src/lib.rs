//! `weather-brief` - a one-day weather brief for any city
//!
//! A small axum frontend: the user submits a city name, the server geocodes
//! it, fetches today's forecast from Open-Meteo and renders an HTML brief.

pub mod config;
pub mod error;
pub mod models;
pub mod pages;
pub mod telemetry;
pub mod templates;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use config::BriefConfig;
pub use error::{ConfigError, PageError, WeatherError};
pub use models::{BriefPage, DailyBrief, Location};
pub use templates::Templates;
pub use weather::{OpenMeteoClient, WeatherService, weather_text};
pub use web::AppState;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
