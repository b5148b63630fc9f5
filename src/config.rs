//! Configuration management for the weather brief server
//!
//! Settings come from an optional TOML file and `WEATHER_BRIEF_*` environment
//! variables. Every field has a default, so the server runs with no
//! configuration at all.

use crate::error::ConfigError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

const CONFIG_PATH_ENV: &str = "WEATHER_BRIEF_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "weather-brief.toml";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BriefConfig {
    /// HTTP server settings
    pub server: ServerConfig,
    /// Weather API settings
    pub weather: WeatherConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
    /// Budget for both outbound calls of one brief request
    #[serde(default = "default_request_deadline")]
    pub request_deadline_seconds: u64,
    /// Directory holding `index.html` and `brief.html`; embedded templates are used when unset
    #[serde(default)]
    pub templates_dir: Option<PathBuf>,
}

/// Weather API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    #[serde(default = "default_geocoding_base_url")]
    pub geocoding_base_url: String,
    #[serde(default = "default_forecast_base_url")]
    pub forecast_base_url: String,
    /// Per-call HTTP timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_seconds: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8090
}

fn default_request_deadline() -> u64 {
    10
}

fn default_geocoding_base_url() -> String {
    "https://geocoding-api.open-meteo.com/v1".to_string()
}

fn default_forecast_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_weather_timeout() -> u64 {
    8
}

fn default_user_agent() -> String {
    format!("weather-brief/{}", crate::VERSION)
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_deadline_seconds: default_request_deadline(),
            templates_dir: None,
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            geocoding_base_url: default_geocoding_base_url(),
            forecast_base_url: default_forecast_base_url(),
            timeout_seconds: default_weather_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    #[must_use]
    pub fn request_deadline(&self) -> Duration {
        Duration::from_secs(self.request_deadline_seconds)
    }
}

impl WeatherConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl BriefConfig {
    /// Load configuration from the default file location and environment
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from the given file (if it exists) and environment
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path
            .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        let settings = Config::builder()
            .add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            )
            .add_source(
                Environment::with_prefix("WEATHER_BRIEF")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {}", config_file.display()))?;

        let config: BriefConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::new("Server port must not be zero"));
        }

        if !(1..=300).contains(&self.server.request_deadline_seconds) {
            return Err(ConfigError::new(
                "Request deadline must be between 1 and 300 seconds",
            ));
        }

        if !(1..=300).contains(&self.weather.timeout_seconds) {
            return Err(ConfigError::new(
                "Weather API timeout must be between 1 and 300 seconds",
            ));
        }

        for url in [
            &self.weather.geocoding_base_url,
            &self.weather.forecast_base_url,
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::new(format!(
                    "Weather API base URL '{url}' must be an HTTP or HTTPS URL"
                )));
            }
        }

        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::new(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BriefConfig::default();
        assert_eq!(config.server.port, 8090);
        assert_eq!(config.server.request_deadline(), Duration::from_secs(10));
        assert_eq!(config.weather.timeout(), Duration::from_secs(8));
        assert_eq!(
            config.weather.geocoding_base_url,
            "https://geocoding-api.open-meteo.com/v1"
        );
        assert_eq!(config.weather.forecast_base_url, "https://api.open-meteo.com/v1");
        assert_eq!(config.logging.level, "info");
        assert!(config.server.templates_dir.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bind_address() {
        let config = BriefConfig::default();
        assert_eq!(config.server.bind_address(), "0.0.0.0:8090");
    }

    #[test]
    fn test_config_validation_zero_port() {
        let mut config = BriefConfig::default();
        config.server.port = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("port"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = BriefConfig::default();
        config.weather.timeout_seconds = 500;
        assert!(config.validate().unwrap_err().to_string().contains("timeout"));

        let mut config = BriefConfig::default();
        config.server.request_deadline_seconds = 0;
        assert!(config.validate().unwrap_err().to_string().contains("deadline"));
    }

    #[test]
    fn test_config_validation_base_url() {
        let mut config = BriefConfig::default();
        config.weather.forecast_base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = BriefConfig::default();
        config.logging.level = "loud".to_string();
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "weather-brief-test-{}.toml",
            std::process::id()
        ));
        std::fs::write(
            &path,
            "[server]\nport = 9100\n\n[logging]\nlevel = \"debug\"\n",
        )
        .unwrap();

        let config = BriefConfig::load_from_path(Some(path.clone()));
        std::fs::remove_file(&path).unwrap();

        let config = config.unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.server.request_deadline_seconds, 10);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let path = std::env::temp_dir().join(format!(
            "weather-brief-invalid-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "[weather]\ntimeout_seconds = 0\n").unwrap();

        let result = BriefConfig::load_from_path(Some(path.clone()));
        std::fs::remove_file(&path).unwrap();

        assert!(result.is_err());
    }
}
