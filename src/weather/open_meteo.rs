//! Open-Meteo geocoding and forecast client
//!
//! Both endpoints are free and need no API key. Each lookup is a single GET
//! with no retries and no caching.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument};

use super::WeatherService;
use crate::config::WeatherConfig;
use crate::error::WeatherError;
use crate::models::{DailyBrief, Location};

/// Shortest city name worth sending to the geocoder
pub const MIN_CITY_CHARS: usize = 2;

const DAILY_VARIABLES: &str =
    "weather_code,temperature_2m_max,temperature_2m_min,precipitation_sum";

/// HTTP client for the Open-Meteo APIs. Cheap to share across requests.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: Client,
    geocoding_base_url: String,
    forecast_base_url: String,
}

impl OpenMeteoClient {
    /// Create a client from the weather configuration
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            geocoding_base_url: config.geocoding_base_url.trim_end_matches('/').to_string(),
            forecast_base_url: config.forecast_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn geocoding_url(&self, city: &str) -> String {
        format!(
            "{}/search?name={}&count=1&language=en&format=json",
            self.geocoding_base_url,
            urlencoding::encode(city)
        )
    }

    fn forecast_url(&self, latitude: f64, longitude: f64, days: u32) -> String {
        format!(
            "{}/forecast?latitude={:.6}&longitude={:.6}&daily={}&timezone=auto&forecast_days={}",
            self.forecast_base_url, latitude, longitude, DAILY_VARIABLES, days
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, WeatherError> {
        debug!("Open-Meteo request URL: {}", url);
        let start_time = Instant::now();

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Upstream {
                status: status.as_u16(),
            });
        }

        let body = response.json::<T>().await?;
        debug!(
            "Open-Meteo responded in {:.3}s",
            start_time.elapsed().as_secs_f64()
        );
        Ok(body)
    }
}

#[async_trait]
impl WeatherService for OpenMeteoClient {
    #[instrument(skip(self))]
    async fn geocode(&self, city: &str) -> Result<Location, WeatherError> {
        if city.chars().count() < MIN_CITY_CHARS {
            return Err(WeatherError::invalid_input(format!(
                "city name must be at least {MIN_CITY_CHARS} characters"
            )));
        }

        let response: api::GeocodingResponse = self.get_json(&self.geocoding_url(city)).await?;

        // No disambiguation: the geocoder's first match wins.
        let location: Location = response
            .results
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::NoMatch {
                query: city.to_string(),
            })?
            .into();

        info!(
            "Geocoded '{}' to {} ({})",
            city,
            location.display_label(),
            location.format_coordinates()
        );
        Ok(location)
    }

    #[instrument(skip(self))]
    async fn daily_forecast(
        &self,
        latitude: f64,
        longitude: f64,
        days: u32,
    ) -> Result<Vec<DailyBrief>, WeatherError> {
        let response: api::ForecastResponse = self
            .get_json(&self.forecast_url(latitude, longitude, days))
            .await?;

        let briefs = response.daily.unwrap_or_default().into_briefs();
        if briefs.is_empty() {
            return Err(WeatherError::NoData);
        }

        info!("Loaded {} forecast day(s)", briefs.len());
        Ok(briefs)
    }
}

/// Open-Meteo response structures
mod api {
    use crate::models::{DailyBrief, Location};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct GeocodingResponse {
        pub results: Option<Vec<GeocodingResult>>,
    }

    #[derive(Debug, Deserialize)]
    pub struct GeocodingResult {
        pub name: String,
        pub latitude: f64,
        pub longitude: f64,
        pub country: Option<String>,
        pub admin1: Option<String>,
    }

    impl From<GeocodingResult> for Location {
        fn from(result: GeocodingResult) -> Self {
            Location::new(
                result.name,
                result.country.unwrap_or_default(),
                result.latitude,
                result.longitude,
            )
            .with_region(result.admin1.unwrap_or_default())
        }
    }

    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub daily: Option<DailyData>,
    }

    /// Arrays are aligned by day index but may be short or hold nulls.
    #[derive(Debug, Default, Deserialize)]
    pub struct DailyData {
        #[serde(default)]
        pub time: Vec<String>,
        #[serde(default)]
        pub weather_code: Vec<Option<i32>>,
        #[serde(rename = "temperature_2m_max", default)]
        pub temperature_max: Vec<Option<f64>>,
        #[serde(rename = "temperature_2m_min", default)]
        pub temperature_min: Vec<Option<f64>>,
        #[serde(rename = "precipitation_sum", default)]
        pub precipitation: Vec<Option<f64>>,
    }

    /// Value at `index`, or the type's zero when the array is short or null there
    fn value_at<T: Copy + Default>(values: &[Option<T>], index: usize) -> T {
        values.get(index).copied().flatten().unwrap_or_default()
    }

    impl DailyData {
        pub fn into_briefs(self) -> Vec<DailyBrief> {
            self.time
                .iter()
                .enumerate()
                .map(|(i, date)| DailyBrief {
                    date: date.clone(),
                    weather_code: value_at(&self.weather_code, i),
                    max_temp: value_at(&self.temperature_max, i),
                    min_temp: value_at(&self.temperature_min, i),
                    precipitation_total: value_at(&self.precipitation, i),
                })
                .collect()
        }
    }
}
