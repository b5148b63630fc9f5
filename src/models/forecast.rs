//! Daily forecast model and the brief page view model

use super::Location;
use crate::weather::weather_text;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of aggregated weather
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct DailyBrief {
    /// Calendar day as sent by the API (`YYYY-MM-DD`)
    pub date: String,
    /// WMO weather interpretation code
    pub weather_code: i32,
    /// Maximum temperature in Celsius
    pub max_temp: f64,
    /// Minimum temperature in Celsius
    pub min_temp: f64,
    /// Precipitation sum in mm
    pub precipitation_total: f64,
}

impl DailyBrief {
    #[must_use]
    pub fn format_max_temp(&self) -> String {
        format!("{:.1}°C", self.max_temp)
    }

    #[must_use]
    pub fn format_min_temp(&self) -> String {
        format!("{:.1}°C", self.min_temp)
    }

    #[must_use]
    pub fn format_precipitation(&self) -> String {
        format!("{:.1} mm", self.precipitation_total)
    }

    /// Long form date, or the raw string if it does not parse
    #[must_use]
    pub fn format_date(&self) -> String {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .map(|date| date.format("%A, %-d %B %Y").to_string())
            .unwrap_or_else(|_| self.date.clone())
    }
}

/// Data handed to the brief template
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct BriefPage {
    pub location_label: String,
    pub today: DailyBrief,
    pub today_text: String,
}

impl BriefPage {
    #[must_use]
    pub fn new(location: &Location, today: DailyBrief) -> Self {
        Self {
            location_label: location.display_label(),
            today_text: weather_text(today.weather_code).to_string(),
            today,
        }
    }
}
