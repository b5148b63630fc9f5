//! Location model for geocoded places

use serde::{Deserialize, Serialize};

/// A geocoded place
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// Place name as returned by the geocoder
    pub name: String,
    /// First-level administrative area (state, province, ...)
    pub region: Option<String>,
    /// Country name
    pub country: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Location {
    /// Create a new location without a region
    #[must_use]
    pub fn new(name: String, country: String, latitude: f64, longitude: f64) -> Self {
        Self {
            name,
            region: None,
            country,
            latitude,
            longitude,
        }
    }

    /// Attach a region; an empty string leaves the region unset
    #[must_use]
    pub fn with_region(mut self, region: String) -> Self {
        self.region = Some(region).filter(|r| !r.is_empty());
        self
    }

    /// "Name, Region, Country" with empty segments left out
    #[must_use]
    pub fn display_label(&self) -> String {
        let region = self.region.as_deref().unwrap_or_default();
        [self.name.as_str(), region, self.country.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}
