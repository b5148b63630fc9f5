//! Data models for the weather brief
//!
//! - Location: a geocoded place
//! - Forecast: daily weather aggregates and the page view model

pub mod forecast;
pub mod location;

pub use forecast::{BriefPage, DailyBrief};
pub use location::Location;
