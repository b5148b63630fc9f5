//! Page handlers for the index and brief routes

use std::future::Future;
use std::time::Duration;

use axum::{
    Form,
    extract::{FromRequest, Multipart, Request, State},
    http::header,
    response::Html,
};
use serde::Deserialize;
use tokio::time::{Instant, timeout_at};
use tracing::{debug, error, info, instrument, warn};

use crate::error::{PageError, WeatherError};
use crate::models::BriefPage;
use crate::web::AppState;

pub const BAD_FORM: &str = "Bad form submission";
pub const CITY_REQUIRED: &str = "City is required";
pub const CITY_NOT_FOUND: &str = "City not found. Try another.";
pub const FORECAST_UNAVAILABLE: &str = "Could not load forecast. Try again.";

/// Days requested from the forecast API; the page shows only today
const BRIEF_DAYS: u32 = 1;

#[derive(Debug, Deserialize)]
pub struct BriefForm {
    #[serde(default)]
    pub city: String,
}

/// The submitted `city` field, from a urlencoded or multipart form.
/// A form without the field yields an empty string.
#[derive(Debug)]
pub struct CityInput(pub String);

fn bad_form(reason: impl std::fmt::Display) -> PageError {
    debug!("Rejected brief form: {}", reason);
    PageError::BadRequest(BAD_FORM)
}

impl<S: Send + Sync> FromRequest<S> for CityInput {
    type Rejection = PageError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("multipart/form-data"));

        if !is_multipart {
            let Form(form) = Form::<BriefForm>::from_request(req, state)
                .await
                .map_err(bad_form)?;
            return Ok(Self(form.city));
        }

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(bad_form)?;
        while let Some(field) = multipart.next_field().await.map_err(bad_form)? {
            if field.name() == Some("city") {
                return Ok(Self(field.text().await.map_err(bad_form)?));
            }
        }
        Ok(Self(String::new()))
    }
}

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    state.templates.render_index().map(Html).map_err(render_failed)
}

pub async fn method_not_allowed() -> PageError {
    PageError::MethodNotAllowed
}

#[instrument(skip_all)]
pub async fn brief(
    State(state): State<AppState>,
    CityInput(city): CityInput,
) -> Result<Html<String>, PageError> {
    let deadline = Instant::now() + state.request_deadline;

    let city = city.trim();
    if city.is_empty() {
        return Err(PageError::BadRequest(CITY_REQUIRED));
    }

    let location = within(deadline, state.request_deadline, state.weather.geocode(city))
        .await
        .map_err(|err| {
            log_lookup_failure(&format!("Geocoding '{city}'"), &err);
            PageError::BadRequest(CITY_NOT_FOUND)
        })?;

    let days = within(
        deadline,
        state.request_deadline,
        state
            .weather
            .daily_forecast(location.latitude, location.longitude, BRIEF_DAYS),
    )
    .await
    .map_err(|err| {
        log_lookup_failure(
            &format!("Forecast for {}", location.format_coordinates()),
            &err,
        );
        PageError::BadRequest(FORECAST_UNAVAILABLE)
    })?;

    let Some(today) = days.into_iter().next() else {
        warn!("Forecast for {} had no days", location.format_coordinates());
        return Err(PageError::BadRequest(FORECAST_UNAVAILABLE));
    };

    let page = BriefPage::new(&location, today);
    info!(
        "Brief for {}: {} ({})",
        page.location_label, page.today_text, page.today.date
    );
    state
        .templates
        .render_brief(&page)
        .map(Html)
        .map_err(render_failed)
}

fn log_lookup_failure(what: &str, err: &WeatherError) {
    if err.is_timeout() {
        warn!("{} timed out: {}", what, err);
    } else {
        warn!("{} failed: {}", what, err);
    }
}

fn render_failed(err: minijinja::Error) -> PageError {
    error!("Template rendering failed: {:#}", err);
    PageError::Render
}

/// Run an outbound call, failing as a network timeout once `deadline` passes
async fn within<T>(
    deadline: Instant,
    budget: Duration,
    call: impl Future<Output = Result<T, WeatherError>>,
) -> Result<T, WeatherError> {
    timeout_at(deadline, call)
        .await
        .map_err(|_| WeatherError::timeout(budget))?
}
