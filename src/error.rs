//! Error types for the weather brief service

use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Errors raised by the weather API client
#[derive(Error, Debug)]
pub enum WeatherError {
    /// Caller supplied a query the API cannot use
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Transport failure, including client and request deadline timeouts
    #[error("Network error: {message}")]
    Network { message: String, timed_out: bool },

    /// The API answered with a non-success status
    #[error("Upstream returned HTTP {status}")]
    Upstream { status: u16 },

    /// The API answered with a body we could not decode
    #[error("Invalid response body: {message}")]
    Decode { message: String },

    /// Geocoding returned no results
    #[error("No location matches '{query}'")]
    NoMatch { query: String },

    /// Forecast returned no days
    #[error("Forecast contained no daily data")]
    NoData,
}

impl WeatherError {
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
            timed_out: false,
        }
    }

    /// Request deadline elapsed before the call finished
    #[must_use]
    pub fn timeout(budget: Duration) -> Self {
        Self::Network {
            message: format!("request deadline of {}s exceeded", budget.as_secs_f64()),
            timed_out: true,
        }
    }

    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Network { timed_out: true, .. })
    }
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode {
                message: err.to_string(),
            }
        } else {
            Self::Network {
                message: err.to_string(),
                timed_out: err.is_timeout(),
            }
        }
    }
}

/// Invalid configuration detected at startup
#[derive(Error, Debug)]
#[error("Configuration error: {message}")]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Client-visible failures of a page request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Bad request: {0}")]
    BadRequest(&'static str),

    #[error("Page could not be rendered")]
    Render,
}

impl PageError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            PageError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            PageError::BadRequest(_) => StatusCode::BAD_REQUEST,
            PageError::Render => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text shown to the browser. Never carries upstream detail.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            PageError::MethodNotAllowed => "Method not allowed",
            PageError::BadRequest(message) => *message,
            PageError::Render => "Something went wrong. Try again.",
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        (self.status(), format!("{}\n", self.user_message())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = WeatherError::invalid_input("too short");
        assert!(matches!(err, WeatherError::InvalidInput { .. }));

        let err = WeatherError::network("connection reset");
        assert!(matches!(err, WeatherError::Network { .. }));
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_timeout_is_network_flavoured() {
        let err = WeatherError::timeout(Duration::from_secs(10));
        assert!(matches!(err, WeatherError::Network { .. }));
        assert!(err.is_timeout());
        assert!(err.to_string().contains("10s"));
    }

    #[test]
    fn test_page_error_status() {
        assert_eq!(
            PageError::MethodNotAllowed.status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        let err = PageError::BadRequest("City is required");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.user_message(), "City is required");
        assert_eq!(
            PageError::Render.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_config_error_message() {
        let err = ConfigError::new("port must not be zero");
        assert_eq!(
            err.to_string(),
            "Configuration error: port must not be zero"
        );
    }
}
