use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::config::BriefConfig;
use crate::pages;
use crate::templates::Templates;
use crate::weather::{OpenMeteoClient, WeatherService};

/// Shared, read-only state for every request
#[derive(Clone)]
pub struct AppState {
    pub weather: Arc<dyn WeatherService>,
    pub templates: Arc<Templates>,
    /// Budget for both outbound calls of one brief request
    pub request_deadline: Duration,
}

impl AppState {
    pub fn new(
        weather: Arc<dyn WeatherService>,
        templates: Templates,
        request_deadline: Duration,
    ) -> Self {
        Self {
            weather,
            templates: Arc::new(templates),
            request_deadline,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/",
            // axum serves HEAD from the GET handler unless HEAD is routed itself
            get(pages::index)
                .head(pages::method_not_allowed)
                .fallback(pages::method_not_allowed),
        )
        .route(
            "/brief",
            post(pages::brief).fallback(pages::method_not_allowed),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: BriefConfig) -> Result<()> {
    let client = OpenMeteoClient::new(&config.weather).context("Failed to create HTTP client")?;
    let templates = Templates::load(config.server.templates_dir.as_deref())?;
    let state = AppState::new(
        Arc::new(client),
        templates,
        config.server.request_deadline(),
    );

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://localhost:{}", config.server.port);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
