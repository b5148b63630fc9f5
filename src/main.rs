use anyhow::{Context, Result};
use weather_brief::{BriefConfig, telemetry, web};

#[tokio::main]
async fn main() -> Result<()> {
    let config = BriefConfig::load().context("Failed to load configuration")?;
    telemetry::init(&config.logging);

    tracing::debug!("Loaded configuration: {:?}", config);
    web::run(config).await
}
