use std::error::Error;

use storefront_client::telemetry;
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load environment variables from .env file (optional in containers,
    // where the environment is injected directly).
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(telemetry::env_filter_with_level("warn", Level::INFO))
        .with(telemetry::layer(telemetry::SERVICE_TARGETS))
        .try_init()?;

    if let Err(e) = dotenv {
        tracing::debug!(error = %e, "no .env file loaded");
    }

    api::start().await?;

    Ok(())
}
