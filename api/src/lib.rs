use std::sync::Arc;

pub mod core;
pub mod error_handler;
pub mod routes;

use axum::{Router, routing::any};
use storefront_client::errors::env_or;
use tokio::signal;
use tracing::{error, info};

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
    routes::predictive_search::predictive_search_route::{
        localized_predictive_search_route, predictive_search_route,
    },
};

pub const DEFAULT_API_ADDRESS: &str = "0.0.0.0:3000";

/// Routes accept every method so that non-POST requests get the JSON
/// `INVALID_METHOD` error instead of an empty 405.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/predictive-search", any(predictive_search_route))
        .route(
            "/{locale}/api/predictive-search",
            any(localized_predictive_search_route),
        )
        .with_state(state)
}

/// Loads state from env, binds `API_ADDRESS` and serves until Ctrl+C.
pub async fn start() -> AppResult<()> {
    let state = Arc::new(AppState::from_env()?);
    let host_url = env_or("API_ADDRESS", DEFAULT_API_ADDRESS);

    let listener = tokio::net::TcpListener::bind(&host_url)
        .await
        .map_err(AppError::Bind)?;

    info!(address = %host_url, "predictive search api listening");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    Ok(())
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        // Without a signal handler keep serving until the process is killed.
        std::future::pending::<()>().await;
    }
}
