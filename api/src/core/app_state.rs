use storefront_client::{I18n, StorefrontClient, StorefrontConfig};
use tracing::info;

use crate::error_handler::AppResult;

/// Shared state for all HTTP handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Client bound to the configured shop; cloned handles share one pool.
    pub storefront: StorefrontClient,
    /// i18n used for requests without a locale segment.
    pub default_i18n: I18n,
}

impl AppState {
    /// Builds the state from an explicit Storefront configuration.
    pub fn new(cfg: &StorefrontConfig) -> AppResult<Self> {
        let storefront = StorefrontClient::from_config(cfg)?;

        info!(
            endpoint = %storefront.endpoint(),
            language = %cfg.default_i18n.language,
            country = %cfg.default_i18n.country,
            "app state ready"
        );

        Ok(Self {
            storefront,
            default_i18n: cfg.default_i18n.clone(),
        })
    }

    /// Load shared state from environment variables.
    pub fn from_env() -> AppResult<Self> {
        let cfg = StorefrontConfig::from_env()?;
        Self::new(&cfg)
    }
}
