//! Storefront API connection settings loaded from environment variables.
//!
//! # Environment variables
//!
//! - `PUBLIC_STORE_DOMAIN`           = shop domain (mandatory), `https://` assumed without scheme
//! - `PUBLIC_STOREFRONT_API_TOKEN`   = public storefront access token (mandatory)
//! - `PUBLIC_STOREFRONT_API_VERSION` = API version (default `2024-01`)
//! - `STOREFRONT_TIMEOUT_SECS`       = request timeout in seconds (default `30`)
//! - `DEFAULT_LANGUAGE` / `DEFAULT_COUNTRY` = fallback i18n (default `EN` / `US`)

use crate::{
    errors::{ConfigError, env_opt_u32, env_or, must_env},
    types::I18n,
};

pub const DEFAULT_API_VERSION: &str = "2024-01";
pub const DEFAULT_TIMEOUT_SECS: u32 = 30;

/// Runtime configuration for [`crate::StorefrontClient`].
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Shop origin, e.g. "https://my-shop.myshopify.com".
    pub store_domain: String,
    /// Storefront API version, e.g. "2024-01".
    pub api_version: String,
    /// Public storefront access token.
    pub public_access_token: String,
    pub timeout_secs: u32,
    /// i18n used when a request carries no locale.
    pub default_i18n: I18n,
}

impl StorefrontConfig {
    /// Loads the configuration strictly from environment.
    ///
    /// # Errors
    /// - [`ConfigError::MissingVar`] if the domain or token is missing
    /// - [`ConfigError::InvalidNumber`] if `STOREFRONT_TIMEOUT_SECS` is not a u32
    /// - [`ConfigError::InvalidFormat`] if the domain or default i18n is malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        let store_domain = normalize_domain(&must_env("PUBLIC_STORE_DOMAIN")?)?;
        let public_access_token = must_env("PUBLIC_STOREFRONT_API_TOKEN")?;
        let api_version = env_or("PUBLIC_STOREFRONT_API_VERSION", DEFAULT_API_VERSION);
        let timeout_secs = env_opt_u32("STOREFRONT_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS);

        let defaults = I18n::default();
        let default_i18n = I18n {
            language: env_or("DEFAULT_LANGUAGE", &defaults.language).to_ascii_uppercase(),
            country: env_or("DEFAULT_COUNTRY", &defaults.country).to_ascii_uppercase(),
        };
        if !is_alpha(&default_i18n.language) || !is_alpha(&default_i18n.country) {
            return Err(ConfigError::InvalidFormat {
                var: "DEFAULT_LANGUAGE/DEFAULT_COUNTRY",
                reason: "expected alphabetic language and country codes",
            });
        }

        Ok(Self {
            store_domain,
            api_version,
            public_access_token,
            timeout_secs,
            default_i18n,
        })
    }

    /// Full GraphQL endpoint: `{domain}/api/{version}/graphql.json`.
    pub fn graphql_endpoint(&self) -> String {
        format!(
            "{}/api/{}/graphql.json",
            self.store_domain.trim_end_matches('/'),
            self.api_version
        )
    }
}

/// Adds `https://` when the domain has no scheme and strips trailing slashes.
///
/// # Errors
/// Returns [`ConfigError::InvalidFormat`] for an empty domain or one that
/// contains whitespace.
pub fn normalize_domain(raw: &str) -> Result<String, ConfigError> {
    let raw = raw.trim().trim_end_matches('/');
    if raw.is_empty() || raw.chars().any(char::is_whitespace) {
        return Err(ConfigError::InvalidFormat {
            var: "PUBLIC_STORE_DOMAIN",
            reason: "expected a host name such as my-shop.myshopify.com",
        });
    }

    if raw.starts_with("http://") || raw.starts_with("https://") {
        Ok(raw.to_string())
    } else {
        Ok(format!("https://{raw}"))
    }
}

fn is_alpha(code: &str) -> bool {
    !code.is_empty() && code.chars().all(|c| c.is_ascii_alphabetic())
}
