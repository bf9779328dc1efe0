//! Crate-wide error hierarchy for storefront-client.
//!
//! A single root type [`StorefrontError`] wraps provider (HTTP/GraphQL) and
//! configuration failures. Small helpers for reading environment variables
//! live here as well and return [`ConfigError`] directly.

use reqwest::StatusCode;
use thiserror::Error;

/* ------------------------------------------------------------------------- */
/* Public result alias                                                       */
/* ------------------------------------------------------------------------- */

/// Convenient alias for crate-wide results.
pub type StorefrontResult<T> = Result<T, StorefrontError>;

/* ------------------------------------------------------------------------- */
/* Top-level error                                                           */
/* ------------------------------------------------------------------------- */

/// Root error type for the storefront-client crate.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Storefront API transport or protocol failure.
    #[error(transparent)]
    Provider(#[from] StorefrontProviderError),

    /// Configuration problems (missing token, bad domain, etc.).
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Failure talking to the Storefront API.
#[derive(Debug, Error)]
pub enum StorefrontProviderError {
    /// Unauthorized (HTTP 401), usually a wrong storefront token.
    #[error("unauthorized")]
    Unauthorized,

    /// Forbidden (HTTP 403).
    #[error("forbidden")]
    Forbidden,

    /// Not found (HTTP 404), usually a wrong API version or store domain.
    #[error("not found")]
    NotFound,

    /// Rate limited (HTTP 429).
    #[error("rate limited")]
    RateLimited,

    /// Gateway / server error (HTTP 5xx).
    #[error("server error: status {0}")]
    Server(u16),

    /// Other non-2xx status not covered above.
    #[error("http status error: status {0}")]
    HttpStatus(u16),

    /// Timeout at transport level.
    #[error("timeout")]
    Timeout,

    /// Network/transport failure without HTTP status (DNS/connect/reset).
    #[error("network error: {0}")]
    Network(String),

    /// Response body did not match the expected GraphQL shape.
    #[error("invalid storefront response: {0}")]
    InvalidResponse(String),
}

impl StorefrontProviderError {
    /// Maps a non-success HTTP status onto a provider error.
    pub fn from_status(status: StatusCode) -> Self {
        let code = status.as_u16();
        match code {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            429 => Self::RateLimited,
            500..=599 => Self::Server(code),
            _ => Self::HttpStatus(code),
        }
    }
}

/* ------------------------------------------------------------------------- */
/* Config errors                                                             */
/* ------------------------------------------------------------------------- */

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable is missing or empty.
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// A number failed to parse (timeouts, ports).
    #[error("invalid number in {var}: {reason}")]
    InvalidNumber {
        var: &'static str,
        reason: &'static str,
    },

    /// Value had the wrong format (e.g. invalid domain or locale).
    #[error("invalid format in {var}: {reason}")]
    InvalidFormat {
        var: &'static str,
        reason: &'static str,
    },
}

/* ------------------------------------------------------------------------- */
/* Conversions                                                               */
/* ------------------------------------------------------------------------- */

impl From<reqwest::Error> for StorefrontError {
    fn from(e: reqwest::Error) -> Self {
        StorefrontError::Provider(StorefrontProviderError::from(e))
    }
}

impl From<reqwest::Error> for StorefrontProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return StorefrontProviderError::Timeout;
        }

        if let Some(status) = e.status() {
            return StorefrontProviderError::from_status(status);
        }

        if e.is_decode() {
            return StorefrontProviderError::InvalidResponse(e.to_string());
        }

        StorefrontProviderError::Network(e.to_string())
    }
}

/* ------------------------------------------------------------------------- */
/* Env helpers                                                               */
/* ------------------------------------------------------------------------- */

/// Fetches a required, non-empty environment variable.
///
/// # Errors
/// Returns [`ConfigError::MissingVar`] if the variable is absent or empty.
pub fn must_env(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(ConfigError::MissingVar(name)),
    }
}

/// Reads an optional environment variable, falling back to `default` when
/// it is unset or blank.
pub fn env_or(name: &'static str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Parses an optional `u32` from env (`Ok(None)` if unset/empty).
///
/// # Errors
/// Returns [`ConfigError::InvalidNumber`] if the variable is set but not a
/// valid `u32`.
pub fn env_opt_u32(name: &'static str) -> Result<Option<u32>, ConfigError> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => {
            v.trim()
                .parse::<u32>()
                .map(Some)
                .map_err(|_| ConfigError::InvalidNumber {
                    var: name,
                    reason: "expected u32",
                })
        }
        _ => Ok(None),
    }
}

/// Trims a response body down to a short, single-line snippet for logs.
pub fn make_snippet(body: &str) -> String {
    const MAX: usize = 256;
    let flat = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= MAX {
        flat
    } else {
        let cut: String = flat.chars().take(MAX).collect();
        format!("{cut}…")
    }
}
