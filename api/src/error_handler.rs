use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use predictive_search::PredictiveSearchError;
use serde::Serialize;
use storefront_client::{ConfigError, StorefrontError, StorefrontProviderError};
use thiserror::Error;

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error(transparent)]
    Config(#[from] ConfigError),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request / routing ---
    #[error("invalid request method: {0}")]
    InvalidMethod(String),

    // --- Upstream ---
    #[error("no data returned from storefront api: {0}")]
    UpstreamUnavailable(String),

    #[error(transparent)]
    Storefront(#[from] StorefrontError),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidMethod(_) => StatusCode::METHOD_NOT_ALLOWED,

            AppError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            AppError::Storefront(StorefrontError::Provider(p)) => match p {
                StorefrontProviderError::Timeout => StatusCode::GATEWAY_TIMEOUT,
                _ => StatusCode::BAD_GATEWAY,
            },

            // startup-only
            AppError::Config(_) | AppError::Storefront(StorefrontError::Config(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Bind(_) | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Bind(_) => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::InvalidMethod(_) => "INVALID_METHOD",
            AppError::UpstreamUnavailable(_) => "UPSTREAM_UNAVAILABLE",
            AppError::Storefront(StorefrontError::Config(_)) => "CONFIG_ERROR",
            AppError::Storefront(StorefrontError::Provider(p)) => match p {
                StorefrontProviderError::Timeout => "UPSTREAM_TIMEOUT",
                StorefrontProviderError::Unauthorized | StorefrontProviderError::Forbidden => {
                    "UPSTREAM_AUTH"
                }
                _ => "UPSTREAM_ERROR",
            },
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.error_code(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

impl From<PredictiveSearchError> for AppError {
    fn from(err: PredictiveSearchError) -> Self {
        match err {
            PredictiveSearchError::UpstreamUnavailable { reason } => {
                AppError::UpstreamUnavailable(reason)
            }
            PredictiveSearchError::Storefront(e) => AppError::Storefront(e),
        }
    }
}
