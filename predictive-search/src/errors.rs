use storefront_client::StorefrontError;
use thiserror::Error;

pub type PredictiveSearchResult<T> = Result<T, PredictiveSearchError>;

/// Failures that abort a predictive search request.
///
/// Malformed input never ends up here: unknown result types are dropped and
/// a bad `limit` falls back to the default during extraction.
#[derive(Debug, Error)]
pub enum PredictiveSearchError {
    /// The Storefront API answered without a `data` object.
    #[error("no data returned from storefront api: {reason}")]
    UpstreamUnavailable { reason: String },

    /// Transport/config failure while talking to the Storefront API.
    #[error(transparent)]
    Storefront(#[from] StorefrontError),
}
