//! Minimal client for a hosted commerce platform's GraphQL Storefront API.
//!
//! The crate owns everything that is about *talking to* the Storefront API:
//! connection settings, the request context (`@inContext` i18n and buyer),
//! the GraphQL envelope and the error hierarchy. What is queried and how the
//! payload is interpreted belongs to callers.

pub mod client;
pub mod config;
pub mod errors;
pub mod telemetry;
pub mod types;

pub use client::StorefrontClient;
pub use config::StorefrontConfig;
pub use errors::{ConfigError, StorefrontError, StorefrontProviderError, StorefrontResult};
pub use types::{BuyerInput, GraphQlResponse, I18n, is_locale};
