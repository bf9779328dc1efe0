//! Storefront API GraphQL client.
//!
//! Endpoint used:
//!   * POST {domain}/api/{version}/graphql.json
//!
//! Every request carries the public storefront token in
//! `X-Shopify-Storefront-Access-Token`. The client does not retry.

use std::time::{Duration, Instant};

use reqwest::{Client, header};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, error, warn};

use crate::{
    config::StorefrontConfig,
    errors::{StorefrontProviderError, StorefrontResult, make_snippet},
    types::{GraphQlRequest, GraphQlResponse},
};

const TOKEN_HEADER: &str = "x-shopify-storefront-access-token";

/// Thin GraphQL client bound to one shop.
#[derive(Debug, Clone)]
pub struct StorefrontClient {
    http: Client,
    endpoint: String,
}

impl StorefrontClient {
    /// Builds the shared HTTP client with default headers and timeout.
    ///
    /// # Errors
    /// - [`StorefrontProviderError::InvalidResponse`] if the token is not a
    ///   valid header value
    /// - transport errors if the HTTP client cannot be built
    pub fn from_config(cfg: &StorefrontConfig) -> StorefrontResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            TOKEN_HEADER,
            header::HeaderValue::from_str(&cfg.public_access_token).map_err(|e| {
                StorefrontProviderError::InvalidResponse(format!(
                    "invalid storefront token header: {e}"
                ))
            })?,
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let http = Client::builder()
            .user_agent("storefront-search/0.1")
            .timeout(Duration::from_secs(u64::from(cfg.timeout_secs)))
            .default_headers(headers)
            .build()?;

        let endpoint = cfg.graphql_endpoint();
        debug!(
            endpoint = %endpoint,
            timeout_secs = cfg.timeout_secs,
            "StorefrontClient initialized"
        );

        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Executes one GraphQL operation and returns the raw envelope.
    ///
    /// GraphQL `errors` are logged but left to the caller to interpret:
    /// a response may carry both `data` and `errors`.
    ///
    /// # Errors
    /// - provider errors for non-2xx statuses (401/403/404/429/5xx)
    /// - [`StorefrontProviderError::Timeout`] / `Network` for transport failures
    /// - [`StorefrontProviderError::InvalidResponse`] if the body is not the
    ///   expected JSON shape
    pub async fn query<V, T>(
        &self,
        operation: &str,
        document: &str,
        variables: &V,
    ) -> StorefrontResult<GraphQlResponse<T>>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        let started = Instant::now();
        let body = GraphQlRequest {
            query: document,
            variables,
        };

        debug!(operation, endpoint = %self.endpoint, "POST graphql");

        let resp = self.http.post(&self.endpoint).json(&body).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);

            error!(
                %status,
                %snippet,
                operation,
                endpoint = %self.endpoint,
                latency_ms = started.elapsed().as_millis(),
                "storefront returned non-success status"
            );

            return Err(StorefrontProviderError::from_status(status).into());
        }

        let out: GraphQlResponse<T> = match resp.json().await {
            Ok(v) => v,
            Err(e) => {
                error!(
                    error = %e,
                    operation,
                    latency_ms = started.elapsed().as_millis(),
                    "failed to decode storefront response"
                );
                return Err(StorefrontProviderError::InvalidResponse(e.to_string()).into());
            }
        };

        if let Some(message) = out.first_error() {
            warn!(
                operation,
                errors = out.errors.len(),
                first = %message,
                has_data = out.data.is_some(),
                "storefront returned graphql errors"
            );
        }

        debug!(
            operation,
            has_data = out.data.is_some(),
            latency_ms = started.elapsed().as_millis(),
            "graphql completed"
        );

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{errors::StorefrontError, types::I18n};

    fn cfg(domain: &str) -> StorefrontConfig {
        StorefrontConfig {
            store_domain: domain.into(),
            api_version: "2024-01".into(),
            public_access_token: "public-token".into(),
            timeout_secs: 2,
            default_i18n: I18n::default(),
        }
    }

    #[test]
    fn endpoint_is_derived_from_config() {
        let client = StorefrontClient::from_config(&cfg("https://shop.example")).unwrap();
        assert_eq!(
            client.endpoint(),
            "https://shop.example/api/2024-01/graphql.json"
        );
    }

    #[test]
    fn rejects_token_with_control_characters() {
        let mut bad = cfg("https://shop.example");
        bad.public_access_token = "tok\nen".into();
        let err = StorefrontClient::from_config(&bad).unwrap_err();
        assert!(matches!(
            err,
            StorefrontError::Provider(StorefrontProviderError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_network_error() {
        // Port 9 (discard) is not expected to accept connections locally.
        let client = StorefrontClient::from_config(&cfg("http://127.0.0.1:9")).unwrap();
        let err = client
            .query::<_, serde_json::Value>("shop_name", "{ shop { name } }", &serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StorefrontError::Provider(
                StorefrontProviderError::Network(_) | StorefrontProviderError::Timeout
            )
        ));
    }
}
