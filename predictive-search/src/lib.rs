//! Predictive search for storefronts: request extraction, the Storefront
//! `predictiveSearch` query and result normalization.
//!
//! Matching and ranking happen entirely in the backend; this crate only
//! shapes the request and the response.

pub mod errors;
pub mod model;
pub mod normalize;
pub mod query;
pub mod request;
pub mod search_types;
pub mod tracking;

use storefront_client::StorefrontClient;
use tracing::{debug, info};

pub use errors::{PredictiveSearchError, PredictiveSearchResult};
pub use model::{NormalizedResultItem, NormalizedSearchResponse, PredictiveSearchPayload};
pub use normalize::{NO_PREDICTIVE_SEARCH_RESULTS, normalize_predictive_search_results};
pub use query::SearchContext;
pub use request::SearchRequest;
pub use search_types::CategoryTag;

/// Runs one predictive search end to end.
///
/// An empty search term short-circuits: the backend is not contacted and
/// the payload echoes the requested types with `results: null`.
///
/// # Errors
/// See [`query::execute_predictive_search`]. Nothing is normalized when the
/// backend call fails.
pub async fn fetch_predictive_search_results(
    client: &StorefrontClient,
    request: SearchRequest,
    context: &SearchContext,
    locale: Option<&str>,
) -> PredictiveSearchResult<PredictiveSearchPayload> {
    if request.is_empty() {
        debug!(
            types = request.search_types.len(),
            "empty search term, skipping storefront"
        );
        return Ok(PredictiveSearchPayload {
            search_results: NormalizedSearchResponse::skipped(),
            search_term: request.search_term,
            search_types: request.search_types,
        });
    }

    let raw = query::execute_predictive_search(client, &request, context).await?;
    let search_results = normalize_predictive_search_results(raw, locale);

    info!(
        term = %request.search_term,
        groups = search_results.groups().len(),
        total = search_results.total_results,
        "predictive search completed"
    );

    Ok(PredictiveSearchPayload {
        search_results,
        search_term: request.search_term,
        search_types: request.search_types,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::{Arc, Mutex};

    use axum::{Json, Router, extract::State, routing::post};
    use serde_json::{Value, json};
    use storefront_client::{I18n, StorefrontConfig};

    use crate::{model::ResultGroupKind, normalize::is_no_results};

    type Captured = Arc<Mutex<Vec<Value>>>;

    /// Serves `reply` for every GraphQL POST and records request bodies.
    async fn stub_storefront(reply: Value) -> (StorefrontClient, Captured) {
        let captured: Captured = Arc::default();

        let app = Router::new()
            .route(
                "/api/2024-01/graphql.json",
                post(
                    |State((reply, seen)): State<(Value, Captured)>, Json(body): Json<Value>| async move {
                        seen.lock().unwrap().push(body);
                        Json(reply)
                    },
                ),
            )
            .with_state((reply, captured.clone()));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (client_for(&format!("http://{addr}")), captured)
    }

    fn client_for(domain: &str) -> StorefrontClient {
        StorefrontClient::from_config(&StorefrontConfig {
            store_domain: domain.into(),
            api_version: "2024-01".into(),
            public_access_token: "public-token".into(),
            timeout_secs: 5,
            default_i18n: I18n::default(),
        })
        .unwrap()
    }

    fn request(term: &str, types: &str) -> SearchRequest {
        let query = vec![
            ("q".to_string(), term.to_string()),
            ("type".to_string(), types.to_string()),
        ];
        SearchRequest::extract(None, &query)
    }

    #[tokio::test]
    async fn empty_term_never_contacts_the_backend() {
        // Nothing listens on the discard port; any request would fail.
        let client = client_for("http://127.0.0.1:9");

        let payload = fetch_predictive_search_results(
            &client,
            request("", "product,page"),
            &SearchContext::default(),
            None,
        )
        .await
        .unwrap();

        assert!(payload.search_results.results.is_none());
        assert_eq!(payload.search_results.total_results, 0);
        assert_eq!(
            payload.search_types,
            vec![CategoryTag::Product, CategoryTag::Page]
        );
    }

    #[tokio::test]
    async fn normalizes_backend_results_and_sends_fixed_variables() {
        let (client, captured) = stub_storefront(json!({
            "data": { "predictiveSearch": {
                "articles": [],
                "collections": [],
                "pages": [],
                "products": [{
                    "__typename": "Product",
                    "id": "gid://1",
                    "title": "Shirt",
                    "handle": "shirt",
                    "trackingParameters": "_pos=1",
                    "variants": { "nodes": [{
                        "id": "gid://v/1",
                        "image": { "url": "img.png" },
                        "price": { "amount": "10.00", "currencyCode": "USD" }
                    }]}
                }],
                "queries": [{ "__typename": "SearchQuerySuggestion", "text": "shirt", "styledText": "shirt" }]
            }}
        }))
        .await;

        let payload = fetch_predictive_search_results(
            &client,
            request("shi", "ANY"),
            &SearchContext::default(),
            Some("fr"),
        )
        .await
        .unwrap();

        let groups = payload.search_results.groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].kind, ResultGroupKind::Queries);
        assert_eq!(groups[1].kind, ResultGroupKind::Products);
        assert_eq!(groups[1].items[0].url, "/fr/products/shirt?_pos=1");
        assert_eq!(payload.search_results.total_results, 2);

        let seen = captured.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let variables = &seen[0]["variables"];
        assert_eq!(variables["limitScope"], "EACH");
        assert_eq!(variables["limit"], 10);
        assert_eq!(variables["searchTerm"], "shi");
        assert_eq!(variables["types"].as_array().unwrap().len(), 5);
        assert!(seen[0]["query"].as_str().unwrap().contains("predictiveSearch("));
    }

    #[tokio::test]
    async fn missing_data_is_fatal() {
        let (client, _) =
            stub_storefront(json!({ "errors": [{ "message": "Throttled" }] })).await;

        let err = fetch_predictive_search_results(
            &client,
            request("boots", "ANY"),
            &SearchContext::default(),
            None,
        )
        .await
        .unwrap_err();

        match err {
            PredictiveSearchError::UpstreamUnavailable { reason } => assert_eq!(reason, "Throttled"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn absent_predictive_search_maps_to_sentinel() {
        let (client, _) = stub_storefront(json!({ "data": { "predictiveSearch": null } })).await;

        let payload = fetch_predictive_search_results(
            &client,
            request("boots", "ANY"),
            &SearchContext::default(),
            None,
        )
        .await
        .unwrap();

        assert!(is_no_results(&payload.search_results));
        assert_eq!(payload.search_results.total_results, 0);
    }
}
