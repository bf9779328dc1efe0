use std::sync::Arc;

use axum::{
    Form, Json,
    extract::{Path, Query, State, rejection::FormRejection, rejection::QueryRejection},
    http::{HeaderMap, Method},
};
use predictive_search::{
    PredictiveSearchPayload, SearchContext, SearchRequest, fetch_predictive_search_results,
};
use storefront_client::{I18n, is_locale};
use tracing::{debug, error, info};

use crate::{
    core::{
        app_state::AppState,
        request_context::{buyer_from_headers, request_id},
    },
    error_handler::{AppError, AppResult},
};

type Pairs = Vec<(String, String)>;

/// `/api/predictive-search`
pub async fn predictive_search_route(
    State(state): State<Arc<AppState>>,
    method: Method,
    headers: HeaderMap,
    query: Result<Query<Pairs>, QueryRejection>,
    form: Result<Form<Pairs>, FormRejection>,
) -> AppResult<Json<PredictiveSearchPayload>> {
    handle(state, None, method, headers, query, form).await
}

/// `/{locale}/api/predictive-search`
pub async fn localized_predictive_search_route(
    State(state): State<Arc<AppState>>,
    Path(locale): Path<String>,
    method: Method,
    headers: HeaderMap,
    query: Result<Query<Pairs>, QueryRejection>,
    form: Result<Form<Pairs>, FormRejection>,
) -> AppResult<Json<PredictiveSearchPayload>> {
    handle(state, Some(locale), method, headers, query, form).await
}

async fn handle(
    state: Arc<AppState>,
    locale: Option<String>,
    method: Method,
    headers: HeaderMap,
    query: Result<Query<Pairs>, QueryRejection>,
    form: Result<Form<Pairs>, FormRejection>,
) -> AppResult<Json<PredictiveSearchPayload>> {
    let request_id = request_id(&headers);

    if method != Method::POST {
        debug!(request_id = %request_id, %method, "predictive_search_route: rejected method");
        return Err(AppError::InvalidMethod(method.to_string()));
    }

    // A malformed segment is served as the default market with unprefixed URLs.
    let locale = locale.filter(|l| {
        let valid = is_locale(l);
        if !valid {
            debug!(request_id = %request_id, locale = %l, "locale segment ignored");
        }
        valid
    });

    let query = query.map(|Query(q)| q).unwrap_or_default();
    // Unreadable bodies (wrong content type, bad encoding) count as no form.
    let form = match form {
        Ok(Form(pairs)) => Some(pairs),
        Err(rejection) => {
            debug!(request_id = %request_id, %rejection, "form body ignored");
            None
        }
    };

    let request = SearchRequest::extract(form.as_deref(), &query);
    let context = SearchContext {
        i18n: I18n::from_locale(locale.as_deref(), &state.default_i18n),
        buyer: buyer_from_headers(&headers),
    };

    debug!(
        request_id = %request_id,
        term = %request.search_term,
        limit = request.limit,
        locale = locale.as_deref().unwrap_or("-"),
        "predictive_search_route: start"
    );

    match fetch_predictive_search_results(&state.storefront, request, &context, locale.as_deref())
        .await
    {
        Ok(payload) => {
            info!(
                request_id = %request_id,
                total = payload.search_results.total_results,
                "predictive_search_route: success"
            );
            Ok(Json(payload))
        }
        Err(err) => {
            error!(
                request_id = %request_id,
                error = %err,
                "predictive_search_route: search failed"
            );
            Err(err.into())
        }
    }
}
