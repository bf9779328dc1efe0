//! Request extractor: `q`, `limit` and `type` from form body or URL query.
//!
//! Precedence for every field is form body → URL query → default, and an
//! empty value counts as absent at each step.

use serde::Serialize;
use tracing::debug;

use crate::search_types::{ANY_SEARCH_TYPE, CategoryTag, parse_search_types};

pub const DEFAULT_LIMIT: u32 = 10;

/// Decoded `key=value` pairs, in the order they were sent.
pub type FormPairs = [(String, String)];

/// A validated predictive search request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub search_term: String,
    /// Applied per category by the backend (`limitScope: EACH`).
    pub limit: u32,
    pub search_types: Vec<CategoryTag>,
}

impl SearchRequest {
    /// Builds a request from an optional form body and the URL query.
    ///
    /// A body that could not be read should be passed as `None`; it is
    /// then as if no form was submitted.
    pub fn extract(form: Option<&FormPairs>, query: &FormPairs) -> Self {
        let search_term = resolve_field(form, query, "q").unwrap_or_default().to_string();
        let limit = parse_limit(resolve_field(form, query, "limit"));
        let search_types =
            parse_search_types(resolve_field(form, query, "type").unwrap_or(ANY_SEARCH_TYPE));

        Self {
            search_term,
            limit,
            search_types,
        }
    }

    /// The backend is only contacted for a non-empty term.
    pub fn is_empty(&self) -> bool {
        self.search_term.is_empty()
    }
}

/// Ordered fallback chain for one field: the first non-empty value among
/// the form body and the URL query, in that order.
pub fn resolve_field<'a>(
    form: Option<&'a FormPairs>,
    query: &'a FormPairs,
    key: &str,
) -> Option<&'a str> {
    let sources: [Option<&'a FormPairs>; 2] = [form, Some(query)];
    sources
        .into_iter()
        .flatten()
        .find_map(|pairs| first_value(pairs, key).filter(|v| !v.is_empty()))
}

fn first_value<'a>(pairs: &'a FormPairs, key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// `None` → [`DEFAULT_LIMIT`]. A value that is not a positive integer also
/// falls back to the default instead of reaching the backend.
pub fn parse_limit(raw: Option<&str>) -> u32 {
    let Some(raw) = raw else {
        return DEFAULT_LIMIT;
    };

    match raw.trim().parse::<u32>() {
        Ok(n) if n > 0 => n,
        _ => {
            debug!(limit = %raw, default = DEFAULT_LIMIT, "invalid limit, using default");
            DEFAULT_LIMIT
        }
    }
}
