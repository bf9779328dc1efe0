//! Wire types: the raw `predictiveSearch` payload as the Storefront API
//! returns it, and the normalized shape handed back to callers.

use std::borrow::Cow;

use serde::{Deserialize, Deserializer, Serialize};

use crate::search_types::CategoryTag;

/* ------------------------------------------------------------------------- */
/* Shared                                                                    */
/* ------------------------------------------------------------------------- */

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub alt_text: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

/// Decimal amount kept exactly as the API sends it (`"10.00"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    pub amount: String,
    pub currency_code: String,
}

/* ------------------------------------------------------------------------- */
/* Raw payload                                                               */
/* ------------------------------------------------------------------------- */

/// `data` of the `predictiveSearch` operation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictiveSearchData {
    #[serde(default)]
    pub predictive_search: Option<PredictiveSearch>,
}

/// Per-category result lists. Unknown categories are ignored and a missing
/// or `null` list reads as empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictiveSearch {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub articles: Vec<PredictiveArticle>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub collections: Vec<PredictiveCollection>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub pages: Vec<PredictivePage>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub products: Vec<PredictiveProduct>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub queries: Vec<PredictiveQuery>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictiveArticle {
    #[serde(rename = "__typename", default)]
    pub typename: Option<String>,
    pub id: String,
    pub title: String,
    pub handle: String,
    #[serde(default)]
    pub image: Option<Image>,
    #[serde(default)]
    pub tracking_parameters: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictiveCollection {
    #[serde(rename = "__typename", default)]
    pub typename: Option<String>,
    pub id: String,
    pub title: String,
    pub handle: String,
    #[serde(default)]
    pub image: Option<Image>,
    #[serde(default)]
    pub tracking_parameters: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictivePage {
    #[serde(rename = "__typename", default)]
    pub typename: Option<String>,
    pub id: String,
    pub title: String,
    pub handle: String,
    #[serde(default)]
    pub tracking_parameters: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictiveProduct {
    #[serde(rename = "__typename", default)]
    pub typename: Option<String>,
    pub id: String,
    pub title: String,
    pub handle: String,
    #[serde(default)]
    pub tracking_parameters: Option<String>,
    #[serde(default)]
    pub variants: ProductVariants,
}

impl PredictiveProduct {
    pub fn first_variant(&self) -> Option<&ProductVariant> {
        self.variants.nodes.first()
    }
}

/// `variants(first: 1)` connection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductVariants {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub nodes: Vec<ProductVariant>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductVariant {
    pub id: String,
    #[serde(default)]
    pub image: Option<Image>,
    #[serde(default)]
    pub price: Option<Money>,
}

/// `SearchQuerySuggestion`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictiveQuery {
    #[serde(rename = "__typename", default)]
    pub typename: Option<String>,
    pub text: String,
    /// Text with the matched part wrapped in markup.
    #[serde(default)]
    pub styled_text: Option<String>,
    #[serde(default)]
    pub tracking_parameters: Option<String>,
}

/* ------------------------------------------------------------------------- */
/* Normalized shape                                                          */
/* ------------------------------------------------------------------------- */

/// One search hit, whatever its category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedResultItem {
    #[serde(rename = "__typename")]
    pub type_name: String,
    /// Empty for query suggestions.
    pub handle: String,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub styled_title: Option<String>,
    /// Locale prefix + canonical path + tracking suffix.
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Money>,
}

/// Group name as it appears in the response (`"products"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultGroupKind {
    Queries,
    Products,
    Collections,
    Pages,
    Articles,
}

impl ResultGroupKind {
    pub fn category(self) -> CategoryTag {
        match self {
            ResultGroupKind::Queries => CategoryTag::Query,
            ResultGroupKind::Products => CategoryTag::Product,
            ResultGroupKind::Collections => CategoryTag::Collection,
            ResultGroupKind::Pages => CategoryTag::Page,
            ResultGroupKind::Articles => CategoryTag::Article,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultGroup {
    #[serde(rename = "type")]
    pub kind: ResultGroupKind,
    pub items: Vec<NormalizedResultItem>,
}

/// Normalized results plus the running total.
///
/// `results` is `None` only when the search was skipped (empty term).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedSearchResponse {
    pub results: Option<Cow<'static, [ResultGroup]>>,
    pub total_results: usize,
}

impl NormalizedSearchResponse {
    /// Response for a search that never reached the backend.
    pub fn skipped() -> Self {
        Self {
            results: None,
            total_results: 0,
        }
    }

    pub fn groups(&self) -> &[ResultGroup] {
        self.results.as_deref().unwrap_or_default()
    }
}

/// Full JSON body returned by the predictive search route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictiveSearchPayload {
    pub search_results: NormalizedSearchResponse,
    pub search_term: String,
    pub search_types: Vec<CategoryTag>,
}
