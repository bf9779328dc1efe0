//! Backend query executor for the `predictiveSearch` operation.
//!
//! The selection set below is a fixed contract: the normalizer relies on
//! exactly these fields.

use serde::Serialize;
use storefront_client::{BuyerInput, GraphQlResponse, I18n, StorefrontClient};
use tracing::{debug, error};

use crate::{
    errors::{PredictiveSearchError, PredictiveSearchResult},
    model::{PredictiveSearch, PredictiveSearchData},
    request::SearchRequest,
    search_types::CategoryTag,
};

pub const PREDICTIVE_SEARCH_OPERATION: &str = "predictiveSearch";

pub const PREDICTIVE_SEARCH_QUERY: &str = r#"#graphql
  fragment PredictiveArticle on Article {
    __typename
    id
    title
    handle
    image {
      url
      altText
      width
      height
    }
    trackingParameters
  }
  fragment PredictiveCollection on Collection {
    __typename
    id
    title
    handle
    image {
      url
      altText
      width
      height
    }
    trackingParameters
  }
  fragment PredictivePage on Page {
    __typename
    id
    title
    handle
    trackingParameters
  }
  fragment PredictiveProduct on Product {
    __typename
    id
    title
    handle
    trackingParameters
    variants(first: 1) {
      nodes {
        id
        image {
          url
          altText
          width
          height
        }
        price {
          amount
          currencyCode
        }
      }
    }
  }
  fragment PredictiveQuery on SearchQuerySuggestion {
    __typename
    text
    styledText
    trackingParameters
  }
  query predictiveSearch(
    $country: CountryCode
    $language: LanguageCode
    $buyer: BuyerInput
    $limit: Int!
    $limitScope: PredictiveSearchLimitScope!
    $searchTerm: String!
    $types: [PredictiveSearchType!]
  ) @inContext(country: $country, language: $language, buyer: $buyer) {
    predictiveSearch(
      limit: $limit,
      limitScope: $limitScope,
      query: $searchTerm,
      types: $types,
    ) {
      articles {
        ...PredictiveArticle
      }
      collections {
        ...PredictiveCollection
      }
      pages {
        ...PredictivePage
      }
      products {
        ...PredictiveProduct
      }
      queries {
        ...PredictiveQuery
      }
    }
  }
"#;

/// `PredictiveSearchLimitScope`. Only `EACH` is ever sent: `limit` caps
/// every category separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LimitScope {
    Each,
}

/// Who is searching and in which market.
#[derive(Debug, Clone, Default)]
pub struct SearchContext {
    pub i18n: I18n,
    pub buyer: Option<BuyerInput>,
}

/// Variables of [`PREDICTIVE_SEARCH_QUERY`].
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictiveSearchVariables<'a> {
    pub country: &'a str,
    pub language: &'a str,
    pub buyer: Option<&'a BuyerInput>,
    pub limit: u32,
    pub limit_scope: LimitScope,
    pub search_term: &'a str,
    pub types: &'a [CategoryTag],
}

impl<'a> PredictiveSearchVariables<'a> {
    pub fn new(request: &'a SearchRequest, context: &'a SearchContext) -> Self {
        Self {
            country: &context.i18n.country,
            language: &context.i18n.language,
            buyer: context.buyer.as_ref(),
            limit: request.limit,
            limit_scope: LimitScope::Each,
            search_term: &request.search_term,
            types: &request.search_types,
        }
    }
}

/// Runs the predictive search query.
///
/// Returns the raw `predictiveSearch` payload, which may itself be absent;
/// that case is left to the normalizer.
///
/// # Errors
/// - [`PredictiveSearchError::UpstreamUnavailable`] when the response has no
///   `data` object
/// - [`PredictiveSearchError::Storefront`] for transport failures
pub async fn execute_predictive_search(
    client: &StorefrontClient,
    request: &SearchRequest,
    context: &SearchContext,
) -> PredictiveSearchResult<Option<PredictiveSearch>> {
    let variables = PredictiveSearchVariables::new(request, context);

    debug!(
        term = %request.search_term,
        limit = request.limit,
        types = request.search_types.len(),
        country = %context.i18n.country,
        language = %context.i18n.language,
        has_buyer = context.buyer.is_some(),
        "executing predictive search"
    );

    let response: GraphQlResponse<PredictiveSearchData> = client
        .query(PREDICTIVE_SEARCH_OPERATION, PREDICTIVE_SEARCH_QUERY, &variables)
        .await?;

    let reason = response
        .first_error()
        .unwrap_or("empty response")
        .to_string();

    match response.data {
        Some(data) => Ok(data.predictive_search),
        None => {
            error!(term = %request.search_term, %reason, "predictive search returned no data");
            Err(PredictiveSearchError::UpstreamUnavailable { reason })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn variables_shape() {
        let request = SearchRequest {
            search_term: "boots".into(),
            limit: 4,
            search_types: vec![CategoryTag::Product, CategoryTag::Query],
        };
        let context = SearchContext {
            i18n: I18n {
                language: "FR".into(),
                country: "CA".into(),
            },
            buyer: BuyerInput::from_parts(Some("tok"), None),
        };

        let value = serde_json::to_value(PredictiveSearchVariables::new(&request, &context)).unwrap();
        assert_eq!(
            value,
            json!({
                "country": "CA",
                "language": "FR",
                "buyer": { "customerAccessToken": "tok" },
                "limit": 4,
                "limitScope": "EACH",
                "searchTerm": "boots",
                "types": ["PRODUCT", "QUERY"]
            })
        );
    }

    #[test]
    fn anonymous_buyer_is_null() {
        let request = SearchRequest {
            search_term: "x".into(),
            limit: 10,
            search_types: vec![],
        };
        let value =
            serde_json::to_value(PredictiveSearchVariables::new(&request, &SearchContext::default()))
                .unwrap();
        assert_eq!(value["buyer"], serde_json::Value::Null);
        assert_eq!(value["country"], "US");
    }

    #[test]
    fn document_selects_every_category() {
        for field in ["articles", "collections", "pages", "products", "queries"] {
            assert!(PREDICTIVE_SEARCH_QUERY.contains(field), "missing {field}");
        }
        assert!(PREDICTIVE_SEARCH_QUERY.contains("variants(first: 1)"));
    }
}
