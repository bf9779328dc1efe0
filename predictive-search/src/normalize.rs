//! Result normalizer: five heterogeneous categories in, one item shape out.
//!
//! Groups are emitted in a fixed order (queries, products, collections,
//! pages, articles) whatever order the backend used, empty categories are
//! left out, and every URL gets the locale prefix and tracking suffix.

use std::borrow::Cow;

use storefront_client::is_locale;
use tracing::debug;

use crate::{
    model::{
        NormalizedResultItem, NormalizedSearchResponse, PredictiveArticle, PredictiveCollection,
        PredictivePage, PredictiveProduct, PredictiveQuery, PredictiveSearch, ResultGroup,
        ResultGroupKind,
    },
    tracking::apply_tracking_params,
};

/// Returned, by reference, whenever the backend sent no `predictiveSearch`
/// payload at all. Callers can tell it apart from "nothing matched" (an
/// empty group list) with [`is_no_results`].
pub static NO_PREDICTIVE_SEARCH_RESULTS: [ResultGroup; 5] = [
    ResultGroup {
        kind: ResultGroupKind::Queries,
        items: Vec::new(),
    },
    ResultGroup {
        kind: ResultGroupKind::Products,
        items: Vec::new(),
    },
    ResultGroup {
        kind: ResultGroupKind::Collections,
        items: Vec::new(),
    },
    ResultGroup {
        kind: ResultGroupKind::Pages,
        items: Vec::new(),
    },
    ResultGroup {
        kind: ResultGroupKind::Articles,
        items: Vec::new(),
    },
];

/// True when `response` borrows [`NO_PREDICTIVE_SEARCH_RESULTS`].
pub fn is_no_results(response: &NormalizedSearchResponse) -> bool {
    matches!(
        &response.results,
        Some(Cow::Borrowed(groups)) if std::ptr::eq(*groups, NO_PREDICTIVE_SEARCH_RESULTS.as_slice())
    )
}

/// One raw hit, tagged with its category.
#[derive(Debug, Clone)]
pub enum PredictiveResult {
    Query(PredictiveQuery),
    Product(PredictiveProduct),
    Collection(PredictiveCollection),
    Page(PredictivePage),
    Article(PredictiveArticle),
}

impl PredictiveResult {
    /// Maps the hit to a [`NormalizedResultItem`] under `locale_prefix`.
    pub fn into_item(self, locale_prefix: &str) -> NormalizedResultItem {
        match self {
            PredictiveResult::Query(query) => {
                let seed = format!("q={}", urlencoding::encode(&query.text));
                let tracking = apply_tracking_params(query.tracking_parameters.as_deref(), Some(&seed));
                NormalizedResultItem {
                    type_name: query
                        .typename
                        .unwrap_or_else(|| "SearchQuerySuggestion".into()),
                    handle: String::new(),
                    id: query.text.clone(),
                    image: None,
                    title: query.text,
                    styled_title: query.styled_text,
                    url: format!("{locale_prefix}/search{tracking}"),
                    price: None,
                }
            }
            PredictiveResult::Product(product) => {
                let tracking = apply_tracking_params(product.tracking_parameters.as_deref(), None);
                let (image, price) = product
                    .first_variant()
                    .map(|v| (v.image.clone(), v.price.clone()))
                    .unwrap_or_default();
                NormalizedResultItem {
                    type_name: product.typename.unwrap_or_else(|| "Product".into()),
                    url: format!("{locale_prefix}/products/{}{tracking}", product.handle),
                    handle: product.handle,
                    id: product.id,
                    image,
                    title: product.title,
                    styled_title: None,
                    price,
                }
            }
            PredictiveResult::Collection(collection) => {
                let tracking =
                    apply_tracking_params(collection.tracking_parameters.as_deref(), None);
                NormalizedResultItem {
                    type_name: collection.typename.unwrap_or_else(|| "Collection".into()),
                    url: format!("{locale_prefix}/collections/{}{tracking}", collection.handle),
                    handle: collection.handle,
                    id: collection.id,
                    image: collection.image,
                    title: collection.title,
                    styled_title: None,
                    price: None,
                }
            }
            PredictiveResult::Page(page) => {
                let tracking = apply_tracking_params(page.tracking_parameters.as_deref(), None);
                NormalizedResultItem {
                    type_name: page.typename.unwrap_or_else(|| "Page".into()),
                    url: format!("{locale_prefix}/pages/{}{tracking}", page.handle),
                    handle: page.handle,
                    id: page.id,
                    image: None,
                    title: page.title,
                    styled_title: None,
                    price: None,
                }
            }
            PredictiveResult::Article(article) => {
                let tracking = apply_tracking_params(article.tracking_parameters.as_deref(), None);
                NormalizedResultItem {
                    type_name: article.typename.unwrap_or_else(|| "Article".into()),
                    url: format!("{locale_prefix}/blog/{}{tracking}", article.handle),
                    handle: article.handle,
                    id: article.id,
                    image: article.image,
                    title: article.title,
                    styled_title: None,
                    price: None,
                }
            }
        }
    }
}

/// `"/<locale>"` for a well-formed locale segment, `""` otherwise.
///
/// Anything else (slashes, dots, empty) would let the prefix escape the
/// storefront's own paths.
pub fn locale_prefix(locale: Option<&str>) -> String {
    match locale.filter(|l| is_locale(l)) {
        Some(locale) => format!("/{locale}"),
        None => String::new(),
    }
}

/// Normalizes the raw payload and counts every emitted item.
///
/// An absent payload yields [`NO_PREDICTIVE_SEARCH_RESULTS`] with a zero
/// total.
pub fn normalize_predictive_search_results(
    predictive_search: Option<PredictiveSearch>,
    locale: Option<&str>,
) -> NormalizedSearchResponse {
    let mut total_results = 0;

    let Some(PredictiveSearch {
        articles,
        collections,
        pages,
        products,
        queries,
    }) = predictive_search
    else {
        return NormalizedSearchResponse {
            results: Some(Cow::Borrowed(NO_PREDICTIVE_SEARCH_RESULTS.as_slice())),
            total_results,
        };
    };

    let prefix = locale_prefix(locale);
    let mut results = Vec::with_capacity(NO_PREDICTIVE_SEARCH_RESULTS.len());

    let mut push = |kind: ResultGroupKind, hits: Vec<PredictiveResult>| {
        if hits.is_empty() {
            return;
        }
        let items: Vec<NormalizedResultItem> = hits
            .into_iter()
            .map(|hit| {
                total_results += 1;
                hit.into_item(&prefix)
            })
            .collect();
        debug!(category = %kind.category(), count = items.len(), "normalized result group");
        results.push(ResultGroup { kind, items });
    };

    push(
        ResultGroupKind::Queries,
        queries.into_iter().map(PredictiveResult::Query).collect(),
    );
    push(
        ResultGroupKind::Products,
        products.into_iter().map(PredictiveResult::Product).collect(),
    );
    push(
        ResultGroupKind::Collections,
        collections
            .into_iter()
            .map(PredictiveResult::Collection)
            .collect(),
    );
    push(
        ResultGroupKind::Pages,
        pages.into_iter().map(PredictiveResult::Page).collect(),
    );
    push(
        ResultGroupKind::Articles,
        articles.into_iter().map(PredictiveResult::Article).collect(),
    );

    NormalizedSearchResponse {
        results: Some(Cow::Owned(results)),
        total_results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> PredictiveSearch {
        serde_json::from_value(value).unwrap()
    }

    fn kinds(response: &NormalizedSearchResponse) -> Vec<ResultGroupKind> {
        response.groups().iter().map(|g| g.kind).collect()
    }

    #[test]
    fn absent_payload_is_the_shared_sentinel() {
        let first = normalize_predictive_search_results(None, Some("fr"));
        let second = normalize_predictive_search_results(None, None);

        assert_eq!(first.total_results, 0);
        assert!(is_no_results(&first));
        assert!(is_no_results(&second));
        assert!(std::ptr::eq(first.groups(), second.groups()));
        assert_eq!(first.groups().len(), 5);
        assert!(first.groups().iter().all(|g| g.items.is_empty()));
    }

    #[test]
    fn all_empty_categories_yield_no_groups() {
        let response = normalize_predictive_search_results(Some(PredictiveSearch::default()), None);
        assert!(response.groups().is_empty());
        assert_eq!(response.total_results, 0);
        assert!(!is_no_results(&response));
    }

    #[test]
    fn product_example_with_locale() {
        let response = normalize_predictive_search_results(
            Some(raw(json!({
                "products": [{
                    "__typename": "Product",
                    "id": "gid://1",
                    "title": "Shirt",
                    "handle": "shirt",
                    "trackingParameters": "_pos=1&_sid=abc&_ss=r",
                    "variants": { "nodes": [{
                        "id": "gid://variant/1",
                        "image": { "url": "img.png", "altText": null, "width": 100, "height": 80 },
                        "price": { "amount": "10.00", "currencyCode": "USD" }
                    }]}
                }]
            }))),
            Some("fr"),
        );

        assert_eq!(response.total_results, 1);
        assert_eq!(kinds(&response), vec![ResultGroupKind::Products]);

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({
                "results": [{
                    "type": "products",
                    "items": [{
                        "__typename": "Product",
                        "handle": "shirt",
                        "id": "gid://1",
                        "image": { "url": "img.png", "altText": null, "width": 100, "height": 80 },
                        "title": "Shirt",
                        "url": "/fr/products/shirt?_pos=1&_sid=abc&_ss=r",
                        "price": { "amount": "10.00", "currencyCode": "USD" }
                    }]
                }],
                "totalResults": 1
            })
        );
    }

    #[test]
    fn query_suggestion_carries_search_text_and_tracking() {
        let response = normalize_predictive_search_results(
            Some(raw(json!({
                "queries": [{
                    "__typename": "SearchQuerySuggestion",
                    "text": "boots",
                    "styledText": "<mark>boo</mark>ts",
                    "trackingParameters": "_pos=1&_psq=boo"
                }]
            }))),
            Some(""),
        );

        let item = &response.groups()[0].items[0];
        assert_eq!(item.url, "/search?q=boots&_pos=1&_psq=boo");
        assert_eq!(item.handle, "");
        assert_eq!(item.id, "boots");
        assert_eq!(item.title, "boots");
        assert_eq!(item.styled_title.as_deref(), Some("<mark>boo</mark>ts"));
        assert!(item.image.is_none());
        assert!(item.price.is_none());
    }

    #[test]
    fn query_text_is_url_encoded() {
        let item = PredictiveResult::Query(PredictiveQuery {
            typename: None,
            text: "red shoes & socks".into(),
            styled_text: None,
            tracking_parameters: None,
        })
        .into_item("/de");

        assert_eq!(item.url, "/de/search?q=red%20shoes%20%26%20socks");
        assert_eq!(item.type_name, "SearchQuerySuggestion");
    }

    #[test]
    fn groups_follow_fixed_order_and_total_matches() {
        let response = normalize_predictive_search_results(
            Some(raw(json!({
                "articles": [
                    { "id": "a1", "title": "News", "handle": "news", "image": { "url": "a.png" } }
                ],
                "pages": [
                    { "id": "p1", "title": "About", "handle": "about" },
                    { "id": "p2", "title": "Contact", "handle": "contact" }
                ],
                "collections": [
                    { "id": "c1", "title": "Hats", "handle": "hats", "image": null }
                ],
                "queries": [
                    { "text": "hat" }
                ]
            }))),
            None,
        );

        assert_eq!(
            kinds(&response),
            vec![
                ResultGroupKind::Queries,
                ResultGroupKind::Collections,
                ResultGroupKind::Pages,
                ResultGroupKind::Articles,
            ]
        );

        let sum: usize = response.groups().iter().map(|g| g.items.len()).sum();
        assert_eq!(response.total_results, sum);
        assert_eq!(sum, 5);

        let pages = &response.groups()[2].items;
        assert_eq!(pages[0].url, "/pages/about");
        assert_eq!(pages[1].url, "/pages/contact");

        let article = &response.groups()[3].items[0];
        assert_eq!(article.url, "/blog/news");
        assert_eq!(article.image.as_ref().map(|i| i.url.as_str()), Some("a.png"));

        let query = &response.groups()[0].items[0];
        assert_eq!(query.url, "/search?q=hat");
    }

    #[test]
    fn product_without_variants_has_no_price_or_image() {
        let item = PredictiveResult::Product(PredictiveProduct {
            typename: None,
            id: "gid://2".into(),
            title: "Gift card".into(),
            handle: "gift-card".into(),
            tracking_parameters: None,
            variants: Default::default(),
        })
        .into_item("");

        assert_eq!(item.url, "/products/gift-card");
        assert!(item.price.is_none());
        assert!(item.image.is_none());
    }

    #[test]
    fn locale_prefixes() {
        assert_eq!(locale_prefix(None), "");
        assert_eq!(locale_prefix(Some("")), "");
        assert_eq!(locale_prefix(Some("en-ca")), "/en-ca");
        assert_eq!(locale_prefix(Some("//evil.example")), "");
        assert_eq!(locale_prefix(Some("fr/../x")), "");
    }

    #[test]
    fn malformed_locale_keeps_urls_on_site() {
        let response = normalize_predictive_search_results(
            Some(raw(json!({
                "products": [{
                    "id": "gid://1",
                    "title": "Shirt",
                    "handle": "shirt",
                    "variants": { "nodes": [] }
                }]
            }))),
            Some("//evil.example"),
        );
        assert_eq!(response.groups()[0].items[0].url, "/products/shirt");
    }
}
