//! Result-type filter: which categories a predictive search asks for.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Sentinel meaning "every category".
pub const ANY_SEARCH_TYPE: &str = "ANY";

/// One of the content kinds the Storefront API can return
/// (`PredictiveSearchType` on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CategoryTag {
    Article,
    Collection,
    Page,
    Product,
    Query,
}

/// Every category, in the order the API documents them.
pub const DEFAULT_SEARCH_TYPES: [CategoryTag; 5] = [
    CategoryTag::Article,
    CategoryTag::Collection,
    CategoryTag::Page,
    CategoryTag::Product,
    CategoryTag::Query,
];

impl CategoryTag {
    pub fn as_str(self) -> &'static str {
        match self {
            CategoryTag::Article => "ARTICLE",
            CategoryTag::Collection => "COLLECTION",
            CategoryTag::Page => "PAGE",
            CategoryTag::Product => "PRODUCT",
            CategoryTag::Query => "QUERY",
        }
    }
}

impl fmt::Display for CategoryTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryTag {
    type Err = ();

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        DEFAULT_SEARCH_TYPES
            .into_iter()
            .find(|tag| tag.as_str().eq_ignore_ascii_case(token))
            .ok_or(())
    }
}

/// Parses the raw `type` field.
///
/// `ANY` expands to [`DEFAULT_SEARCH_TYPES`]. Anything else is split on
/// commas; unknown tokens are dropped and duplicates keep their first
/// position. The result may be empty.
pub fn parse_search_types(raw: &str) -> Vec<CategoryTag> {
    if raw == ANY_SEARCH_TYPE {
        return DEFAULT_SEARCH_TYPES.to_vec();
    }

    let mut tags = Vec::with_capacity(DEFAULT_SEARCH_TYPES.len());
    for tag in raw.split(',').filter_map(|t| t.parse::<CategoryTag>().ok()) {
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_expands_to_every_category() {
        assert_eq!(parse_search_types("ANY"), DEFAULT_SEARCH_TYPES.to_vec());
    }

    #[test]
    fn unknown_tokens_are_dropped() {
        assert_eq!(
            parse_search_types("product,bogus"),
            vec![CategoryTag::Product]
        );
        assert!(parse_search_types("bogus").is_empty());
        assert!(parse_search_types("").is_empty());
    }

    #[test]
    fn tokens_are_trimmed_and_case_folded() {
        assert_eq!(
            parse_search_types(" Query , COLLECTION,page,query"),
            vec![CategoryTag::Query, CategoryTag::Collection, CategoryTag::Page]
        );
    }

    #[test]
    fn serializes_upper_case() {
        let json = serde_json::to_string(&[CategoryTag::Article, CategoryTag::Query]).unwrap();
        assert_eq!(json, r#"["ARTICLE","QUERY"]"#);
    }
}
