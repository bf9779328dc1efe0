//! Request context and GraphQL envelope types shared by every Storefront query.

use serde::{Deserialize, Serialize};

/// Language/country pair forwarded to `@inContext`.
///
/// Codes are kept upper case, as the Storefront API's `LanguageCode` and
/// `CountryCode` enums expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct I18n {
    pub language: String,
    pub country: String,
}

impl Default for I18n {
    fn default() -> Self {
        Self {
            language: "EN".into(),
            country: "US".into(),
        }
    }
}

impl I18n {
    /// Resolves a locale path segment into an [`I18n`].
    ///
    /// * `fr`    → `FR` + fallback country
    /// * `fr-ca` → `FR` / `CA` (`_` is accepted as separator too)
    ///
    /// Anything that is not one or two alphabetic parts yields `fallback`.
    pub fn from_locale(locale: Option<&str>, fallback: &I18n) -> I18n {
        let Some(locale) = locale.map(str::trim).filter(|l| !l.is_empty()) else {
            return fallback.clone();
        };

        match split_locale(locale) {
            Some((lang, None)) => I18n {
                language: lang.to_ascii_uppercase(),
                country: fallback.country.clone(),
            },
            Some((lang, Some(country))) => I18n {
                language: lang.to_ascii_uppercase(),
                country: country.to_ascii_uppercase(),
            },
            None => fallback.clone(),
        }
    }
}

/// True when `locale` is a path segment [`I18n::from_locale`] resolves
/// (`fr`, `fr-ca`, `en_GB`). Only such segments may be echoed into URLs.
pub fn is_locale(locale: &str) -> bool {
    split_locale(locale).is_some()
}

fn split_locale(locale: &str) -> Option<(&str, Option<&str>)> {
    let mut parts = locale.split(['-', '_']);
    let language = parts.next().filter(|p| is_code(p))?;
    let country = parts.next();

    if parts.next().is_some() {
        return None;
    }

    match country {
        None => Some((language, None)),
        Some(c) if is_code(c) => Some((language, Some(c))),
        Some(_) => None,
    }
}

fn is_code(part: &str) -> bool {
    (2..=3).contains(&part.len()) && part.chars().all(|c| c.is_ascii_alphabetic())
}

/// B2B buyer identity passed as `$buyer` to `@inContext`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyerInput {
    pub customer_access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_location_id: Option<String>,
}

impl BuyerInput {
    /// Builds a buyer only when a customer token is present; a company
    /// location on its own does not identify a buyer.
    pub fn from_parts(
        customer_access_token: Option<&str>,
        company_location_id: Option<&str>,
    ) -> Option<Self> {
        let token = customer_access_token
            .map(str::trim)
            .filter(|t| !t.is_empty())?;

        Some(Self {
            customer_access_token: token.to_string(),
            company_location_id: company_location_id
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
        })
    }
}

/// Outgoing GraphQL request body.
#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a, V: Serialize> {
    pub query: &'a str,
    pub variables: &'a V,
}

/// Incoming GraphQL response body.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

/// One entry of the GraphQL `errors` array.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

impl<T> GraphQlResponse<T> {
    /// First error message, if any, for logging and error reporting.
    pub fn first_error(&self) -> Option<&str> {
        self.errors.first().map(|e| e.message.as_str())
    }
}
