//! Per-request context read from headers.
//!
//! The storefront front end owns the customer session; it forwards the
//! buyer identity to this service as headers.

use axum::http::HeaderMap;
use storefront_client::BuyerInput;

pub const REQUEST_ID_HEADER: &str = "x-request-id";
pub const CUSTOMER_TOKEN_HEADER: &str = "x-customer-access-token";
pub const COMPANY_LOCATION_HEADER: &str = "x-company-location-id";

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Caller-supplied request id, `-` when absent.
pub fn request_id(headers: &HeaderMap) -> &str {
    header_str(headers, REQUEST_ID_HEADER).unwrap_or("-")
}

/// B2B buyer for `@inContext`, if the caller is a logged-in customer.
pub fn buyer_from_headers(headers: &HeaderMap) -> Option<BuyerInput> {
    BuyerInput::from_parts(
        header_str(headers, CUSTOMER_TOKEN_HEADER),
        header_str(headers, COMPANY_LOCATION_HEADER),
    )
}
