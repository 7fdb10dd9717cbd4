//! Text-pattern heuristics that derive `price` and `brand` columns.
//!
//! Catalog products carry no structured price or brand. Sellers write the
//! price into the free-text description using the dirham suffix, usually
//! wrapped in tildes (`"~300dh~"`), and lead the product name with an
//! all-caps brand token (`"NIKE Air Max"`).

use std::sync::LazyLock;

use harcat_core::sentinel;
use regex::Regex;
use serde_json::Value;

static TILDE_PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"~([0-9]+)dh~").expect("valid tilde price regex"));
static BARE_PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)dh").expect("valid bare price regex"));
static BRAND_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z0-9]+)").expect("valid brand regex"));

/// Extracts the price digits from a product description.
///
/// Only ASCII digits count; other Unicode digit scripts never match.
///
/// The tilde-delimited form (`"~120dh~"`) wins over any bare `"120dh"`
/// occurrence, even one appearing earlier in the text.
///
/// Returns `"No description"` for non-string input and `"No price found"`
/// when neither form matches.
#[must_use]
pub fn extract_price(description: &Value) -> String {
    match description.as_str() {
        Some(text) => extract_price_from_str(text),
        None => sentinel::PRICE_NO_DESCRIPTION.to_string(),
    }
}

/// String-typed core of [`extract_price`].
#[must_use]
pub fn extract_price_from_str(text: &str) -> String {
    TILDE_PRICE_RE
        .captures(text)
        .or_else(|| BARE_PRICE_RE.captures(text))
        .and_then(|caps| caps.get(1))
        .map_or_else(
            || sentinel::PRICE_NOT_FOUND.to_string(),
            |m| m.as_str().to_string(),
        )
}

/// Extracts the leading uppercase/digit brand token from a product name.
///
/// Returns `"Unknown"` for non-string input or when the trimmed name does
/// not start with `[A-Z0-9]`.
#[must_use]
pub fn extract_brand(name: &Value) -> String {
    name.as_str()
        .and_then(|text| BRAND_RE.captures(text.trim()))
        .and_then(|caps| caps.get(1))
        .map_or_else(
            || sentinel::UNKNOWN_BRAND.to_string(),
            |m| m.as_str().to_string(),
        )
}
