//! Classification of catalog API responses into known nesting shapes.
//!
//! ## Observed shapes
//!
//! ### Single collection
//! `xwa_product_catalog_get_single_collection` replies carry one named
//! collection:
//! `{"data": {"xwa_product_catalog_get_single_collection": {"collection":
//! {"name": "Shoes", "products": [...]}}}}`.
//!
//! ### Full catalog
//! `xwa_product_catalog_get_product_catalog` replies carry the whole
//! catalog with no collection name:
//! `{"data": {"xwa_product_catalog_get_product_catalog": {"product_catalog":
//! {"products": [...]}}}}`.
//!
//! ### Flat list
//! Pre-extracted JSON documents where each array element is already a
//! `{"name": ..., "products": [...]}` catalog. Only accepted for document
//! elements, never for captured replies.
//!
//! When a reply contains both API keys the single-collection interpretation
//! wins. An API key holding an empty object counts as absent.

use std::borrow::Cow;

use harcat_core::sentinel;
use serde_json::Value;

use crate::fields::{array_at, non_empty_object, text_or, NULL};

const SINGLE_COLLECTION_KEY: &str = "/data/xwa_product_catalog_get_single_collection";
const PRODUCT_CATALOG_KEY: &str = "/data/xwa_product_catalog_get_product_catalog";

/// The nesting convention a catalog response follows, with borrowed access
/// to its category label and raw product objects.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseShape<'a> {
    SingleCollection {
        name: Cow<'a, str>,
        products: &'a [Value],
    },
    FullCatalog {
        products: &'a [Value],
    },
    FlatList {
        name: Cow<'a, str>,
        products: &'a [Value],
    },
    Unrecognized,
}

impl<'a> ResponseShape<'a> {
    /// Category label applied to every product of this response.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match self {
            ResponseShape::SingleCollection { name, .. } | ResponseShape::FlatList { name, .. } => {
                Some(&**name)
            }
            ResponseShape::FullCatalog { .. } => Some(sentinel::GENERAL_CATALOG),
            ResponseShape::Unrecognized => None,
        }
    }

    /// Raw product objects, empty for [`ResponseShape::Unrecognized`].
    #[must_use]
    pub fn products(&self) -> &'a [Value] {
        match self {
            ResponseShape::SingleCollection { products, .. }
            | ResponseShape::FullCatalog { products }
            | ResponseShape::FlatList { products, .. } => *products,
            ResponseShape::Unrecognized => &[],
        }
    }

    /// Short name used in logs and run summaries.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            ResponseShape::SingleCollection { .. } => "single-collection",
            ResponseShape::FullCatalog { .. } => "full-catalog",
            ResponseShape::FlatList { .. } => "flat-list",
            ResponseShape::Unrecognized => "unrecognized",
        }
    }
}

/// Determines which catalog API shape a captured `response` follows.
///
/// Only the API shapes are recognized; a bare `products` array in a captured
/// reply is some other endpoint and stays [`ResponseShape::Unrecognized`].
#[must_use]
pub fn classify(response: &Value) -> ResponseShape<'_> {
    if let Some(single) = non_empty_object(response.pointer(SINGLE_COLLECTION_KEY)) {
        let collection = single.get("collection").unwrap_or(&NULL);
        return ResponseShape::SingleCollection {
            name: text_or(collection, "name", sentinel::NO_CATEGORY),
            products: array_at(collection, "products"),
        };
    }

    if let Some(catalog) = non_empty_object(response.pointer(PRODUCT_CATALOG_KEY)) {
        let product_catalog = catalog.get("product_catalog").unwrap_or(&NULL);
        return ResponseShape::FullCatalog {
            products: array_at(product_catalog, "products"),
        };
    }

    ResponseShape::Unrecognized
}

/// Classifies one element of a JSON document: the API shapes first, then a
/// pre-extracted `{"name": ..., "products": [...]}` flat catalog.
#[must_use]
pub fn classify_document(element: &Value) -> ResponseShape<'_> {
    let shape = classify(element);
    if shape != ResponseShape::Unrecognized {
        return shape;
    }

    if element.get("products").is_some_and(Value::is_array) {
        return ResponseShape::FlatList {
            name: text_or(element, "name", sentinel::NO_CATALOG_NAME),
            products: array_at(element, "products"),
        };
    }

    ResponseShape::Unrecognized
}

/// Returns the category label and raw products of a JSON document element,
/// or `(None, [])` when the shape is not recognized.
#[must_use]
pub fn resolve(element: &Value) -> (Option<String>, &[Value]) {
    let shape = classify_document(element);
    (shape.label().map(str::to_owned), shape.products())
}

/// Strips a `{"url": ..., "response": {...}}` envelope written by the HAR
/// dump, returning the inner catalog response. Other values pass through.
#[must_use]
pub fn unwrap_envelope(value: &Value) -> &Value {
    match value.get("response") {
        Some(inner) if inner.is_object() && value.get("data").is_none() => inner,
        _ => value,
    }
}

#[cfg(test)]
#[path = "shape_test.rs"]
mod tests;
