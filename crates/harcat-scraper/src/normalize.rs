//! Normalization from raw catalog product objects to [`harcat_core::ProductRecord`].
//!
//! Price and brand derivation is delegated to [`crate::extract`] and image
//! persistence to [`crate::image`]; this module only maps keys to columns
//! and applies sentinels.

use harcat_core::{sentinel, ProductRecord};
use serde_json::Value;

use crate::extract::{extract_brand, extract_price};
use crate::fields::{text_or, NULL};
use crate::image::{ImageLocator, ImageResolver};

/// Normalizes one raw product into a [`ProductRecord`], downloading its
/// image through `images`.
///
/// Never fails: any absent or oddly-typed key becomes its column sentinel.
pub async fn normalize_product(
    product: &Value,
    category: &str,
    source_file: &str,
    images: &ImageResolver,
) -> ProductRecord {
    let image = images.resolve_image(product).await;
    build_record(product, category, source_file, &image)
}

/// Maps a raw product plus an already-resolved image into a record.
#[must_use]
pub fn build_record(
    product: &Value,
    category: &str,
    source_file: &str,
    image: &ImageLocator,
) -> ProductRecord {
    // An absent description prices as "" (no match); an explicit null is a
    // non-string and prices as "No description".
    let empty = Value::String(String::new());
    let description_value = product.get("description").unwrap_or(&empty);

    // A missing name has no brand. Deliberately unlike the older extractor,
    // the "No Name" sentinel is not run through the brand pattern (it would
    // yield "N").
    let brand = extract_brand(product.get("name").unwrap_or(&NULL));

    ProductRecord {
        sku: text_or(product, "id", sentinel::NO_SKU).into_owned(),
        name: text_or(product, "name", sentinel::NO_NAME).into_owned(),
        price: extract_price(description_value),
        description: text_or(product, "description", sentinel::NO_DESCRIPTION).into_owned(),
        category: category.to_owned(),
        brand,
        source_file: source_file.to_owned(),
        image_path: image.to_cell(),
        availability: text_or(product, "product_availability", sentinel::NO_AVAILABILITY)
            .into_owned(),
        url: text_or(product, "url", sentinel::NO_URL).into_owned(),
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
