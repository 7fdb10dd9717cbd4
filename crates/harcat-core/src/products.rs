use serde::Serialize;

/// Placeholder strings written in place of absent or unextractable fields.
///
/// Records never carry empty/absent values; each column has its own
/// sentinel so downstream spreadsheet users can filter on them.
pub mod sentinel {
    pub const NO_SKU: &str = "No SKU";
    pub const NO_NAME: &str = "No Name";
    pub const NO_DESCRIPTION: &str = "No Description";
    pub const NO_CATEGORY: &str = "No Category";
    pub const NO_CATALOG_NAME: &str = "No Catalog Name";
    pub const GENERAL_CATALOG: &str = "General Catalog";
    pub const NO_AVAILABILITY: &str = "No Availability";
    pub const NO_URL: &str = "No URL";

    /// Price extractor input was not a string (e.g. `null`).
    ///
    /// Distinct from [`NO_DESCRIPTION`], which marks a missing description
    /// column value.
    pub const PRICE_NO_DESCRIPTION: &str = "No description";
    pub const PRICE_NOT_FOUND: &str = "No price found";
    pub const UNKNOWN_BRAND: &str = "Unknown";

    pub const NO_IMAGE: &str = "No image";
    pub const IMAGE_DOWNLOAD_FAILED: &str = "Error downloading image";
}

/// Spreadsheet column headers, in export order.
pub const COLUMNS: [&str; 10] = [
    "sku",
    "name",
    "price",
    "description",
    "category",
    "brand",
    "Source File",
    "Image Path",
    "availability",
    "url",
];

/// One product extracted from a catalog response, flattened for export.
///
/// Field order matches [`COLUMNS`]; the serde renames produce the same
/// headers when serialized by a header-writing serializer such as `csv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductRecord {
    /// Catalog product id, or [`sentinel::NO_SKU`].
    pub sku: String,
    pub name: String,
    /// Digit run parsed from the description (e.g. `"300"` for `"~300dh~"`).
    pub price: String,
    pub description: String,
    /// Collection name, `"General Catalog"`, or the flat catalog's own name.
    pub category: String,
    /// Leading uppercase/digit run of the name (e.g. `"NIKE"`).
    pub brand: String,
    /// Archive or JSON file the product was read from.
    #[serde(rename = "Source File")]
    pub source_file: String,
    /// `<image dir>/<filename>` on success, otherwise an image sentinel.
    #[serde(rename = "Image Path")]
    pub image_path: String,
    pub availability: String,
    pub url: String,
}

impl ProductRecord {
    /// Returns the cell values in [`COLUMNS`] order.
    #[must_use]
    pub fn cells(&self) -> [&str; 10] {
        [
            self.sku.as_str(),
            self.name.as_str(),
            self.price.as_str(),
            self.description.as_str(),
            self.category.as_str(),
            self.brand.as_str(),
            self.source_file.as_str(),
            self.image_path.as_str(),
            self.availability.as_str(),
            self.url.as_str(),
        ]
    }

    /// Returns `true` when the image was downloaded and saved.
    #[must_use]
    pub fn has_saved_image(&self) -> bool {
        self.image_path != sentinel::NO_IMAGE && self.image_path != sentinel::IMAGE_DOWNLOAD_FAILED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(image_path: &str) -> ProductRecord {
        ProductRecord {
            sku: "1".to_string(),
            name: "NIKE Air".to_string(),
            price: "300".to_string(),
            description: "~300dh~ sale".to_string(),
            category: "Shoes".to_string(),
            brand: "NIKE".to_string(),
            source_file: "capture.har".to_string(),
            image_path: image_path.to_string(),
            availability: "in stock".to_string(),
            url: "https://shop.example/p/1".to_string(),
        }
    }

    #[test]
    fn cells_follow_column_order() {
        let record = make_record("./images/air.jpg");
        let cells = record.cells();
        assert_eq!(cells.len(), COLUMNS.len());
        assert_eq!(cells[0], "1");
        assert_eq!(cells[2], "300");
        assert_eq!(cells[4], "Shoes");
        assert_eq!(cells[6], "capture.har");
        assert_eq!(cells[7], "./images/air.jpg");
        assert_eq!(cells[9], "https://shop.example/p/1");
    }

    #[test]
    fn serialized_keys_match_column_headers() {
        let value = serde_json::to_value(make_record("No image")).expect("serialization failed");
        let object = value.as_object().expect("record serializes to an object");
        assert_eq!(object.len(), COLUMNS.len());
        for column in COLUMNS {
            assert!(object.contains_key(column), "missing column {column}");
        }
    }

    #[test]
    fn has_saved_image_false_for_sentinels() {
        assert!(!make_record(sentinel::NO_IMAGE).has_saved_image());
        assert!(!make_record(sentinel::IMAGE_DOWNLOAD_FAILED).has_saved_image());
        assert!(make_record("./images/air.jpg").has_saved_image());
    }

    #[test]
    fn price_sentinels_are_distinct_from_description_sentinel() {
        assert_ne!(sentinel::PRICE_NO_DESCRIPTION, sentinel::NO_DESCRIPTION);
    }
}
