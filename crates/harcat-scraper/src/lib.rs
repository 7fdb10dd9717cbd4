pub mod error;
pub mod extract;
mod fields;
pub mod har;
pub mod image;
pub mod normalize;
pub mod shape;

pub use error::ScraperError;
pub use extract::{extract_brand, extract_price};
pub use har::{json_responses, parse_archive, HarArchive, HarUnit, UnitError};
pub use image::{ImageLocator, ImageResolver};
pub use normalize::normalize_product;
pub use shape::{classify, classify_document, resolve, unwrap_envelope, ResponseShape};
