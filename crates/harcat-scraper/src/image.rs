//! Product image lookup, download, and persistence.
//!
//! Images are stored as `<dest_dir>/<filename>` where `filename` is the
//! final path segment of the source URL. The image column of every record
//! holds that path (or a sentinel), whatever the input shape was.

use std::path::PathBuf;
use std::time::Duration;

use harcat_core::sentinel;
use reqwest::Client;
use serde_json::Value;

use crate::error::ScraperError;

/// Flat image keys tried, in order, when a product has no `media.images`.
const FLAT_IMAGE_KEYS: [&str; 2] = ["image_url", "image"];

/// Outcome of resolving one product's image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageLocator {
    /// Bytes were written to this path.
    Saved(PathBuf),
    /// The product carries no image URL.
    NoImage,
    /// A URL was found but the image could not be fetched or stored.
    DownloadFailed,
}

impl ImageLocator {
    /// Renders the locator as the spreadsheet cell value.
    #[must_use]
    pub fn to_cell(&self) -> String {
        match self {
            ImageLocator::Saved(path) => path.display().to_string(),
            ImageLocator::NoImage => sentinel::NO_IMAGE.to_string(),
            ImageLocator::DownloadFailed => sentinel::IMAGE_DOWNLOAD_FAILED.to_string(),
        }
    }
}

/// Finds the source image URL of a raw product.
///
/// Checks `media.images[0].original_image_url` first, then the flat
/// `image_url` and `image` string fields. Empty strings count as absent.
#[must_use]
pub fn locate_image_url(product: &Value) -> Option<&str> {
    let nested = product
        .pointer("/media/images/0/original_image_url")
        .and_then(Value::as_str)
        .filter(|url| !url.is_empty());
    if nested.is_some() {
        return nested;
    }

    FLAT_IMAGE_KEYS.iter().find_map(|key| {
        product
            .get(*key)
            .and_then(Value::as_str)
            .filter(|url| !url.is_empty())
    })
}

/// Derives the local filename from the final segment of the URL path.
///
/// Query string and fragment are ignored. Returns `None` for unparseable
/// URLs or paths ending in `/`.
#[must_use]
pub fn derive_filename(url: &str) -> Option<String> {
    let parsed = reqwest::Url::parse(url).ok()?;
    parsed
        .path_segments()?
        .next_back()
        .filter(|segment| !segment.is_empty())
        .map(str::to_owned)
}

/// Downloads product images into a destination directory.
///
/// Fetches are issued one at a time and never retried. A URL seen twice is
/// fetched twice; same-named files overwrite each other.
pub struct ImageResolver {
    client: Client,
    dest_dir: PathBuf,
}

impl ImageResolver {
    /// Creates a resolver writing into `dest_dir` (created lazily on the
    /// first successful download).
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        dest_dir: impl Into<PathBuf>,
        user_agent: &str,
        timeout_secs: Option<u64>,
    ) -> Result<Self, ScraperError> {
        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            client: builder.build()?,
            dest_dir: dest_dir.into(),
        })
    }

    /// Locates, downloads, and stores the image of `product`.
    ///
    /// Never fails: download errors are logged and reported as
    /// [`ImageLocator::DownloadFailed`].
    pub async fn resolve_image(&self, product: &Value) -> ImageLocator {
        let Some(url) = locate_image_url(product) else {
            return ImageLocator::NoImage;
        };

        match self.download(url).await {
            Ok(path) => {
                tracing::debug!(url, path = %path.display(), "saved product image");
                ImageLocator::Saved(path)
            }
            Err(e) => {
                tracing::warn!(url, error = %e, "error downloading image");
                ImageLocator::DownloadFailed
            }
        }
    }

    /// Fetches `url` and writes the body to `<dest_dir>/<derived filename>`.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidImageUrl`] — no filename can be derived.
    /// - [`ScraperError::Http`] — network or TLS failure.
    /// - [`ScraperError::UnexpectedStatus`] — any non-2xx response.
    /// - [`ScraperError::Io`] — the directory or file cannot be written.
    pub async fn download(&self, url: &str) -> Result<PathBuf, ScraperError> {
        let filename = derive_filename(url).ok_or_else(|| ScraperError::InvalidImageUrl {
            url: url.to_owned(),
        })?;

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }
        let bytes = response.bytes().await?;

        tokio::fs::create_dir_all(&self.dest_dir)
            .await
            .map_err(|source| ScraperError::Io {
                path: self.dest_dir.clone(),
                source,
            })?;

        let path = self.dest_dir.join(filename);
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|source| ScraperError::Io {
                path: path.clone(),
                source,
            })?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn locate_prefers_nested_media_image() {
        let product = json!({
            "media": {"images": [
                {"original_image_url": "https://cdn.example/a.jpg"},
                {"original_image_url": "https://cdn.example/b.jpg"}
            ]},
            "image_url": "https://cdn.example/flat.jpg"
        });
        assert_eq!(
            locate_image_url(&product),
            Some("https://cdn.example/a.jpg")
        );
    }

    #[test]
    fn locate_falls_back_to_flat_field() {
        let product = json!({"media": {"images": []}, "image_url": "https://cdn.example/flat.jpg"});
        assert_eq!(
            locate_image_url(&product),
            Some("https://cdn.example/flat.jpg")
        );
    }

    #[test]
    fn locate_reads_plain_image_key_last() {
        let product = json!({"image": "https://cdn.example/plain.png"});
        assert_eq!(
            locate_image_url(&product),
            Some("https://cdn.example/plain.png")
        );
    }

    #[test]
    fn locate_skips_empty_nested_url() {
        let product = json!({
            "media": {"images": [{"original_image_url": ""}]},
            "image": "https://cdn.example/plain.png"
        });
        assert_eq!(
            locate_image_url(&product),
            Some("https://cdn.example/plain.png")
        );
    }

    #[test]
    fn locate_none_without_any_url() {
        assert!(locate_image_url(&json!({"name": "x"})).is_none());
        assert!(locate_image_url(&json!({"media": {"images": [{}]}})).is_none());
        assert!(locate_image_url(&json!({"image": 12})).is_none());
    }

    #[test]
    fn derive_filename_uses_last_path_segment() {
        assert_eq!(
            derive_filename("https://cdn.example/v/t45/123_456_n.jpg?stp=dst&oh=abc").as_deref(),
            Some("123_456_n.jpg")
        );
    }

    #[test]
    fn derive_filename_none_for_trailing_slash() {
        assert!(derive_filename("https://cdn.example/images/").is_none());
    }

    #[test]
    fn derive_filename_none_for_relative_url() {
        assert!(derive_filename("images/a.jpg").is_none());
    }

    #[test]
    fn locator_cells() {
        assert_eq!(ImageLocator::NoImage.to_cell(), "No image");
        assert_eq!(
            ImageLocator::DownloadFailed.to_cell(),
            "Error downloading image"
        );
        assert_eq!(
            ImageLocator::Saved(PathBuf::from("images").join("a.jpg")).to_cell(),
            PathBuf::from("images/a.jpg").display().to_string()
        );
    }

    #[tokio::test]
    async fn resolve_image_without_url_does_not_touch_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let dest = dir.path().join("images");
        let resolver = ImageResolver::new(&dest, "harcat-test/0.1", Some(5)).expect("resolver");
        let locator = resolver.resolve_image(&json!({"name": "x"})).await;
        assert_eq!(locator, ImageLocator::NoImage);
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn resolve_image_unreachable_host_reports_failure() {
        let dir = tempfile::tempdir().expect("tempdir");
        let resolver =
            ImageResolver::new(dir.path(), "harcat-test/0.1", Some(5)).expect("resolver");
        let product = json!({"image_url": "http://127.0.0.1:1/unreachable.jpg"});
        assert_eq!(
            resolver.resolve_image(&product).await,
            ImageLocator::DownloadFailed
        );
    }
}
