//! HAR (HTTP Archive) capture model and JSON response extraction.
//!
//! Only the handful of fields needed to find catalog responses are modelled.
//! Entries are kept as raw JSON until inspected so that one malformed entry
//! is reported on its own instead of failing the whole archive.

use base64::Engine;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ScraperError;

/// Top-level HAR document: `{"log": {"entries": [...]}}`.
#[derive(Debug, Default, Deserialize)]
pub struct HarArchive {
    #[serde(default)]
    pub log: HarLog,
}

#[derive(Debug, Default, Deserialize)]
pub struct HarLog {
    #[serde(default)]
    pub entries: Vec<Value>,
}

/// Typed view of one request/response capture.
#[derive(Debug, Deserialize)]
pub struct HarEntry {
    #[serde(default)]
    pub request: HarRequest,
    pub response: HarResponse,
}

#[derive(Debug, Default, Deserialize)]
pub struct HarRequest {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct HarResponse {
    pub content: HarContent,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarContent {
    #[serde(default)]
    pub mime_type: String,
    /// Response body. Absent when the capture tool dropped the content.
    #[serde(default)]
    pub text: Option<String>,
    /// `"base64"` for binary-safe encoded bodies, otherwise absent.
    #[serde(default)]
    pub encoding: Option<String>,
}

impl HarContent {
    /// Browser captures label JSON as `application/json` with optional
    /// parameters such as `; charset=utf-8`.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mime_type.contains("application/json")
    }
}

/// Why a HAR entry could not be turned into a catalog response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitError {
    /// The entry lacks `response.content` or has the wrong types.
    InvalidEntry(String),
    /// JSON MIME type but no body text.
    EmptyBody,
    /// Declared base64 but the text does not decode.
    InvalidEncoding(String),
    /// The body is not valid JSON.
    InvalidJson(String),
}

impl std::fmt::Display for UnitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnitError::InvalidEntry(reason) => write!(f, "invalid HAR entry: {reason}"),
            UnitError::EmptyBody => write!(f, "empty response body"),
            UnitError::InvalidEncoding(reason) => write!(f, "invalid base64 body: {reason}"),
            UnitError::InvalidJson(reason) => write!(f, "invalid JSON body: {reason}"),
        }
    }
}

/// One JSON-typed response found in an archive.
#[derive(Debug)]
pub struct HarUnit {
    /// Position of the entry within `log.entries`.
    pub index: usize,
    /// Request URL, empty when the entry had none.
    pub url: String,
    pub body: Result<Value, UnitError>,
}

/// Parses a HAR document from its raw text.
///
/// # Errors
///
/// Returns [`ScraperError::Deserialize`] when the text is not a JSON object
/// with the HAR layout.
pub fn parse_archive(text: &str, context: &str) -> Result<HarArchive, ScraperError> {
    serde_json::from_str(text).map_err(|source| ScraperError::Deserialize {
        context: context.to_owned(),
        source,
    })
}

/// Returns every entry whose response is JSON-typed, in capture order.
///
/// Entries that do not even decode as a HAR entry are still reported (as
/// [`UnitError::InvalidEntry`]) because their MIME type cannot be checked.
/// Entries with other MIME types are skipped silently.
#[must_use]
pub fn json_responses(archive: &HarArchive) -> Vec<HarUnit> {
    archive
        .log
        .entries
        .iter()
        .enumerate()
        .filter_map(|(index, raw)| {
            let entry = match HarEntry::deserialize(raw) {
                Ok(entry) => entry,
                Err(e) => {
                    return Some(HarUnit {
                        index,
                        url: raw
                            .pointer("/request/url")
                            .and_then(Value::as_str)
                            .unwrap_or_default()
                            .to_owned(),
                        body: Err(UnitError::InvalidEntry(e.to_string())),
                    });
                }
            };
            if !entry.response.content.is_json() {
                return None;
            }
            Some(HarUnit {
                index,
                body: decode_body(&entry.response.content),
                url: entry.request.url,
            })
        })
        .collect()
}

/// Decodes and parses a JSON response body.
///
/// # Errors
///
/// Returns the [`UnitError`] describing why the body is unusable.
pub fn decode_body(content: &HarContent) -> Result<Value, UnitError> {
    let text = match content.text.as_deref() {
        None | Some("" | "undefined") => return Err(UnitError::EmptyBody),
        Some(text) => text,
    };

    if content.encoding.as_deref() == Some("base64") {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(text.trim())
            .map_err(|e| UnitError::InvalidEncoding(e.to_string()))?;
        return serde_json::from_slice(&bytes).map_err(|e| UnitError::InvalidJson(e.to_string()));
    }

    serde_json::from_str(text).map_err(|e| UnitError::InvalidJson(e.to_string()))
}
