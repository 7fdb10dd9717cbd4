use std::path::PathBuf;

/// Where the batch driver reads catalog responses from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// A directory of `.har` network captures.
    HarDirectory,
    /// A single JSON document holding an array of catalog responses.
    JsonDocument,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::HarDirectory => write!(f, "har-dir"),
            SourceKind::JsonDocument => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "har-dir" | "har" => Ok(SourceKind::HarDirectory),
            "json" => Ok(SourceKind::JsonDocument),
            other => Err(format!(
                "unknown source kind '{other}' (expected 'har-dir' or 'json')"
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub input_path: PathBuf,
    pub image_output_dir: PathBuf,
    pub export_path: PathBuf,
    pub source_kind: SourceKind,
    pub log_level: String,
    pub user_agent: String,
    /// Per-request timeout for image downloads. `None` waits indefinitely.
    pub image_timeout_secs: Option<u64>,
}
