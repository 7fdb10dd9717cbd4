//! Input enumeration for extraction runs.
//!
//! Failures here are fatal: without a readable top-level input there is
//! nothing to process and no partial output to write.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde_json::Value;

/// Lists `*.har` files directly inside `dir`, sorted by file name so repeated
/// runs over the same directory produce rows in the same order.
pub(crate) fn list_har_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("cannot read HAR directory {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry =
            entry.with_context(|| format!("cannot list HAR directory {}", dir.display()))?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "har") {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Loads a JSON document of catalog responses.
///
/// A top-level array yields its elements; a single object is treated as a
/// one-element array.
pub(crate) fn load_json_document(path: &Path) -> anyhow::Result<Vec<Value>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read JSON document {}", path.display()))?;
    let document: Value = serde_json::from_str(&text)
        .with_context(|| format!("cannot parse JSON document {}", path.display()))?;

    match document {
        Value::Array(elements) => Ok(elements),
        object @ Value::Object(_) => Ok(vec![object]),
        _ => anyhow::bail!(
            "JSON document {} must hold an array of catalog responses",
            path.display()
        ),
    }
}

/// File name used in the `Source File` column.
pub(crate) fn file_label(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}
