//! `dump` command: copy the JSON responses of one HAR capture into a JSON
//! document that `extract --source-kind json` can read back.

use std::path::Path;

use anyhow::Context;
use harcat_scraper::{json_responses, parse_archive};
use serde_json::{json, Value};

use crate::collect::file_label;

/// Writes `[{"url": ..., "response": ...}, ...]` for every JSON-typed entry
/// of `har_path` to `out_path`. Unusable bodies are written as `{}`.
///
/// Returns the number of responses written.
///
/// # Errors
///
/// Returns an error if the capture cannot be read or parsed, or the output
/// cannot be written.
pub(crate) fn run_dump(har_path: &Path, out_path: &Path) -> anyhow::Result<usize> {
    let text = std::fs::read_to_string(har_path)
        .with_context(|| format!("cannot read HAR file {}", har_path.display()))?;
    let archive = parse_archive(&text, &file_label(har_path))?;

    let responses: Vec<Value> = json_responses(&archive)
        .into_iter()
        .map(|unit| {
            let response = unit.body.unwrap_or_else(|err| {
                tracing::warn!(url = %unit.url, entry = unit.index, error = %err, "writing empty response");
                json!({})
            });
            json!({"url": unit.url, "response": response})
        })
        .collect();

    let rendered = serde_json::to_string_pretty(&responses)?;
    std::fs::write(out_path, rendered)
        .with_context(|| format!("cannot write {}", out_path.display()))?;

    println!(
        "saved {} catalog responses to {}",
        responses.len(),
        out_path.display()
    );
    Ok(responses.len())
}
