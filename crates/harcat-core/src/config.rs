use crate::app_config::{AppConfig, SourceKind};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every setting has a default, so an empty environment yields the same
/// paths the extractor has always used (`./har-files`, `./images`,
/// `product_data.xlsx`).
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let input_path = PathBuf::from(or_default("HARCAT_INPUT_PATH", "./har-files"));
    let image_output_dir = PathBuf::from(or_default("HARCAT_IMAGE_DIR", "./images"));
    let export_path = PathBuf::from(or_default("HARCAT_EXPORT_PATH", "product_data.xlsx"));
    let source_kind = parse_source_kind(&or_default("HARCAT_SOURCE_KIND", "har-dir"))?;
    let log_level = or_default("HARCAT_LOG_LEVEL", "info");
    let user_agent = or_default("HARCAT_USER_AGENT", "harcat/0.1 (catalog-export)");

    let image_timeout_secs = match lookup("HARCAT_IMAGE_TIMEOUT_SECS") {
        Ok(raw) => Some(
            raw.parse::<u64>()
                .map_err(|e| ConfigError::InvalidEnvVar {
                    var: "HARCAT_IMAGE_TIMEOUT_SECS".to_string(),
                    reason: e.to_string(),
                })?,
        ),
        Err(_) => None,
    };

    Ok(AppConfig {
        input_path,
        image_output_dir,
        export_path,
        source_kind,
        log_level,
        user_agent,
        image_timeout_secs,
    })
}

fn parse_source_kind(s: &str) -> Result<SourceKind, ConfigError> {
    s.parse::<SourceKind>()
        .map_err(|reason| ConfigError::InvalidEnvVar {
            var: "HARCAT_SOURCE_KIND".to_string(),
            reason,
        })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
