pub mod app_config;
mod config;
pub mod products;

use thiserror::Error;

pub use app_config::{AppConfig, SourceKind};
pub use config::{load_app_config, load_app_config_from_env};
pub use products::{sentinel, ProductRecord, COLUMNS};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
