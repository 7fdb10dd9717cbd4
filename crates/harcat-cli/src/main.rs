mod collect;
mod dump;
mod export;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use harcat_core::{AppConfig, ConfigError, SourceKind};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "harcat")]
#[command(about = "Export product catalogs captured in HAR files to a spreadsheet")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract products from HAR captures or a JSON document and export them
    Extract(ExtractArgs),
    /// Write the JSON responses of one HAR capture to a JSON document
    Dump {
        /// HAR capture to read
        har: PathBuf,
        /// Output JSON document
        #[arg(long, default_value = "catalog_responses.json")]
        out: PathBuf,
    },
}

/// Overrides for the environment configuration. Unset flags keep the value
/// from `HARCAT_*` variables or their defaults.
#[derive(Debug, Default, Args)]
struct ExtractArgs {
    /// HAR directory or JSON document to read
    #[arg(long)]
    input: Option<PathBuf>,
    /// Directory downloaded product images are written to
    #[arg(long)]
    images: Option<PathBuf>,
    /// Spreadsheet path; a `.csv` extension writes CSV, anything else xlsx
    #[arg(long)]
    export: Option<PathBuf>,
    /// Input format: `har-dir` or `json`
    #[arg(long)]
    source_kind: Option<SourceKind>,
}

impl ExtractArgs {
    fn apply(self, config: &mut AppConfig) {
        if let Some(input) = self.input {
            config.input_path = input;
        }
        if let Some(images) = self.images {
            config.image_output_dir = images;
        }
        if let Some(export) = self.export {
            config.export_path = export;
        }
        if let Some(source_kind) = self.source_kind {
            config.source_kind = source_kind;
        }
    }
}

const DEFAULT_LOG_LEVEL: &str = "info";

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run(cli.command, harcat_core::load_app_config).await
}

/// Dispatches a parsed command. The environment configuration is only loaded
/// for extraction, so `dump` works even when `HARCAT_*` values are invalid.
async fn run(
    command: Option<Commands>,
    load_config: impl FnOnce() -> Result<AppConfig, ConfigError>,
) -> anyhow::Result<()> {
    match command {
        Some(Commands::Dump { har, out }) => {
            init_tracing(DEFAULT_LOG_LEVEL)?;
            dump::run_dump(&har, &out)?;
        }
        command => {
            let mut config = load_config()?;
            init_tracing(&config.log_level)?;
            if let Some(Commands::Extract(args)) = command {
                args.apply(&mut config);
            }
            collect::run_extract(&config).await?;
        }
    }

    Ok(())
}

/// Installs the fmt subscriber, filtered by `RUST_LOG` or else `log_level`.
fn init_tracing(log_level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_level))?;
    // A subscriber may already be installed when commands run inside tests.
    let _ = tracing_subscriber::fmt().with_env_filter(env_filter).try_init();
    Ok(())
}
