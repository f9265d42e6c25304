//! OrbitLens - contact enrichment widgets for host pages.
//!
//! Runs the page adapters, the orchestrator and the widget state machine
//! against page snapshots from the command line.

mod cli;
mod commands;
mod sites;

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use orbitlens_config::{Config, ConfigLoader, ConfigValidator, LoggingConfig};

use crate::cli::{Cli, Commands};

/// Initialize tracing with console output and, when `logging.dir` is set,
/// a daily-rolling log file.
///
/// `RUST_LOG` wins over `logging.level`. Console output goes to stderr so
/// command output on stdout stays machine-readable.
fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let file_layer = match &logging.dir {
        Some(dir) => {
            let log_dir = PathBuf::from(ConfigLoader::expand_path(dir));
            std::fs::create_dir_all(&log_dir)?;

            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("orbitlens")
                .filename_suffix("log")
                .max_log_files(30)
                .build(&log_dir)?;
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            // Keeps the background writer alive for the program duration.
            static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
                std::sync::OnceLock::new();
            let _ = GUARD.set(guard);

            Some(fmt::layer().with_writer(non_blocking).with_ansi(false))
        }
        None => None,
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_ansi(true),
        )
        .with(file_layer)
        .init();

    Ok(())
}

/// Log validation findings; errors abort.
fn validate_config(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let result = ConfigValidator::validate(config);
    for warning in &result.warnings {
        warn!(path = %warning.path, "{}", warning.message);
    }
    for err in &result.errors {
        error!(path = %err.path, "{}", err.message);
    }
    if !result.is_valid() {
        return Err(format!("invalid configuration ({} error(s))", result.errors.len()).into());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = ConfigLoader::load_or_default(cli.config.as_deref())?;
    init_tracing(&config.logging)?;
    info!("OrbitLens v{}", env!("CARGO_PKG_VERSION"));
    validate_config(&config)?;

    match cli.command {
        Commands::Sites { format } => commands::sites(&config, format),
        Commands::Detect { snapshot } => commands::detect(&config, &snapshot),
        Commands::Inject {
            snapshot,
            output,
            format,
        } => commands::inject(&config, &snapshot, output.as_deref(), format),
        Commands::Preview {
            responses,
            username,
            platform,
            expand,
            format,
        } => {
            commands::preview(&config, &responses, &username, &platform, expand, format).await
        }
    }
}
