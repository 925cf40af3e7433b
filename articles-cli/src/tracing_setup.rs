//! Tracing setup for the articles CLI
//!
//! Usage:
//!   articles serve                        # JSON lines on stdout, info level
//!   articles --debug serve                # debug level
//!   articles --log-format compact serve   # human-readable output
//!   RUST_LOG=articles_server=debug articles serve

use anyhow::{anyhow, Result};
use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

/// Log line format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// One JSON object per line
    #[default]
    Json,
    /// Compact human-readable lines
    Compact,
}

/// Tracing configuration options
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Enable debug logging (sets debug level if RUST_LOG is not set)
    pub debug: bool,
    pub format: LogFormat,
}

fn env_filter(config: &TracingConfig) -> EnvFilter {
    let fallback = if config.debug { "debug" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Initialize tracing, writing to stdout.
pub fn init(config: &TracingConfig) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(std::io::stdout);

    match config.format {
        LogFormat::Json => builder
            .json()
            .with_current_span(false)
            .try_init()
            .map_err(|err| anyhow!(err)),
        LogFormat::Compact => builder
            .with_target(config.debug)
            .compact()
            .try_init()
            .map_err(|err| anyhow!(err)),
    }
}
