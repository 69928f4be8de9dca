//! Structured logging setup.
//!
//! Logs go to stderr. `RUST_LOG` overrides the configured default filter.

use clap::ValueEnum;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError, EnvFilter,
};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable output for local runs.
    Pretty,
    /// JSON lines for log aggregation.
    Json,
}

/// Install the global tracing subscriber. Call once, early in `main`.
///
/// `default_level` accepts `EnvFilter` directives such as `"info"` or
/// `"bookchain=debug,tower_http=info"`.
pub fn init_logging(default_level: &str, format: LogFormat) -> Result<(), TryInitError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    match format {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_line_number(true),
            )
            .try_init()?,
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .try_init()?,
    }

    tracing::info!(?format, "logging initialized");
    Ok(())
}
