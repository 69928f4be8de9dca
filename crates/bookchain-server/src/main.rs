//! # bookchain-server
//!
//! Entry point: parses the CLI, initializes logging, bootstraps a chain and
//! serves the HTTP API until Ctrl+C or SIGTERM.

mod api;
mod cli;
mod logging;

use std::sync::Arc;

use anyhow::{Context, Result};
use bookchain::Chain;
use clap::Parser;
use tokio::signal;

use crate::api::AppState;
use crate::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level, cli.log_format)
        .context("failed to initialize logging")?;

    let chain = Chain::with_config(cli.chain_config()).context("failed to bootstrap chain")?;
    let router = api::create_router(AppState {
        chain: Arc::new(chain),
    });

    let listener = tokio::net::TcpListener::bind(cli.listen)
        .await
        .with_context(|| format!("failed to bind {}", cli.listen))?;
    tracing::info!(listen = %cli.listen, "bookchain-server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("bookchain-server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or (on Unix) SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    tracing::info!("shutdown signal received");
}
