//! Command-line interface for `bookchain-server`.

use std::net::SocketAddr;

use bookchain::ChainConfig;
use clap::Parser;

use crate::logging::LogFormat;

/// Serves an in-memory book checkout chain over HTTP.
///
/// The chain lives only as long as the process; restarting starts a new
/// chain from a fresh genesis block.
#[derive(Parser, Debug)]
#[command(name = "bookchain-server", version, about)]
pub struct Cli {
    /// Address to listen on.
    #[arg(long, short = 'l', env = "BOOKCHAIN_LISTEN", default_value = "0.0.0.0:3000")]
    pub listen: SocketAddr,

    /// Default log filter when `RUST_LOG` is unset.
    #[arg(long, env = "BOOKCHAIN_LOG", default_value = "info")]
    pub log_level: String,

    /// Log output format.
    #[arg(long, env = "BOOKCHAIN_LOG_FORMAT", value_enum, default_value = "pretty")]
    pub log_format: LogFormat,

    /// Fixed genesis timestamp in Unix milliseconds (defaults to start-up time).
    #[arg(long, env = "BOOKCHAIN_GENESIS_TIMESTAMP", allow_negative_numbers = true)]
    pub genesis_timestamp: Option<i64>,
}

impl Cli {
    /// Chain configuration derived from the arguments.
    pub fn chain_config(&self) -> ChainConfig {
        ChainConfig {
            genesis_timestamp: self.genesis_timestamp,
        }
    }
}
