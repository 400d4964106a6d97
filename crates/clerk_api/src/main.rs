//! `clerk-api` entry point.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use clerk_api::server::{DEFAULT_ADDR, DEFAULT_SHUTDOWN_TIMEOUT_SECS};
use clerk_api::{serve, AppState, ServerConfig};
use clerk_core::config::{DB_PATH_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV};
use clerk_core::{init_logging, ClerkConfig, LogSink, Store};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

/// Clerk HTTP API server.
#[derive(Debug, Parser)]
#[command(name = "clerk-api")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database.
    #[arg(long, env = DB_PATH_ENV)]
    db: Option<PathBuf>,

    /// Address to listen on.
    #[arg(long, env = "CLERK_API_ADDR", default_value = DEFAULT_ADDR)]
    addr: SocketAddr,

    /// Seconds in-flight requests get to finish after a shutdown signal.
    #[arg(long, env = "CLERK_SHUTDOWN_TIMEOUT_SECS", default_value_t = DEFAULT_SHUTDOWN_TIMEOUT_SECS)]
    shutdown_timeout_secs: u64,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, env = LOG_LEVEL_ENV)]
    log_level: Option<String>,

    /// Write rotating log files here instead of stderr.
    #[arg(long, env = LOG_DIR_ENV)]
    log_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let log_to_dir = args.log_dir.is_some();
    let config = ClerkConfig::resolve(args.db, args.log_level, args.log_dir)?;
    let sink = if log_to_dir {
        LogSink::Directory(config.log_dir.clone())
    } else {
        LogSink::Stderr
    };
    init_logging(&config.log_level, sink)
        .map_err(|message| anyhow!(message))
        .context("failed to initialize logging")?;

    let store = Store::open(&config.db_path)
        .with_context(|| format!("failed to open {}", config.db_path.display()))?;
    let server_config = ServerConfig {
        addr: args.addr,
        shutdown_timeout: Duration::from_secs(args.shutdown_timeout_secs),
    };
    serve(server_config, AppState::new(store)).await
}
