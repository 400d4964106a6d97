//! `clerk` command-line entry point.
//!
//! # Responsibility
//! - Resolve configuration, start file logging and open the store.
//!   Logging problems are reported as warnings and never block a command.
//! - Run exactly one command and map failure to `Error: <msg>` with exit code 1.

mod cli;
mod commands;
mod palette;

use anyhow::{Context, Result};
use clap::Parser;
use clerk_core::{flush_logging, init_logging, ClerkConfig, LogSink, Store};
use cli::Cli;
use log::{error, info};
use palette::Palette;
use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Instant;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let outcome = run(cli);
    flush_logging();
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = ClerkConfig::resolve(cli.db, cli.log_level, cli.log_dir)?;
    let sink = LogSink::Directory(config.log_dir.clone());
    if let Err(message) = init_logging(&config.log_level, sink) {
        eprintln!("warning: logging disabled: {message}");
    }

    let label = commands::command_label(&cli.command);
    let started_at = Instant::now();
    let store = Store::open(&config.db_path)
        .with_context(|| format!("failed to open {}", config.db_path.display()))?;

    let palette = Palette::for_terminal(cli.no_color);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let outcome = commands::run(&cli.command, &store, &mut out, &palette);
    out.flush()?;

    match &outcome {
        Ok(()) => info!(
            "event=cli_command module=cli status=ok command={label} duration_ms={}",
            started_at.elapsed().as_millis()
        ),
        Err(_) => error!(
            "event=cli_command module=cli status=error command={label} duration_ms={}",
            started_at.elapsed().as_millis()
        ),
    }

    store.close()?;
    outcome
}
