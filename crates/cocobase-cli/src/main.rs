//! cocobase - command-line client for the Cocobase document database.
//!
//! A thin wrapper over the `cocobase` library for managing collections and
//! documents from a shell.

mod cli;
mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use commands::{collection, configure, document, whoami};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    let overrides = cli.overrides();
    match cli.command {
        Commands::Configure(args) => configure::run(args, &overrides).await,
        Commands::Whoami(args) => whoami::run(args, &overrides).await,
        Commands::Collection(cmd) => collection::handle(cmd, &overrides).await,
        Commands::Document(cmd) => document::handle(cmd, &overrides).await,
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // Logs go to stderr so stdout stays machine-readable
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
