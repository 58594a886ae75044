// SPDX-FileCopyrightText: 2026 Volley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! volley - a bulk-message broadcast scheduling engine.
//!
//! This is the binary entry point. The scheduling logic lives in
//! volley-broadcast; the sender loops in volley-sender.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod serve;
mod status;

/// volley - schedule and run bulk-message broadcasts.
#[derive(Parser, Debug)]
#[command(name = "volley", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// List broadcasts most-urgent-first with their lifecycle status.
    Status,
    /// Run a sender loop for every stored broadcast until signalled.
    Serve,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = match volley_config::load_and_validate() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("volley: {e}");
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Status => status::run_status(&config).await,
        Commands::Serve => serve::run_serve(&config).await,
    };
    if let Err(e) = result {
        eprintln!("volley: {e}");
        std::process::exit(1);
    }
}
