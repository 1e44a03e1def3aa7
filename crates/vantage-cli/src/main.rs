//! vantage - CLI for the Vantage usage-analytics admin API.
//!
//! A thin wrapper over the `vantage-http` client, intended for
//! inspecting analytics and anomaly data from a terminal.

mod cli;
mod commands;
mod output;
mod session;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.json_logs);

    match &cli.command {
        Commands::Login(args) => commands::login::run(args, &cli).await,
        Commands::Logout => commands::logout::run(&cli).await,
        Commands::Whoami => commands::whoami::run(&cli).await,
        Commands::Summary => commands::summary::run(&cli).await,
        Commands::Features => commands::features::run(&cli).await,
        Commands::Activity(args) => commands::activity::run(args, &cli).await,
        Commands::Anomalies => commands::anomalies::run(&cli).await,
        Commands::Insights => commands::insights::run(&cli).await,
        Commands::ChartData => commands::chart_data::run(&cli).await,
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

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false))
            .init();
    }
}
