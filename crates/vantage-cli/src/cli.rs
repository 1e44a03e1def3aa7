//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::activity::ActivityArgs;
use crate::commands::login::LoginArgs;

/// Vantage usage-analytics CLI.
#[derive(Parser, Debug)]
#[command(name = "vantage")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Backend base URL
    #[arg(long, default_value = "http://localhost:8000", global = true)]
    pub api: String,

    /// Print payloads as raw JSON instead of formatted output
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Authenticate and persist the session
    Login(LoginArgs),
    /// End the session and forget the stored token
    Logout,
    /// Show the currently authenticated user
    Whoami,
    /// Aggregate usage counts
    Summary,
    /// Per-feature usage metrics
    Features,
    /// Per-user activity over a trailing window
    Activity(ActivityArgs),
    /// Detected usage anomalies
    Anomalies,
    /// Natural-language usage insights
    Insights,
    /// Pre-aggregated chart statistics
    ChartData,
}
