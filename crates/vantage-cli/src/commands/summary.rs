//! Usage summary command implementation.

use anyhow::{Context, Result};

use vantage_http::endpoints;

use crate::cli::Cli;
use crate::output;
use crate::session;

pub async fn run(cli: &Cli) -> Result<()> {
    let controller = session::connect(&cli.api)?;
    let summary = endpoints::usage_summary(controller.dispatcher())
        .await
        .context("Failed to fetch usage summary")?;

    if cli.json {
        return output::json_pretty(&summary);
    }

    output::heading("Usage summary");
    output::field("Total events", &summary.total_events.to_string());
    output::field("Active users", &summary.active_users.to_string());
    output::field("Features tracked", &summary.features_tracked.to_string());

    Ok(())
}
