//! Anomalies command implementation.

use anyhow::{Context, Result};

use vantage_http::endpoints;

use crate::cli::Cli;
use crate::output;
use crate::session;

pub async fn run(cli: &Cli) -> Result<()> {
    let controller = session::connect(&cli.api)?;
    let anomalies = endpoints::anomalies(controller.dispatcher())
        .await
        .context("Failed to fetch anomalies")?;

    if cli.json {
        return output::json_pretty(&anomalies);
    }

    if anomalies.is_empty() {
        output::success("No anomalies detected");
        return Ok(());
    }

    output::heading("Detected anomalies");
    for anomaly in &anomalies {
        output::anomaly_row(anomaly);
    }

    Ok(())
}
