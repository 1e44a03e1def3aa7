//! Usage insights command implementation.

use anyhow::{Context, Result};

use vantage_http::endpoints;

use crate::cli::Cli;
use crate::output;
use crate::session;

pub async fn run(cli: &Cli) -> Result<()> {
    let controller = session::connect(&cli.api)?;
    let insights = endpoints::usage_insights(controller.dispatcher())
        .await
        .context("Failed to fetch usage insights")?;

    if cli.json {
        return output::json_pretty(&insights);
    }

    output::heading("Usage insights");
    for insight in &insights.insights {
        output::bullet(insight);
    }

    Ok(())
}
