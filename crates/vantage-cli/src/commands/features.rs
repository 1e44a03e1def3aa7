//! Feature usage command implementation.

use anyhow::{Context, Result};

use vantage_http::endpoints;

use crate::cli::Cli;
use crate::output;
use crate::session;

pub async fn run(cli: &Cli) -> Result<()> {
    let controller = session::connect(&cli.api)?;
    let features = endpoints::feature_usage(controller.dispatcher())
        .await
        .context("Failed to fetch feature usage")?;

    if cli.json {
        return output::json_pretty(&features);
    }

    output::heading("Feature usage");
    for feature in &features {
        output::feature_row(feature);
    }

    Ok(())
}
