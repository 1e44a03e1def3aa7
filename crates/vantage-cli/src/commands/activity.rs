//! User activity command implementation.

use anyhow::{Context, Result};
use clap::Args;

use vantage_http::endpoints;

use crate::cli::Cli;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct ActivityArgs {
    /// Trailing window in days
    #[arg(long, default_value_t = 30)]
    pub days: u32,
}

pub async fn run(args: &ActivityArgs, cli: &Cli) -> Result<()> {
    let controller = session::connect(&cli.api)?;
    let activity = endpoints::user_activity(controller.dispatcher(), args.days)
        .await
        .context("Failed to fetch user activity")?;

    if cli.json {
        return output::json_pretty(&activity);
    }

    output::heading(&format!("User activity (last {} days)", args.days));
    for row in &activity {
        output::activity_row(row);
    }

    Ok(())
}
