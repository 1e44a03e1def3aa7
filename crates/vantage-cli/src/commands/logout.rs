//! Logout command implementation.

use anyhow::Result;

use crate::cli::Cli;
use crate::output;
use crate::session;

pub async fn run(cli: &Cli) -> Result<()> {
    let controller = session::connect(&cli.api)?;
    controller.logout();

    output::success("Logged out");
    Ok(())
}
