//! Whoami command implementation.

use anyhow::{Result, bail};

use vantage_http::SessionState;

use crate::cli::Cli;
use crate::output;
use crate::session;

pub async fn run(cli: &Cli) -> Result<()> {
    let controller = session::connect(&cli.api)?;

    match controller.hydrate().await {
        SessionState::Authenticated(user) => {
            if cli.json {
                return output::json_pretty(&user);
            }
            output::field("Email", &user.email);
            output::field("Role", &user.role);
            output::field("Organization", &user.organization_id.to_string());
            output::field("Member since", &user.created_at.to_rfc3339());
            Ok(())
        }
        _ => bail!("No active session. Run 'vantage login' first."),
    }
}
