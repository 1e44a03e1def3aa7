//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use vantage_core::Credentials;

use crate::cli::Cli;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email to authenticate with
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long)]
    pub password: String,
}

pub async fn run(args: &LoginArgs, cli: &Cli) -> Result<()> {
    let controller = session::connect(&cli.api)?;
    let credentials = Credentials::new(&args.email, &args.password);

    eprintln!("{}", "Logging in...".dimmed());

    let user = controller
        .login(&credentials)
        .await
        .context("Failed to login")?;

    output::success("Logged in successfully");
    println!();
    output::field("Email", &user.email);
    output::field("Role", &user.role);
    output::field("Organization", &user.organization_id.to_string());

    Ok(())
}
