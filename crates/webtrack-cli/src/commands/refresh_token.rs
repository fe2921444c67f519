//! Refresh token command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::cli::GlobalArgs;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct RefreshTokenArgs {}

pub async fn run(global: &GlobalArgs, _args: RefreshTokenArgs) -> Result<()> {
    let gateway = session::gateway(global)?;

    eprintln!("{}", "Refreshing session...".dimmed());

    gateway
        .refresh()
        .await
        .context("Failed to refresh session")?;

    output::success("Session refreshed successfully");
    output::field("API", &gateway.base_url().to_string());

    Ok(())
}
