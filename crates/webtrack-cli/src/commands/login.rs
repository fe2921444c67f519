//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use webtrack_core::Credentials;

use crate::cli::GlobalArgs;
use crate::output;
use crate::session::{self, API_URL_KEY};

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account username
    #[arg(long)]
    pub username: String,

    /// Account password
    #[arg(long, env = "WEBTRACK_PASSWORD", hide_env_values = true)]
    pub password: String,
}

pub async fn run(global: &GlobalArgs, args: LoginArgs) -> Result<()> {
    let gateway = session::gateway(global)?;
    let credentials = Credentials::new(&args.username, &args.password);

    eprintln!("{}", "Logging in...".dimmed());

    gateway
        .login(&credentials)
        .await
        .context("Failed to login")?;

    // Remember the origin so later commands reach the same backend
    let api_url = gateway.base_url().to_string();
    gateway
        .store()
        .set(API_URL_KEY, &api_url)
        .context("Failed to save API URL")?;

    output::success("Logged in successfully");
    println!();
    output::field("User", credentials.username());
    output::field("API", &api_url);

    Ok(())
}
