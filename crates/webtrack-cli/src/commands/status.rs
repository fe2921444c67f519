//! Status command implementation.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::cli::GlobalArgs;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct StatusArgs {}

pub async fn run(global: &GlobalArgs, _args: StatusArgs) -> Result<()> {
    let store = session::open_store(global)?;
    let path = store.path().display().to_string();
    let gateway = session::gateway_with(global, store, Arc::new(session::CliNavigator))?;

    let signed_in = gateway
        .is_authenticated()
        .context("Failed to read credential store")?;

    let state = if signed_in {
        "signed in".green()
    } else {
        "signed out".yellow()
    };

    output::field("Session", &state.to_string());
    output::field("API", &gateway.base_url().to_string());
    output::field("Store", &path);

    Ok(())
}
