//! Logout command implementation.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use webtrack_core::NoopNavigator;

use crate::cli::GlobalArgs;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(global: &GlobalArgs, _args: LogoutArgs) -> Result<()> {
    let store = session::open_store(global)?;
    let gateway = session::gateway_with(global, store, Arc::new(NoopNavigator))?;

    gateway.logout().context("Failed to clear credentials")?;

    output::success("Logged out");
    Ok(())
}
