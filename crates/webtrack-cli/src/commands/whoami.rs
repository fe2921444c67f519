//! Whoami command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::GlobalArgs;
use crate::output;
use crate::session;

const PROFILE_FIELDS: &[(&str, &str)] = &[
    ("id", "ID"),
    ("username", "Username"),
    ("email", "Email"),
    ("first_name", "First name"),
    ("last_name", "Last name"),
    ("role", "Role"),
    ("department", "Department"),
];

#[derive(Args, Debug)]
pub struct WhoamiArgs {
    /// Print the raw profile as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(global: &GlobalArgs, args: WhoamiArgs) -> Result<()> {
    let gateway = session::authenticated(global)?;

    let me = gateway
        .users()
        .me()
        .await
        .context("Failed to fetch current user")?;

    if args.json {
        return output::json(&me, true);
    }

    for (key, label) in PROFILE_FIELDS {
        match me.get(*key) {
            None | Some(serde_json::Value::Null) => {}
            Some(serde_json::Value::String(s)) => output::field(label, s),
            Some(other) => output::field(label, &other.to_string()),
        }
    }

    Ok(())
}
