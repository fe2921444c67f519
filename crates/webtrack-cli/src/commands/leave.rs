//! Leave command implementation.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;

use webtrack_http::resources::LeaveFilters;

use super::StatusArg;
use crate::cli::GlobalArgs;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct LeaveArgs {
    /// User ID
    #[arg(long)]
    pub user: Option<u64>,

    /// Approval status
    #[arg(long, value_enum)]
    pub status: Option<StatusArg>,

    /// Only requests starting on or after this date (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Only requests ending on or before this date (YYYY-MM-DD)
    #[arg(long)]
    pub end_date: Option<NaiveDate>,

    /// Show leave balances instead of requests
    #[arg(long, conflicts_with_all = ["status", "start_date", "end_date"])]
    pub balances: bool,

    /// Pretty-print each item
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(global: &GlobalArgs, args: LeaveArgs) -> Result<()> {
    let gateway = session::authenticated(global)?;
    let leave = gateway.leave();

    let list = if args.balances {
        leave
            .balances(args.user)
            .await
            .context("Failed to fetch leave balances")?
    } else {
        let filters = LeaveFilters {
            user: args.user,
            status: args.status.map(Into::into),
            start_date: args.start_date,
            end_date: args.end_date,
        };
        leave
            .list(&filters)
            .await
            .context("Failed to list leave requests")?
    };

    output::items(&list, args.pretty)
}
