//! Timesheets command implementation.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;

use webtrack_http::resources::TimesheetFilters;

use super::StatusArg;
use crate::cli::GlobalArgs;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct TimesheetsArgs {
    /// Only entries on or after this date (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Only entries on or before this date (YYYY-MM-DD)
    #[arg(long)]
    pub end_date: Option<NaiveDate>,

    /// Project ID
    #[arg(long)]
    pub project: Option<u64>,

    /// User ID
    #[arg(long)]
    pub user: Option<u64>,

    /// Approval status
    #[arg(long, value_enum)]
    pub status: Option<StatusArg>,

    /// Show aggregated hours instead of entries
    #[arg(long)]
    pub summary: bool,

    /// Pretty-print each item
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(global: &GlobalArgs, args: TimesheetsArgs) -> Result<()> {
    let gateway = session::authenticated(global)?;

    let filters = TimesheetFilters {
        start_date: args.start_date,
        end_date: args.end_date,
        project: args.project,
        user: args.user,
        status: args.status.map(Into::into),
    };

    let timesheets = gateway.timesheets();
    if args.summary {
        let summary = timesheets
            .summary(&filters)
            .await
            .context("Failed to fetch timesheet summary")?;
        return output::json(&summary, true);
    }

    let list = timesheets
        .list(&filters)
        .await
        .context("Failed to list timesheets")?;
    output::items(&list, args.pretty)
}
