//! Reviews command implementation.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use webtrack_http::resources::{ReviewFilters, ReviewStatus, ReviewType};

use crate::cli::GlobalArgs;
use crate::output;
use crate::session;

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ReviewTypeArg {
    MidYear,
    YearEnd,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ReviewStatusArg {
    Draft,
    Submitted,
    Reviewed,
    Acknowledged,
}

#[derive(Args, Debug)]
pub struct ReviewsArgs {
    /// Reviewed employee ID
    #[arg(long)]
    pub user: Option<u64>,

    /// Reviewer ID
    #[arg(long)]
    pub reviewer: Option<u64>,

    #[arg(long, value_enum)]
    pub status: Option<ReviewStatusArg>,

    #[arg(long = "type", value_enum)]
    pub review_type: Option<ReviewTypeArg>,

    /// Pretty-print each item
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(global: &GlobalArgs, args: ReviewsArgs) -> Result<()> {
    let gateway = session::authenticated(global)?;

    let filters = ReviewFilters {
        user: args.user,
        reviewer: args.reviewer,
        status: args.status.map(|s| match s {
            ReviewStatusArg::Draft => ReviewStatus::Draft,
            ReviewStatusArg::Submitted => ReviewStatus::Submitted,
            ReviewStatusArg::Reviewed => ReviewStatus::Reviewed,
            ReviewStatusArg::Acknowledged => ReviewStatus::Acknowledged,
        }),
        review_type: args.review_type.map(|t| match t {
            ReviewTypeArg::MidYear => ReviewType::MidYear,
            ReviewTypeArg::YearEnd => ReviewType::YearEnd,
        }),
    };

    let list = gateway
        .reviews()
        .list(&filters)
        .await
        .context("Failed to list reviews")?;
    output::items(&list, args.pretty)
}
