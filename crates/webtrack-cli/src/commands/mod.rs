//! Subcommand implementations.

pub mod dashboard;
pub mod leave;
pub mod login;
pub mod logout;
pub mod refresh_token;
pub mod request;
pub mod reviews;
pub mod status;
pub mod timesheets;
pub mod whoami;

use anyhow::Result;
use clap::ValueEnum;

use webtrack_http::resources::ApprovalStatus;

use crate::cli::{Cli, Commands};

pub async fn handle(cli: Cli) -> Result<()> {
    let global = &cli.global;
    match cli.command {
        Commands::Login(args) => login::run(global, args).await,
        Commands::Logout(args) => logout::run(global, args).await,
        Commands::Whoami(args) => whoami::run(global, args).await,
        Commands::Status(args) => status::run(global, args).await,
        Commands::RefreshToken(args) => refresh_token::run(global, args).await,
        Commands::Request(args) => request::run(global, args).await,
        Commands::Timesheets(args) => timesheets::run(global, args).await,
        Commands::Leave(args) => leave::run(global, args).await,
        Commands::Reviews(args) => reviews::run(global, args).await,
        Commands::Dashboard(args) => dashboard::run(global, args).await,
    }
}

/// Approval filter accepted by the timesheet and leave commands.
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum StatusArg {
    Pending,
    Approved,
    Rejected,
}

impl From<StatusArg> for ApprovalStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Pending => ApprovalStatus::Pending,
            StatusArg::Approved => ApprovalStatus::Approved,
            StatusArg::Rejected => ApprovalStatus::Rejected,
        }
    }
}
