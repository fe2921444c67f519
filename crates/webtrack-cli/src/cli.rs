//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::commands::{
    dashboard, leave, login, logout, refresh_token, request, reviews, status, timesheets, whoami,
};

/// Command-line client for the WebTrack employee management API.
#[derive(Parser, Debug)]
#[command(name = "webtrack")]
#[command(author, version = env!("WEBTRACK_VERSION"), about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// API origin, e.g. https://webtrack.example.com
    #[arg(long, env = "WEBTRACK_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Credential file (defaults to the platform data directory)
    #[arg(long, env = "WEBTRACK_STORE", global = true)]
    pub store: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Serialize token refreshes across concurrent requests
    #[arg(long, global = true)]
    pub single_flight: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and store a token pair
    Login(login::LoginArgs),

    /// Forget the stored tokens
    Logout(logout::LogoutArgs),

    /// Show the signed-in user
    Whoami(whoami::WhoamiArgs),

    /// Show whether a session is stored
    Status(status::StatusArgs),

    /// Exchange the refresh token for a new access token
    RefreshToken(refresh_token::RefreshTokenArgs),

    /// Send a raw request through the authenticated gateway
    Request(request::RequestArgs),

    /// List timesheet entries
    Timesheets(timesheets::TimesheetsArgs),

    /// List leave requests
    Leave(leave::LeaveArgs),

    /// List performance reviews
    Reviews(reviews::ReviewsArgs),

    /// Show a dashboard report
    Dashboard(dashboard::DashboardArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "webtrack",
            "status",
            "--api-url",
            "http://localhost:9000",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.global.api_url.as_deref(), Some("http://localhost:9000"));
        assert_eq!(cli.global.verbose, 2);
        assert!(matches!(cli.command, Commands::Status(_)));
    }
}
