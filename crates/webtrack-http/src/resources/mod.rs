//! Resource clients for the WebTrack REST endpoints.
//!
//! Each client borrows nothing: it holds a clone of the [`Gateway`](crate::Gateway)
//! and builds paths and query strings for one family of endpoints. Response
//! payloads are returned as raw JSON; their shape is owned by the backend.

mod dashboard;
mod leave;
mod reviews;
mod timesheets;
mod users;

pub use dashboard::{
    Dashboard, DepartmentPeriod, DepartmentRange, DepartmentYear, ExportFormat, ExportParams,
    FinancialsParams,
};
pub use leave::{Leave, LeaveFilters, LeaveKind, LeaveRequestInput, LeaveRequestUpdate};
pub use reviews::{
    GoalInput, GoalUpdate, ReviewFilters, ReviewInput, ReviewStatus, ReviewType, ReviewUpdate,
    Reviews, SkillInput, Skills,
};
pub use timesheets::{TimesheetFilters, TimesheetInput, Timesheets};
pub use users::{PasswordChange, PasswordReset, PasswordResetConfirm, Users};

use serde::{Deserialize, Serialize};

/// Approval state shared by timesheets and leave requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

/// Body of the `reject` actions.
#[derive(Debug, Serialize)]
struct Rejection<'a> {
    reason: &'a str,
}
