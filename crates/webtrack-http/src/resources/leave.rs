//! Leave request, balance, type and policy endpoints.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::instrument;

use webtrack_core::Result;

use super::{ApprovalStatus, Rejection};
use crate::gateway::Gateway;

/// Category of leave being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveKind {
    Annual,
    Sick,
    Personal,
    Other,
}

/// Filters for listing leave requests.
#[derive(Debug, Default, Clone, Serialize)]
pub struct LeaveFilters {
    pub user: Option<u64>,
    pub status: Option<ApprovalStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// A new leave request.
#[derive(Debug, Clone, Serialize)]
pub struct LeaveRequestInput {
    pub leave_type: LeaveKind,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
}

/// A partial update; unset fields are left unchanged.
#[derive(Debug, Default, Clone, Serialize)]
pub struct LeaveRequestUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leave_type: Option<LeaveKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ApprovalStatus>,
}

#[derive(Debug, Serialize)]
struct UserFilter {
    user: Option<u64>,
}

#[derive(Debug, Serialize)]
struct CalendarFilter<'a> {
    department: Option<&'a str>,
    /// `YYYY-MM`
    month: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct AnalyticsFilter<'a> {
    department: Option<&'a str>,
    year: Option<i32>,
}

/// Client for the leave endpoints.
#[derive(Debug, Clone)]
pub struct Leave {
    gateway: Gateway,
}

impl Leave {
    pub(crate) fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, filters: &LeaveFilters) -> Result<serde_json::Value> {
        self.gateway.get_json_with("/leave-requests/", filters).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: u64) -> Result<serde_json::Value> {
        self.gateway
            .get_json(&format!("/leave-requests/{}/", id))
            .await
    }

    #[instrument(skip(self))]
    pub async fn create(&self, input: &LeaveRequestInput) -> Result<serde_json::Value> {
        self.gateway.post_json("/leave-requests/", input).await
    }

    #[instrument(skip(self))]
    pub async fn update(&self, id: u64, update: &LeaveRequestUpdate) -> Result<serde_json::Value> {
        self.gateway
            .patch_json(&format!("/leave-requests/{}/", id), update)
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: u64) -> Result<()> {
        self.gateway
            .delete(&format!("/leave-requests/{}/", id))
            .await
    }

    #[instrument(skip(self))]
    pub async fn approve(&self, id: u64) -> Result<serde_json::Value> {
        self.gateway
            .post_empty(&format!("/leave-requests/{}/approve/", id))
            .await
    }

    #[instrument(skip(self))]
    pub async fn reject(&self, id: u64, reason: &str) -> Result<serde_json::Value> {
        self.gateway
            .post_json(
                &format!("/leave-requests/{}/reject/", id),
                &Rejection { reason },
            )
            .await
    }

    /// Balances for one user, or for the caller when `user` is `None`.
    #[instrument(skip(self))]
    pub async fn balances(&self, user: Option<u64>) -> Result<serde_json::Value> {
        self.gateway
            .get_json_with("/leave-balances/", &UserFilter { user })
            .await
    }

    pub async fn types(&self) -> Result<serde_json::Value> {
        self.gateway.get_json("/leave-types/").await
    }

    pub async fn policies(&self) -> Result<serde_json::Value> {
        self.gateway.get_json("/leave-policies/").await
    }

    #[instrument(skip(self))]
    pub async fn analytics(
        &self,
        department: Option<&str>,
        year: Option<i32>,
    ) -> Result<serde_json::Value> {
        self.gateway
            .get_json_with(
                "/leave-requests/analytics/",
                &AnalyticsFilter { department, year },
            )
            .await
    }

    #[instrument(skip(self))]
    pub async fn team_calendar(
        &self,
        department: Option<&str>,
        month: Option<&str>,
    ) -> Result<serde_json::Value> {
        self.gateway
            .get_json_with(
                "/leave-requests/calendar/",
                &CalendarFilter { department, month },
            )
            .await
    }
}
