//! Timesheet endpoints.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::instrument;

use webtrack_core::Result;

use super::{ApprovalStatus, Rejection};
use crate::gateway::Gateway;

/// Filters for listing and summarizing timesheets.
#[derive(Debug, Default, Clone, Serialize)]
pub struct TimesheetFilters {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub project: Option<u64>,
    pub user: Option<u64>,
    pub status: Option<ApprovalStatus>,
}

/// A timesheet entry to create or replace.
#[derive(Debug, Clone, Serialize)]
pub struct TimesheetInput {
    pub project: u64,
    pub date: NaiveDate,
    pub hours: f64,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ApprovalStatus>,
}

/// Client for `/timesheets/`.
#[derive(Debug, Clone)]
pub struct Timesheets {
    gateway: Gateway,
}

impl Timesheets {
    pub(crate) fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, filters: &TimesheetFilters) -> Result<serde_json::Value> {
        self.gateway.get_json_with("/timesheets/", filters).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: u64) -> Result<serde_json::Value> {
        self.gateway.get_json(&format!("/timesheets/{}/", id)).await
    }

    #[instrument(skip(self))]
    pub async fn create(&self, input: &TimesheetInput) -> Result<serde_json::Value> {
        self.gateway.post_json("/timesheets/", input).await
    }

    #[instrument(skip(self))]
    pub async fn update(&self, id: u64, input: &TimesheetInput) -> Result<serde_json::Value> {
        self.gateway
            .patch_json(&format!("/timesheets/{}/", id), input)
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: u64) -> Result<()> {
        self.gateway.delete(&format!("/timesheets/{}/", id)).await
    }

    #[instrument(skip(self))]
    pub async fn approve(&self, id: u64) -> Result<serde_json::Value> {
        self.gateway
            .post_empty(&format!("/timesheets/{}/approve/", id))
            .await
    }

    #[instrument(skip(self))]
    pub async fn reject(&self, id: u64, reason: &str) -> Result<serde_json::Value> {
        self.gateway
            .post_json(&format!("/timesheets/{}/reject/", id), &Rejection { reason })
            .await
    }

    /// Aggregated hours; the `status` filter is ignored by the backend.
    #[instrument(skip(self))]
    pub async fn summary(&self, filters: &TimesheetFilters) -> Result<serde_json::Value> {
        self.gateway
            .get_json_with("/timesheets/summary/", filters)
            .await
    }
}
