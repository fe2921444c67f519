//! Dashboard metric and report endpoints.

use bytes::Bytes;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::instrument;

use webtrack_core::Result;

use crate::gateway::Gateway;
use crate::request::ApiRequest;

/// Date range filter for financial metrics.
#[derive(Debug, Default, Clone, Serialize)]
pub struct FinancialsParams {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub project: Option<u64>,
}

/// Department plus date range filter.
#[derive(Debug, Default, Clone, Serialize)]
pub struct DepartmentRange {
    pub department: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Department plus review period filter.
#[derive(Debug, Default, Clone, Serialize)]
pub struct DepartmentPeriod {
    pub department: Option<String>,
    pub period: Option<String>,
}

/// Department plus calendar year filter.
#[derive(Debug, Default, Clone, Serialize)]
pub struct DepartmentYear {
    pub department: Option<String>,
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Pdf,
    Excel,
}

/// Options for a report export.
#[derive(Debug, Default, Clone, Serialize)]
pub struct ExportParams {
    pub format: Option<ExportFormat>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub department: Option<String>,
}

#[derive(Debug, Serialize)]
struct AllocationFilter<'a> {
    department: Option<&'a str>,
    date: Option<NaiveDate>,
}

/// Client for the dashboard endpoints.
///
/// Every call surfaces backend and transport errors as-is; there is no
/// placeholder data.
#[derive(Debug, Clone)]
pub struct Dashboard {
    gateway: Gateway,
}

impl Dashboard {
    pub(crate) fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// Headline numbers: revenue, active projects, team size, utilization.
    #[instrument(skip(self))]
    pub async fn metrics(&self) -> Result<serde_json::Value> {
        self.gateway.get_json("/api/dashboard/metrics/").await
    }

    #[instrument(skip(self))]
    pub async fn project_health(&self) -> Result<serde_json::Value> {
        self.gateway.get_json("/api/dashboard/project-health/").await
    }

    #[instrument(skip(self))]
    pub async fn financials(&self, params: &FinancialsParams) -> Result<serde_json::Value> {
        self.gateway
            .get_json_with("/api/dashboard/financials/", params)
            .await
    }

    #[instrument(skip(self))]
    pub async fn resource_utilization(&self, params: &DepartmentRange) -> Result<serde_json::Value> {
        self.gateway
            .get_json_with("/api/dashboard/resource-utilization/", params)
            .await
    }

    #[instrument(skip(self))]
    pub async fn performance_overview(
        &self,
        params: &DepartmentPeriod,
    ) -> Result<serde_json::Value> {
        self.gateway
            .get_json_with("/api/dashboard/performance-overview/", params)
            .await
    }

    #[instrument(skip(self))]
    pub async fn leave_statistics(&self, params: &DepartmentYear) -> Result<serde_json::Value> {
        self.gateway
            .get_json_with("/api/dashboard/leave-statistics/", params)
            .await
    }

    #[instrument(skip(self))]
    pub async fn timesheet_summary(&self, params: &DepartmentRange) -> Result<serde_json::Value> {
        self.gateway
            .get_json_with("/api/dashboard/timesheet-summary/", params)
            .await
    }

    /// Profitability per project; the `department` filter is ignored.
    #[instrument(skip(self))]
    pub async fn project_profitability(
        &self,
        params: &DepartmentRange,
    ) -> Result<serde_json::Value> {
        self.gateway
            .get_json_with("/api/dashboard/project-profitability/", params)
            .await
    }

    #[instrument(skip(self))]
    pub async fn team_allocation(
        &self,
        department: Option<&str>,
        date: Option<NaiveDate>,
    ) -> Result<serde_json::Value> {
        self.gateway
            .get_json_with(
                "/api/dashboard/team-allocation/",
                &AllocationFilter { department, date },
            )
            .await
    }

    #[instrument(skip(self))]
    pub async fn upcoming_reviews(&self) -> Result<serde_json::Value> {
        self.gateway.get_json("/dashboards/upcoming-reviews/").await
    }

    #[instrument(skip(self))]
    pub async fn pending_approvals(&self) -> Result<serde_json::Value> {
        self.gateway.get_json("/dashboards/pending-approvals/").await
    }

    /// Download a rendered report. The body is returned undecoded.
    #[instrument(skip(self))]
    pub async fn export(&self, report: &str, params: &ExportParams) -> Result<Bytes> {
        let request =
            ApiRequest::get(format!("/dashboards/export/{}/", report)).with_query(params)?;
        let response = self.gateway.execute(&request).await?;
        Ok(response.body().clone())
    }
}
