//! Dashboard command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, ValueEnum};

use webtrack_http::resources::{
    Dashboard, DepartmentPeriod, DepartmentRange, DepartmentYear, ExportFormat, ExportParams,
    FinancialsParams,
};

use crate::cli::GlobalArgs;
use crate::output;
use crate::session;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Metrics,
    ProjectHealth,
    Financials,
    ResourceUtilization,
    PerformanceOverview,
    LeaveStatistics,
    TimesheetSummary,
    ProjectProfitability,
    TeamAllocation,
    UpcomingReviews,
    PendingApprovals,
    /// Download a rendered report (requires --report and --output)
    Export,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum FormatArg {
    Pdf,
    Excel,
}

#[derive(Args, Debug)]
pub struct DashboardArgs {
    /// Report to show
    #[arg(value_enum)]
    pub metric: Metric,

    #[arg(long)]
    pub department: Option<String>,

    /// Range start (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Range end (YYYY-MM-DD)
    #[arg(long)]
    pub end_date: Option<NaiveDate>,

    /// Project ID (financials)
    #[arg(long)]
    pub project: Option<u64>,

    /// Review period (performance-overview)
    #[arg(long)]
    pub period: Option<String>,

    /// Calendar year (leave-statistics)
    #[arg(long)]
    pub year: Option<i32>,

    /// Allocation date (team-allocation)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Report name (export)
    #[arg(long, required_if_eq("metric", "export"))]
    pub report: Option<String>,

    /// Export format
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// File to write the exported report to
    #[arg(long, required_if_eq("metric", "export"))]
    pub output: Option<PathBuf>,
}

impl DashboardArgs {
    fn range(&self) -> DepartmentRange {
        DepartmentRange {
            department: self.department.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

pub async fn run(global: &GlobalArgs, args: DashboardArgs) -> Result<()> {
    let gateway = session::authenticated(global)?;
    let dashboard = gateway.dashboard();
    let metric = args.metric;

    let report = match metric {
        Metric::Metrics => dashboard.metrics().await,
        Metric::ProjectHealth => dashboard.project_health().await,
        Metric::Financials => {
            dashboard
                .financials(&FinancialsParams {
                    start_date: args.start_date,
                    end_date: args.end_date,
                    project: args.project,
                })
                .await
        }
        Metric::ResourceUtilization => dashboard.resource_utilization(&args.range()).await,
        Metric::PerformanceOverview => {
            dashboard
                .performance_overview(&DepartmentPeriod {
                    department: args.department.clone(),
                    period: args.period.clone(),
                })
                .await
        }
        Metric::LeaveStatistics => {
            dashboard
                .leave_statistics(&DepartmentYear {
                    department: args.department.clone(),
                    year: args.year,
                })
                .await
        }
        Metric::TimesheetSummary => dashboard.timesheet_summary(&args.range()).await,
        Metric::ProjectProfitability => dashboard.project_profitability(&args.range()).await,
        Metric::TeamAllocation => {
            dashboard
                .team_allocation(args.department.as_deref(), args.date)
                .await
        }
        Metric::UpcomingReviews => dashboard.upcoming_reviews().await,
        Metric::PendingApprovals => dashboard.pending_approvals().await,
        Metric::Export => return export(&dashboard, args).await,
    }
    .with_context(|| format!("Failed to fetch {:?} dashboard", metric))?;

    output::json(&report, true)
}

async fn export(dashboard: &Dashboard, args: DashboardArgs) -> Result<()> {
    let report = args.report.context("--report is required for export")?;
    let path = args.output.context("--output is required for export")?;

    let params = ExportParams {
        format: args.format.map(|f| match f {
            FormatArg::Pdf => ExportFormat::Pdf,
            FormatArg::Excel => ExportFormat::Excel,
        }),
        start_date: args.start_date,
        end_date: args.end_date,
        department: args.department,
    };

    let bytes = dashboard
        .export(&report, &params)
        .await
        .with_context(|| format!("Failed to export {} report", report))?;

    std::fs::write(&path, &bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    output::success(&format!("Wrote {} bytes to {}", bytes.len(), path.display()));
    Ok(())
}
