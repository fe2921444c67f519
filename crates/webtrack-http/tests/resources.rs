//! Resource client tests: paths, query strings and bodies.

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::json;
use webtrack_core::{ApiUrl, MemoryStore};
use webtrack_http::resources::{
    ApprovalStatus, ExportFormat, ExportParams, LeaveKind, LeaveRequestInput, ReviewFilters,
    ReviewStatus, ReviewUpdate, TimesheetFilters,
};
use webtrack_http::{Gateway, GatewayConfig};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn gateway(server: &MockServer) -> Gateway {
    let config = GatewayConfig::new(ApiUrl::new(server.uri()).unwrap());
    Gateway::new(config, Arc::new(MemoryStore::with_tokens("A1", "R1"))).unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[tokio::test]
async fn test_timesheet_filters_become_query_params() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/timesheets/"))
        .and(query_param("start_date", "2024-01-01"))
        .and(query_param("status", "APPROVED"))
        .and(query_param("project", "4"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(1)
        .mount(&server)
        .await;

    let filters = TimesheetFilters {
        start_date: Some(date("2024-01-01")),
        project: Some(4),
        status: Some(ApprovalStatus::Approved),
        ..Default::default()
    };
    gateway(&server)
        .await
        .timesheets()
        .list(&filters)
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let query = requests[0].url.query().unwrap_or_default().to_string();
    assert!(!query.contains("end_date"));
    assert!(!query.contains("user"));
}

#[tokio::test]
async fn test_reject_timesheet_sends_reason() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/timesheets/12/reject/"))
        .and(body_json(json!({"reason": "missing hours"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 12, "status": "REJECTED"})))
        .expect(1)
        .mount(&server)
        .await;

    let body = gateway(&server)
        .await
        .timesheets()
        .reject(12, "missing hours")
        .await
        .unwrap();
    assert_eq!(body["status"], "REJECTED");
}

#[tokio::test]
async fn test_create_leave_request_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/leave-requests/"))
        .and(body_json(json!({
            "leave_type": "ANNUAL",
            "start_date": "2024-07-01",
            "end_date": "2024-07-05",
            "reason": "summer"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 3})))
        .expect(1)
        .mount(&server)
        .await;

    let input = LeaveRequestInput {
        leave_type: LeaveKind::Annual,
        start_date: date("2024-07-01"),
        end_date: date("2024-07-05"),
        reason: "summer".to_string(),
    };
    let body = gateway(&server)
        .await
        .leave()
        .create(&input)
        .await
        .unwrap();
    assert_eq!(body["id"], 3);
}

#[tokio::test]
async fn test_delete_accepts_empty_no_content() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/leave-requests/8/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    gateway(&server).await.leave().delete(8).await.unwrap();
}

#[tokio::test]
async fn test_review_update_only_sends_set_fields() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/reviews/2/"))
        .and(body_json(json!({"status": "SUBMITTED", "overall_rating": 4.5})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 2})))
        .expect(1)
        .mount(&server)
        .await;

    let update = ReviewUpdate {
        overall_rating: Some(4.5),
        status: Some(ReviewStatus::Submitted),
        ..Default::default()
    };
    gateway(&server)
        .await
        .reviews()
        .update(2, &update)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_review_filters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reviews/"))
        .and(query_param("review_type", "MID_YEAR"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(1)
        .mount(&server)
        .await;

    let filters = ReviewFilters {
        review_type: Some(webtrack_http::resources::ReviewType::MidYear),
        ..Default::default()
    };
    gateway(&server)
        .await
        .reviews()
        .list(&filters)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_dashboard_export_returns_raw_bytes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dashboards/export/timesheets/"))
        .and(query_param("format", "pdf"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(b"%PDF-1.4".to_vec())
                .insert_header("content-type", "application/pdf"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let params = ExportParams {
        format: Some(ExportFormat::Pdf),
        ..Default::default()
    };
    let bytes = gateway(&server)
        .await
        .dashboard()
        .export("timesheets", &params)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"%PDF-1.4");
}

#[tokio::test]
async fn test_dashboard_metrics_error_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/dashboard/metrics/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = gateway(&server)
        .await
        .dashboard()
        .metrics()
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(503));
}
