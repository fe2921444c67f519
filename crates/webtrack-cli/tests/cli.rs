//! CLI integration tests against a mock API server.
//!
//! Each test runs the built binary with an isolated credential file, so no
//! real session is touched.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    fn store(&self) -> PathBuf {
        self.dir.path().join("credentials.json")
    }

    /// Seed the credential file with a session against `api_url`.
    fn sign_in(&self, api_url: &str, access: &str, refresh: &str) {
        let stored = json!({
            "values": {
                "api_url": api_url,
                "token": access,
                "refresh_token": refresh,
            }
        });
        std::fs::write(self.store(), stored.to_string()).unwrap();
    }

    fn stored(&self) -> Value {
        let json = std::fs::read_to_string(self.store()).unwrap();
        serde_json::from_str::<Value>(&json).unwrap()["values"].clone()
    }

    /// Run the CLI with this workspace's store.
    async fn run(&self, args: &[&str]) -> Output {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_webtrack"));
        cmd.arg("--store").arg(self.store());
        cmd.args(args);
        cmd.env("HOME", self.dir.path());
        cmd.env("XDG_DATA_HOME", self.dir.path().join("data"));
        cmd.env_remove("WEBTRACK_API_URL");
        cmd.env_remove("WEBTRACK_STORE");
        cmd.env_remove("RUST_LOG");

        tokio::task::spawn_blocking(move || cmd.output().expect("Failed to execute CLI"))
            .await
            .unwrap()
    }

    async fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args).await;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn exists(path: &Path) -> bool {
    path.try_exists().unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_stores_tokens_and_origin() {
    let server = MockServer::start().await;
    let ws = Workspace::new();

    Mock::given(method("POST"))
        .and(path("/api/token/"))
        .and(body_json(json!({"username": "alice", "password": "pw"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"access": "A1", "refresh": "R1"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let output = ws
        .run(&[
            "--api-url",
            &server.uri(),
            "login",
            "--username",
            "alice",
            "--password",
            "pw",
        ])
        .await;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("Logged in successfully"));

    let stored = ws.stored();
    assert_eq!(stored["token"], "A1");
    assert_eq!(stored["refresh_token"], "R1");
    assert_eq!(stored["api_url"], server.uri());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rejected_login_stores_nothing() {
    let server = MockServer::start().await;
    let ws = Workspace::new();

    Mock::given(method("POST"))
        .and(path("/api/token/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "No active account found with the given credentials"
        })))
        .mount(&server)
        .await;

    let output = ws
        .run(&[
            "--api-url",
            &server.uri(),
            "login",
            "--username",
            "alice",
            "--password",
            "wrong",
        ])
        .await;
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to login"));
    assert!(!stderr(&output).contains("Session expired"));
    assert!(!exists(&ws.store()));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_status_reports_session() {
    let ws = Workspace::new();

    let stdout = ws.run_success(&["status"]).await;
    assert!(stdout.contains("signed out"));

    ws.sign_in("http://localhost:8000", "A1", "R1");
    let stdout = ws.run_success(&["status"]).await;
    assert!(stdout.contains("signed in"));
    assert!(stdout.contains("http://localhost:8000"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_whoami_refreshes_expired_token() {
    let server = MockServer::start().await;
    let ws = Workspace::new();
    ws.sign_in(&server.uri(), "A1", "R1");

    Mock::given(method("GET"))
        .and(path("/users/me/"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Given token not valid for any token type",
            "code": "token_not_valid"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/token/refresh/"))
        .and(body_json(json!({"refresh": "R1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "A2"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/users/me/"))
        .and(header("authorization", "Bearer A2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": 1, "username": "alice", "role": "EMPLOYEE"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let stdout = ws.run_success(&["whoami"]).await;
    assert!(stdout.contains("alice"));
    assert!(stdout.contains("EMPLOYEE"));

    let stored = ws.stored();
    assert_eq!(stored["token"], "A2");
    assert_eq!(stored["refresh_token"], "R1");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_failed_refresh_ends_session() {
    let server = MockServer::start().await;
    let ws = Workspace::new();
    ws.sign_in(&server.uri(), "A1", "R1");

    Mock::given(method("GET"))
        .and(path("/users/me/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/token/refresh/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Token is blacklisted",
            "code": "token_not_valid"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let output = ws.run(&["whoami"]).await;
    assert!(!output.status.success());
    assert!(stderr(&output).contains("webtrack login"));

    let stored = ws.stored();
    assert!(stored.get("token").is_none());
    assert!(stored.get("refresh_token").is_none());
    assert_eq!(stored["api_url"], server.uri());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_commands_require_session() {
    let server = MockServer::start().await;
    let ws = Workspace::new();

    let output = ws.run(&["--api-url", &server.uri(), "timesheets"]).await;
    assert!(!output.status.success());
    assert!(stderr(&output).contains("No active session"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_request_passes_query_and_reports_status() {
    let server = MockServer::start().await;
    let ws = Workspace::new();
    ws.sign_in(&server.uri(), "A1", "R1");

    Mock::given(method("GET"))
        .and(path("/leave-requests/"))
        .and(query_param("status", "PENDING"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 5}])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/leave-requests/9/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Not found."})))
        .expect(1)
        .mount(&server)
        .await;

    let stdout = ws
        .run_success(&["request", "get", "/leave-requests/", "--query", "status=PENDING"])
        .await;
    assert!(stdout.contains("\"id\":5"));

    let output = ws.run(&["request", "DELETE", "/leave-requests/9/"]).await;
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Not found."));
    assert!(stderr(&output).contains("404"));

    // A non-401 failure leaves the session alone
    assert_eq!(ws.stored()["token"], "A1");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_logout_clears_tokens() {
    let ws = Workspace::new();
    ws.sign_in("http://localhost:8000", "A1", "R1");

    ws.run_success(&["logout"]).await;
    let stored = ws.stored();
    assert!(stored.get("token").is_none());
    assert!(stored.get("refresh_token").is_none());

    // Idempotent
    ws.run_success(&["logout"]).await;
}
