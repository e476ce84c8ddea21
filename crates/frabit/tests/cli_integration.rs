//! CLI integration tests for the Frabit command-line interface.
//!
//! These tests verify:
//! - Help text is displayed correctly
//! - Argument parsing works as expected
//! - Config contexts are created, listed and switched
//! - Resource commands reach a (mock) server with the configured headers
//!
//! Every test points `FRABIT_CONFIG_DIR` at a fresh temp directory so the
//! user's real configuration is never read or written.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Get a command for the frabit binary with an isolated config dir.
fn frabit(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("frabit").unwrap();
    cmd.env("FRABIT_CONFIG_DIR", config_dir.path())
        .env_remove("FRABIT_SERVER_URL")
        .env_remove("FRABIT_TOKEN")
        .env_remove("RUST_LOG");
    cmd
}

// ─────────────────────────────────────────────────────────────────────────────
// Help and Version Tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    frabit(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("agent"))
        .stdout(predicate::str::contains("backup"))
        .stdout(predicate::str::contains("cluster"))
        .stdout(predicate::str::contains("database"))
        .stdout(predicate::str::contains("org"))
        .stdout(predicate::str::contains("project"))
        .stdout(predicate::str::contains("team"))
        .stdout(predicate::str::contains("user"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_version_displays() {
    let dir = TempDir::new().unwrap();
    frabit(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("frabit"));
}

#[test]
fn test_agent_register_help() {
    let dir = TempDir::new().unwrap();
    frabit(&dir)
        .args(["agent", "register", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--agent-id"))
        .stdout(predicate::str::contains("--client-ip"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Argument Validation Tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_invalid_agent_status_rejected() {
    let dir = TempDir::new().unwrap();
    frabit(&dir)
        .args(["agent", "heartbeat", "--agent-id", "a-1", "--status", "gone"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown agent status"));
}

#[test]
fn test_invalid_header_rejected() {
    let dir = TempDir::new().unwrap();
    frabit(&dir)
        .args(["-H", "no-colon", "database", "get"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Name: value"));
}

#[test]
fn test_create_requires_owner() {
    let dir = TempDir::new().unwrap();
    frabit(&dir)
        .args(["database", "create", "--workspace", "prod", "--name", "orders"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--owner"));
}

#[test]
fn test_malformed_server_url_fails() {
    let dir = TempDir::new().unwrap();
    frabit(&dir)
        .args(["--server", "not a url", "database", "get"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid URL"));
}

#[test]
fn test_unreachable_server_fails() {
    let dir = TempDir::new().unwrap();
    frabit(&dir)
        .args(["--server", "http://127.0.0.1:1", "team", "get"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("HTTP error"));
}

#[test]
fn test_unknown_context_fails() {
    let dir = TempDir::new().unwrap();
    frabit(&dir)
        .args(["--context", "nope", "org", "get"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("context 'nope' not found"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Config Context Tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_context_lifecycle() {
    let dir = TempDir::new().unwrap();

    frabit(&dir)
        .args(["config", "get-contexts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No contexts configured"));

    frabit(&dir)
        .args([
            "config",
            "set-context",
            "local",
            "--server",
            "http://localhost:9180",
            "--add-header",
            "X-Team: dba",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Context \"local\" created."));

    frabit(&dir)
        .args(["config", "set-context", "prod", "--server", "https://frabit.example.com"])
        .assert()
        .success();

    // First context became current
    frabit(&dir)
        .args(["config", "current-context"])
        .assert()
        .success()
        .stdout(predicate::str::contains("local"));

    frabit(&dir)
        .args(["config", "use-context", "prod"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Switched to context \"prod\"."));

    frabit(&dir)
        .args(["config", "get-contexts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://frabit.example.com"))
        .stdout(predicate::str::contains("local"));

    let written = std::fs::read_to_string(dir.path().join("client.yaml")).unwrap();
    assert!(written.contains("current-context: prod"));
    assert!(written.contains("X-Team: dba"));

    frabit(&dir)
        .args(["config", "delete-context", "prod"])
        .assert()
        .success();

    frabit(&dir)
        .args(["config", "use-context", "prod"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("context 'prod' not found"));
}

#[test]
fn test_new_context_requires_server() {
    let dir = TempDir::new().unwrap();
    frabit(&dir)
        .args(["config", "set-context", "local"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--server is required"));
}

// ─────────────────────────────────────────────────────────────────────────────
// End-to-end Tests
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_database_get_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/databases"))
        .and(header("x-team", "dba"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "workspace": "prod",
            "name": "orders",
            "admin": "carol"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let uri = server.uri();
    let output = tokio::task::spawn_blocking(move || {
        frabit(&dir)
            .args(["--json", "--server", uri.as_str(), "-H", "X-Team: dba", "database", "get"])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(output.status.success());
    let printed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(printed["name"], "orders");
    assert_eq!(printed["admin"], "carol");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_context_settings_reach_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/agents/heartbeat"))
        .and(header("x-region", "eu-west"))
        .and(body_json(json!({"agent_id": "a-1", "status": "failed"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let uri = server.uri();
    let output = tokio::task::spawn_blocking(move || {
        frabit(&dir)
            .args([
                "config",
                "set-context",
                "mock",
                "--server",
                uri.as_str(),
                "--add-header",
                "X-Region: eu-west",
            ])
            .assert()
            .success();
        frabit(&dir)
            .args(["agent", "heartbeat", "--agent-id", "a-1", "--status", "failed"])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Heartbeat sent for a-1 (failed)"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_error_status_fails_unless_legacy() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/teams"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no team"))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let uri = server.uri();
    let (strict, legacy) = tokio::task::spawn_blocking(move || {
        let strict = frabit(&dir)
            .args(["--server", uri.as_str(), "team", "get"])
            .output()
            .unwrap();
        let legacy = frabit(&dir)
            .args(["--json", "--legacy-status", "--server", uri.as_str(), "team", "get"])
            .output()
            .unwrap();
        (strict, legacy)
    })
    .await
    .unwrap();

    assert!(!strict.status.success());
    assert!(String::from_utf8_lossy(&strict.stderr).contains("API error (404)"));

    assert!(legacy.status.success());
    let printed: serde_json::Value = serde_json::from_slice(&legacy.stdout).unwrap();
    assert_eq!(printed["id"], 0);
    assert_eq!(printed["name"], "");
}
