//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

fn salesboard() -> Command {
    let mut cmd = Command::cargo_bin("salesboard").unwrap();
    cmd.env_remove("DATABASE_URL")
        .env_remove("SALESBOARD_FEED_URL")
        .env_remove("SALESBOARD_BIND")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_serve_help() {
    salesboard()
        .arg("serve")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--no-ingest"))
        .stdout(predicate::str::contains("--feed-url"));
}

#[test]
fn test_ingest_help() {
    salesboard()
        .arg("ingest")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Transaction feed to fetch"));
}

#[test]
fn test_stats_on_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("empty.db").display());

    salesboard()
        .args(["stats", "--month", "03", "--database-url", &url])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"totalStatistics\""))
        .stdout(predicate::str::contains("\"901-1000\""))
        .stdout(predicate::str::contains("\"pieChartData\": []"));
}

#[test]
fn test_stats_requires_month() {
    salesboard()
        .arg("stats")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--month"));
}

#[test]
fn test_ingest_rejects_non_http_feed() {
    salesboard()
        .args([
            "ingest",
            "--database-url",
            "sqlite::memory:",
            "--feed-url",
            "ftp://example.com/feed.json",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn test_stats_fails_when_store_cannot_open() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!(
        "sqlite://{}",
        dir.path().join("missing").join("x.db").display()
    );

    salesboard()
        .args(["stats", "--month", "03", "--database-url", &url])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open transaction store"));
}
