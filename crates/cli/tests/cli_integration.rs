//! CLI integration tests for all subcommands.
//!
//! Uses `assert_cmd` to spawn the `protokoll` binary and verify exit codes,
//! stdout content, and stderr content. Fixtures are written to a tempdir
//! per test.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn protokoll() -> Command {
    cargo_bin_cmd!("protokoll")
}

fn write_fixture(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write fixture");
    path
}

// ──────────────────────────────────────────────
// Help and version
// ──────────────────────────────────────────────

#[test]
fn help_exits_0_with_description() {
    protokoll()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Meeting summary normalization toolchain",
        ));
}

// ──────────────────────────────────────────────
// detect
// ──────────────────────────────────────────────

#[test]
fn detect_classifies_markdown_document() {
    let dir = TempDir::new().unwrap();
    let payload = write_fixture(&dir, "payload.json", r##"{"markdown": "# Notes"}"##);

    protokoll()
        .args(["detect", payload.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("markdown-document"));
}

#[test]
fn detect_json_output() {
    let dir = TempDir::new().unwrap();
    let payload = write_fixture(&dir, "payload.json", r#"{"summary_json": {}}"#);

    protokoll()
        .args(["detect", payload.to_str().unwrap(), "--output", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"structured-json\""));
}

#[test]
fn detect_missing_file_exits_1() {
    protokoll()
        .args(["detect", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error reading file"));
}

// ──────────────────────────────────────────────
// normalize
// ──────────────────────────────────────────────

#[test]
fn normalize_legacy_nested_sections() {
    let dir = TempDir::new().unwrap();
    let payload = write_fixture(
        &dir,
        "payload.json",
        r#"{"MeetingNotes": {"sections": [
            {"title": "Aufgaben", "blocks": [{"content": " Do X "}]}
        ]}}"#,
    );

    protokoll()
        .args(["normalize", payload.to_str().unwrap(), "--meeting-id", "m1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Do X\""))
        .stdout(predicate::str::contains("_section_order"));
}

#[test]
fn normalize_unparseable_payload_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    // The file itself is valid JSON: a string that fails the inner decode.
    let payload = write_fixture(&dir, "payload.json", r#""{not valid json""#);

    protokoll()
        .args(["normalize", payload.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("no summary available"));
}

// ──────────────────────────────────────────────
// poll
// ──────────────────────────────────────────────

#[test]
fn poll_failed_response_exits_1_with_message() {
    let dir = TempDir::new().unwrap();
    let response = write_fixture(
        &dir,
        "response.json",
        r#"{"status": "failed", "error": "Connection refused"}"#,
    );

    protokoll()
        .args(["poll", response.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Connection refused"));
}

#[test]
fn poll_pending_response() {
    let dir = TempDir::new().unwrap();
    let response = write_fixture(&dir, "response.json", r#"{"status": "summarizing"}"#);

    protokoll()
        .args(["poll", response.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("pending (summarizing)"));
}

#[test]
fn poll_completed_markdown_response() {
    let dir = TempDir::new().unwrap();
    let response = write_fixture(
        &dir,
        "response.json",
        r##"{"status": "completed", "data": {"MeetingName": "Weekly", "markdown": "# Weekly"}}"##,
    );

    protokoll()
        .args(["poll", response.to_str().unwrap(), "--output", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"outcome\": \"completed\""))
        .stdout(predicate::str::contains("\"Weekly\""));
}

// ──────────────────────────────────────────────
// tasks
// ──────────────────────────────────────────────

#[test]
fn tasks_text_output_with_rollup() {
    let dir = TempDir::new().unwrap();
    let notes = write_fixture(
        &dir,
        "notes.md",
        "**Aufgaben**\n- [x] Done thing\n- Open thing\n",
    );

    protokoll()
        .args(["tasks", notes.to_str().unwrap(), "--meeting-id", "m1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[x] Done thing"))
        .stdout(predicate::str::contains("[ ] Open thing"))
        .stdout(predicate::str::contains("2 tasks: 1 open, 1 done"));
}

#[test]
fn tasks_json_output_has_stable_ids() {
    let dir = TempDir::new().unwrap();
    let notes = write_fixture(&dir, "notes.md", "**Tasks**\n- [ ] alpha\n");

    protokoll()
        .args([
            "tasks",
            notes.to_str().unwrap(),
            "--meeting-id",
            "m9",
            "--output",
            "json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"m9-line-0\""));
}

#[test]
fn tasks_invalid_config_exits_1() {
    let dir = TempDir::new().unwrap();
    let notes = write_fixture(&dir, "notes.md", "**Aufgaben**\n- a\n");
    let config = write_fixture(&dir, "config.json", r#"{"section_titles": []}"#);

    protokoll()
        .args([
            "tasks",
            notes.to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("section_titles"));
}
