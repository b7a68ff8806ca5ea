//! End-to-end tests for the `cucumber-summary` binary.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const EVENTS: &str = r#"{"type":"run_started","timestamp":"2024-03-15T10:00:00Z"}
{"type":"source_parsed","uri":"classpath:features/orders/A.feature","names":["Orders"]}
{"type":"source_parsed","uri":"classpath:features/users/B.feature","names":["Users"]}
{"type":"case_started","uri":"classpath:features/orders/A.feature","name":"Place order"}
{"type":"case_finished","uri":"classpath:features/orders/A.feature","name":"Place order","keyword":"Scenario","line":3,"status":"passed"}
{"type":"case_finished","uri":"classpath:features/orders/A.feature","name":"Add numbers","keyword":"Scenario Outline","line":10,"status":"passed"}
{"type":"case_finished","uri":"classpath:features/orders/A.feature","name":"Add numbers","keyword":"Scenario Outline","line":20,"status":"failed"}
{"type":"case_finished","uri":"classpath:features/users/B.feature","name":"Sign up","keyword":"Scenario","line":2,"status":"skipped"}
{"type":"run_finished","timestamp":"2024-03-15T10:03:02Z"}
"#;

fn cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("cucumber-summary").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("CUCUMBER_SUMMARY_REPORT_FILE_PATH")
        .env_remove("CUCUMBER_SUMMARY_REPORT_TITLE")
        .env_remove("RUST_LOG");
    cmd
}

fn write_events(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("events.jsonl");
    std::fs::write(&path, contents).unwrap();
    path
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}

#[test]
fn help_names_the_tool() {
    let dir = tempfile::tempdir().unwrap();
    cmd(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cucumber Summary"))
        .stdout(predicate::str::contains("--events"));
}

#[test]
fn unknown_flag_is_args_error() {
    let dir = tempfile::tempdir().unwrap();
    cmd(&dir)
        .arg("--no-such-flag")
        .assert()
        .code(10)
        .stderr(predicate::str::contains("--no-such-flag"));
}

#[test]
fn missing_events_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    cmd(&dir)
        .args(["--events", "absent.jsonl"])
        .assert()
        .code(21)
        .stderr(predicate::str::contains("absent.jsonl"));
}

#[test]
fn missing_config_file_is_args_error() {
    let dir = tempfile::tempdir().unwrap();
    let events = write_events(&dir, EVENTS);
    cmd(&dir)
        .arg("--events")
        .arg(&events)
        .args(["--config-file", "nope.properties"])
        .assert()
        .code(10)
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn replay_writes_report_and_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let events = write_events(&dir, EVENTS);
    let report = dir.path().join("reports/summary.html");
    let snapshot = dir.path().join("snapshot.json");

    cmd(&dir)
        .arg("--events")
        .arg(&events)
        .arg("--output")
        .arg(&report)
        .arg("--snapshot-json")
        .arg(&snapshot)
        .args(["--args", "report.title=Nightly;show.env=true;env.url=https://qa.example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("summary.html"));

    let html = read(&report);
    assert!(html.contains("<title>Nightly</title>"));
    assert!(html.contains("https://qa.example.com"));
    assert!(html.contains("3 min 2 sec"));
    assert!(html.contains("Add numbers #10"));
    assert!(html.contains("orders - A"));
    assert!(!html.contains("$overall"));

    let json: serde_json::Value = serde_json::from_str(&read(&snapshot)).unwrap();
    let uris: Vec<&String> = json.as_object().unwrap().keys().collect();
    assert_eq!(
        uris,
        [
            "classpath:features/orders/A.feature",
            "classpath:features/users/B.feature"
        ]
    );
    assert_eq!(
        json["classpath:features/users/B.feature"]["Sign up"],
        "SKIPPED"
    );
}

#[test]
fn malformed_lines_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let events = write_events(
        &dir,
        r#"{"type":"case_finished","uri":"f/Login.feature","name":"ok","status":"passed"}
this is not json
{"type":"mystery"}

{"type":"run_finished"}
"#,
    );
    let report = dir.path().join("r.html");

    cmd(&dir)
        .arg("--events")
        .arg(&events)
        .arg("-o")
        .arg(&report)
        .assert()
        .success();
    assert!(read(&report).contains("SC-001"));
}

#[test]
fn stream_without_run_finished_still_reports() {
    let dir = tempfile::tempdir().unwrap();
    let report = dir.path().join("eof.html");

    cmd(&dir)
        .arg("-o")
        .arg(&report)
        .write_stdin(
            r#"{"type":"case_finished","uri":"f/Cart.feature","name":"Add","status":"failed"}
"#,
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("eof.html"));
    assert!(read(&report).contains("0.00%"));
}

#[test]
fn empty_stream_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let report = dir.path().join("none.html");

    cmd(&dir)
        .arg("-o")
        .arg(&report)
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    assert!(!report.exists());
}

#[test]
fn properties_file_in_working_directory_is_found() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("cucumber-summary.properties"),
        "report.title=From File\n",
    )
    .unwrap();
    let events = write_events(&dir, EVENTS);
    let report = dir.path().join("f.html");

    cmd(&dir)
        .arg("--events")
        .arg(&events)
        .arg("-o")
        .arg(&report)
        .assert()
        .success();
    assert!(read(&report).contains("<title>From File</title>"));
}

#[test]
fn jsonl_logs_go_to_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let events = write_events(&dir, EVENTS);

    cmd(&dir)
        .arg("--events")
        .arg(&events)
        .arg("-o")
        .arg(dir.path().join("j.html"))
        .args(["--log-format", "jsonl", "-v"])
        .assert()
        .success()
        .stderr(predicate::str::contains(r#""message":"Report generated""#));
}
