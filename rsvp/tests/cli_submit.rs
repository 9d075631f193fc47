//! CLI tests for `rsvp submit`, `rsvp status` and `rsvp init`.
//!
//! Spawns the rsvp binary and verifies exit codes and stdout for each
//! submission outcome.

use std::fs;
use std::process::{Command, Output};

use rsvp::exit_codes;
use rsvp::io::record_store::{CsvRecordStore, RecordStore};
use rsvp::test_support::{TestDir, attending, declining, guest};
use serde_json::Value;

fn run_rsvp(dir: &TestDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rsvp"))
        .current_dir(dir.path())
        .arg("--config")
        .arg(dir.config_path())
        .args(args)
        .output()
        .expect("run rsvp")
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout json")
}

#[test]
fn submit_before_deadline_persists() {
    let dir = TestDir::new().expect("dir");
    dir.write_config(Some("2099-12-31 23:59")).expect("config");
    let submission = attending("Jane Doe", vec![guest("Jane", "Doe"), guest("John", "Doe")]);
    let input = dir.write_submission("answer.json", &submission).expect("submission");

    let output = run_rsvp(&dir, &["submit", input.to_str().expect("utf8 path")]);

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let json = stdout_json(&output);
    assert_eq!(json["status"], "PERSISTED");
    assert_eq!(json["records"], 2);
    assert_eq!(CsvRecordStore::new(dir.csv_path()).load().expect("load").len(), 2);
}

#[test]
fn submit_after_grace_is_rejected_by_deadline() {
    let dir = TestDir::new().expect("dir");
    dir.write_config(Some("2020-01-01 00:00")).expect("config");
    let input = dir
        .write_submission("answer.json", &declining("Jane Doe"))
        .expect("submission");

    let output = run_rsvp(&dir, &["submit", input.to_str().expect("utf8 path")]);

    assert_eq!(output.status.code(), Some(exit_codes::REJECTED_DEADLINE));
    assert_eq!(stdout_json(&output)["status"], "REJECTED_DEADLINE");
    assert!(!dir.csv_path().exists());
}

#[test]
fn submit_with_missing_fields_is_rejected_by_validation() {
    let dir = TestDir::new().expect("dir");
    dir.write_config(None).expect("config");
    let mut second = guest("John", "Doe");
    second.main = String::new();
    let submission = attending("Jane Doe", vec![guest("Jane", "Doe"), second]);
    let input = dir.write_submission("answer.json", &submission).expect("submission");

    let output = run_rsvp(&dir, &["submit", input.to_str().expect("utf8 path")]);

    assert_eq!(output.status.code(), Some(exit_codes::REJECTED_VALIDATION));
    let json = stdout_json(&output);
    assert_eq!(json["status"], "REJECTED_VALIDATION");
    assert_eq!(
        json["errors"][0]["message"],
        "Guest 2 main course choice is required"
    );
    assert_eq!(json["errors"][0]["guest"], 2);
    assert_eq!(json["errors"][0]["field"], "main");
    assert!(!dir.csv_path().exists());
}

#[test]
fn submit_to_unwritable_table_is_rejected_by_storage() {
    let dir = TestDir::new().expect("dir");
    fs::write(dir.path().join("blocker"), "").expect("blocker");
    fs::write(dir.config_path(), "[files]\ncsv_file = \"blocker/rsvps.csv\"\n").expect("config");
    let input = dir
        .write_submission("answer.json", &declining("Jane Doe"))
        .expect("submission");

    let output = run_rsvp(&dir, &["submit", input.to_str().expect("utf8 path")]);

    assert_eq!(output.status.code(), Some(exit_codes::REJECTED_STORAGE));
    let json = stdout_json(&output);
    assert_eq!(json["status"], "REJECTED_STORAGE");
    assert!(json["message"].as_str().expect("message").contains("blocker"));
}

#[test]
fn submit_malformed_document_is_invalid() {
    let dir = TestDir::new().expect("dir");
    dir.write_config(None).expect("config");
    let input = dir.path().join("answer.json");
    fs::write(&input, "{ not json").expect("write");

    let output = run_rsvp(&dir, &["submit", input.to_str().expect("utf8 path")]);

    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("parse submission"));
}

/// A misspelled key must not silently turn an attending reply into "No".
#[test]
fn submit_with_unknown_key_is_invalid() {
    let dir = TestDir::new().expect("dir");
    dir.write_config(None).expect("config");
    let input = dir.path().join("answer.json");
    fs::write(
        &input,
        r#"{"contact_name":"Jane Doe","attend":true,"guests":[{"first_name":"Jane","last_name":"Doe","starter":"Soup","main":"Salmon","dessert":"Cake"}]}"#,
    )
    .expect("write");

    let output = run_rsvp(&dir, &["submit", input.to_str().expect("utf8 path")]);

    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown field `attend`"));
    assert!(!dir.csv_path().exists());
}

#[test]
fn status_without_deadline() {
    let dir = TestDir::new().expect("dir");
    dir.write_config(None).expect("config");

    let output = run_rsvp(&dir, &["status"]);

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "No RSVP deadline configured"
    );
}

#[test]
fn status_after_grace_reports_closed() {
    let dir = TestDir::new().expect("dir");
    dir.write_config(Some("2020-01-01 00:00")).expect("config");

    let output = run_rsvp(&dir, &["status"]);

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert!(String::from_utf8_lossy(&output.stdout).contains("no longer accepted"));
}

#[test]
fn init_writes_settings_once() {
    let dir = TestDir::new().expect("dir");

    let output = run_rsvp(&dir, &["init"]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let written = fs::read_to_string(dir.config_path()).expect("read settings");
    assert!(written.contains("[deadline]"));

    fs::write(dir.config_path(), "# edited\n").expect("edit");
    let output = run_rsvp(&dir, &["init"]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert_eq!(
        fs::read_to_string(dir.config_path()).expect("read settings"),
        "# edited\n"
    );
}
