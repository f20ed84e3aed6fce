#![cfg(unix)]

use assert_cmd::Command;
use std::{fs, path::PathBuf};
use tempfile::TempDir;

const EXECUTABLE_NAME: &str = "casegrader";

fn write_test_file(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("q1.json");
    fs::write(&path, content).unwrap();
    path
}

const TEST_FILE: &str = r#"
{
    "name": "q1",
    "points": 3,
    "cases": [
        {"name": "greets", "args": "-c 'echo hello'", "stdout": "hello\n"},
        {"name": "env", "args": "-c 'printf %s \"$GREETING\"'", "stdout": "hi"},
        {"name": "secret", "hidden": true, "args": "-c 'exit 1'", "status": 0}
    ]
}
"#;

#[test]
fn should_print_a_text_report() {
    let dir = tempfile::tempdir().unwrap();
    let test_file = write_test_file(&dir, TEST_FILE);

    let mut cmd = Command::cargo_bin(EXECUTABLE_NAME).unwrap();
    cmd.arg(&test_file)
        .arg("/bin/sh")
        .args(["--env", "GREETING=hi", "--logging-mode", "silent"]);

    cmd.assert().success().stdout(
        "q1: 2.00/3.00 (67%)\n  greets (1): passed\n  env (1): passed\n  secret (1): failed\n",
    );
}

#[test]
fn should_print_a_json_report_with_hidden_messages() {
    let dir = tempfile::tempdir().unwrap();
    let test_file = write_test_file(&dir, TEST_FILE);

    let mut cmd = Command::cargo_bin(EXECUTABLE_NAME).unwrap();
    let output = cmd
        .arg(&test_file)
        .arg("/bin/sh")
        .args(["--format", "json", "--show-hidden", "--clear-env"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["name"], "q1");
    assert_eq!(report["passed_all"], false);
    assert_eq!(report["cases"][1]["passed"], false);
    assert!(
        report["cases"][2]["message"]
            .as_str()
            .unwrap()
            .contains("status: expected '0', obtained '1'")
    );
}

#[test]
fn should_fail_on_an_invalid_budget() {
    let dir = tempfile::tempdir().unwrap();
    let test_file = write_test_file(
        &dir,
        r#"{"name": "q1", "points": 1, "cases": [{"points": 2, "status": 0}]}"#,
    );

    let mut cmd = Command::cargo_bin(EXECUTABLE_NAME).unwrap();
    cmd.arg(&test_file).arg("/bin/sh");

    cmd.assert().failure().stdout("");
}

#[test]
fn should_fail_on_a_missing_test_file() {
    let mut cmd = Command::cargo_bin(EXECUTABLE_NAME).unwrap();
    cmd.arg("does/not/exist.json").arg("/bin/sh");

    cmd.assert().failure();
}

fn rejected_value_error(flag: &str, value: &str) -> String {
    let dir = tempfile::tempdir().unwrap();
    let test_file = write_test_file(&dir, TEST_FILE);

    let mut cmd = Command::cargo_bin(EXECUTABLE_NAME).unwrap();
    let output = cmd
        .arg(&test_file)
        .arg("/bin/sh")
        .args([flag, value])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    String::from_utf8(output.stderr).unwrap()
}

#[test]
fn should_reject_an_unknown_format() {
    let stderr = rejected_value_error("--format", "yaml");
    assert!(stderr.contains("possible values: text, json"), "{stderr}");
}

#[test]
fn should_reject_an_unknown_logging_mode() {
    let stderr = rejected_value_error("--logging-mode", "loud");
    assert!(stderr.contains("possible values: silent, normal, verbose"), "{stderr}");
}
