//! End-to-end tests for the `snss` binary: each test writes a synthetic
//! session file to a temp dir and runs a subcommand against it.

use std::path::PathBuf;

use assert_cmd::Command;
use snss_tests::{NavigationEntryFixture, raw_command, raw_state_blob, session_file};
use tempfile::TempDir;

fn snss() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_snss"));
    cmd.env("NO_COLOR", "1");
    cmd
}

fn write(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

fn sample_session() -> Vec<u8> {
    let mut entry = NavigationEntryFixture::new(1, 0, "http://example.com");
    entry.title = "Example Domain".to_string();
    entry.state = raw_state_blob(5, &[0xDE, 0xAD, 0xBE, 0xEF]);
    session_file(1, &[raw_command(0, &[1, 2]), entry.payload(1)])
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn inspect_prints_summary_and_labels() {
    let tmp = TempDir::new().unwrap();
    let path = write(&tmp, "Current Session", &sample_session());

    let out = stdout_of(snss().arg("inspect").arg(&path));
    assert!(out.contains("Version: 1\nSession commands: 2\nURLs:\nhttp://example.com\n"));
    assert!(out.ends_with("Commands:\n[0] Id: 0\n[1] Id: 1\n"));
}

#[test]
fn show_single_command() {
    let tmp = TempDir::new().unwrap();
    let path = write(&tmp, "Current Session", &sample_session());

    let out = stdout_of(snss().args(["show", "--command", "1"]).arg(&path));
    assert!(out.starts_with("Id: 1\nIndex: 0\nURL: http://example.com\nTitle: Example Domain\n"));
    assert!(out.ends_with("States:\n  Version: 5\n  Value: DE AD BE EF\n"));

    let out = stdout_of(snss().args(["show", "--command", "0"]).arg(&path));
    assert_eq!(out, "01 02\n");
}

#[test]
fn show_out_of_range_fails() {
    let tmp = TempDir::new().unwrap();
    let path = write(&tmp, "Current Session", &sample_session());

    let output = snss()
        .args(["show", "--command", "9"])
        .arg(&path)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("error: "));
}

#[test]
fn no_urls_and_hex_width_flags() {
    let tmp = TempDir::new().unwrap();
    let bytes = session_file(1, &[raw_command(0, &[0, 1, 2, 3, 4])]);
    let path = write(&tmp, "Tabs_1", &bytes);

    let out = stdout_of(snss().args(["--no-urls", "inspect"]).arg(&path));
    assert!(!out.contains("URLs:"));

    let out = stdout_of(
        snss()
            .args(["show", "--hex-width", "2", "--command", "0"])
            .arg(&path),
    );
    assert_eq!(out, "00 01\n02 03\n04\n");
}

#[test]
fn validate_accepts_a_good_file() {
    let tmp = TempDir::new().unwrap();
    let path = write(&tmp, "Current Session", &sample_session());

    let out = stdout_of(snss().arg("validate").arg(&path));
    assert!(out.starts_with("✓ Header: valid (SNSS version 1)\n"));
    assert!(out.contains("✓ Commands: 2 commands parsed successfully\n"));
}

#[test]
fn validate_rejects_truncated_input() {
    let tmp = TempDir::new().unwrap();
    let mut bytes = sample_session();
    bytes.extend_from_slice(&64u16.to_le_bytes());
    bytes.extend_from_slice(b"cut");
    let path = write(&tmp, "Current Session", &bytes);

    let output = snss().arg("validate").arg(&path).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("✗ Error: truncated at offset"));
    assert_eq!(
        String::from_utf8(output.stderr).unwrap(),
        "error: validation failed\n"
    );
}

#[test]
fn validate_rejects_non_session_file() {
    let tmp = TempDir::new().unwrap();
    let path = write(&tmp, "notes.txt", b"plain text");

    let output = snss().arg("validate").arg(&path).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "✗ Header: not an SNSS session file\n"
    );
}

#[test]
fn export_writes_json_file() {
    let tmp = TempDir::new().unwrap();
    let path = write(&tmp, "Current Session", &sample_session());
    let out_path = tmp.path().join("session.json");

    snss()
        .arg("export")
        .arg(&path)
        .arg("-o")
        .arg(&out_path)
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out_path).unwrap()).unwrap();
    assert_eq!(json["version"], 1);
    assert_eq!(json["commands"][0]["raw"], "0102");
    let nav = &json["commands"][1]["navigation"];
    assert_eq!(nav["url"], "http://example.com");
    assert_eq!(nav["state"]["version"], 5);
    assert_eq!(nav["state"]["raw"], "deadbeef");
}

#[test]
fn missing_file_reports_error() {
    let tmp = TempDir::new().unwrap();
    let output = snss()
        .arg("inspect")
        .arg(tmp.path().join("absent"))
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.starts_with("error: failed to decode"));
    assert!(stderr.contains("failed to read"));
}
