//! Integration tests for the `sepsis-threshold` binary.

use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

fn cli(dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_sepsis-threshold"));
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn evaluate_json_reports_recommendations() {
    let dir = TempDir::new().unwrap();
    let output = cli(&dir)
        .args(["evaluate", "--format", "json", "--staff-hours", "4"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).expect("stdout is not valid JSON");
    assert_eq!(json["request"]["setting"]["available_staff_hours"], 4.0);
    assert_eq!(json["staffing"]["status"], "feasible");
    for policy in ["max_sensitivity", "balanced_youden", "resource_efficient"] {
        assert_eq!(json["recommendations"][policy]["outcome"], "recommended");
    }
    assert!(json.get("sweep").is_none());
}

#[test]
fn include_sweep_adds_the_table() {
    let dir = TempDir::new().unwrap();
    let output = cli(&dir)
        .args([
            "evaluate",
            "--format",
            "json",
            "--grid-size",
            "19",
            "--include-sweep",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["sweep"].as_array().unwrap().len(), 19);
}

#[test]
fn sweep_command_emits_only_the_table() {
    let dir = TempDir::new().unwrap();
    let output = cli(&dir)
        .args(["sweep", "--format", "json", "--grid-size", "9"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let rows: Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 9);
    assert!(rows[0].get("staff_hours_needed").is_some());
}

#[test]
fn invalid_parameter_fails_with_message() {
    let dir = TempDir::new().unwrap();
    let output = cli(&dir)
        .args(["evaluate", "--prevalence", "1.5"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("prevalence"));
}

#[test]
fn init_writes_config_once() {
    let dir = TempDir::new().unwrap();
    cli(&dir).arg("init").assert().success();
    assert!(dir.path().join(".sepsis-threshold.toml").exists());

    cli(&dir).arg("init").assert().failure();
    cli(&dir).args(["init", "--force"]).assert().success();
}

#[test]
fn discovered_config_feeds_evaluation() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".sepsis-threshold.toml"),
        "[clinical]\navailable_staff_hours = 0.5\n",
    )
    .unwrap();

    let output = cli(&dir)
        .args(["evaluate", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["staffing"]["status"], "overloaded");
    assert_eq!(
        json["recommendations"]["max_sensitivity"]["reason"]["constraint"],
        "staffing_constraint"
    );
}

#[test]
fn markdown_report_goes_to_output_file() {
    let dir = TempDir::new().unwrap();
    let report = dir.path().join("report.md");
    cli(&dir)
        .args(["evaluate", "--format", "markdown", "--output"])
        .arg(&report)
        .assert()
        .success();

    let text = fs::read_to_string(&report).unwrap();
    assert!(text.starts_with("# Sepsis Alert Threshold Report"));
}

#[cfg(target_os = "linux")]
#[test]
fn write_failure_on_output_file_is_reported() {
    let dir = TempDir::new().unwrap();
    for command in ["evaluate", "sweep"] {
        let output = cli(&dir)
            .args([command, "--format", "json", "--output", "/dev/full"])
            .output()
            .unwrap();
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(!output.status.success(), "{command}: {stderr}");
        assert!(!stderr.contains("written to"), "{command}: {stderr}");
    }
}
