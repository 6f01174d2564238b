//! CLI integration tests

use std::process::{Command, Output};

fn rse(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rse"))
        .args(args)
        .env_remove("RSE_API_URL")
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to execute command")
}

/// Test that the CLI shows help
#[test]
fn test_cli_help() {
    let output = rse(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI help should succeed");
    assert!(stdout.contains("Resource Estimator"), "Should show app name");
    assert!(stdout.contains("estimate"), "Should show estimate command");
    assert!(stdout.contains("curves"), "Should show curves command");
    assert!(stdout.contains("--format"), "Should show format option");
    assert!(stdout.contains("RSE_API_URL"), "Should show env var");
}

/// Test that the CLI shows version
#[test]
fn test_cli_version() {
    let output = rse(&["--version"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI version should succeed");
    assert!(stdout.contains("rse"), "Should show binary name");
}

/// Test estimate subcommand help
#[test]
fn test_estimate_help() {
    let output = rse(&["estimate", "--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Estimate help should succeed");
    for flag in [
        "--users",
        "--engagement-rate",
        "--repositories",
        "--large-monorepos",
        "--total-repo-size",
        "--largest-repo-size",
        "--largest-index-size",
        "--deployment",
        "--no-code-insight",
        "--no-code-intel",
        "--remote",
    ] {
        assert!(stdout.contains(flag), "Should show {flag} option");
    }
}

/// Test a local estimate rendered as JSON
#[test]
fn test_local_estimate_json() {
    let output = rse(&[
        "--format",
        "json",
        "estimate",
        "--users",
        "100",
        "--engagement-rate",
        "50",
        "--repositories",
        "300",
        "--large-monorepos",
        "0",
        "--deployment",
        "docker-compose",
    ]);
    assert!(output.status.success(), "Local estimate should succeed");

    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["input"]["deployment"], "docker-compose");
    assert_eq!(result["contact_support"], false);
    assert!(result["services"]["gitserver"].is_object());
}

/// Test the table rendering for a local estimate
#[test]
fn test_local_estimate_table() {
    let output = rse(&["estimate", "--users", "100", "--repositories", "300"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("Estimated total CPUs"));
    assert!(stdout.contains("frontend"));
}

/// Test that oversized inputs are clamped and reported
#[test]
fn test_local_estimate_clamps_input() {
    let output = rse(&["estimate", "--users", "1"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("users"), "Should report clamped field");
}

/// Test curves listing
#[test]
fn test_curves_json() {
    let output = rse(&["--format", "json", "curves"]);
    assert!(output.status.success(), "Curves should succeed");

    let curves: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(curves
        .as_array()
        .unwrap()
        .iter()
        .any(|c| c["service"] == "zoekt-webserver"));
}

/// Test invalid deployment error handling
#[test]
fn test_invalid_deployment() {
    let output = rse(&["estimate", "--deployment", "nomad"]);

    assert!(!output.status.success(), "Unknown deployment should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("nomad"), "Should name the rejected value");
}

/// Test invalid command error handling
#[test]
fn test_invalid_command() {
    let output = rse(&["invalid-command"]);

    assert!(!output.status.success(), "Invalid command should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("error") || stderr.contains("invalid"),
        "Should show error message"
    );
}
