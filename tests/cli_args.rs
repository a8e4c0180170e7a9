//! Tests for the `counters` binary's startup behavior.

mod common;

use std::process::Command;

use common::temp_config;

fn counters_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_counters"));
    cmd.env_remove("PORT").env_remove("COUNTERS_LOG");
    cmd
}

#[test]
fn test_help_shows_port_option() {
    let output = counters_cmd()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--port"));
    assert!(stdout.contains("--config"));
}

#[test]
fn test_missing_port_exits_with_error() {
    let (_dir, path) = temp_config("[server]\nhost = \"127.0.0.1\"\n");
    let output = counters_cmd()
        .arg("--config")
        .arg(&path)
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: No port configured"));
}

#[test]
fn test_invalid_port_env_exits_with_error() {
    let (_dir, path) = temp_config("");
    let output = counters_cmd()
        .arg("--config")
        .arg(&path)
        .env("PORT", "not-a-port")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid PORT value 'not-a-port'"));
}

#[test]
fn test_invalid_config_exits_with_error() {
    let (_dir, path) = temp_config("[[seed]]\ntitle = \"\"\n");
    let output = counters_cmd()
        .arg("--config")
        .arg(&path)
        .arg("--port")
        .arg("0")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("seed counter #1 has an empty title"));
}
