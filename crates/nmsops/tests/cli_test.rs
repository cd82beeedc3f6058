//! Integration tests for the `nmsops` CLI binary.
//!
//! These tests cover argument parsing, help output, shell completions,
//! offline target resolution and error exit codes, all without a live
//! backend.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a command for the `nmsops` binary with env isolation.
///
/// Clears all `NMSOPS_*` env vars and points config directories at a
/// fresh temp dir so tests never touch the user's real configuration.
fn nmsops_cmd(home: &TempDir) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("nmsops");
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("NMSOPS_PROFILE")
        .env_remove("NMSOPS_SERVER")
        .env_remove("NMSOPS_OUTPUT")
        .env_remove("NMSOPS_INSECURE")
        .env_remove("NMSOPS_TIMEOUT")
        .env_remove("NMSOPS_CREDENTIAL_PASSWORD")
        .env_remove("RUST_LOG");
    cmd
}

fn home() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// A backend address nothing listens on.
const DEAD_SERVER: &str = "http://127.0.0.1:9";

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn no_args_shows_help() {
    let home = home();
    let output = nmsops_cmd(&home).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("Usage"));
}

#[test]
fn help_lists_command_groups() {
    let home = home();
    nmsops_cmd(&home).arg("--help").assert().success().stdout(
        predicate::str::contains("devices")
            .and(predicate::str::contains("credentials"))
            .and(predicate::str::contains("discovery"))
            .and(predicate::str::contains("targets"))
            .and(predicate::str::contains("telemetry")),
    );
}

#[test]
fn version_flag() {
    let home = home();
    nmsops_cmd(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("nmsops"));
}

#[test]
fn devices_subcommands_exist() {
    let home = home();
    nmsops_cmd(&home)
        .args(["devices", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("list")
                .and(predicate::str::contains("provision"))
                .and(predicate::str::contains("set"))
                .and(predicate::str::contains("toggle")),
        );
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn completions_bash() {
    let home = home();
    nmsops_cmd(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn completions_zsh() {
    let home = home();
    nmsops_cmd(&home)
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Offline target resolution ───────────────────────────────────────

#[test]
fn resolve_list_dedups_and_sorts() {
    let home = home();
    nmsops_cmd(&home)
        .args(["-o", "plain", "targets", "resolve", "10.0.0.2, 10.0.0.1,,10.0.0.2"])
        .assert()
        .success()
        .stdout("10.0.0.1\n10.0.0.2\n");
}

#[test]
fn resolve_list_reports_every_bad_token() {
    let home = home();
    nmsops_cmd(&home)
        .args(["targets", "resolve", "10.0.0.1,foo,1.2.3.256"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("foo").and(predicate::str::contains("1.2.3.256")));
}

#[test]
fn resolve_cidr_summary() {
    let home = home();
    nmsops_cmd(&home)
        .args(["-o", "json", "targets", "resolve", "--cidr", "192.168.1.0/24"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("\"size\": 256")
                .and(predicate::str::contains("\"broadcast\": \"192.168.1.255\"")),
        );
}

#[test]
fn resolve_cidr_expand() {
    let home = home();
    nmsops_cmd(&home)
        .args(["-o", "plain", "targets", "resolve", "--cidr", "--expand", "10.1.2.0/30"])
        .assert()
        .success()
        .stdout("10.1.2.0\n10.1.2.1\n10.1.2.2\n10.1.2.3\n");
}

#[test]
fn resolve_cidr_expand_over_ceiling() {
    let home = home();
    nmsops_cmd(&home)
        .args(["targets", "resolve", "--cidr", "--expand", "10.0.0.0/8"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("16777216"));

    nmsops_cmd(&home)
        .args([
            "targets", "resolve", "--cidr", "--expand", "--ceiling", "16", "10.0.0.0/27",
        ])
        .assert()
        .code(2);
}

#[test]
fn resolve_bad_cidr() {
    let home = home();
    nmsops_cmd(&home)
        .args(["targets", "resolve", "--cidr", "10.0.0.0/33"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("CIDR"));
}

// ── Backend-bound commands without a backend ────────────────────────

#[test]
fn devices_list_without_config() {
    let home = home();
    nmsops_cmd(&home)
        .args(["devices", "list"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No backend configured"));
}

#[test]
fn unknown_profile_is_reported() {
    let home = home();
    nmsops_cmd(&home)
        .args(["--profile", "prod", "devices", "list"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("prod"));
}

#[test]
fn unreachable_backend_exits_with_connection_code() {
    let home = home();
    nmsops_cmd(&home)
        .args(["--server", DEAD_SERVER, "--timeout", "5", "devices", "list"])
        .assert()
        .code(7);
}

#[test]
fn bad_device_address_fails_before_any_request() {
    let home = home();
    nmsops_cmd(&home)
        .args(["--server", DEAD_SERVER, "telemetry", "show", "10.0.0"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("10.0.0"));
}

#[test]
fn discovery_without_credentials_fails_before_any_request() {
    let home = home();
    nmsops_cmd(&home)
        .args(["--server", DEAD_SERVER, "discovery", "create", "--targets", "10.0.0.1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("credential"));
}

#[test]
fn unknown_duration_preset_is_a_usage_error() {
    let home = home();
    let output = nmsops_cmd(&home)
        .args(["telemetry", "show", "10.0.0.1", "--duration", "3h"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn invalid_output_format() {
    let home = home();
    let output = nmsops_cmd(&home)
        .args(["--output", "invalid", "devices", "list"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(text.contains("invalid") || text.contains("possible values"));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn config_show_without_file() {
    let home = home();
    nmsops_cmd(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("expansion_ceiling = 4096"));
}

#[test]
fn config_set_then_profiles() {
    let home = home();
    nmsops_cmd(&home)
        .args(["config", "set", "server", "http://nms.lab:8080"])
        .assert()
        .success();

    nmsops_cmd(&home)
        .args(["-o", "plain", "config", "profiles"])
        .assert()
        .success()
        .stdout("default\n");

    nmsops_cmd(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("server = \"http://nms.lab:8080\""));
}

#[test]
fn config_use_unknown_profile() {
    let home = home();
    nmsops_cmd(&home)
        .args(["config", "use", "nope"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("nope"));
}
