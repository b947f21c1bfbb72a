//! Error reporting and exit codes.

use crate::support::*;
use std::fs;

#[test]
fn test_no_subcommand_is_usage_error() {
    let t = Test::new();
    let output = t.cmd().output().unwrap();
    assert_exit_code(&output, 2);
}

#[test]
fn test_server_error_hides_detail() {
    let t = Test::init();
    fs::create_dir_all(t.store_path()).unwrap();
    fs::write(t.store_path().join(KEY_A), "%%% not base64 %%%").unwrap();

    let output = t
        .cmd()
        .env("KEYFLEET_LOG", "off")
        .args(["wrap", "--key-name", KEY_A, "--public-key"])
        .arg(public_key_b64(other_keypair()))
        .output()
        .unwrap();
    assert_exit_code(&output, 1);
    assert_stderr_contains(&output, "internal server error");
    assert_stderr_excludes(&output, "not valid base64");
}

#[test]
fn test_server_error_detail_in_log() {
    let t = Test::init();

    let output = t
        .cmd()
        .env("KEYFLEET_LOG", "keyfleet=error")
        .args(["wrap", "--key-name", "never-provisioned", "--public-key"])
        .arg(public_key_b64(other_keypair()))
        .output()
        .unwrap();
    assert_exit_code(&output, 1);
    assert_stderr_contains(&output, "secret not found: never-provisioned");
}

#[test]
fn test_corrupt_directory_fails_distribution() {
    let t = Test::with_keys(&[KEY_A]);
    fs::write(t.directory_path(), "{ not json").unwrap();

    let output = t.distribute_json();
    assert_exit_code(&output, 1);
}

#[test]
fn test_json_logs() {
    let t = Test::with_keys(&[KEY_A]);

    let output = t
        .cmd()
        .env("KEYFLEET_LOG", "keyfleet=info")
        .args(["--log-json", "distribute"])
        .output()
        .unwrap();
    assert_success(&output);
    assert!(!stderr(&output).is_empty());
    for line in stderr(&output).lines() {
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        assert!(value.get("level").is_some());
    }
}

#[test]
fn test_completions() {
    let t = Test::new();
    let output = t.cmd().args(["completions", "bash"]).output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "keyfleet");
}
