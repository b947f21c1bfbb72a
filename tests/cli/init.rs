//! Tests for `keyfleet init`.

use crate::support::*;
use std::fs;

#[test]
fn test_init_writes_default_config() {
    let t = Test::new();

    let output = t.init_cmd();
    assert_success(&output);
    assert_stdout_contains(&output, "initialized");

    let contents = fs::read_to_string(t.dir.path().join("keyfleet.toml")).unwrap();
    assert!(contents.contains("max_name_length = 20"));
    assert!(contents.contains("HubConnectionString"));
    assert!(contents.contains("confidential_package_keys"));
}

#[test]
fn test_init_twice_fails() {
    let t = Test::init();

    let output = t.init_cmd();
    assert_exit_code(&output, 1);
    assert_stderr_contains(&output, "already exists");
}

#[test]
fn test_commands_work_without_config() {
    let t = Test::new();

    let output = t.provision(KEY_A);
    assert_success(&output);
    assert!(t.store_path().join(KEY_A).exists());
}

#[test]
fn test_explicit_missing_config_hints_init() {
    let t = Test::new();

    let output = t
        .cmd()
        .args(["--config", "nope.toml", "secrets", "list"])
        .output()
        .unwrap();
    assert_exit_code(&output, 1);
    assert_stderr_contains(&output, "config file not found");
    assert_stdout_contains(&output, "keyfleet init");
}

#[test]
fn test_config_policy_applies() {
    let t = Test::new();
    fs::write(
        t.dir.path().join("keyfleet.toml"),
        "[policy]\nmax_name_length = 36\n",
    )
    .unwrap();

    let name = "0f9c2d1e-7b3a-4c8d-9e6f-112233445566";
    assert_success(&t.provision(name));
}

#[test]
fn test_invalid_config_rejected() {
    let t = Test::new();
    fs::write(
        t.dir.path().join("keyfleet.toml"),
        "[distribution]\npage_size = 0\n",
    )
    .unwrap();

    let output = t.provision(KEY_A);
    assert_exit_code(&output, 1);
    assert_stderr_contains(&output, "distribution.page_size");
}
