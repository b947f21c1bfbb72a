//! Tests for `keyfleet wrap`.

use crate::support::*;
use base64::{engine::general_purpose::STANDARD, Engine};
use std::fs;

#[test]
fn test_wrap_decrypts_to_stored_key() {
    let t = Test::with_keys(&[KEY_A]);
    let key = device_keypair();

    let output = t.wrap(KEY_A, &public_key_b64(key));
    assert_success(&output);

    let stored = STANDARD.decode(t.stored_value(KEY_A)).unwrap();
    assert_eq!(unwrap_b64(&stdout(&output), key), stored);
}

#[test]
fn test_wrap_is_randomized() {
    let t = Test::with_keys(&[KEY_A]);
    let public_key = public_key_b64(device_keypair());

    let first = stdout(&t.wrap(KEY_A, &public_key));
    let second = stdout(&t.wrap(KEY_A, &public_key));
    assert_ne!(first, second);
}

#[test]
fn test_wrap_json_reply() {
    let t = Test::with_keys(&[KEY_A]);
    let key = other_keypair();

    let output = t
        .cmd()
        .args(["wrap", "--key-name", KEY_A, "--public-key"])
        .arg(public_key_b64(key))
        .arg("--json")
        .output()
        .unwrap();
    assert_success(&output);

    let reply = stdout_json(&output);
    assert!(reply.get("message").is_none());
    let wrapped = reply["wrapped_key"].as_str().unwrap();
    assert_eq!(unwrap_b64(wrapped, key).len(), 32);
}

#[test]
fn test_wrap_reports_every_field_error() {
    let t = Test::init();

    let output = t
        .cmd()
        .args(["wrap", "--key-name", "abc", "--public-key", INVALID_PUBLIC_KEY, "--json"])
        .output()
        .unwrap();
    assert_exit_code(&output, 2);

    let reply = stdout_json(&output);
    let fields: Vec<&str> = reply
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["key_name", "client_public_key"]);
    assert_eq!(
        reply[1]["message"],
        "ClientPublicKey needs to be a valid base64 encoded string of a RSA public key"
    );
}

#[test]
fn test_wrap_missing_public_key() {
    let t = Test::with_keys(&[KEY_A]);

    let output = t.cmd().args(["wrap", "--key-name", KEY_A]).output().unwrap();
    assert_exit_code(&output, 2);
    assert_stderr_contains(&output, "client_public_key: ClientPublicKey is required");
}

#[test]
fn test_wrap_unknown_key_is_server_error() {
    let t = Test::init();

    let output = t
        .cmd()
        .args(["wrap", "--key-name", "never-provisioned", "--json"])
        .arg("--public-key")
        .arg(public_key_b64(other_keypair()))
        .output()
        .unwrap();
    assert_exit_code(&output, 1);
    assert_eq!(
        stdout_json(&output),
        serde_json::json!({"message": "internal server error"})
    );
}

#[test]
fn test_wrap_from_request_file_with_flag_override() {
    let t = Test::with_keys(&[KEY_A, KEY_B]);
    let key = other_keypair();
    let request = t.dir.path().join("request.json");
    fs::write(
        &request,
        serde_json::json!({"key_name": KEY_A, "client_public_key": public_key_b64(key)})
            .to_string(),
    )
    .unwrap();

    let output = t
        .cmd()
        .args(["wrap", "--key-name", KEY_B, "--request"])
        .arg(&request)
        .output()
        .unwrap();
    assert_success(&output);

    let stored = STANDARD.decode(t.stored_value(KEY_B)).unwrap();
    assert_eq!(unwrap_b64(&stdout(&output), key), stored);
}

#[test]
fn test_wrap_missing_request_file_is_invalid_input() {
    let t = Test::with_keys(&[KEY_A]);
    let request = t.dir.path().join("absent.json");

    let output = t
        .cmd()
        .args(["wrap", "--request"])
        .arg(&request)
        .output()
        .unwrap();
    assert_exit_code(&output, 2);
    assert_stderr_contains(&output, "request: cannot read request");
    assert_stderr_excludes(&output, "internal server error");
}
