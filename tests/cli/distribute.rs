//! Tests for `keyfleet distribute` and `keyfleet secrets`.

use crate::support::*;
use base64::{engine::general_purpose::STANDARD, Engine};
use std::fs;

fn bundle(t: &Test, id: &str) -> serde_json::Value {
    stdout_json(&t.show(id))["desired"]["confidential_package_keys"].clone()
}

#[test]
fn test_distribute_wraps_every_key_for_every_device() {
    let t = Test::with_keys(&[KEY_A, KEY_B]);
    let key = other_keypair();
    assert_success(&t.enroll("device-0001", &public_key_b64(key)));
    assert_success(&t.enroll("device-0002", &public_key_b64(key)));

    let output = t.distribute_json();
    assert_success(&output);
    let summary = stdout_json(&output);
    assert_eq!(summary["secrets"], 2);
    assert_eq!(summary["devices_updated"], 2);

    for id in ["device-0001", "device-0002"] {
        let bundle = bundle(&t, id);
        let bundle = bundle.as_object().unwrap();
        assert_eq!(bundle.len(), 2);
        for name in [KEY_A, KEY_B] {
            let stored = STANDARD.decode(t.stored_value(name)).unwrap();
            let wrapped = bundle[name].as_str().unwrap();
            assert_eq!(unwrap_b64(wrapped, key), stored);
        }
    }
}

#[test]
fn test_distribute_skips_reserved_names() {
    let t = Test::with_keys(&[KEY_A]);
    fs::write(t.store_path().join("HubConnectionString"), "HostName=hub").unwrap();
    assert_success(&t.enroll("device-0001", &public_key_b64(other_keypair())));

    assert_success(&t.distribute_json());
    let bundle = bundle(&t, "device-0001");
    assert_eq!(bundle.as_object().unwrap().len(), 1);
    assert!(bundle.get("HubConnectionString").is_none());
}

#[test]
fn test_distribute_skips_device_with_invalid_key() {
    let t = Test::with_keys(&[KEY_A]);
    fs::write(
        t.directory_path(),
        serde_json::json!({"devices": [
            {"id": "device-0001", "etag": "1", "reported": {"device_public_key": public_key_b64(other_keypair())}},
            {"id": "device-0002", "etag": "1", "reported": {"device_public_key": INVALID_PUBLIC_KEY}},
        ]})
        .to_string(),
    )
    .unwrap();

    let output = t.distribute_json();
    assert_success(&output);
    let summary = stdout_json(&output);
    assert_eq!(summary["devices_updated"], 1);
    assert_eq!(summary["invalid_key"], serde_json::json!(["device-0002"]));

    assert!(bundle(&t, "device-0001").is_object());
    assert!(bundle(&t, "device-0002").is_null());
}

#[test]
fn test_distribute_human_summary() {
    let t = Test::with_keys(&[KEY_A]);
    assert_success(&t.enroll("device-0001", &public_key_b64(other_keypair())));

    let output = t.cmd().arg("distribute").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "updated:");
    assert_stdout_contains(&output, "all devices updated");
}

#[test]
fn test_watch_stops_after_runs() {
    let t = Test::with_keys(&[KEY_A]);
    fs::write(
        t.dir.path().join("keyfleet.toml"),
        "[distribution]\ninterval_secs = 1\n",
    )
    .unwrap();
    assert_success(&t.enroll("device-0001", &public_key_b64(other_keypair())));

    let output = t
        .cmd()
        .args(["distribute", "--watch", "--runs", "2", "--json"])
        .output()
        .unwrap();
    assert_success(&output);

    let runs: Vec<serde_json::Value> = stdout(&output)
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(runs.len(), 2);
    assert!(runs.iter().all(|r| r["devices_updated"] == 1));
    assert_eq!(stdout_json(&t.show("device-0001"))["etag"], "3");
}

#[test]
fn test_secrets_list_marks_reserved() {
    let t = Test::with_keys(&[KEY_A]);
    fs::write(t.store_path().join("KeyVaultEndpoint"), "https://vault").unwrap();

    let output = t.cmd().args(["secrets", "list", "--json"]).output().unwrap();
    assert_success(&output);
    assert_eq!(
        stdout_json(&output),
        serde_json::json!([
            {"name": "KeyVaultEndpoint", "reserved": true},
            {"name": "device-key-001", "reserved": false},
        ])
    );
}
