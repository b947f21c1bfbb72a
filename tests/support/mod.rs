//! Test support utilities for keyfleet integration tests.
//!
//! Provides an isolated working directory per test plus helper commands.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::path::PathBuf;

use tempfile::TempDir;

/// Test environment with an isolated working directory.
///
/// Child processes run with `.current_dir()` set to `dir`, so the default
/// `keyfleet.toml`, secret store, and device directory all land inside it.
pub struct Test {
    /// Temporary directory the binary runs in
    pub dir: TempDir,
}

impl Test {
    /// Create a new empty test environment.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        Self { dir }
    }

    /// Create a test environment with `keyfleet init` already run.
    pub fn init() -> Self {
        let t = Self::new();
        let output = t.init_cmd();
        assert!(
            output.status.success(),
            "Failed to initialize: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        t
    }

    /// Create an initialized environment with keys provisioned.
    pub fn with_keys(names: &[&str]) -> Self {
        let t = Self::init();
        for name in names {
            let output = t.provision(name);
            assert!(
                output.status.success(),
                "Failed to provision {}: {}",
                name,
                String::from_utf8_lossy(&output.stderr)
            );
        }
        t
    }

    /// Path of the secret store under the default config.
    pub fn store_path(&self) -> PathBuf {
        self.dir.path().join(".keyfleet/secrets")
    }

    /// Path of the device directory under the default config.
    pub fn directory_path(&self) -> PathBuf {
        self.dir.path().join(".keyfleet/devices.json")
    }

    /// Raw stored value of a key.
    pub fn stored_value(&self, name: &str) -> String {
        std::fs::read_to_string(self.store_path().join(name))
            .expect("failed to read stored key")
            .trim()
            .to_string()
    }
}
