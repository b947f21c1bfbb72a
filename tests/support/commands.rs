//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a keyfleet command running in the test directory.
    ///
    /// Logging is pinned to warnings so stderr only carries command output
    /// unless a test asks otherwise.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("keyfleet").expect("failed to find keyfleet binary");
        cmd.current_dir(self.dir.path());
        cmd.env("NO_COLOR", "1");
        cmd.env("KEYFLEET_LOG", "keyfleet=warn");
        cmd.env_remove("KEYFLEET_CONFIG");
        cmd
    }

    /// Shortcut for `keyfleet init`.
    pub fn init_cmd(&self) -> Output {
        self.cmd()
            .arg("init")
            .output()
            .expect("failed to run keyfleet init")
    }

    /// Shortcut for `keyfleet provision <name>`.
    pub fn provision(&self, name: &str) -> Output {
        self.cmd()
            .args(["provision", name])
            .output()
            .expect("failed to run keyfleet provision")
    }

    /// Shortcut for `keyfleet wrap --key-name <name> --public-key <key>`.
    pub fn wrap(&self, name: &str, public_key: &str) -> Output {
        self.cmd()
            .args(["wrap", "--key-name", name, "--public-key", public_key])
            .output()
            .expect("failed to run keyfleet wrap")
    }

    /// Shortcut for `keyfleet device enroll <id> <key>`.
    pub fn enroll(&self, id: &str, public_key: &str) -> Output {
        self.cmd()
            .args(["device", "enroll", id, public_key])
            .output()
            .expect("failed to run keyfleet device enroll")
    }

    /// Shortcut for `keyfleet distribute --json`.
    pub fn distribute_json(&self) -> Output {
        self.cmd()
            .args(["distribute", "--json"])
            .output()
            .expect("failed to run keyfleet distribute")
    }

    /// Shortcut for `keyfleet device show <id>`.
    pub fn show(&self, id: &str) -> Output {
        self.cmd()
            .args(["device", "show", id])
            .output()
            .expect("failed to run keyfleet device show")
    }
}
