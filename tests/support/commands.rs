//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create an envring command rooted in the test directory.
    ///
    /// Inherited `ENVRING_*` variables are cleared so the host environment
    /// cannot leak into a test.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("envring").expect("failed to find envring binary");
        cmd.env_remove("ENVRING_PASSPHRASE");
        cmd.env_remove("ENVRING_CONFIG");
        cmd.env_remove("ENVRING_LOG");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Command with `ENVRING_PASSPHRASE` set.
    pub fn cmd_with_passphrase(&self, passphrase: &str) -> Command {
        let mut cmd = self.cmd();
        cmd.env("ENVRING_PASSPHRASE", passphrase);
        cmd
    }

    /// Shortcut for `envring open <file>`.
    pub fn open(&self, file: &str, passphrase: &str) -> Output {
        self.cmd_with_passphrase(passphrase)
            .args(["open", file])
            .output()
            .expect("failed to run envring open")
    }

    /// Shortcut for `envring seal <file> --output <dest>`.
    pub fn seal(&self, file: &str, dest: &str, passphrase: &str) -> Output {
        self.cmd_with_passphrase(passphrase)
            .args(["seal", file, "--output", dest])
            .output()
            .expect("failed to run envring seal")
    }

    /// Shortcut for `envring certify <subject> <certifier>`.
    pub fn certify(&self, subject: &str, certifier: &str) -> Output {
        self.cmd()
            .args(["certify", subject, certifier])
            .output()
            .expect("failed to run envring certify")
    }

    /// Shortcut for `envring trust --json`.
    pub fn trust_json(&self) -> Output {
        self.cmd()
            .args(["trust", "--json"])
            .output()
            .expect("failed to run envring trust")
    }
}
