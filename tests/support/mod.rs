//! Test support utilities for envring integration tests.
//!
//! Provides an isolated workspace holding fixture keys and a trust store.

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

/// Test environment with an isolated temp directory.
///
/// No process-global state is mutated; child processes use `.current_dir()`
/// so tests can safely run in parallel.
pub struct Test {
    /// Temporary directory holding keys, payloads, and `envring.toml`
    pub dir: TempDir,
}

impl Test {
    /// Create a new empty test environment.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        Self { dir }
    }

    /// Environment whose identity is `identity` (a private key fixture),
    /// trusting the given peer fixtures by name.
    pub fn with_identity(identity: &str, peers: &[(&str, &str)]) -> Self {
        let t = Self::new();
        t.copy_fixture(identity);

        let mut toml = format!("[identity]\nprivate_key = \"{}\"\n\n[peers]\n", identity);
        for (name, file) in peers {
            t.copy_fixture(file);
            toml.push_str(&format!("{} = \"{}\"\n", name, file));
        }
        t.write("envring.toml", &toml);
        t
    }

    /// Absolute path of a file inside the environment.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write a file into the environment.
    pub fn write(&self, name: &str, contents: &str) {
        std::fs::write(self.path(name), contents).expect("failed to write test file");
    }

    /// Read a file from the environment.
    pub fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.path(name)).expect("failed to read test file")
    }

    /// Copy a fixture into the environment under the same name.
    pub fn copy_fixture(&self, name: &str) {
        self.write(name, &fixture(name));
    }
}
