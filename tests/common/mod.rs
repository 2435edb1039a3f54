//! Common test utilities for groundwork integration tests.
//!
//! Provides `TestEnv` for isolated test environments that don't pollute
//! the user's `~/.local/share/groundwork/` directory.

#![allow(dead_code)]

use assert_cmd::Command;
pub use tempfile::TempDir;

/// A test environment with isolated data storage.
///
/// Each `TestEnv` creates two temporary directories:
/// - `repo_dir`: Acts as the repository root
/// - `data_dir`: Holds groundwork's data (via `GW_DATA_DIR` env var)
///
/// The `gw()` method returns a `Command` that automatically sets `GW_DATA_DIR`
/// per-invocation, making tests parallel-safe.
pub struct TestEnv {
    pub repo_dir: TempDir,
    pub data_dir: TempDir,
}

impl TestEnv {
    /// Create a new test environment with isolated directories.
    pub fn new() -> Self {
        Self {
            repo_dir: TempDir::new().unwrap(),
            data_dir: TempDir::new().unwrap(),
        }
    }

    /// Create a new test environment and initialize groundwork.
    pub fn init() -> Self {
        let env = Self::new();
        env.gw().args(["system", "init"]).assert().success();
        env
    }

    /// Get a Command for the gw binary with isolated data directory.
    ///
    /// Sets `GW_DATA_DIR` per-command for parallel safety.
    pub fn gw(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_gw"));
        cmd.current_dir(self.repo_dir.path());
        cmd.env("GW_DATA_DIR", self.data_dir.path());
        cmd
    }

    /// Run a gw command, assert success, and parse the JSON output.
    pub fn gw_json(&self, args: &[&str]) -> serde_json::Value {
        let output = self.gw().args(args).assert().success();
        let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
        serde_json::from_str(&stdout).unwrap()
    }

    /// Get the path to the repo directory.
    pub fn repo_path(&self) -> &std::path::Path {
        self.repo_dir.path()
    }

    /// Get the path to the data directory.
    pub fn data_path(&self) -> &std::path::Path {
        self.data_dir.path()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
