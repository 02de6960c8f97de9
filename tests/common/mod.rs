//! Shared test helpers for integration tests
//!
//! Every command runs against its own settings file and quote database in a
//! temp directory, so tests never touch the user's real configuration.

#![allow(dead_code)]

use assert_cmd::cargo;
use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to get a bare roofquote command
pub fn roofquote() -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("roofquote"));
    cmd.env_remove("ROOFQUOTE_LOG");
    cmd
}

/// Isolated settings and store locations
pub struct TestEnv {
    pub tmp: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            tmp: TempDir::new().unwrap(),
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.tmp.path().join("config.yaml")
    }

    pub fn store_path(&self) -> PathBuf {
        self.tmp.path().join("quotes.db")
    }

    /// A roofquote command wired to this environment
    pub fn cmd(&self) -> Command {
        let mut cmd = roofquote();
        cmd.current_dir(self.tmp.path())
            .env("ROOFQUOTE_CONFIG", self.config_path())
            .env("ROOFQUOTE_STORE", self.store_path());
        cmd
    }

    /// Save a quote and return its id
    pub fn save_quote(&self, name: &str, extra: &[&str]) -> String {
        let output = self
            .cmd()
            .args(["--output", "json", "quote", "save", "--name", name])
            .args(extra)
            .output()
            .unwrap();
        assert!(
            output.status.success(),
            "save failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        let record: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        record["id"].as_str().unwrap().to_string()
    }
}
