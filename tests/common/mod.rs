//! Shared helpers for the integration suite.

// Not every suite uses every helper.
#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use ue4_docker_config::test_utils::init_test_logging;

/// Install test logging once per test binary; honours `RUST_LOG`.
pub fn init_test_env() {
    init_test_logging(None);
}

/// Isolated environment for running the binary.
///
/// The implicit user config path points into a temporary directory so the
/// developer's own `~/.ue4-docker/config.toml` never leaks into a test.
pub struct TestEnv {
    pub temp: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        init_test_env();
        Self {
            temp: TempDir::new().unwrap(),
        }
    }

    /// Path of the implicit config file (not created until [`Self::write_config`]).
    pub fn config_path(&self) -> PathBuf {
        self.temp.path().join("config.toml")
    }

    pub fn write_config(&self, contents: &str) -> PathBuf {
        let path = self.config_path();
        std::fs::write(&path, contents).unwrap();
        path
    }

    /// `ue4-docker-config` with colours disabled and an isolated config path.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("ue4-docker-config").unwrap();
        cmd.env("NO_COLOR", "1")
            .env("UE4DOCKER_CONFIG_PATH", self.config_path())
            .env_remove("RUST_LOG");
        cmd
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }
}
