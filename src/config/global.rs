//! User configuration file (`~/.ue4-docker/config.toml`).
//!
//! # Location
//!
//! In order of precedence:
//!
//! 1. `--config PATH` (the file must exist)
//! 2. `UE4DOCKER_CONFIG_PATH`
//! 3. `~/.ue4-docker/config.toml` (`%LOCALAPPDATA%\ue4-docker\config.toml` on Windows)
//!
//! A missing file at an implicit location is not an error; built-in defaults apply.
//!
//! # File Format
//!
//! ```toml
//! [defaults]
//! git_repository = "https://github.com/example/UnrealEngine.git"
//! linux_basetag = "ubuntu20.04"
//! cuda_version = "11.8.0"
//! memory_limit_gb = 16.0
//! min_process_isolation_docker = "18.09.0"
//! visual_studio = "2022"
//! ```
//!
//! The toolchain table itself cannot be changed from here.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::catalog::Catalog;
use crate::constants::{CONFIG_PATH_ENV, MAX_MEMORY_LIMIT_GB};

/// Overrides for [`crate::catalog::Defaults`]. Unset fields keep the built-in value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefaultsOverride {
    pub git_repository: Option<String>,
    pub linux_basetag: Option<String>,
    pub cuda_version: Option<String>,
    pub memory_limit_gb: Option<f64>,
    pub min_process_isolation_docker: Option<String>,
    pub visual_studio: Option<String>,
}

/// Contents of the user configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UserConfig {
    pub defaults: DefaultsOverride,
}

impl UserConfig {
    /// Load from `explicit` or the implicit locations.
    ///
    /// # Errors
    ///
    /// Fails if an explicit path does not exist, or if a file exists but cannot be
    /// read or parsed.
    pub async fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                bail!("Config file not found: {}", path.display());
            }
            return Self::load_from(path).await;
        }

        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path).await
        } else {
            debug!("No config file at {}, using built-in defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or is not valid TOML for this schema.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// The implicit config location, honouring `UE4DOCKER_CONFIG_PATH`.
    ///
    /// # Errors
    ///
    /// Fails if the home (or local data) directory cannot be determined.
    pub fn default_path() -> Result<PathBuf> {
        Self::default_path_with(std::env::var_os(CONFIG_PATH_ENV))
    }

    fn default_path_with(env_override: Option<OsString>) -> Result<PathBuf> {
        if let Some(path) = env_override.filter(|p| !p.is_empty()) {
            return Ok(PathBuf::from(path));
        }

        let config_dir = if cfg!(target_os = "windows") {
            dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine local data directory"))?
                .join("ue4-docker")
        } else {
            dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
                .join(".ue4-docker")
        };

        Ok(config_dir.join("config.toml"))
    }

    /// Apply the overrides on top of `catalog`.
    ///
    /// # Errors
    ///
    /// Fails for a non-positive memory limit, a malformed engine version, or a
    /// default toolchain missing from the catalog.
    pub fn apply_to(&self, mut catalog: Catalog) -> Result<Catalog> {
        let overrides = &self.defaults;
        let defaults = &mut catalog.defaults;

        if let Some(repo) = &overrides.git_repository {
            defaults.git_repository.clone_from(repo);
        }
        if let Some(basetag) = &overrides.linux_basetag {
            defaults.linux_basetag.clone_from(basetag);
        }
        if let Some(cuda) = &overrides.cuda_version {
            defaults.cuda_version.clone_from(cuda);
        }
        if let Some(limit) = overrides.memory_limit_gb {
            if !(limit.is_finite() && limit > 0.0) {
                bail!("defaults.memory_limit_gb must be a positive number, got {limit}");
            }
            if limit > MAX_MEMORY_LIMIT_GB {
                bail!("defaults.memory_limit_gb must be at most {MAX_MEMORY_LIMIT_GB}, got {limit}");
            }
            defaults.memory_limit_gb = limit;
        }
        if let Some(version) = &overrides.min_process_isolation_docker {
            defaults.min_process_isolation_docker = semver::Version::parse(version)
                .with_context(|| {
                    format!("defaults.min_process_isolation_docker is not a valid version: {version}")
                })?;
        }
        if let Some(toolchain) = &overrides.visual_studio {
            catalog.toolchain(toolchain)?;
            catalog.defaults.visual_studio.clone_from(toolchain);
        }

        Ok(catalog)
    }
}
