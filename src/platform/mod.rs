//! Platform-specific configuration.
//!
//! Exactly one branch runs per resolution, chosen by the container platform:
//!
//! - [`windows`]: toolchain checks, Server Core base image, isolation mode and memory limit
//! - [`linux`]: OpenGL or CUDA base image selection and tag-suffix validation
//!
//! Both produce plain data. Flags for the build executor are derived from it by
//! [`PlatformConfig::cli_flags`].

pub mod linux;
pub mod size;
pub mod windows;

pub use linux::{LinuxConfig, LinuxRequest};
pub use size::parse_size_gb;
pub use windows::{IsolationMode, WindowsConfig, WindowsOutcome, WindowsRequest};

use serde::Serialize;

use crate::core::ContainerPlatform;

/// The populated platform branch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "platform", rename_all = "lowercase")]
pub enum PlatformConfig {
    Windows(WindowsConfig),
    Linux(LinuxConfig),
}

impl PlatformConfig {
    #[must_use]
    pub const fn container_platform(&self) -> ContainerPlatform {
        match self {
            Self::Windows(_) => ContainerPlatform::Windows,
            Self::Linux(_) => ContainerPlatform::Linux,
        }
    }

    /// Base image the prerequisites stage builds on.
    #[must_use]
    pub fn base_image(&self) -> &str {
        match self {
            Self::Windows(config) => &config.base_image,
            Self::Linux(config) => &config.base_image,
        }
    }

    /// Tag of the prerequisites image.
    #[must_use]
    pub fn prereqs_tag(&self) -> &str {
        match self {
            Self::Windows(config) => &config.prereqs_tag,
            Self::Linux(config) => &config.prereqs_tag,
        }
    }

    /// Platform-specific `docker build` flags.
    #[must_use]
    pub fn cli_flags(&self) -> Vec<String> {
        match self {
            Self::Windows(config) => config.cli_flags(),
            Self::Linux(_) => Vec::new(),
        }
    }

    #[must_use]
    pub const fn as_windows(&self) -> Option<&WindowsConfig> {
        match self {
            Self::Windows(config) => Some(config),
            Self::Linux(_) => None,
        }
    }

    #[must_use]
    pub const fn as_linux(&self) -> Option<&LinuxConfig> {
        match self {
            Self::Linux(config) => Some(config),
            Self::Windows(_) => None,
        }
    }
}
