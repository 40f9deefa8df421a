//! Core types shared by every resolution phase.
//!
//! ## `error` - Error Handling
//!
//! - [`PlanError`] - Enumerated fatal configuration errors
//! - [`ErrorContext`] - User-friendly error wrapper with suggestions and details
//! - [`user_friendly_error`] - Convert any error to user-friendly format
//!
//! ## Container platform
//!
//! [`ContainerPlatform`] names the kind of containers being built. It is derived once
//! from the host facts and the `--linux` flag and then drives every platform-dependent
//! default downstream.

pub mod error;

pub use error::{ErrorContext, PlanError, user_friendly_error};

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of container images a build plan targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerPlatform {
    /// Windows Server Core containers
    Windows,
    /// Linux containers
    Linux,
}

impl ContainerPlatform {
    /// Lower-case name used in template contexts and messages.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::Linux => "linux",
        }
    }

    /// Title-case name for user-facing messages.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Windows => "Windows",
            Self::Linux => "Linux",
        }
    }
}

impl fmt::Display for ContainerPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
