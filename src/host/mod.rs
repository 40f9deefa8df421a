//! Read-only facts about the machine the plan is resolved on.
//!
//! Resolution itself never inspects the host. The CLI gathers [`HostFacts`] once,
//! up front, and passes them to the resolver. Tests construct facts directly.
//!
//! Probing is best-effort: a missing `docker` binary or an unrecognised Windows
//! build simply leaves the corresponding fact as `None`.

pub mod probe;

use serde::Serialize;
use std::fmt;
use tracing::debug;

use probe::ProbeCommand;

/// Operating system family of the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HostPlatform {
    Windows,
    Linux,
    Macos,
}

impl HostPlatform {
    /// The platform this binary was compiled for.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::Macos
        } else {
            Self::Linux
        }
    }

    #[must_use]
    pub const fn is_windows(&self) -> bool {
        matches!(self, Self::Windows)
    }
}

impl fmt::Display for HostPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Windows => "windows",
            Self::Linux => "linux",
            Self::Macos => "macos",
        })
    }
}

/// Facts reported by host inspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostFacts {
    /// Host operating system
    pub platform: HostPlatform,
    /// Container engine server version, e.g. `24.0.7`
    pub docker_version: Option<String>,
    /// Windows Server Core tag matching the host kernel, e.g. `ltsc2022`
    pub host_basetag: Option<String>,
}

impl HostFacts {
    /// Facts with only the platform known.
    #[must_use]
    pub const fn new(platform: HostPlatform) -> Self {
        Self {
            platform,
            docker_version: None,
            host_basetag: None,
        }
    }

    #[must_use]
    pub fn with_docker_version(mut self, version: impl Into<String>) -> Self {
        self.docker_version = Some(version.into());
        self
    }

    #[must_use]
    pub fn with_host_basetag(mut self, basetag: impl Into<String>) -> Self {
        self.host_basetag = Some(basetag.into());
        self
    }

    /// Inspect the current machine.
    pub async fn probe() -> Self {
        let platform = HostPlatform::current();
        let docker_version = probe_docker_version().await;
        let host_basetag = if platform.is_windows() {
            probe_windows_basetag().await
        } else {
            None
        };

        let facts = Self {
            platform,
            docker_version,
            host_basetag,
        };
        debug!("Host facts: {:?}", facts);
        facts
    }
}

async fn probe_docker_version() -> Option<String> {
    match ProbeCommand::new("docker")
        .args(["version", "--format", "{{.Server.Version}}"])
        .with_context("Querying container engine version")
        .execute()
        .await
    {
        Ok(version) if !version.is_empty() => Some(version),
        Ok(_) => None,
        Err(e) => {
            debug!("Could not determine Docker version: {:#}", e);
            None
        }
    }
}

async fn probe_windows_basetag() -> Option<String> {
    let output = ProbeCommand::new("cmd")
        .args(["/C", "ver"])
        .with_context("Querying Windows build number")
        .execute()
        .await
        .map_err(|e| debug!("Could not determine Windows build: {:#}", e))
        .ok()?;

    let build = parse_windows_build(&output)?;
    let basetag = basetag_for_build(build);
    if basetag.is_none() {
        debug!("No Windows Server Core tag known for build {}", build);
    }
    basetag.map(str::to_string)
}

/// Extract the build number from `ver` output such as
/// `Microsoft Windows [Version 10.0.20348.2227]`.
#[must_use]
pub fn parse_windows_build(ver_output: &str) -> Option<u32> {
    let start = ver_output.find("Version ")? + "Version ".len();
    let version = ver_output[start..].trim_end_matches(|c: char| !c.is_ascii_digit());
    version.split('.').nth(2)?.trim_end_matches(']').parse().ok()
}

/// Windows Server Core image tag for a host kernel build number.
#[must_use]
pub const fn basetag_for_build(build: u32) -> Option<&'static str> {
    match build {
        17763 => Some("ltsc2019"),
        19041 => Some("2004"),
        19042 => Some("20H2"),
        20348 => Some("ltsc2022"),
        26100 => Some("ltsc2025"),
        _ => None,
    }
}
