//! Windows container configuration: toolchain, base image, isolation and memory.

use rand::Rng;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use super::size::parse_size_gb;
use crate::catalog::{Catalog, fill_template};
use crate::constants::RANDOM_MEMORY_SPREAD_GB;
use crate::core::PlanError;
use crate::host::HostFacts;
use crate::version::{Release, lenient_version};

/// Windows container isolation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IsolationMode {
    /// Shares the host kernel; requires matching kernel versions
    Process,
    /// Lightweight VM per container
    HyperV,
}

impl IsolationMode {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Process => "process",
            Self::HyperV => "hyperv",
        }
    }
}

impl fmt::Display for IsolationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IsolationMode {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "process" => Ok(Self::Process),
            "hyperv" => Ok(Self::HyperV),
            other => Err(PlanError::configuration(format!(
                "invalid isolation mode '{other}', valid modes are: process, hyperv"
            ))),
        }
    }
}

/// User input consumed by the Windows branch.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsRequest<'a> {
    /// Requested toolchain name; `None` means the catalog default
    pub visual_studio: Option<&'a str>,
    /// Resolved release, when building source
    pub release: Option<&'a Release>,
    /// Current `buildgraph_args` template option
    pub buildgraph_args: Option<&'a str>,
    /// `--basetag`
    pub basetag: Option<&'a str>,
    /// `--isolation`
    pub isolation: Option<&'a str>,
    /// `-m`
    pub memory: Option<&'a str>,
    /// `--random-memory`
    pub random_memory: bool,
}

/// Derived Windows settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowsConfig {
    /// Server Core tag the images are built on
    pub base_tag: String,
    /// Server Core tag matching the host kernel, if known
    pub host_base_tag: Option<String>,
    /// Full base image reference
    pub base_image: String,
    /// Tag of the prerequisites image
    pub prereqs_tag: String,
    pub isolation: IsolationMode,
    /// Memory limit in decimal GB; `None` leaves the engine default
    pub memory_limit_gb: Option<f64>,
    /// Toolchain name, e.g. `2022`
    pub visual_studio: String,
    /// Toolchain major build number, e.g. `17`
    pub visual_studio_build_number: String,
}

impl WindowsConfig {
    /// Flags passed to every `docker build` invocation.
    #[must_use]
    pub fn cli_flags(&self) -> Vec<String> {
        let mut flags = vec![format!("--isolation={}", self.isolation)];
        if let Some(limit) = self.memory_limit_gb {
            flags.push("-m".to_string());
            flags.push(format!("{limit:.2}GB"));
        }
        flags
    }
}

/// Result of the Windows branch: the config plus the updated build graph arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowsOutcome {
    pub config: WindowsConfig,
    /// New value for `buildgraph_args`, when the toolchain needs a marker
    pub buildgraph_args: Option<String>,
}

/// Generate the Windows configuration.
///
/// # Errors
///
/// - [`PlanError::UnknownToolchain`] for toolchains missing from the catalog
/// - [`PlanError::ToolchainTooOld`] / [`PlanError::ToolchainTooNew`] for numeric releases
///   outside the toolchain's range
/// - [`PlanError::BaseTagUnresolved`] when no base tag is given or detected
/// - [`PlanError::Configuration`] for an invalid isolation override
/// - [`PlanError::InvalidSize`] for a malformed memory limit
pub fn generate<R: Rng>(
    request: &WindowsRequest<'_>,
    host: &HostFacts,
    catalog: &Catalog,
    rng: &mut R,
) -> Result<WindowsOutcome, PlanError> {
    let toolchain_name = request.visual_studio.unwrap_or(&catalog.defaults.visual_studio);
    let toolchain = catalog.toolchain(toolchain_name)?;

    if let Some(version) = request.release.and_then(Release::version) {
        toolchain.check_compatibility(version)?;
    }

    let buildgraph_args = toolchain
        .pass_version_flag
        .then(|| toolchain.apply_buildgraph_marker(request.buildgraph_args.unwrap_or_default()));

    let base_tag = request
        .basetag
        .map(str::to_string)
        .or_else(|| host.host_basetag.clone())
        .ok_or(PlanError::BaseTagUnresolved)?;

    let base_image = fill_template(&catalog.images.windows_base, &[("basetag", &base_tag)]);
    let prereqs_tag = fill_template(
        &catalog.images.windows_prereqs_tag,
        &[("basetag", &base_tag), ("toolchain", &toolchain.name)],
    );

    let isolation = match request.isolation {
        Some(mode) => mode.parse()?,
        None => detect_isolation(&base_tag, host, catalog),
    };

    let memory_limit_gb = match request.memory {
        Some(size) => Some(parse_size_gb(size)?),
        None if isolation == IsolationMode::HyperV => {
            let default = catalog.defaults.memory_limit_gb;
            Some(if request.random_memory {
                rng.random_range(default..default + RANDOM_MEMORY_SPREAD_GB)
            } else {
                default
            })
        }
        None => None,
    };

    debug!(
        "Windows config: base {} (host {:?}), isolation {}, memory {:?}",
        base_tag, host.host_basetag, isolation, memory_limit_gb
    );

    Ok(WindowsOutcome {
        config: WindowsConfig {
            base_tag,
            host_base_tag: host.host_basetag.clone(),
            base_image,
            prereqs_tag,
            isolation,
            memory_limit_gb,
            visual_studio: toolchain.name.clone(),
            visual_studio_build_number: toolchain.build_number.clone(),
        },
        buildgraph_args,
    })
}

/// Process isolation needs the same kernel as the host and a recent enough engine.
fn detect_isolation(base_tag: &str, host: &HostFacts, catalog: &Catalog) -> IsolationMode {
    let same_kernel = host.host_basetag.as_deref() == Some(base_tag);
    let engine_supports_process = host
        .docker_version
        .as_deref()
        .and_then(lenient_version)
        .is_some_and(|v| v >= catalog.defaults.min_process_isolation_docker);

    if same_kernel && engine_supports_process {
        IsolationMode::Process
    } else {
        IsolationMode::HyperV
    }
}
