//! Read-only lookup tables consulted during resolution.
//!
//! The resolver never reads module-level globals. Instead a [`Catalog`] is handed
//! to it at construction time, which keeps resolution a pure function of its inputs
//! and lets tests swap in alternate tables.
//!
//! The catalog holds:
//! - the Visual Studio toolchain table (fixed, see [`toolchain`])
//! - the `.0` release to changelist table
//! - base image and prerequisites tag templates for both platforms
//! - tunable [`Defaults`], which the user config file may override

pub mod toolchain;

pub use toolchain::ToolchainVersion;

use semver::Version;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::constants::{
    DEFAULT_CUDA_VERSION, DEFAULT_GIT_REPO, DEFAULT_LINUX_BASETAG, DEFAULT_MEMORY_LIMIT_GB,
    DEFAULT_VISUAL_STUDIO, MIN_PROCESS_ISOLATION_DOCKER_VERSION,
};
use crate::core::PlanError;

/// Changelist numbers of each supported `.0` engine release.
///
/// `.0` releases ship without a `CompatibleChangelist` in `Build.version`, so
/// these are needed for builds that match the Epic Games Launcher.
const RELEASE_CHANGELISTS: &[(&str, u64)] = &[
    ("4.27.0", 17_155_196),
    ("5.0.0", 19_505_902),
    ("5.1.0", 23_058_290),
    ("5.2.0", 25_360_045),
    ("5.3.0", 27_405_482),
    ("5.4.0", 33_043_543),
    ("5.5.0", 37_670_630),
    ("5.6.0", 43_139_311),
];

/// String patterns for image identifiers.
///
/// Placeholders are `{basetag}` and `{toolchain}` on Windows, `{ubuntu}` and
/// `{cuda}` on Linux.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageTemplates {
    /// Windows Server Core base image
    pub windows_base: String,
    /// Windows prerequisites image tag
    pub windows_prereqs_tag: String,
    /// OpenGL-only Linux base image
    pub linux_opengl_base: String,
    /// OpenGL-only Linux prerequisites tag
    pub linux_opengl_prereqs_tag: String,
    /// CUDA-enabled Linux base image
    pub linux_cuda_base: String,
    /// CUDA-enabled Linux prerequisites tag
    pub linux_cuda_prereqs_tag: String,
}

impl Default for ImageTemplates {
    fn default() -> Self {
        Self {
            windows_base: "mcr.microsoft.com/windows/servercore:{basetag}".to_string(),
            windows_prereqs_tag: "{basetag}-vs{toolchain}".to_string(),
            linux_opengl_base: "nvidia/opengl:1.0-glvnd-devel-{ubuntu}".to_string(),
            linux_opengl_prereqs_tag: "opengl-{ubuntu}".to_string(),
            linux_cuda_base: "nvidia/cuda:{cuda}-devel-{ubuntu}".to_string(),
            linux_cuda_prereqs_tag: "cuda{cuda}-{ubuntu}".to_string(),
        }
    }
}

impl ImageTemplates {
    /// Prefixes Linux image tags start with; user tag suffixes may not reuse them.
    pub const RESERVED_SUFFIX_PREFIXES: [&'static str; 2] = ["opengl", "cuda"];
}

/// Tunable defaults applied when the user leaves a setting unspecified.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Defaults {
    /// Repository cloned for numeric releases
    pub git_repository: String,
    /// Ubuntu tag used for Linux images
    pub linux_basetag: String,
    /// CUDA version used for a bare `--cuda`
    pub cuda_version: String,
    /// Memory limit (GB) for Hyper-V isolation
    pub memory_limit_gb: f64,
    /// First container engine version supporting process isolation
    #[serde(serialize_with = "serialize_display")]
    pub min_process_isolation_docker: Version,
    /// Toolchain used when none is requested
    pub visual_studio: String,
}

fn serialize_display<S: serde::Serializer>(
    value: &Version,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            git_repository: DEFAULT_GIT_REPO.to_string(),
            linux_basetag: DEFAULT_LINUX_BASETAG.to_string(),
            cuda_version: DEFAULT_CUDA_VERSION.to_string(),
            memory_limit_gb: DEFAULT_MEMORY_LIMIT_GB,
            min_process_isolation_docker: Version::parse(MIN_PROCESS_ISOLATION_DOCKER_VERSION)
                .unwrap_or_else(|_| Version::new(18, 9, 0)),
            visual_studio: DEFAULT_VISUAL_STUDIO.to_string(),
        }
    }
}

/// All read-only tables the resolver consults.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalog {
    /// Toolchains keyed by name
    pub toolchains: BTreeMap<String, ToolchainVersion>,
    /// `.0` release version string to changelist
    pub release_changelists: BTreeMap<String, u64>,
    /// Image identifier templates
    pub images: ImageTemplates,
    /// Fallback values
    pub defaults: Defaults,
}

impl Catalog {
    /// The catalog shipped with this tool.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            toolchains: toolchain::builtin_toolchains()
                .into_iter()
                .map(|t| (t.name.clone(), t))
                .collect(),
            release_changelists: RELEASE_CHANGELISTS
                .iter()
                .map(|(release, cl)| ((*release).to_string(), *cl))
                .collect(),
            images: ImageTemplates::default(),
            defaults: Defaults::default(),
        }
    }

    /// Look up a toolchain by name.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::UnknownToolchain`] listing the available names.
    pub fn toolchain(&self, name: &str) -> Result<&ToolchainVersion, PlanError> {
        self.toolchains.get(name).ok_or_else(|| PlanError::UnknownToolchain {
            name: name.to_string(),
            valid: self.toolchains.keys().cloned().collect(),
        })
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Substitute `{name}` placeholders in an image template.
#[must_use]
pub fn fill_template(pattern: &str, vars: &[(&str, &str)]) -> String {
    vars.iter().fold(pattern.to_string(), |acc, (key, value)| {
        acc.replace(&format!("{{{key}}}"), value)
    })
}
