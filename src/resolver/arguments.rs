//! The raw argument record handed to the resolver.

use std::path::PathBuf;

/// Command-line intent, exactly as parsed.
///
/// The resolver only reads this record. Absent optional flags are `None`; repeatable
/// flags are empty vectors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawArguments {
    /// Deprecated positional release
    pub release: Option<String>,
    /// `--ue-version`
    pub ue_version: Option<String>,
    /// Build Linux containers on a Windows host
    pub linux: bool,
    pub rebuild: bool,
    pub dry_run: bool,
    /// Deprecated: skip `minimal` (and therefore `full`)
    pub no_minimal: bool,
    /// Deprecated: skip `full`
    pub no_full: bool,
    pub no_cache: bool,
    /// `--target` values; `None` when the flag never appeared
    pub target: Option<Vec<String>>,
    pub random_memory: bool,
    pub docker_build_args: Vec<String>,
    pub exclude: Vec<String>,
    pub opt: Vec<String>,
    /// `--cuda`: `None` when absent, `Some("")` when given without a value
    pub cuda: Option<String>,
    pub visual_studio: Option<String>,
    pub repo: Option<String>,
    pub branch: Option<String>,
    pub isolation: Option<String>,
    pub basetag: Option<String>,
    pub suffix: String,
    /// `-m` memory limit
    pub memory: Option<String>,
    pub ue4cli: Option<String>,
    pub conan_ue4cli: Option<String>,
    /// Directory generated Dockerfiles are written to instead of building
    pub layout: Option<PathBuf>,
    pub combine: bool,
    pub monitor: bool,
    /// Resource monitor sampling interval in seconds
    pub interval: Option<f64>,
    pub ignore_blacklist: bool,
    pub verbose: bool,
    pub changelist: Option<u64>,
    pub prerequisites_dockerfile: Option<PathBuf>,
}
