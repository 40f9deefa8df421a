//! Resolution phases.
//!
//! Each phase consumes the previous snapshot and returns a new one, so no phase can
//! observe a half-built configuration. Snapshots only grow: fields decided by an
//! earlier phase are carried forward untouched.

use std::collections::BTreeSet;
use std::path::PathBuf;

use rand::Rng;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::RawArguments;
use crate::catalog::Catalog;
use crate::constants::DEFAULT_MONITOR_INTERVAL_SECS;
use crate::core::{ContainerPlatform, PlanError};
use crate::host::HostFacts;
use crate::options::{ExcludedComponent, TemplateOptions, TemplateValue, normalize_package_version};
use crate::platform::{self, LinuxRequest, PlatformConfig, WindowsRequest};
use crate::targets::{BuildTarget, BuildTargets, TargetRequest};
use crate::version::release::{resolve_release, select_release};
use crate::version::ResolvedRelease;

pub(crate) const SOURCE_MODE: &str = "source_mode";
pub(crate) const CREDENTIAL_MODE: &str = "credential_mode";
pub(crate) const BUILDGRAPH_ARGS: &str = "buildgraph_args";
pub(crate) const GITDEPENDENCIES_ARGS: &str = "gitdependencies_args";
pub(crate) const EXCLUDED_COMPONENTS: &str = "excluded_components";
pub(crate) const COMBINE: &str = "combine";

const DEFAULT_SOURCE_MODE: &str = "git";
const VALID_SOURCE_MODES: [&str; 2] = ["git", "copy"];

const WINDOWS_GITDEPENDENCIES_ARGS: &str = "--exclude=Android --exclude=Mac --exclude=Linux";
const LINUX_GITDEPENDENCIES_ARGS: &str =
    "--exclude=Android --exclude=Mac --exclude=Win32 --exclude=Win64";

const COPY_BUG_ADVISORIES: [&str; 3] = [
    "You might hit Docker 20GiB COPY bug",
    "Make sure that `ue4-docker diagnostics 20gig` passes",
    "See https://github.com/adamrehn/ue4-docker/issues/99#issuecomment-1079702817 for details and workarounds",
];

fn report(warnings: &mut Vec<String>, message: impl Into<String>) {
    let message = message.into();
    warn!("{}", message);
    warnings.push(message);
}

/// Closed target set.
#[derive(Debug)]
pub(crate) struct TargetPhase {
    pub targets: BuildTargets,
    pub stage_order: Vec<BuildTarget>,
    pub warnings: Vec<String>,
}

pub(crate) fn resolve_targets(raw: &RawArguments) -> Result<TargetPhase, PlanError> {
    let request = TargetRequest::from_flags(raw.target.as_deref(), raw.no_minimal, raw.no_full)?;

    let mut warnings = Vec::new();
    if request.is_legacy() {
        report(
            &mut warnings,
            "the `--no-minimal` and `--no-full` options are deprecated, please use `--target` instead",
        );
    }

    let targets = BuildTargets::resolve(&request.tokens())?;
    let stage_order = targets.stage_order()?;
    debug!("Stage order: {:?}", stage_order);

    Ok(TargetPhase {
        targets,
        stage_order,
        warnings,
    })
}

/// Targets plus the release being built.
#[derive(Debug)]
pub(crate) struct ReleasePhase {
    pub targets: TargetPhase,
    pub release: Option<ResolvedRelease>,
}

pub(crate) fn resolve_release_phase(
    raw: &RawArguments,
    prior: TargetPhase,
    catalog: &Catalog,
) -> Result<ReleasePhase, PlanError> {
    let selected = select_release(raw.release.as_deref(), raw.ue_version.as_deref())?;

    let release = if prior.targets.source {
        let requested = selected
            .ok_or_else(|| PlanError::configuration("missing `--ue-version` when building source"))?;
        Some(resolve_release(
            &requested,
            raw.repo.as_deref(),
            raw.branch.as_deref(),
            raw.changelist,
            catalog,
        )?)
    } else {
        debug!("Not building source, ignoring release settings");
        None
    };

    Ok(ReleasePhase {
        targets: prior,
        release,
    })
}

/// Platform-independent run settings.
#[derive(Debug, Clone)]
pub(crate) struct CommonFields {
    pub container_platform: ContainerPlatform,
    pub dry_run: bool,
    pub rebuild: bool,
    pub verbose: bool,
    pub suffix: String,
    pub platform_args: Vec<String>,
    pub docker_build_args: Vec<String>,
    pub excluded_components: BTreeSet<ExcludedComponent>,
    pub layout_dir: Option<PathBuf>,
    pub combine: bool,
    pub monitor: bool,
    pub interval_secs: f64,
    pub ignore_blacklist: bool,
    pub prerequisites_dockerfile: Option<PathBuf>,
    pub ue4cli_version: Option<String>,
    pub conan_ue4cli_version: Option<String>,
}

#[derive(Debug)]
pub(crate) struct CommonPhase {
    pub release: ReleasePhase,
    pub common: CommonFields,
}

pub(crate) fn resolve_common(
    raw: &RawArguments,
    host: &HostFacts,
    prior: ReleasePhase,
) -> Result<CommonPhase, PlanError> {
    let container_platform = if host.platform.is_windows() && !raw.linux {
        ContainerPlatform::Windows
    } else {
        ContainerPlatform::Linux
    };

    let interval_secs = raw.interval.unwrap_or(DEFAULT_MONITOR_INTERVAL_SECS);
    if !(interval_secs.is_finite() && interval_secs > 0.0) {
        return Err(PlanError::configuration(format!(
            "the resource monitor interval must be a positive number of seconds, got {interval_secs}"
        )));
    }

    let common = CommonFields {
        container_platform,
        dry_run: raw.dry_run,
        // Generating Dockerfiles always covers every requested image
        rebuild: raw.rebuild || raw.layout.is_some(),
        verbose: raw.verbose,
        suffix: raw.suffix.clone(),
        platform_args: if raw.no_cache {
            vec!["--no-cache".to_string()]
        } else {
            Vec::new()
        },
        docker_build_args: raw.docker_build_args.clone(),
        excluded_components: ExcludedComponent::parse_all(&raw.exclude)?,
        layout_dir: raw.layout.clone(),
        combine: raw.combine,
        monitor: raw.monitor,
        interval_secs,
        ignore_blacklist: raw.ignore_blacklist,
        prerequisites_dockerfile: raw.prerequisites_dockerfile.clone(),
        ue4cli_version: normalize_package_version("ue4cli", raw.ue4cli.as_deref()),
        conan_ue4cli_version: normalize_package_version("conan-ue4cli", raw.conan_ue4cli.as_deref()),
    };
    debug!("Container platform: {}", common.container_platform);

    Ok(CommonPhase {
        release: prior,
        common,
    })
}

/// Everything above plus the template options.
///
/// Later phases return new `OptionsPhase` values with updated options.
#[derive(Debug)]
pub(crate) struct OptionsPhase {
    pub common: CommonPhase,
    pub options: TemplateOptions,
    pub warnings: Vec<String>,
}

impl OptionsPhase {
    pub fn targets(&self) -> &BuildTargets {
        &self.common.release.targets.targets
    }

    pub fn fields(&self) -> &CommonFields {
        &self.common.common
    }

    pub fn release(&self) -> Option<&ResolvedRelease> {
        self.common.release.release.as_ref()
    }
}

pub(crate) fn resolve_options(raw: &RawArguments, prior: CommonPhase) -> Result<OptionsPhase, PlanError> {
    let parsed = TemplateOptions::parse(&raw.opt)?;
    let mut warnings = prior.release.targets.warnings.clone();
    warnings.extend(parsed.warnings);
    debug!("Parsed {} advanced option(s)", parsed.options.len());

    Ok(OptionsPhase {
        common: prior,
        options: parsed.options,
        warnings,
    })
}

fn string_option<'a>(options: &'a TemplateOptions, key: &str) -> Result<Option<&'a str>, PlanError> {
    match options.get(key) {
        None => Ok(None),
        Some(TemplateValue::String(value)) => Ok(Some(value)),
        Some(other) => Err(PlanError::configuration(format!(
            "the `{key}` option must be a string, got {}",
            other.to_json()
        ))),
    }
}

fn quoted_list(values: &[&str]) -> String {
    values.iter().map(|v| format!("'{v}'")).collect::<Vec<_>>().join(", ")
}

/// Cross-cutting invariants and template context defaults.
pub(crate) fn enforce_invariants(prior: OptionsPhase) -> Result<OptionsPhase, PlanError> {
    let building_source = prior.targets().source;
    let OptionsPhase {
        common,
        mut options,
        warnings,
    } = prior;
    let fields = &common.common;
    let has_layout = fields.layout_dir.is_some();

    if has_layout && fields.combine {
        options.insert(COMBINE, true);
    }

    let source_mode_is_default = match options.get(SOURCE_MODE) {
        None => true,
        Some(TemplateValue::String(mode)) => mode == DEFAULT_SOURCE_MODE,
        Some(_) => false,
    };
    if !has_layout && !source_mode_is_default {
        return Err(PlanError::configuration(
            "the `--layout` flag must be used when specifying a non-default value for the `source_mode` option",
        ));
    }
    if !has_layout && fields.combine {
        return Err(PlanError::configuration(
            "the `--layout` flag must be used when specifying the `--combine` flag",
        ));
    }

    if building_source {
        let source_mode = string_option(&options, SOURCE_MODE)?.unwrap_or(DEFAULT_SOURCE_MODE);
        if !VALID_SOURCE_MODES.contains(&source_mode) {
            return Err(PlanError::configuration(format!(
                "invalid value specified for the `source_mode` option, valid values are {}",
                quoted_list(&VALID_SOURCE_MODES)
            )));
        }

        let platform = fields.container_platform;
        let valid_credential_modes: &[&str] = match platform {
            ContainerPlatform::Linux => &["endpoint", "secrets"],
            ContainerPlatform::Windows => &["endpoint"],
        };
        if !options.contains(CREDENTIAL_MODE) {
            let default = match platform {
                ContainerPlatform::Linux => "secrets",
                ContainerPlatform::Windows => "endpoint",
            };
            options.insert(CREDENTIAL_MODE, default);
        }
        let credential_mode = string_option(&options, CREDENTIAL_MODE)?.unwrap_or_default();
        if !valid_credential_modes.contains(&credential_mode) {
            return Err(PlanError::configuration(format!(
                "invalid value specified for the `credential_mode` option, valid values are {} when building {} containers",
                quoted_list(valid_credential_modes),
                platform.title()
            )));
        }
    }

    let excluded: Map<String, Value> = ExcludedComponent::ALL
        .iter()
        .map(|c| (c.as_str().to_string(), Value::Bool(fields.excluded_components.contains(c))))
        .collect();
    options.insert(EXCLUDED_COMPONENTS, TemplateValue::Structured(Value::Object(excluded)));

    if !options.contains(GITDEPENDENCIES_ARGS) {
        let args = match fields.container_platform {
            ContainerPlatform::Windows => WINDOWS_GITDEPENDENCIES_ARGS,
            ContainerPlatform::Linux => LINUX_GITDEPENDENCIES_ARGS,
        };
        options.insert(GITDEPENDENCIES_ARGS, args);
    }

    Ok(OptionsPhase {
        common,
        options,
        warnings,
    })
}

/// Advisories about the Docker 20GiB COPY defect on Windows.
pub(crate) fn windows_advisories(prior: OptionsPhase) -> OptionsPhase {
    if prior.fields().container_platform != ContainerPlatform::Windows {
        return prior;
    }

    let OptionsPhase {
        common,
        options,
        mut warnings,
    } = prior;

    let mut at_risk = false;
    if !common.common.excluded_components.contains(&ExcludedComponent::Debug) {
        report(&mut warnings, "You didn't pass --exclude debug");
        at_risk = true;
    }
    let engine_5 = common
        .release
        .release
        .as_ref()
        .and_then(|r| r.release.version())
        .is_some_and(|v| v.major >= 5);
    if engine_5 {
        report(&mut warnings, "You're building Unreal Engine 5");
        at_risk = true;
    }
    if at_risk {
        for advisory in COPY_BUG_ADVISORIES {
            report(&mut warnings, advisory);
        }
    }

    OptionsPhase {
        common,
        options,
        warnings,
    }
}

#[derive(Debug)]
pub(crate) struct PlatformPhase {
    pub options: OptionsPhase,
    pub platform: PlatformConfig,
}

pub(crate) fn generate_platform<R: Rng>(
    raw: &RawArguments,
    host: &HostFacts,
    catalog: &Catalog,
    prior: OptionsPhase,
    rng: &mut R,
) -> Result<PlatformPhase, PlanError> {
    match prior.fields().container_platform {
        ContainerPlatform::Windows => {
            let toolchain = raw.visual_studio.as_deref().unwrap_or(&catalog.defaults.visual_studio);
            let needs_marker = catalog
                .toolchain(toolchain)
                .is_ok_and(|toolchain| toolchain.pass_version_flag);
            let buildgraph_args = if needs_marker {
                string_option(&prior.options, BUILDGRAPH_ARGS)?
            } else {
                None
            };
            let request = WindowsRequest {
                visual_studio: raw.visual_studio.as_deref(),
                release: prior.release().map(|r| &r.release),
                buildgraph_args,
                basetag: raw.basetag.as_deref(),
                isolation: raw.isolation.as_deref(),
                memory: raw.memory.as_deref(),
                random_memory: raw.random_memory,
            };
            let outcome = platform::windows::generate(&request, host, catalog, rng)?;

            let mut next = prior;
            if let Some(args) = outcome.buildgraph_args {
                next.options.insert(BUILDGRAPH_ARGS, args);
            }
            Ok(PlatformPhase {
                options: next,
                platform: PlatformConfig::Windows(outcome.config),
            })
        }
        ContainerPlatform::Linux => {
            let request = LinuxRequest {
                basetag: raw.basetag.as_deref(),
                cuda: raw.cuda.as_deref(),
                suffix: &prior.fields().suffix,
            };
            let config = platform::linux::generate(&request, catalog)?;
            Ok(PlatformPhase {
                options: prior,
                platform: PlatformConfig::Linux(config),
            })
        }
    }
}

/// Non-empty suffixes are joined to image tags with a dash.
pub(crate) fn format_suffix(suffix: &str) -> String {
    if suffix.is_empty() {
        String::new()
    } else {
        format!("-{suffix}")
    }
}
