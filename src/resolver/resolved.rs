//! The immutable result of resolution.

use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::core::ContainerPlatform;
use crate::options::{ExcludedComponent, TemplateOptions};
use crate::platform::PlatformConfig;
use crate::targets::{BuildTarget, BuildTargets};
use crate::version::{Release, ResolvedRelease};

/// A fully validated build plan.
///
/// Constructed only by [`ConfigurationResolver`](super::ConfigurationResolver) and
/// exposed read-only, so it can be shared freely between a build executor, a
/// template renderer and a resource monitor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedConfiguration {
    pub(crate) release: Option<ResolvedRelease>,
    pub(crate) targets: BuildTargets,
    pub(crate) stage_order: Vec<BuildTarget>,
    pub(crate) container_platform: ContainerPlatform,
    pub(crate) excluded_components: BTreeSet<ExcludedComponent>,
    pub(crate) options: TemplateOptions,
    pub(crate) platform: PlatformConfig,
    pub(crate) platform_args: Vec<String>,
    pub(crate) docker_build_args: Vec<String>,
    pub(crate) suffix: String,
    pub(crate) dry_run: bool,
    pub(crate) rebuild: bool,
    pub(crate) verbose: bool,
    pub(crate) layout_dir: Option<PathBuf>,
    pub(crate) combine: bool,
    pub(crate) monitor: bool,
    pub(crate) interval_secs: f64,
    pub(crate) ignore_blacklist: bool,
    pub(crate) prerequisites_dockerfile: Option<PathBuf>,
    pub(crate) ue4cli_version: Option<String>,
    pub(crate) conan_ue4cli_version: Option<String>,
    pub(crate) warnings: Vec<String>,
}

impl ResolvedConfiguration {
    /// Resolved release and changelist; `None` unless `source` is built.
    #[must_use]
    pub const fn resolved_release(&self) -> Option<&ResolvedRelease> {
        self.release.as_ref()
    }

    #[must_use]
    pub fn release(&self) -> Option<&Release> {
        self.release.as_ref().map(|r| &r.release)
    }

    /// Release name used in image tags: `5.3.0`, or the custom label.
    #[must_use]
    pub fn release_name(&self) -> Option<String> {
        self.release().map(Release::name)
    }

    #[must_use]
    pub fn is_custom(&self) -> bool {
        self.release().is_some_and(Release::is_custom)
    }

    #[must_use]
    pub fn repository(&self) -> Option<&str> {
        self.release().map(Release::repository)
    }

    #[must_use]
    pub fn branch(&self) -> Option<&str> {
        self.release().map(Release::branch)
    }

    #[must_use]
    pub fn changelist(&self) -> Option<u64> {
        self.release.as_ref().and_then(|r| r.changelist)
    }

    #[must_use]
    pub const fn targets(&self) -> &BuildTargets {
        &self.targets
    }

    /// Active stages, dependencies first.
    #[must_use]
    pub fn stage_order(&self) -> &[BuildTarget] {
        &self.stage_order
    }

    #[must_use]
    pub const fn container_platform(&self) -> ContainerPlatform {
        self.container_platform
    }

    #[must_use]
    pub const fn excluded_components(&self) -> &BTreeSet<ExcludedComponent> {
        &self.excluded_components
    }

    /// Sorted descriptions of the excluded components.
    #[must_use]
    pub fn describe_excluded_components(&self) -> Vec<&'static str> {
        let mut descriptions: Vec<_> =
            self.excluded_components.iter().map(ExcludedComponent::description).collect();
        descriptions.sort_unstable();
        descriptions
    }

    /// Template options, including the standard context values.
    #[must_use]
    pub const fn options(&self) -> &TemplateOptions {
        &self.options
    }

    #[must_use]
    pub const fn platform(&self) -> &PlatformConfig {
        &self.platform
    }

    #[must_use]
    pub fn base_image(&self) -> &str {
        self.platform.base_image()
    }

    #[must_use]
    pub fn prereqs_tag(&self) -> &str {
        self.platform.prereqs_tag()
    }

    /// Flags for every `docker build`: `--no-cache`, isolation and memory.
    #[must_use]
    pub fn platform_args(&self) -> &[String] {
        &self.platform_args
    }

    /// Extra user-supplied `docker build` arguments.
    #[must_use]
    pub fn docker_build_args(&self) -> &[String] {
        &self.docker_build_args
    }

    /// Tag suffix including its leading dash, or empty.
    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    #[must_use]
    pub const fn dry_run(&self) -> bool {
        self.dry_run
    }

    #[must_use]
    pub const fn rebuild(&self) -> bool {
        self.rebuild
    }

    #[must_use]
    pub const fn verbose(&self) -> bool {
        self.verbose
    }

    #[must_use]
    pub fn layout_dir(&self) -> Option<&Path> {
        self.layout_dir.as_deref()
    }

    #[must_use]
    pub const fn combine(&self) -> bool {
        self.combine
    }

    #[must_use]
    pub const fn monitor(&self) -> bool {
        self.monitor
    }

    #[must_use]
    pub const fn interval_secs(&self) -> f64 {
        self.interval_secs
    }

    #[must_use]
    pub const fn ignore_blacklist(&self) -> bool {
        self.ignore_blacklist
    }

    #[must_use]
    pub fn prerequisites_dockerfile(&self) -> Option<&Path> {
        self.prerequisites_dockerfile.as_deref()
    }

    #[must_use]
    pub fn ue4cli_version(&self) -> Option<&str> {
        self.ue4cli_version.as_deref()
    }

    #[must_use]
    pub fn conan_ue4cli_version(&self) -> Option<&str> {
        self.conan_ue4cli_version.as_deref()
    }

    /// Non-fatal warnings raised during resolution, in order.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}
