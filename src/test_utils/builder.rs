//! Fluent builder for [`RawArguments`] in tests.

use std::path::PathBuf;

use crate::resolver::RawArguments;

/// Builds a [`RawArguments`] record one flag at a time.
#[derive(Debug, Clone, Default)]
pub struct RawArgumentsBuilder {
    raw: RawArguments,
}

impl RawArgumentsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn release(mut self, release: &str) -> Self {
        self.raw.release = Some(release.to_string());
        self
    }

    pub fn ue_version(mut self, version: &str) -> Self {
        self.raw.ue_version = Some(version.to_string());
        self
    }

    /// Append a `--target` value (may itself be comma-separated).
    pub fn target(mut self, target: &str) -> Self {
        self.raw.target.get_or_insert_with(Vec::new).push(target.to_string());
        self
    }

    pub fn no_minimal(mut self) -> Self {
        self.raw.no_minimal = true;
        self
    }

    pub fn no_full(mut self) -> Self {
        self.raw.no_full = true;
        self
    }

    pub fn linux(mut self) -> Self {
        self.raw.linux = true;
        self
    }

    pub fn no_cache(mut self) -> Self {
        self.raw.no_cache = true;
        self
    }

    pub fn rebuild(mut self) -> Self {
        self.raw.rebuild = true;
        self
    }

    pub fn dry_run(mut self) -> Self {
        self.raw.dry_run = true;
        self
    }

    pub fn exclude(mut self, component: &str) -> Self {
        self.raw.exclude.push(component.to_string());
        self
    }

    pub fn opt(mut self, option: &str) -> Self {
        self.raw.opt.push(option.to_string());
        self
    }

    pub fn cuda(mut self, version: &str) -> Self {
        self.raw.cuda = Some(version.to_string());
        self
    }

    pub fn visual_studio(mut self, name: &str) -> Self {
        self.raw.visual_studio = Some(name.to_string());
        self
    }

    pub fn repo(mut self, repo: &str) -> Self {
        self.raw.repo = Some(repo.to_string());
        self
    }

    pub fn branch(mut self, branch: &str) -> Self {
        self.raw.branch = Some(branch.to_string());
        self
    }

    pub fn isolation(mut self, mode: &str) -> Self {
        self.raw.isolation = Some(mode.to_string());
        self
    }

    pub fn basetag(mut self, basetag: &str) -> Self {
        self.raw.basetag = Some(basetag.to_string());
        self
    }

    pub fn suffix(mut self, suffix: &str) -> Self {
        self.raw.suffix = suffix.to_string();
        self
    }

    pub fn memory(mut self, limit: &str) -> Self {
        self.raw.memory = Some(limit.to_string());
        self
    }

    pub fn random_memory(mut self) -> Self {
        self.raw.random_memory = true;
        self
    }

    pub fn ue4cli(mut self, version: &str) -> Self {
        self.raw.ue4cli = Some(version.to_string());
        self
    }

    pub fn conan_ue4cli(mut self, version: &str) -> Self {
        self.raw.conan_ue4cli = Some(version.to_string());
        self
    }

    pub fn layout(mut self, dir: impl Into<PathBuf>) -> Self {
        self.raw.layout = Some(dir.into());
        self
    }

    pub fn combine(mut self) -> Self {
        self.raw.combine = true;
        self
    }

    pub fn changelist(mut self, changelist: u64) -> Self {
        self.raw.changelist = Some(changelist);
        self
    }

    pub fn docker_build_arg(mut self, arg: &str) -> Self {
        self.raw.docker_build_args.push(arg.to_string());
        self
    }

    pub fn interval(mut self, seconds: f64) -> Self {
        self.raw.interval = Some(seconds);
        self
    }

    pub fn build(self) -> RawArguments {
        self.raw
    }
}
