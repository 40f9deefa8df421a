//! The `resolve` subcommand.
//!
//! Loads the user config, probes the host, runs the [`ConfigurationResolver`] and
//! prints the resulting plan. Nothing is built; the output is meant for a build
//! executor or a human checking what would happen.
//!
//! ```bash
//! ue4-docker-config resolve --ue-version 5.3.0 --linux
//! ue4-docker-config resolve custom:main --repo https://example.com/ue.git --branch main --format json
//! ue4-docker-config resolve --ue-version 5.3.0 --linux --cuda --format context
//! ```

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use tracing::info;

use crate::catalog::Catalog;
use crate::config::UserConfig;
use crate::host::HostFacts;
use crate::platform::PlatformConfig;
use crate::resolver::{ConfigurationResolver, RawArguments, ResolvedConfiguration};
use crate::templating::template_context;

/// How the resolved plan is printed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Coloured, human-readable summary.
    #[default]
    Text,
    /// The serialized resolved configuration.
    Json,
    /// The flat template context handed to the Dockerfile renderer.
    Context,
}

/// Flags accepted by `resolve`.
#[derive(Args, Debug, Clone, Default)]
pub struct ResolveCommand {
    /// Release to build (deprecated, use `--ue-version`)
    pub release: Option<String>,

    /// Engine release: `5.3.0` or `custom:<label>`
    #[arg(long)]
    pub ue_version: Option<String>,

    /// Build Linux containers even on a Windows host
    #[arg(long)]
    pub linux: bool,

    /// Rebuild images that already exist
    #[arg(long)]
    pub rebuild: bool,

    /// Print commands instead of running them
    #[arg(long)]
    pub dry_run: bool,

    /// Don't build the minimal image (deprecated, use `--target`)
    #[arg(long)]
    pub no_minimal: bool,

    /// Don't build the full image (deprecated, use `--target`)
    #[arg(long)]
    pub no_full: bool,

    /// Disable the Docker build cache
    #[arg(long)]
    pub no_cache: bool,

    /// Targets to build; repeatable and comma-separated
    #[arg(long)]
    pub target: Option<Vec<String>>,

    /// Use a random memory limit for Windows containers
    #[arg(long)]
    pub random_memory: bool,

    /// Extra argument passed verbatim to `docker build`
    #[arg(long = "docker-build-args", allow_hyphen_values = true)]
    pub docker_build_args: Vec<String>,

    /// Component to exclude: ddc, debug or templates
    #[arg(long)]
    pub exclude: Vec<String>,

    /// Template option as `KEY=VALUE` or `KEY`
    #[arg(long)]
    pub opt: Vec<String>,

    /// Use a CUDA base image; without a value the default CUDA version is used.
    /// A following word is taken as the version (`--cuda 11.8.0` == `--cuda=11.8.0`)
    #[arg(long, num_args = 0..=1, default_missing_value = "")]
    pub cuda: Option<String>,

    /// Visual Studio toolchain for Windows builds
    #[arg(long)]
    pub visual_studio: Option<String>,

    /// Git repository for custom releases
    #[arg(long)]
    pub repo: Option<String>,

    /// Git branch for custom releases
    #[arg(long)]
    pub branch: Option<String>,

    /// Windows isolation mode: process or hyperv
    #[arg(long)]
    pub isolation: Option<String>,

    /// Base image tag override
    #[arg(long)]
    pub basetag: Option<String>,

    /// Suffix appended to image tags
    #[arg(long, default_value = "")]
    pub suffix: String,

    /// Memory limit for Windows containers, e.g. `16GB`
    #[arg(short = 'm', long = "memory")]
    pub memory: Option<String>,

    /// ue4cli package version override
    #[arg(long)]
    pub ue4cli: Option<String>,

    /// conan-ue4cli package version override
    #[arg(long)]
    pub conan_ue4cli: Option<String>,

    /// Write generated Dockerfiles to this directory
    #[arg(long)]
    pub layout: Option<PathBuf>,

    /// Combine generated Dockerfiles into one (requires `--layout`)
    #[arg(long)]
    pub combine: bool,

    /// Monitor resource usage during builds
    #[arg(long)]
    pub monitor: bool,

    /// Resource sampling interval in seconds
    #[arg(long)]
    pub interval: Option<f64>,

    /// Ignore the host blacklist
    #[arg(long)]
    pub ignore_blacklist: bool,

    /// Changelist override for the engine build
    #[arg(long)]
    pub changelist: Option<u64>,

    /// Custom Dockerfile for the build-prerequisites stage
    #[arg(long)]
    pub prerequisites_dockerfile: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl ResolveCommand {
    /// Convert the parsed flags into the resolver's raw argument record.
    #[must_use]
    pub fn to_raw_arguments(&self, verbose: bool) -> RawArguments {
        RawArguments {
            release: self.release.clone(),
            ue_version: self.ue_version.clone(),
            linux: self.linux,
            rebuild: self.rebuild,
            dry_run: self.dry_run,
            no_minimal: self.no_minimal,
            no_full: self.no_full,
            no_cache: self.no_cache,
            target: self.target.clone(),
            random_memory: self.random_memory,
            docker_build_args: self.docker_build_args.clone(),
            exclude: self.exclude.clone(),
            opt: self.opt.clone(),
            cuda: self.cuda.clone(),
            visual_studio: self.visual_studio.clone(),
            repo: self.repo.clone(),
            branch: self.branch.clone(),
            isolation: self.isolation.clone(),
            basetag: self.basetag.clone(),
            suffix: self.suffix.clone(),
            memory: self.memory.clone(),
            ue4cli: self.ue4cli.clone(),
            conan_ue4cli: self.conan_ue4cli.clone(),
            layout: self.layout.clone(),
            combine: self.combine,
            monitor: self.monitor,
            interval: self.interval,
            ignore_blacklist: self.ignore_blacklist,
            verbose,
            changelist: self.changelist,
            prerequisites_dockerfile: self.prerequisites_dockerfile.clone(),
        }
    }

    /// Resolve and print the plan.
    ///
    /// # Errors
    ///
    /// Fails when the user config cannot be loaded or resolution rejects the flags.
    pub async fn execute(self, config_path: Option<PathBuf>, verbose: bool) -> Result<()> {
        let user_config = UserConfig::load(config_path.as_deref()).await?;
        let catalog = user_config.apply_to(Catalog::builtin())?;

        let host = HostFacts::probe().await;

        let resolver = ConfigurationResolver::new(catalog, host);
        let resolved = resolver.resolve(&self.to_raw_arguments(verbose))?;
        info!("Resolved {} container plan", resolved.container_platform());

        let output = render(&resolved, self.format)?;
        println!("{output}");
        Ok(())
    }
}

/// Render a resolved plan in the requested format.
///
/// # Errors
///
/// Fails only if JSON serialization fails.
pub fn render(resolved: &ResolvedConfiguration, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(resolved)),
        OutputFormat::Json => serde_json::to_string_pretty(resolved)
            .context("Failed to serialize resolved configuration"),
        OutputFormat::Context => serde_json::to_string_pretty(&template_context(resolved))
            .context("Failed to serialize template context"),
    }
}

fn field(name: &str, value: impl std::fmt::Display) -> String {
    format!("  {:<16} {}\n", format!("{name}:").cyan(), value)
}

fn render_text(resolved: &ResolvedConfiguration) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n",
        format!("Build plan ({} containers)", resolved.container_platform()).bold()
    ));

    let stages: Vec<String> = resolved.stage_order().iter().map(ToString::to_string).collect();
    out.push_str(&field("Stages", stages.join(" -> ")));

    if let Some(name) = resolved.release_name() {
        let release = match resolved.changelist() {
            Some(changelist) => format!("{name} (changelist {changelist})"),
            None => name,
        };
        out.push_str(&field("Release", release));
    }
    if let Some(repository) = resolved.repository() {
        out.push_str(&field("Repository", repository));
    }
    if let Some(branch) = resolved.branch() {
        out.push_str(&field("Branch", branch));
    }

    out.push_str(&field("Base image", resolved.base_image()));
    out.push_str(&field("Prereqs tag", resolved.prereqs_tag()));

    match resolved.platform() {
        PlatformConfig::Windows(windows) => {
            out.push_str(&field("Isolation", windows.isolation));
            if let Some(limit) = windows.memory_limit_gb {
                out.push_str(&field("Memory limit", format!("{limit:.2}GB")));
            }
            out.push_str(&field(
                "Visual Studio",
                format!("{} ({})", windows.visual_studio, windows.visual_studio_build_number),
            ));
        }
        PlatformConfig::Linux(linux) => {
            if let Some(cuda) = &linux.cuda_version {
                out.push_str(&field("CUDA", cuda));
            }
        }
    }

    let excluded = resolved.describe_excluded_components();
    if !excluded.is_empty() {
        out.push_str(&field("Excluded", excluded.join(", ")));
    }
    if !resolved.suffix().is_empty() {
        out.push_str(&field("Suffix", resolved.suffix()));
    }
    if !resolved.platform_args().is_empty() {
        out.push_str(&field("Platform args", resolved.platform_args().join(" ")));
    }
    if let Some(layout) = resolved.layout_dir() {
        out.push_str(&field("Layout", layout.display()));
    }

    if !resolved.warnings().is_empty() {
        out.push('\n');
        out.push_str(&format!("{}\n", "Warnings:".yellow().bold()));
        for warning in resolved.warnings() {
            out.push_str(&format!("  {} {warning}\n", "⚠".yellow()));
        }
    }

    out.trim_end().to_string()
}
