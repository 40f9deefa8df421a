//! Build configuration resolution.
//!
//! [`ConfigurationResolver`] turns a [`RawArguments`] record plus [`HostFacts`] into
//! a [`ResolvedConfiguration`], or fails with a single [`PlanError`].
//!
//! # Phases
//!
//! Resolution is one linear pass. Each phase takes the previous snapshot by value
//! and returns a new one:
//!
//! 1. **Targets**: target request (legacy or `--target`), closure, stage order
//! 2. **Release**: only when `source` is built; classifies the release and pins `.0` changelists
//! 3. **Common fields**: container platform, run-mode flags, excluded components,
//!    package overrides
//! 4. **Options**: `--opt` parsing and coercion
//! 5. **Invariants**: layout/combine/`source_mode` rules, credential mode defaults,
//!    standard template values
//! 6. **Advisories**: Windows 20GiB COPY warnings
//! 7. **Platform**: the Windows or Linux branch
//! 8. **Suffix**: `-<suffix>` formatting
//!
//! No phase performs I/O. Host facts and catalogs are supplied at construction.
//!
//! # Example
//!
//! ```rust
//! use ue4_docker_config::catalog::Catalog;
//! use ue4_docker_config::host::{HostFacts, HostPlatform};
//! use ue4_docker_config::resolver::{ConfigurationResolver, RawArguments};
//!
//! let resolver = ConfigurationResolver::new(Catalog::builtin(), HostFacts::new(HostPlatform::Linux));
//! let raw = RawArguments {
//!     ue_version: Some("5.3.0".to_string()),
//!     ..Default::default()
//! };
//! let config = resolver.resolve(&raw).unwrap();
//! assert_eq!(config.release_name().as_deref(), Some("5.3.0"));
//! assert_eq!(config.changelist(), Some(27_405_482));
//! ```

pub mod arguments;
mod phases;
pub mod resolved;


pub use arguments::RawArguments;
pub use resolved::ResolvedConfiguration;

use rand::Rng;
use tracing::debug;

use crate::catalog::Catalog;
use crate::core::PlanError;
use crate::host::HostFacts;

/// Resolves raw arguments against fixed catalogs and host facts.
#[derive(Debug, Clone)]
pub struct ConfigurationResolver {
    catalog: Catalog,
    host: HostFacts,
}

impl ConfigurationResolver {
    #[must_use]
    pub fn new(catalog: Catalog, host: HostFacts) -> Self {
        Self { catalog, host }
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn host(&self) -> &HostFacts {
        &self.host
    }

    /// Resolve using the thread-local RNG for `--random-memory`.
    ///
    /// # Errors
    ///
    /// Returns the first [`PlanError`] raised by any phase.
    pub fn resolve(&self, raw: &RawArguments) -> Result<ResolvedConfiguration, PlanError> {
        self.resolve_with_rng(raw, &mut rand::rng())
    }

    /// Resolve with a caller-supplied RNG.
    ///
    /// # Errors
    ///
    /// Returns the first [`PlanError`] raised by any phase.
    pub fn resolve_with_rng<R: Rng>(
        &self,
        raw: &RawArguments,
        rng: &mut R,
    ) -> Result<ResolvedConfiguration, PlanError> {
        let targets = phases::resolve_targets(raw)?;
        let release = phases::resolve_release_phase(raw, targets, &self.catalog)?;
        let common = phases::resolve_common(raw, &self.host, release)?;
        let options = phases::resolve_options(raw, common)?;
        let options = phases::enforce_invariants(options)?;
        let options = phases::windows_advisories(options);
        let platform = phases::generate_platform(raw, &self.host, &self.catalog, options, rng)?;

        let phases::PlatformPhase {
            options:
                phases::OptionsPhase {
                    common:
                        phases::CommonPhase {
                            release:
                                phases::ReleasePhase {
                                    targets: target_phase,
                                    release,
                                },
                            common: fields,
                        },
                    options,
                    warnings,
                },
            platform,
        } = platform;

        let mut platform_args = fields.platform_args;
        platform_args.extend(platform.cli_flags());

        let resolved = ResolvedConfiguration {
            release,
            targets: target_phase.targets,
            stage_order: target_phase.stage_order,
            container_platform: fields.container_platform,
            excluded_components: fields.excluded_components,
            options,
            platform,
            platform_args,
            docker_build_args: fields.docker_build_args,
            suffix: phases::format_suffix(&fields.suffix),
            dry_run: fields.dry_run,
            rebuild: fields.rebuild,
            verbose: fields.verbose,
            layout_dir: fields.layout_dir,
            combine: fields.combine,
            monitor: fields.monitor,
            interval_secs: fields.interval_secs,
            ignore_blacklist: fields.ignore_blacklist,
            prerequisites_dockerfile: fields.prerequisites_dockerfile,
            ue4cli_version: fields.ue4cli_version,
            conan_ue4cli_version: fields.conan_ue4cli_version,
            warnings,
        };

        debug!(
            "Resolved {} plan with stages {:?}",
            resolved.container_platform, resolved.stage_order
        );
        Ok(resolved)
    }
}
