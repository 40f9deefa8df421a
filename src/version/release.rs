//! Release specifier classification.
//!
//! A release is either numeric (an official engine release cloned from the default
//! repository at its `-release` branch) or custom (`custom` / `custom:<label>`, with
//! an explicit repository and branch/tag). Official `.0` releases are pinned to a
//! known changelist so images built from them match launcher builds.

use serde::Serialize;
use tracing::debug;

use super::ProductVersion;
use crate::catalog::Catalog;
use crate::core::PlanError;

/// Where the engine source for a build comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Release {
    /// An official numbered release
    Numeric {
        /// Validated engine version
        version: ProductVersion,
        /// Repository to clone
        repository: String,
        /// Branch to clone (`<version>-release`)
        branch: String,
    },
    /// A user-supplied repository and branch/tag
    Custom {
        /// Release name used in image tags (`custom` or the supplied label)
        label: String,
        /// Repository to clone
        repository: String,
        /// Branch or tag to clone
        branch: String,
    },
}

impl Release {
    /// Whether this release points at a custom repository.
    #[must_use]
    pub const fn is_custom(&self) -> bool {
        matches!(self, Self::Custom { .. })
    }

    /// Numeric version, if this is an official release.
    #[must_use]
    pub const fn version(&self) -> Option<&ProductVersion> {
        match self {
            Self::Numeric {
                version,
                ..
            } => Some(version),
            Self::Custom {
                ..
            } => None,
        }
    }

    /// Release name used in image tags.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Numeric {
                version,
                ..
            } => version.to_string(),
            Self::Custom {
                label,
                ..
            } => label.clone(),
        }
    }

    /// Repository the source stage clones.
    #[must_use]
    pub fn repository(&self) -> &str {
        match self {
            Self::Numeric {
                repository,
                ..
            }
            | Self::Custom {
                repository,
                ..
            } => repository,
        }
    }

    /// Branch or tag the source stage checks out.
    #[must_use]
    pub fn branch(&self) -> &str {
        match self {
            Self::Numeric {
                branch,
                ..
            }
            | Self::Custom {
                branch,
                ..
            } => branch,
        }
    }
}

/// A classified release together with its changelist pin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRelease {
    /// The classified release
    pub release: Release,
    /// Changelist written into `Build.version`; `None` means "leave as is"
    pub changelist: Option<u64>,
}

/// Pick the release string from the deprecated positional argument or `--ue-version`.
///
/// # Errors
///
/// Returns [`PlanError::ConflictingSpecifier`] when both are supplied.
pub fn select_release(
    positional: Option<&str>,
    ue_version: Option<&str>,
) -> Result<Option<String>, PlanError> {
    match (positional, ue_version) {
        (Some(_), Some(_)) => Err(PlanError::conflicting(
            "specified both `--ue-version` and the old positional version option; please use only `--ue-version`!",
        )),
        (Some(value), None) | (None, Some(value)) => Ok(Some(value.to_string())),
        (None, None) => Ok(None),
    }
}

/// Classify a release string and derive repository, branch and changelist.
///
/// The string is lower-cased first. `custom` and `custom:<label>` require both
/// `repository` and `branch`; anything else must be a strict numeric version.
/// An explicit `changelist_override` always wins; otherwise numeric releases found
/// in the catalog's changelist table (exact key match) are pinned.
///
/// # Errors
///
/// - [`PlanError::MissingCustomRepo`] for custom releases without repository and branch
/// - [`PlanError::InvalidVersion`] for malformed numeric releases
pub fn resolve_release(
    raw: &str,
    repository: Option<&str>,
    branch: Option<&str>,
    changelist_override: Option<u64>,
    catalog: &Catalog,
) -> Result<ResolvedRelease, PlanError> {
    let release = raw.to_lowercase();

    if release == "custom" || release.starts_with("custom:") {
        let (Some(repository), Some(branch)) = (repository, branch) else {
            return Err(PlanError::MissingCustomRepo);
        };

        let label = release
            .split(':')
            .nth(1)
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .unwrap_or("custom")
            .to_string();

        debug!("Custom release '{}' from {} @ {}", label, repository, branch);
        return Ok(ResolvedRelease {
            release: Release::Custom {
                label,
                repository: repository.to_string(),
                branch: branch.to_string(),
            },
            changelist: changelist_override,
        });
    }

    let version = ProductVersion::parse(&release)?;
    let changelist = changelist_override
        .or_else(|| catalog.release_changelists.get(&version.to_string()).copied());

    debug!("Numeric release {} (changelist: {:?})", version, changelist);
    Ok(ResolvedRelease {
        release: Release::Numeric {
            version,
            repository: catalog.defaults.git_repository.clone(),
            branch: format!("{version}-release"),
        },
        changelist,
    })
}
