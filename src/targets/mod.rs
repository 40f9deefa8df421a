//! Build target selection and dependency closure.
//!
//! Users pick which images to build either with the `--target` list (repeatable,
//! comma-separated, `all` as a wildcard) or with the deprecated `--no-minimal` /
//! `--no-full` switches. Both surfaces are translated into a common
//! [`TargetRequest`], which is then closed over the fixed stage DAG into a
//! [`BuildTargets`] record.
//!
//! [`BuildTargets`] always carries every closure stage as an explicit boolean;
//! consumers never have to guess whether a missing key means "off".
//!
//! # Examples
//!
//! ```rust
//! use ue4_docker_config::targets::{BuildTargets, TargetRequest};
//!
//! let request = TargetRequest::from_flags(Some(["full".to_string()].as_slice()), false, false).unwrap();
//! let targets = BuildTargets::resolve(&request.tokens()).unwrap();
//! assert!(targets.full && targets.minimal && targets.source && targets.build_prerequisites);
//! ```

pub mod graph;

pub use graph::StageGraph;

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::core::PlanError;

/// Wildcard token selecting every closure stage.
pub const ALL_TARGETS: &str = "all";

/// One stage of the container image pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuildTarget {
    /// Toolchain and OS prerequisites image
    BuildPrerequisites,
    /// Engine source checkout
    Source,
    /// Standalone engine build, not reachable from the closure rules
    Engine,
    /// Installed engine build
    Minimal,
    /// Installed build plus tooling
    Full,
}

impl BuildTarget {
    /// Stages that take part in closure, in dependency order.
    pub const CLOSURE_STAGES: [Self; 4] =
        [Self::BuildPrerequisites, Self::Source, Self::Minimal, Self::Full];

    /// Token used on the command line.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BuildPrerequisites => "build-prerequisites",
            Self::Source => "source",
            Self::Engine => "engine",
            Self::Minimal => "minimal",
            Self::Full => "full",
        }
    }

    /// Name of the image this stage produces.
    #[must_use]
    pub fn image_name(&self) -> String {
        format!("ue4-{}", self.as_str())
    }

    /// Every token accepted by [`BuildTargets::resolve`], sorted, with `all` first.
    #[must_use]
    pub fn valid_tokens() -> Vec<String> {
        let mut stages: Vec<&str> = Self::CLOSURE_STAGES.iter().map(Self::as_str).collect();
        stages.sort_unstable();
        std::iter::once(ALL_TARGETS).chain(stages).map(str::to_string).collect()
    }
}

impl fmt::Display for BuildTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildTarget {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "build-prerequisites" => Ok(Self::BuildPrerequisites),
            "source" => Ok(Self::Source),
            "engine" => Ok(Self::Engine),
            "minimal" => Ok(Self::Minimal),
            "full" => Ok(Self::Full),
            other => Err(PlanError::UnknownTarget {
                target: other.to_string(),
                valid: Self::valid_tokens(),
            }),
        }
    }
}

/// What the user asked for, before closure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetRequest {
    /// No target flags at all; builds `minimal` and what it needs
    Default,
    /// Deprecated `--no-minimal` / `--no-full` switches
    Legacy {
        /// `--no-minimal` (implies `no_full`)
        no_minimal: bool,
        /// `--no-full`
        no_full: bool,
    },
    /// `--target` tokens, already split on commas
    Explicit(Vec<String>),
}

impl TargetRequest {
    /// Build a request from the raw flag values.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::ConflictingSpecifier`] when `--target` is combined with
    /// either legacy switch, whatever the target list contains.
    pub fn from_flags(
        targets: Option<&[String]>,
        no_minimal: bool,
        no_full: bool,
    ) -> Result<Self, PlanError> {
        let legacy = no_minimal || no_full;
        match (targets, legacy) {
            (Some(_), true) => Err(PlanError::conflicting(
                "specified both `--target` and the old `--no-*` options; please use only `--target`!",
            )),
            (Some(values), false) => Ok(Self::Explicit(
                values
                    .iter()
                    .flat_map(|value| value.split(','))
                    .map(str::to_string)
                    .collect(),
            )),
            (None, true) => Ok(Self::Legacy {
                no_minimal,
                no_full: no_full || no_minimal,
            }),
            (None, false) => Ok(Self::Default),
        }
    }

    /// Whether the request uses the deprecated switches.
    #[must_use]
    pub const fn is_legacy(&self) -> bool {
        matches!(self, Self::Legacy { .. })
    }

    /// Target tokens equivalent to this request.
    #[must_use]
    pub fn tokens(&self) -> Vec<String> {
        match self {
            Self::Default => vec![BuildTarget::Minimal.to_string()],
            Self::Legacy {
                no_minimal,
                no_full,
            } => {
                let mut tokens = Vec::new();
                if !no_full {
                    tokens.push(BuildTarget::Full.to_string());
                }
                if !no_minimal {
                    tokens.push(BuildTarget::Minimal.to_string());
                }
                // Disabling these was never supported by the legacy switches
                tokens.push(BuildTarget::Source.to_string());
                tokens.push(BuildTarget::BuildPrerequisites.to_string());
                tokens
            }
            Self::Explicit(tokens) => tokens.clone(),
        }
    }
}

/// Closed set of stages to build.
///
/// Every closure stage is present as an explicit flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BuildTargets {
    /// `build-prerequisites`
    pub build_prerequisites: bool,
    /// `source`
    pub source: bool,
    /// `minimal`
    pub minimal: bool,
    /// `full`
    pub full: bool,
}

impl BuildTargets {
    /// Validate requested tokens and apply the closure rules.
    ///
    /// Rules, applied in a single pass:
    /// `full|all => minimal`, `minimal|all => source`,
    /// `source|all => build-prerequisites`, `build-prerequisites|all => build-prerequisites`.
    ///
    /// # Errors
    ///
    /// - [`PlanError::UnknownTarget`] for unrecognised tokens, and for `engine`,
    ///   which no closure rule reaches
    /// - [`PlanError::EmptyPlan`] if closure somehow leaves out `build-prerequisites`
    pub fn resolve(tokens: &[String]) -> Result<Self, PlanError> {
        let mut active: BTreeSet<BuildTarget> = BTreeSet::new();
        let mut all = false;

        for token in tokens {
            if token == ALL_TARGETS {
                all = true;
                continue;
            }
            let stage: BuildTarget = token.parse()?;
            if !BuildTarget::CLOSURE_STAGES.contains(&stage) {
                return Err(PlanError::UnknownTarget {
                    target: token.clone(),
                    valid: BuildTarget::valid_tokens(),
                });
            }
            active.insert(stage);
        }

        let mut targets = Self::default();

        if all || active.contains(&BuildTarget::Full) {
            targets.full = true;
            active.insert(BuildTarget::Minimal);
        }
        if all || active.contains(&BuildTarget::Minimal) {
            targets.minimal = true;
            active.insert(BuildTarget::Source);
        }
        if all || active.contains(&BuildTarget::Source) {
            targets.source = true;
            active.insert(BuildTarget::BuildPrerequisites);
        }
        if all || active.contains(&BuildTarget::BuildPrerequisites) {
            targets.build_prerequisites = true;
        }

        if !targets.build_prerequisites {
            return Err(PlanError::EmptyPlan);
        }

        debug!("Resolved build targets: {:?}", targets);
        Ok(targets)
    }

    /// Whether `stage` will be built.
    #[must_use]
    pub const fn is_active(&self, stage: BuildTarget) -> bool {
        match stage {
            BuildTarget::BuildPrerequisites => self.build_prerequisites,
            BuildTarget::Source => self.source,
            BuildTarget::Engine => false,
            BuildTarget::Minimal => self.minimal,
            BuildTarget::Full => self.full,
        }
    }

    /// Active stages in build order.
    ///
    /// # Errors
    ///
    /// Propagates [`StageGraph::build_order`] failures.
    pub fn stage_order(&self) -> Result<Vec<BuildTarget>, PlanError> {
        Ok(StageGraph::pipeline()
            .build_order()?
            .into_iter()
            .filter(|stage| self.is_active(*stage))
            .collect())
    }

    /// Flat `stage -> enabled` view with every closure stage present.
    #[must_use]
    pub fn as_map(&self) -> BTreeMap<&'static str, bool> {
        BuildTarget::CLOSURE_STAGES
            .iter()
            .map(|stage| (stage.as_str(), self.is_active(*stage)))
            .collect()
    }
}
