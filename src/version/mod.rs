//! Engine version parsing and comparison.
//!
//! Engine releases are addressed by a strict `MAJOR.MINOR.PATCH` triple (parsed with
//! [`semver`]) or by the `custom` keyword, which points at an arbitrary repository and
//! branch instead. Only major versions 4 and 5 are accepted and pre-release
//! qualifiers are rejected outright.
//!
//! # Module Organization
//!
//! - [`ProductVersion`] - validated numeric engine version
//! - [`release`] - release specifier classification, branch naming and changelists
//! - [`lenient_version`] - tolerant parsing for third-party version strings such as
//!   the container engine's
//!
//! # Examples
//!
//! ```rust
//! use ue4_docker_config::version::ProductVersion;
//!
//! let version = ProductVersion::parse("5.3.2").unwrap();
//! assert_eq!(version.to_string(), "5.3.2");
//! assert!(version >= ProductVersion::new(5, 0, 0));
//! assert!(ProductVersion::parse("5.3.0-preview").is_err());
//! ```

pub mod release;

pub use release::{Release, ResolvedRelease};

use regex::Regex;
use semver::Version;
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::OnceLock;

use crate::core::PlanError;

/// Engine major versions this tool knows how to build.
const SUPPORTED_MAJORS: [u64; 2] = [4, 5];

/// A validated numeric engine version.
///
/// Ordering is lexicographic over `(major, minor, patch)`, which is what the
/// toolchain compatibility windows are defined against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProductVersion {
    /// Major version, always 4 or 5 for parsed versions
    pub major: u64,
    /// Minor version
    pub minor: u64,
    /// Patch version
    pub patch: u64,
}

impl ProductVersion {
    /// Build a version from its components without validation.
    ///
    /// Used for catalog thresholds such as "supported since 4.27".
    #[must_use]
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse a strict `MAJOR.MINOR.PATCH` engine release.
    ///
    /// Build metadata (`+...`) is dropped during normalization.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::InvalidVersion`] when the string is not a full semantic
    /// version, the major version is not 4 or 5, or a pre-release suffix is present.
    pub fn parse(release: &str) -> Result<Self, PlanError> {
        let invalid = |reason: &str| PlanError::InvalidVersion {
            version: release.to_string(),
            reason: reason.to_string(),
        };

        let parsed = Version::parse(release.trim())
            .map_err(|_| invalid("full semver format required (e.g. \"4.27.0\")"))?;

        if !parsed.pre.is_empty() {
            return Err(invalid("pre-release versions are not supported"));
        }
        if !SUPPORTED_MAJORS.contains(&parsed.major) {
            return Err(invalid(&format!("unsupported engine version: {}", parsed.major)));
        }

        Ok(Self::new(parsed.major, parsed.minor, parsed.patch))
    }

    /// Whether this is the first release of a minor series (`X.Y.0`).
    #[must_use]
    pub const fn is_dot_zero(&self) -> bool {
        self.patch == 0
    }
}

impl fmt::Display for ProductVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl Serialize for ProductVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn leading_version_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^v?(\d+)(?:\.(\d+))?(?:\.(\d+))?").expect("static regex is valid")
    })
}

/// Parse the leading numeric components of a loosely formatted version string.
///
/// Container engines report versions such as `24.0.7`, `20.10.17-rd` or
/// `26.1.4+azure-1`; only the numeric prefix matters for feature checks. Missing
/// minor or patch components default to zero.
///
/// Returns `None` when the string does not start with a number.
#[must_use]
pub fn lenient_version(raw: &str) -> Option<Version> {
    let caps = leading_version_regex().captures(raw.trim())?;
    let component = |idx: usize| -> Option<u64> {
        caps.get(idx).map_or(Some(0), |m| m.as_str().parse().ok())
    };
    Some(Version::new(component(1)?, component(2)?, component(3)?))
}
