//! Build toolchain catalog entries and engine compatibility checks.
//!
//! Each Visual Studio release supports a half-open window of engine versions
//! `[supported_since, unsupported_since)`. Newer toolchains also need to be named
//! explicitly on the BuildGraph command line, while older engines reject the
//! corresponding `-set:VS<name>=true` argument outright.

use serde::Serialize;
use tracing::debug;

use crate::core::PlanError;
use crate::version::ProductVersion;

/// A Visual Studio Build Tools release usable for Windows images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolchainVersion {
    /// Release name, e.g. `2022`
    pub name: String,
    /// Major build number, e.g. `17`
    pub build_number: String,
    /// First engine version this toolchain can build
    pub supported_since: Option<ProductVersion>,
    /// First engine version this toolchain can no longer build
    pub unsupported_since: Option<ProductVersion>,
    /// Whether BuildGraph must be told about this toolchain
    pub pass_version_flag: bool,
}

impl ToolchainVersion {
    /// Check that `version` falls within this toolchain's supported window.
    ///
    /// # Errors
    ///
    /// - [`PlanError::ToolchainTooOld`] when `version < supported_since`
    /// - [`PlanError::ToolchainTooNew`] when `version >= unsupported_since`
    pub fn check_compatibility(&self, version: &ProductVersion) -> Result<(), PlanError> {
        if let Some(since) = &self.supported_since
            && version < since
        {
            return Err(PlanError::ToolchainTooOld {
                toolchain: self.name.clone(),
                version: version.to_string(),
            });
        }

        if let Some(until) = &self.unsupported_since
            && version >= until
        {
            return Err(PlanError::ToolchainTooNew {
                toolchain: self.name.clone(),
                version: version.to_string(),
            });
        }

        debug!("Visual Studio {} supports engine {}", self.name, version);
        Ok(())
    }

    /// The BuildGraph argument that selects this toolchain.
    #[must_use]
    pub fn buildgraph_marker(&self) -> String {
        format!("-set:VS{}=true", self.name)
    }

    /// Append this toolchain's marker to an existing BuildGraph argument string.
    ///
    /// Returns `existing` unchanged when the flag is not needed or the marker is
    /// already present, so applying it twice has no further effect.
    #[must_use]
    pub fn apply_buildgraph_marker(&self, existing: &str) -> String {
        if !self.pass_version_flag {
            return existing.to_string();
        }

        let marker = self.buildgraph_marker();
        if existing.split_whitespace().any(|arg| arg == marker) {
            return existing.to_string();
        }

        format!("{existing} {marker}")
    }
}

/// The toolchains shipped in the built-in catalog.
pub(crate) fn builtin_toolchains() -> Vec<ToolchainVersion> {
    vec![
        ToolchainVersion {
            name: "2017".to_string(),
            build_number: "15".to_string(),
            supported_since: Some(ProductVersion::new(4, 27, 0)),
            unsupported_since: Some(ProductVersion::new(5, 0, 0)),
            pass_version_flag: false,
        },
        ToolchainVersion {
            name: "2019".to_string(),
            build_number: "16".to_string(),
            supported_since: Some(ProductVersion::new(4, 27, 0)),
            unsupported_since: Some(ProductVersion::new(5, 4, 0)),
            pass_version_flag: true,
        },
        ToolchainVersion {
            name: "2022".to_string(),
            build_number: "17".to_string(),
            supported_since: Some(ProductVersion::new(5, 0, 0)),
            unsupported_since: None,
            pass_version_flag: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toolchain(name: &str) -> ToolchainVersion {
        builtin_toolchains().into_iter().find(|t| t.name == name).unwrap()
    }

    #[test]
    fn test_vs2017_window() {
        let vs = toolchain("2017");
        assert!(vs.check_compatibility(&ProductVersion::new(4, 27, 2)).is_ok());
        assert!(matches!(
            vs.check_compatibility(&ProductVersion::new(4, 26, 2)),
            Err(PlanError::ToolchainTooOld { .. })
        ));
        assert!(matches!(
            vs.check_compatibility(&ProductVersion::new(5, 0, 0)),
            Err(PlanError::ToolchainTooNew { .. })
        ));
    }

    #[test]
    fn test_too_old_is_monotonic() {
        let vs = toolchain("2022");
        for minor in 0..=27 {
            let result = vs.check_compatibility(&ProductVersion::new(4, minor, 3));
            assert!(matches!(result, Err(PlanError::ToolchainTooOld { .. })));
        }
    }

    #[test]
    fn test_too_new_is_monotonic() {
        let vs = toolchain("2019");
        for minor in 4..=9 {
            for patch in [0, 1, 7] {
                let result = vs.check_compatibility(&ProductVersion::new(5, minor, patch));
                assert!(matches!(result, Err(PlanError::ToolchainTooNew { .. })));
            }
        }
        assert!(vs.check_compatibility(&ProductVersion::new(5, 3, 9)).is_ok());
    }

    #[test]
    fn test_open_ended_window() {
        let vs = toolchain("2022");
        assert!(vs.check_compatibility(&ProductVersion::new(5, 99, 0)).is_ok());
    }

    #[test]
    fn test_buildgraph_marker_is_idempotent() {
        let vs = toolchain("2022");
        let once = vs.apply_buildgraph_marker("");
        assert_eq!(once, " -set:VS2022=true");
        assert_eq!(vs.apply_buildgraph_marker(&once), once);

        let with_user_args = vs.apply_buildgraph_marker("-set:HostPlatformOnly=true");
        assert_eq!(with_user_args, "-set:HostPlatformOnly=true -set:VS2022=true");
    }

    #[test]
    fn test_buildgraph_marker_skipped_when_not_needed() {
        let vs = toolchain("2017");
        assert_eq!(vs.apply_buildgraph_marker("-set:Foo=1"), "-set:Foo=1");
    }
}
