//! Engine components that can be left out of the built images.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::core::PlanError;

/// An optional engine component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExcludedComponent {
    /// Engine Derived Data Cache
    Ddc,
    /// Engine debug symbols
    Debug,
    /// Template projects and samples
    Templates,
}

impl ExcludedComponent {
    /// Every component, in context-key order.
    pub const ALL: [Self; 3] = [Self::Ddc, Self::Debug, Self::Templates];

    /// Token used on the command line and as template context key.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ddc => "ddc",
            Self::Debug => "debug",
            Self::Templates => "templates",
        }
    }

    /// Human-readable description.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Ddc => "Derived Data Cache (DDC)",
            Self::Debug => "Debug symbols",
            Self::Templates => "Template projects and samples",
        }
    }

    /// Parse every `--exclude` entry into a set.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::Configuration`] for unknown component names.
    pub fn parse_all<S: AsRef<str>>(entries: &[S]) -> Result<BTreeSet<Self>, PlanError> {
        entries.iter().map(|entry| entry.as_ref().parse()).collect()
    }
}

impl fmt::Display for ExcludedComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExcludedComponent {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|c| c.as_str() == s).ok_or_else(|| {
            PlanError::configuration(format!(
                "unknown component '{s}', valid components are: ddc, debug, templates"
            ))
        })
    }
}
