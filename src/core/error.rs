//! Error handling for build-plan resolution
//!
//! Resolution either succeeds completely or aborts with exactly one [`PlanError`]
//! before any external side effect happens. There is no retry path and no partially
//! resolved configuration is ever handed out.
//!
//! # Architecture
//!
//! - [`PlanError`] - one variant per fatal configuration failure
//! - [`ErrorContext`] - wrapper that adds user-facing details and suggestions
//! - [`user_friendly_error`] - converts any [`anyhow::Error`] into an [`ErrorContext`]
//!
//! # Examples
//!
//! ```rust,no_run
//! use ue4_docker_config::core::{PlanError, user_friendly_error};
//!
//! let error = PlanError::EmptyPlan;
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // Coloured error with suggestion on stderr
//! ```

use colored::Colorize;
use std::fmt;
use strsim::levenshtein;
use thiserror::Error;

/// Maximum Levenshtein distance, as a percentage of the input length, for a
/// "did you mean" suggestion.
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

/// Fatal errors raised while resolving a build plan.
///
/// Every variant maps to a single invalid input or inconsistent combination of
/// inputs. [`PlanError::EmptyPlan`] is the exception: it signals a defect in target
/// closure and should never be reachable from user input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// A requested build target is not a buildable stage
    #[error("unknown build target '{target}', valid options are: {}", .valid.join(" "))]
    UnknownTarget {
        /// The token the user supplied
        target: String,
        /// Every accepted token, `all` included
        valid: Vec<String>,
    },

    /// Two mutually exclusive ways of saying the same thing were both used
    #[error("{message}")]
    ConflictingSpecifier {
        /// Which specifiers collided
        message: String,
    },

    /// Target closure produced a plan without build prerequisites
    #[error(
        "we're not building anything; this shouldn't even be possible, but is definitely not useful"
    )]
    EmptyPlan,

    /// The release string is not a supported engine version
    #[error("invalid Unreal Engine release number \"{version}\": {reason}")]
    InvalidVersion {
        /// Release string as supplied
        version: String,
        /// Why it was rejected
        reason: String,
    },

    /// A custom release was requested without both repository and branch
    #[error(
        "both a repository and branch/tag must be specified when building a custom version of the Engine"
    )]
    MissingCustomRepo,

    /// The requested toolchain is not in the catalog
    #[error("unknown Visual Studio version: {name}")]
    UnknownToolchain {
        /// Toolchain name as supplied
        name: String,
        /// Names present in the catalog
        valid: Vec<String>,
    },

    /// The product version predates the toolchain's supported range
    #[error("specified version of Unreal Engine ({version}) is too old for Visual Studio {toolchain}")]
    ToolchainTooOld {
        /// Toolchain name
        toolchain: String,
        /// Product version that was checked
        version: String,
    },

    /// The toolchain is too old for the product version
    #[error("Visual Studio {toolchain} is too old for specified version of Unreal Engine ({version})")]
    ToolchainTooNew {
        /// Toolchain name
        toolchain: String,
        /// Product version that was checked
        version: String,
    },

    /// Neither an explicit base tag nor a host base tag was available
    #[error(
        "unable to determine Windows Server Core base image tag from host system. Specify it explicitly using the --basetag flag"
    )]
    BaseTagUnresolved,

    /// A memory limit string could not be parsed
    #[error("invalid memory limit \"{value}\"")]
    InvalidSize {
        /// The rejected size string
        value: String,
    },

    /// The tag suffix collides with a reserved base-image prefix
    #[error("tag suffix \"{suffix}\" cannot begin with \"opengl\" or \"cuda\"")]
    ReservedSuffix {
        /// The rejected suffix
        suffix: String,
    },

    /// A cross-cutting invariant was violated
    #[error("{message}")]
    Configuration {
        /// Description of the violated invariant
        message: String,
    },
}

impl PlanError {
    /// Shorthand for [`PlanError::Configuration`].
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Shorthand for [`PlanError::ConflictingSpecifier`].
    pub fn conflicting(message: impl Into<String>) -> Self {
        Self::ConflictingSpecifier {
            message: message.into(),
        }
    }
}

/// Error context wrapper that provides user-friendly error information
///
/// When displayed, errors show the main message in red, optional details in
/// yellow and an optional suggestion in green.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error message
    pub error: String,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context from anything displayable.
    #[must_use]
    pub fn new(error: impl fmt::Display) -> Self {
        Self {
            error: error.to_string(),
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// [`PlanError`] variants get tailored suggestions; everything else is shown with
/// its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(plan_error) = error.downcast_ref::<PlanError>() {
        return create_error_context(plan_error);
    }

    let mut message = error.to_string();
    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(message)
}

fn create_error_context(error: &PlanError) -> ErrorContext {
    let ctx = ErrorContext::new(error);
    match error {
        PlanError::UnknownTarget {
            target,
            valid,
        } => match closest_match(target, valid) {
            Some(close) => ctx.with_suggestion(format!("Did you mean '{close}'?")),
            None => ctx.with_suggestion("Use --target all to build every image"),
        },
        PlanError::ConflictingSpecifier {
            ..
        } => ctx
            .with_suggestion("Remove the deprecated form and keep only the newer flag")
            .with_details("`--no-minimal`/`--no-full` and the positional release are deprecated"),
        PlanError::EmptyPlan => ctx
            .with_details("Target closure always includes build-prerequisites")
            .with_suggestion("Please report this as a bug"),
        PlanError::InvalidVersion {
            ..
        } => ctx.with_suggestion(
            "Use a full release number such as 4.27.0 or 5.3.0, or \"custom:<label>\" with --repo and --branch",
        ),
        PlanError::MissingCustomRepo => {
            ctx.with_suggestion("Pass both --repo <URL> and --branch <BRANCH> for custom releases")
        }
        PlanError::UnknownToolchain {
            name,
            valid,
        } => match closest_match(name, valid) {
            Some(close) => ctx.with_suggestion(format!("Did you mean '{close}'?")),
            None => ctx.with_suggestion(format!("Valid versions are: {}", valid.join(", "))),
        },
        PlanError::ToolchainTooOld {
            ..
        }
        | PlanError::ToolchainTooNew {
            ..
        } => ctx.with_suggestion("Choose a different --visual-studio version for this release"),
        PlanError::BaseTagUnresolved => {
            ctx.with_suggestion("Pass --basetag, for example --basetag ltsc2022")
        }
        PlanError::InvalidSize {
            ..
        } => ctx.with_suggestion("Use a size such as 8GB, 12.5GB or 16GiB"),
        PlanError::ReservedSuffix {
            ..
        } => ctx.with_details("Linux image tags already start with opengl or cuda"),
        PlanError::Configuration {
            ..
        } => ctx,
    }
}

/// Closest candidate by edit distance, if it is reasonably similar.
fn closest_match<'a>(target: &str, candidates: &'a [String]) -> Option<&'a str> {
    candidates
        .iter()
        .map(|c| (c, levenshtein(target, c)))
        .filter(|(_, dist)| *dist <= target.len() * SIMILARITY_THRESHOLD_PERCENT / 100)
        .min_by_key(|(_, dist)| *dist)
        .map(|(c, _)| c.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_target_display_lists_options() {
        let error = PlanError::UnknownTarget {
            target: "minmal".to_string(),
            valid: vec!["all".to_string(), "minimal".to_string()],
        };
        assert_eq!(error.to_string(), "unknown build target 'minmal', valid options are: all minimal");
    }

    #[test]
    fn test_user_friendly_error_suggests_close_target() {
        let error = PlanError::UnknownTarget {
            target: "minmal".to_string(),
            valid: vec!["all".to_string(), "full".to_string(), "minimal".to_string()],
        };
        let ctx = user_friendly_error(anyhow::Error::from(error));
        assert_eq!(ctx.suggestion.as_deref(), Some("Did you mean 'minimal'?"));
    }

    #[test]
    fn test_user_friendly_error_toolchain_without_close_match() {
        let error = PlanError::UnknownToolchain {
            name: "banana".to_string(),
            valid: vec!["2017".to_string(), "2019".to_string()],
        };
        let ctx = user_friendly_error(anyhow::Error::from(error));
        assert_eq!(ctx.suggestion.as_deref(), Some("Valid versions are: 2017, 2019"));
    }

    #[test]
    fn test_generic_error_includes_chain() {
        let error = anyhow::anyhow!("root cause").context("outer");
        let ctx = user_friendly_error(error);
        assert!(ctx.error.starts_with("outer"));
        assert!(ctx.error.contains("1: root cause"));
    }

    #[test]
    fn test_error_context_display() {
        let ctx = ErrorContext::new(PlanError::MissingCustomRepo)
            .with_details("details here")
            .with_suggestion("do this");
        let rendered = ctx.to_string();
        assert!(rendered.contains("repository and branch/tag"));
        assert!(rendered.contains("Details: details here"));
        assert!(rendered.contains("Suggestion: do this"));
    }
}
