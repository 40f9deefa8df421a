//! ue4-docker-config - build configuration resolution for Unreal Engine containers
//!
//! Turns the loosely-typed flags of a container build (release, targets, template
//! options, platform overrides) plus facts about the host into one validated,
//! immutable build plan, or a single fatal error.
//!
//! # Architecture Overview
//!
//! Resolution is a pure, linear pipeline run by
//! [`resolver::ConfigurationResolver`]. Every input it needs is supplied up front:
//!
//! - [`resolver::RawArguments`] - the flag record as parsed from the command line
//! - [`host::HostFacts`] - host OS, Docker engine version and Windows base tag
//! - [`catalog::Catalog`] - toolchains, release changelists, image templates, defaults
//!
//! The result is a [`resolver::ResolvedConfiguration`], which a build executor,
//! Dockerfile renderer or resource monitor can read without further validation.
//!
//! # Core Modules
//!
//! - [`targets`] - Build stages, dependency closure and stage ordering
//! - [`version`] - Release classification and product version parsing
//! - [`catalog`] - Built-in catalogs and the Visual Studio toolchain table
//! - [`options`] - Template options, excluded components, package overrides
//! - [`platform`] - Windows and Linux platform configuration
//! - [`resolver`] - The orchestrating resolver and its result
//! - [`templating`] - Flat template context for the Dockerfile renderer
//!
//! # Supporting Modules
//!
//! - [`cli`] - `clap` command-line interface
//! - [`config`] - Optional user config file (`~/.ue4-docker/config.toml`)
//! - [`host`] - Host inspection (Docker version, Windows build number)
//! - [`core`] - Error types and the container platform enum
//! - [`constants`] - Default values and timeouts
//!
//! # Example
//!
//! ```rust
//! use ue4_docker_config::catalog::Catalog;
//! use ue4_docker_config::host::{HostFacts, HostPlatform};
//! use ue4_docker_config::resolver::{ConfigurationResolver, RawArguments};
//!
//! let host = HostFacts::new(HostPlatform::Linux).with_docker_version("24.0.7");
//! let resolver = ConfigurationResolver::new(Catalog::builtin(), host);
//!
//! let raw = RawArguments {
//!     ue_version: Some("5.3.0".to_string()),
//!     target: Some(vec!["full".to_string()]),
//!     ..Default::default()
//! };
//! let plan = resolver.resolve(&raw)?;
//! assert_eq!(plan.stage_order().len(), 4);
//! # Ok::<(), ue4_docker_config::core::PlanError>(())
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod host;
pub mod options;
pub mod platform;
pub mod resolver;
pub mod targets;
pub mod templating;
pub mod version;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
