//! Test utilities for ue4-docker-config
//!
//! Available to unit tests and, through the `test-utils` feature, to the
//! integration test suites.
//!
//! - [`init_test_logging`] installs a test-friendly tracing subscriber once
//! - [`fixtures`] provides canned host facts and a catalog
//! - [`RawArgumentsBuilder`] builds argument records fluently
//!
//! # Example
//!
//! ```rust,no_run
//! use ue4_docker_config::test_utils::{RawArgumentsBuilder, fixtures};
//!
//! let resolver = fixtures::linux_resolver();
//! let raw = RawArgumentsBuilder::new().ue_version("5.3.0").cuda("").build();
//! let config = resolver.resolve(&raw).unwrap();
//! assert_eq!(config.base_image(), "nvidia/cuda:12.2.0-devel-ubuntu22.04");
//! ```

pub mod builder;
pub mod fixtures;

pub use builder::RawArgumentsBuilder;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Uses `level` if given, otherwise `RUST_LOG`. With neither, logging stays off.
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
