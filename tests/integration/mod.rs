//! Integration test suite for ue4-docker-config
//!
//! End-to-end checks of the resolver through the public API and of the
//! `ue4-docker-config` binary.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **resolution**: Build plan properties across targets, releases and platforms
//! - **cli**: The `resolve` command, output formats and exit codes
//! - **user_config**: User config file discovery and overrides

#[path = "../common/mod.rs"]
mod common;

mod cli;
mod resolution;
mod user_config;
