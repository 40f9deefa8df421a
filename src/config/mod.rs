//! User configuration.
//!
//! The only persistent configuration is an optional TOML file whose `[defaults]`
//! table adjusts the built-in [`Catalog`](crate::catalog::Catalog) defaults. See
//! [`global`] for location rules and format.

pub mod global;

pub use global::{DefaultsOverride, UserConfig};
