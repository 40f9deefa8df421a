//! Command-line interface for ue4-docker-config.
//!
//! # Commands
//!
//! - `resolve` - Validate build flags and print the resolved build plan
//!
//! # Global Flags
//!
//! - `--verbose` / `-v` - Debug logging
//! - `--quiet` / `-q` - Errors only
//! - `--config` / `-c` - Path to a user config file
//!
//! `RUST_LOG` always wins over the verbosity flags.
//!
//! # Examples
//!
//! ```bash
//! ue4-docker-config resolve --ue-version 5.3.0 --linux
//! ue4-docker-config -v resolve 5.2.0 --target full --exclude debug
//! ue4-docker-config --config ./ue4-docker.toml resolve --ue-version 5.3.0 --format json
//! ```

pub mod resolve;


use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

pub use resolve::{OutputFormat, ResolveCommand};

/// Settings derived from the global flags.
///
/// Kept separate from [`Cli`] so callers can run commands with a configuration
/// they built themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub log_level: String,
    /// Explicit user config path (`--config`).
    pub config_path: Option<PathBuf>,
    pub verbose: bool,
}

impl CliConfig {
    /// Install the global tracing subscriber.
    ///
    /// Does nothing if a subscriber is already installed.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.log_level));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "ue4-docker-config",
    about = "Resolve Unreal Engine container build configurations",
    version,
    long_about = "Validates ue4-docker build flags against host facts and fixed catalogs, \
                  and prints the resolved build plan."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to a user config file (default: ~/.ue4-docker/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve build flags into a build plan
    Resolve(ResolveCommand),
}

impl Cli {
    /// Run the selected command with a configuration built from the global flags.
    ///
    /// # Errors
    ///
    /// Returns whatever the command fails with.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        config.init_logging();
        self.execute_with_config(config).await
    }

    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        };

        CliConfig {
            log_level: log_level.to_string(),
            config_path: self.config.clone(),
            verbose: self.verbose,
        }
    }

    /// Run the selected command with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns whatever the command fails with.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        match self.command {
            Commands::Resolve(cmd) => cmd.execute(config.config_path, config.verbose).await,
        }
    }

    #[must_use]
    pub const fn command(&self) -> &Commands {
        &self.command
    }
}
