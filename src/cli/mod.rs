//! Command-line interface for sharegen.
//!
//! # Commands
//!
//! - `build` - gather, render and write generated files into the build directory
//! - `release` - `build`, then the after-release hooks
//! - `describe` - print the resolved configuration of every `[[generate]]` entry
//!
//! # Global options
//!
//! - `--verbose` - debug logging
//! - `--quiet` - errors only
//! - `--config <PATH>` - use a specific `sharegen.toml` instead of the one in
//!   the current directory
//!
//! Logs go to stderr; command output goes to stdout.

mod build;
mod common;
mod describe;


use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

pub use build::{BuildCommand, BuildMode};
pub use describe::{DescribeCommand, OutputFormat, PluginDescription};

/// Settings derived from global flags.
///
/// Kept separate from [`Cli`] so tests and embedders can run commands with
/// an explicit configuration.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter directive. `None` defers to `RUST_LOG`, then `info`.
    pub log_level: Option<String>,

    /// Explicit path to `sharegen.toml`
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    #[must_use]
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// The log filter that [`init_logging`](Self::init_logging) installs.
    #[must_use]
    pub fn env_filter(&self) -> EnvFilter {
        match &self.log_level {
            Some(level) => EnvFilter::new(level),
            None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        }
    }

    /// Install the global tracing subscriber, writing to stderr.
    ///
    /// Does nothing if a subscriber is already installed.
    pub fn init_logging(&self) {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(self.env_filter())
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Generate build files from templates stored in share directories.
#[derive(Parser)]
#[command(
    name = "sharegen",
    about = "Generate build files from templates stored in a distribution's share directory",
    version,
    long_about = "sharegen renders templates found in the share directory of a named \
                  distribution and adds the results to the distribution being built."
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

    /// Path to sharegen.toml (default: ./sharegen.toml)
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render every [[generate]] entry into the build directory.
    Build(BuildCommand),

    /// Build, then write release-phase files to the project root.
    Release(BuildCommand),

    /// Print the resolved configuration of every [[generate]] entry.
    Describe(DescribeCommand),
}

impl Cli {
    /// Run the parsed command with logging configured from the global flags.
    pub fn execute(self) -> Result<()> {
        let config = self.build_config();
        config.init_logging();
        self.execute_with_config(config)
    }

    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            None
        };

        CliConfig {
            log_level,
            config_path: self.config.clone(),
        }
    }

    /// Run the command without touching the global subscriber.
    pub fn execute_with_config(self, config: CliConfig) -> Result<()> {
        let config_path = config.config_path.as_deref();
        match self.command {
            Commands::Build(cmd) => cmd.execute(config_path, BuildMode::Build),
            Commands::Release(cmd) => cmd.execute(config_path, BuildMode::Release),
            Commands::Describe(cmd) => cmd.execute(config_path),
        }
    }
}
