//! CLI commands module
//!
//! This module contains all CLI command implementations.

pub mod config;
pub mod run;
pub mod slug;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use forum_core::ForumConfig;
use std::path::{Path, PathBuf};

/// Config file picked up when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = ".forum/config.toml";

/// forum-sim - replay forum votes and comments in memory
#[derive(Debug, Parser)]
#[command(name = "forum-sim")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Replay a scenario file and print the pending changes
    Run(run::RunArgs),

    /// Print the slug derived from a post title
    Slug(slug::SlugArgs),

    /// Inspect configuration
    #[command(subcommand)]
    Config(config::ConfigCommand),
}

/// Run the CLI application
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    setup_logging(cli.verbose);

    // Handle color output
    if cli.no_color {
        colored::control::set_override(false);
    }

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Run(args) => run::execute(args, &load_config(config_path)?),
        Commands::Slug(args) => slug::execute(args, &load_config(config_path)?),
        Commands::Config(cmd) => config::execute(cmd, config_path),
    }
}

/// Load the explicit config file, the default one if present, or defaults
pub fn load_config(path: Option<&Path>) -> Result<ForumConfig> {
    if let Some(path) = path {
        return ForumConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()));
    }

    let default_path = Path::new(DEFAULT_CONFIG_PATH);
    if default_path.exists() {
        tracing::debug!("Using config {}", default_path.display());
        return ForumConfig::load(default_path)
            .with_context(|| format!("Failed to load config {}", default_path.display()));
    }

    Ok(ForumConfig::default())
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_help_text() {
        let cmd = Cli::command();
        assert!(cmd.get_about().is_some());
    }

    #[test]
    fn test_load_explicit_missing_config_fails() {
        assert!(load_config(Some(Path::new("/nonexistent/forum.toml"))).is_err());
    }
}
