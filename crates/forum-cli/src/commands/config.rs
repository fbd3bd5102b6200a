//! Config command - inspect the effective configuration

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use std::path::Path;

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show(ShowArgs),

    /// Check that the configuration loads and its limits are usable
    Validate,
}

/// Arguments for config show
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute config command
pub fn execute(cmd: ConfigCommand, config_path: Option<&Path>) -> Result<()> {
    match cmd {
        ConfigCommand::Show(args) => show_config(args, config_path),
        ConfigCommand::Validate => validate_config(config_path),
    }
}

fn show_config(args: ShowArgs, config_path: Option<&Path>) -> Result<()> {
    let config = super::load_config(config_path)?;

    if args.json {
        let json = serde_json::to_string_pretty(&config).context("Failed to serialize config")?;
        println!("{}", json);
    } else {
        let toml = toml::to_string_pretty(&config).context("Failed to serialize config")?;
        println!("{}", toml);
    }

    Ok(())
}

fn validate_config(config_path: Option<&Path>) -> Result<()> {
    use colored::Colorize;

    let config = super::load_config(config_path)?;
    config.validate().context("Configuration is invalid")?;
    println!("{} Configuration is valid", "✓".green());
    Ok(())
}
