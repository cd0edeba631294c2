use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use wardctl_core::WardConfig;

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show config file path
    Path,
    /// Show the effective configuration (file, environment and flags merged)
    Show,
    /// Write a config file with the default settings
    Init(InitArgs),
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(long, short)]
    pub force: bool,
}

/// `explicit` is the `--config` flag; `effective` the already loaded config.
pub fn run_config(args: ConfigArgs, explicit: Option<&Path>, effective: &WardConfig) -> Result<()> {
    let config_path = explicit.map(Path::to_path_buf).unwrap_or_else(WardConfig::config_path);

    match args.command {
        ConfigCommands::Path => {
            println!("{}", config_path.display());
            Ok(())
        }
        ConfigCommands::Show => {
            print!("{}", effective.to_toml_string()?);
            Ok(())
        }
        ConfigCommands::Init(args) => run_init(args, config_path),
    }
}

fn run_init(args: InitArgs, config_path: PathBuf) -> Result<()> {
    // Check if config already exists
    if config_path.exists() && !args.force {
        return Err(anyhow::anyhow!(
            "Config already exists at {:?}\n\nUse --force to overwrite",
            config_path
        ));
    }

    // Create config directory
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let content = WardConfig::default().to_toml_string()?;
    std::fs::write(&config_path, content)
        .context(format!("Failed to write config file: {:?}", config_path))?;

    println!("✅ Created config at: {:?}", config_path);
    println!("\nNext steps:");
    println!("  1. Edit the config: $EDITOR {:?}", config_path);
    println!("  2. Run: wardctl init");

    Ok(())
}
