//! `apiary config`: inspect and change the output format and log level

use clap::{Args, Subcommand};

use crate::config::{config_file_path, Config};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the current value of `format` or `log_level`
    Get {
        /// Setting to read
        key: String,
    },
    /// Change `format` (table, json) or `log_level` (error..trace)
    Set {
        /// Setting to change
        key: String,
        /// Value to store
        value: String,
    },
    /// Show both settings and where they are read from
    List,
    /// Print the config file location (honours APIARY_CONFIG)
    Path,
    /// Write a config file with table output and warn-level logging
    Init {
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(args: &ConfigArgs, config: &Config) -> anyhow::Result<()> {
    match &args.command {
        ConfigCommands::Get { key } => run_get(config, key),
        ConfigCommands::Set { key, value } => run_set(config, key, value),
        ConfigCommands::List => run_list(config),
        ConfigCommands::Path => run_path(),
        ConfigCommands::Init { force } => run_init(*force),
    }
}

fn run_get(config: &Config, key: &str) -> anyhow::Result<()> {
    match config.get(key) {
        Some(value) => println!("{}", value),
        None => anyhow::bail!(
            "Unknown config key: {} (available: {})",
            key,
            Config::keys().join(", ")
        ),
    }
    Ok(())
}

fn run_set(config: &Config, key: &str, value: &str) -> anyhow::Result<()> {
    let mut config = config.clone();
    config.set(key, value)?;
    config.save()?;
    tracing::info!("Updated config key {}", key);
    println!("Set {} = {}", key, config.get(key).unwrap_or_default());
    Ok(())
}

fn run_list(config: &Config) -> anyhow::Result<()> {
    println!("Config file: {}", config_file_path().display());
    println!();
    for key in Config::keys() {
        let value = config.get(key).unwrap_or_else(|| "(not set)".to_string());
        println!("{} = {}", key, value);
    }
    Ok(())
}

fn run_path() -> anyhow::Result<()> {
    println!("{}", config_file_path().display());
    Ok(())
}

fn run_init(force: bool) -> anyhow::Result<()> {
    let path = config_file_path();

    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    Config::default().save()?;
    println!("Created config file at {}", path.display());
    Ok(())
}
