//! Config command - manage configuration.

use std::fs;
use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;

use bizcard_core::models::config::{ENV_API_TOKEN, ENV_COLLECTION_ID};
use bizcard_core::BizcardConfig;

use super::{load_config, resolve_config_path};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Initialize a new configuration file
    Init(InitArgs),

    /// Show configuration file path
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Output path for configuration file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite existing file
    #[arg(long)]
    force: bool,
}

pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(config_path),
        ConfigCommand::Init(init_args) => init_config(init_args, config_path),
        ConfigCommand::Path => show_path(config_path),
    }
}

fn show_config(config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = if resolve_config_path(config_path).exists() {
        load_config(config_path)?
    } else {
        println!(
            "{} No config file found, showing defaults.",
            style("ℹ").blue()
        );
        let mut config = BizcardConfig::default();
        config.apply_env();
        config
    };

    if !config.store.api_token.is_empty() {
        config.store.api_token = "********".to_string();
    }

    println!("{}", serde_json::to_string_pretty(&config)?);

    Ok(())
}

fn init_config(args: InitArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let output_path = args
        .output
        .unwrap_or_else(|| resolve_config_path(config_path));

    if output_path.exists() && !args.force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            output_path.display()
        );
    }

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let config = BizcardConfig::default();
    config.save(&output_path)?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        output_path.display()
    );
    println!(
        "Set store.api_token and store.collection_id, or export {} and {}.",
        ENV_API_TOKEN, ENV_COLLECTION_ID
    );

    Ok(())
}

fn show_path(config_path: Option<&str>) -> anyhow::Result<()> {
    let path = resolve_config_path(config_path);

    println!("Configuration file: {}", path.display());

    if path.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        println!("Run 'bizcard config init' to create a configuration file.");
    }

    Ok(())
}
