//! Configuration management CLI commands.
//!
//! Provides `config init`, `config path` and `config show` for creating and
//! inspecting `~/.urban3d/config.ini`.

use clap::Subcommand;
use urban3d::config::{config_file_path, ConfigFile};

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Write a default configuration file if none exists
    Init {
        /// Overwrite an existing file with defaults
        #[arg(long)]
        force: bool,
    },

    /// Show the configuration file path
    Path,

    /// Show the effective configuration (credentials masked)
    Show,
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init { force } => run_init(force),
        ConfigCommands::Path => run_path(),
        ConfigCommands::Show => run_show(),
    }
}

fn run_init(force: bool) -> Result<(), CliError> {
    let path = config_file_path();

    if force {
        ConfigFile::default().save_to(&path)?;
        println!("Wrote default configuration to {}", path.display());
        return Ok(());
    }

    if path.exists() {
        println!("Configuration already exists at {}", path.display());
        println!("Use --force to overwrite it with defaults.");
        return Ok(());
    }

    let path = ConfigFile::ensure_exists()?;
    println!("Created {}", path.display());
    Ok(())
}

fn run_path() -> Result<(), CliError> {
    println!("{}", config_file_path().display());
    Ok(())
}

fn run_show() -> Result<(), CliError> {
    let config = ConfigFile::load()?;
    for line in render(&config) {
        println!("{}", line);
    }
    Ok(())
}

/// Renders the effective settings section by section.
fn render(config: &ConfigFile) -> Vec<String> {
    let api_key = match &config.text_generation.api_key {
        Some(key) => mask(key),
        None => "(not set)".to_string(),
    };

    vec![
        "[overpass]".to_string(),
        format!("  url = {}", config.overpass.url),
        format!("  timeout = {}", config.overpass.timeout),
        format!("  max_attempts = {}", config.overpass.max_attempts),
        format!("  backoff_secs = {}", config.overpass.backoff_secs),
        String::new(),
        "[text_generation]".to_string(),
        format!("  url = {}", config.text_generation.url),
        format!("  api_key = {}", api_key),
        format!("  timeout = {}", config.text_generation.timeout),
        format!("  max_new_tokens = {}", config.text_generation.max_new_tokens),
        String::new(),
        "[cache]".to_string(),
        format!("  database = {}", config.cache.database.display()),
        format!("  fresh_max_age = {}", config.cache.fresh_max_age),
        format!("  stale_max_age = {}", config.cache.stale_max_age),
        String::new(),
        "[region]".to_string(),
        format!("  west = {}", config.region.west),
        format!("  south = {}", config.region.south),
        format!("  east = {}", config.region.east),
        format!("  north = {}", config.region.north),
        String::new(),
        "[logging]".to_string(),
        format!("  file = {}", config.logging.file.display()),
    ]
}

/// Keeps the last four characters of a credential.
fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}
