//! Urban3D CLI - Command-line interface
//!
//! This binary provides a command-line interface to the Urban3D library:
//! fetching building footprints, answering natural-language filter queries
//! and managing saved projects.

mod commands;
mod error;
mod runner;

use clap::{Parser, Subcommand};

use commands::buildings::BuildingsArgs;
use commands::config::ConfigCommands;
use commands::projects::ProjectCommands;
use commands::query::QueryArgs;
use error::CliError;
use runner::CliRunner;

#[derive(Parser)]
#[command(name = "urban3d")]
#[command(version = urban3d::VERSION)]
#[command(about = "Building footprints and natural-language filters from OpenStreetMap", long_about = None)]
struct Cli {
    /// Enable debug logging for urban3d (RUST_LOG still takes precedence)
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Mirror log events to stdout in addition to the log file
    #[arg(long, global = true)]
    log_stdout: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch buildings inside a bounding box
    Buildings(BuildingsArgs),

    /// Extract a filter from text and list the matching buildings
    Query(QueryArgs),

    /// Manage saved projects
    #[command(subcommand)]
    Projects(ProjectCommands),

    /// Manage the configuration file
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = dispatch(cli).await {
        e.exit();
    }
}

async fn dispatch(cli: Cli) -> Result<(), CliError> {
    // Config commands must work even when the current file is invalid.
    let command = match cli.command {
        Commands::Config(command) => return commands::config::run(command),
        command => command,
    };

    let runner = CliRunner::new(cli.verbose, cli.log_stdout)?;

    match command {
        Commands::Buildings(args) => commands::buildings::run(&runner, args).await,
        Commands::Query(args) => commands::query::run(&runner, args).await,
        Commands::Projects(command) => commands::projects::run(&runner, command),
        Commands::Config(command) => commands::config::run(command),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_query_accepts_negative_longitudes() {
        let cli = Cli::try_parse_from([
            "urban3d",
            "query",
            "taller than 100 ft",
            "--west",
            "-114.08",
            "--east",
            "-114.06",
        ])
        .unwrap();
        match cli.command {
            Commands::Query(args) => {
                assert_eq!(args.text, "taller than 100 ft");
                assert_eq!(args.bbox.west, Some(-114.08));
                assert_eq!(args.bbox.east, Some(-114.06));
            }
            _ => panic!("expected query command"),
        }
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["urban3d", "buildings", "--refresh", "-v"]).unwrap();
        assert!(cli.verbose);
    }
}
