//! Saved project CLI commands.
//!
//! Projects are named sets of filter expressions kept per user in the same
//! database as the geodata cache.

use clap::Subcommand;
use serde_json::Value;
use std::path::PathBuf;
use tracing::info;
use urban3d::projects::ProjectStore;

use crate::error::CliError;
use crate::runner::{read_json_file, CliRunner};

/// Project subcommands.
#[derive(Debug, Subcommand)]
pub enum ProjectCommands {
    /// Save a named set of filters for a user
    Save {
        /// Owner of the project
        #[arg(long)]
        user: String,

        /// Project name
        #[arg(long)]
        name: String,

        /// Filters as JSON objects, e.g. '{"attribute":"type","operator":"in","value":["office"]}'
        filters: Vec<String>,

        /// Read the filters from a JSON array file instead
        #[arg(long, short, conflicts_with = "filters")]
        file: Option<PathBuf>,
    },

    /// List a user's projects, newest first
    List {
        /// Owner of the projects
        #[arg(long)]
        user: String,
    },

    /// Print the filters stored in a project
    Load {
        /// Project id
        id: i64,
    },

    /// Delete a project owned by a user
    Delete {
        /// Owner of the project
        #[arg(long)]
        user: String,

        /// Project id
        id: i64,
    },
}

/// Run a projects subcommand.
pub fn run(runner: &CliRunner, command: ProjectCommands) -> Result<(), CliError> {
    runner.log_startup("projects");
    let store = ProjectStore::new(&runner.config().cache.database)?;

    match command {
        ProjectCommands::Save {
            user,
            name,
            filters,
            file,
        } => {
            let filters = match file {
                Some(path) => filters_from_file(read_json_file(&path)?)?,
                None => parse_filters(&filters)?,
            };
            let id = store.save(&user, &name, &filters)?;
            info!(user = %user, project = %name, id, "Project saved");
            println!("Saved project {} ({} filter(s))", id, filters.len());
            Ok(())
        }
        ProjectCommands::List { user } => {
            let projects = store.list(&user)?;
            if projects.is_empty() {
                println!("No projects for '{}'", user.trim());
                return Ok(());
            }
            for project in projects {
                println!(
                    "{:>6}  {}  {}",
                    project.id,
                    project.created_at.format("%Y-%m-%d %H:%M:%S"),
                    project.name
                );
            }
            Ok(())
        }
        ProjectCommands::Load { id } => {
            let filters = store.load(id)?;
            runner.emit_json(&Value::Array(filters), None)
        }
        ProjectCommands::Delete { user, id } => {
            let deleted = store.delete(&user, id)?;
            info!(user = %user, id, deleted, "Project delete");
            if deleted == 0 {
                println!("No project {} owned by '{}'", id, user.trim());
            } else {
                println!("Deleted project {}", id);
            }
            Ok(())
        }
    }
}

/// Parses each argument as one JSON filter object.
fn parse_filters(args: &[String]) -> Result<Vec<Value>, CliError> {
    args.iter()
        .map(|arg| serde_json::from_str(arg).map_err(CliError::from))
        .collect()
}

fn filters_from_file(value: Value) -> Result<Vec<Value>, CliError> {
    match value {
        Value::Array(items) => Ok(items),
        _ => Err(CliError::InvalidInput(
            "filter file must contain a JSON array".to_string(),
        )),
    }
}
