//! Building acquisition command.

use clap::Args;
use std::path::PathBuf;
use tracing::{info, warn};

use super::common::BboxArgs;
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for `urban3d buildings`.
#[derive(Debug, Args)]
pub struct BuildingsArgs {
    #[command(flatten)]
    pub bbox: BboxArgs,

    /// Skip the fresh-cache check and fetch live
    #[arg(long)]
    pub refresh: bool,

    /// Write the JSON payload to this file
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Fetch buildings for a bounding box and print a summary.
pub async fn run(runner: &CliRunner, args: BuildingsArgs) -> Result<(), CliError> {
    runner.log_startup("buildings");

    let bbox = args.bbox.resolve(runner.config())?;
    let service = runner.create_service()?;

    let outcome = service.buildings(bbox, args.refresh).await?;
    info!(
        bbox = %bbox,
        count = outcome.count,
        source = %outcome.source,
        "Buildings fetched"
    );
    println!("Bounding box: {}", bbox);
    println!("  Buildings: {}", outcome.count);
    println!("  Source:    {}", outcome.source);
    if let Some(warning) = &outcome.warning {
        warn!("{}", warning);
        println!("  Warning:   {}", warning);
    }

    if let Some(path) = args.output.as_deref() {
        let value = serde_json::to_value(&outcome)?;
        runner.emit_json(&value, Some(path))?;
    }

    Ok(())
}
