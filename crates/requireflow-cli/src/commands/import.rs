//! Bulk import of complete requirement records.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use requireflow_core::requirement::{self, model::Requirement};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Args)]
pub struct ImportArgs {
    /// JSON file holding an array of requirement records
    pub file: PathBuf,
}

pub async fn execute(args: ImportArgs, data_dir: &Path) -> Result<()> {
    let content = tokio::fs::read_to_string(&args.file)
        .await
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let records: Vec<Requirement> = serde_json::from_str(&content)
        .with_context(|| format!("{} is not an array of requirements", args.file.display()))?;

    let ws = super::open_workspace(data_dir).await?;
    let count = requirement::import_requirements(&ws, records).await?;
    info!(count, file = %args.file.display(), "Imported requirements from CLI");

    println!(
        "{} Imported {} requirement(s) from {}",
        "✓".green().bold(),
        count.to_string().cyan(),
        args.file.display()
    );

    Ok(())
}
