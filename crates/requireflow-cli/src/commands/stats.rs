//! Dashboard statistics command.

use anyhow::Result;
use clap::Args;
use requireflow_core::dashboard;
use std::path::Path;

use crate::output;

#[derive(Args)]
pub struct StatsArgs {
    /// Also show counts by status, priority, module, source and customer
    #[arg(short, long)]
    pub breakdown: bool,
}

pub async fn execute(args: StatsArgs, data_dir: &Path) -> Result<()> {
    let ws = super::open_workspace(data_dir).await?;

    let summary = dashboard::get_summary(&ws).await?;
    output::print_summary(&summary);

    if args.breakdown {
        let breakdown = dashboard::get_breakdown(&ws).await?;
        output::print_breakdown(&breakdown);
    }

    Ok(())
}
