//! Data directory initialization command.

use anyhow::Result;
use colored::Colorize;
use requireflow_core::workspace::{Workspace, CUSTOMERS_FILE, REQUIREMENTS_FILE, USERS_FILE};
use std::path::Path;

pub async fn execute(data_dir: &Path) -> Result<()> {
    println!(
        "{} Initializing data directory: {}",
        "→".blue().bold(),
        data_dir.display().to_string().cyan()
    );

    let (_, report) = Workspace::init(data_dir).await?;

    for (file, created) in [
        (USERS_FILE, report.users),
        (CUSTOMERS_FILE, report.customers),
        (REQUIREMENTS_FILE, report.requirements),
    ] {
        if created {
            println!("  {} Created {}", "✓".green(), file);
        } else {
            println!("  {} Kept existing {}", "·".dimmed(), file.dimmed());
        }
    }

    println!();
    println!("{}", "Next steps:".bold());
    println!("  requireflow requirement new <title> --customer c1   # Capture a requirement");
    println!("  requireflow serve                                   # Start the API server");

    Ok(())
}
