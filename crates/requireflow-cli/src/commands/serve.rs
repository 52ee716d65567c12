//! Web server command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value = "3001")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Also write logs to a file
    #[arg(long)]
    pub log: bool,

    /// Log file path (defaults to <data-dir>/serve.log)
    #[arg(long, requires = "log")]
    pub log_file: Option<PathBuf>,
}

pub async fn execute(args: ServeArgs, data_dir: &Path) -> Result<()> {
    let ws = super::open_workspace(data_dir).await?;

    println!();
    println!("  {} {}", "RequireFlow".cyan().bold(), "API Server".bold());
    println!();
    println!("  {}       http://{}:{}/api", "API".green(), args.host, args.port);
    println!("  {}    http://{}:{}/health", "Health".green(), args.host, args.port);
    println!("  {}      {}", "Data".green(), data_dir.display());
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    requireflow_web::run_server(ws, &args.host, args.port).await?;

    Ok(())
}
