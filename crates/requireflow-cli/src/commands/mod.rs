//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Parser, Subcommand};
use requireflow_core::Workspace;
use std::path::{Path, PathBuf};

pub mod customer;
pub mod import;
pub mod init;
pub mod requirement;
pub mod serve;
pub mod stats;
pub mod user;

/// RequireFlow - customer requirement tracking
#[derive(Parser)]
#[command(name = "requireflow")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding the JSON documents
    #[arg(
        short,
        long,
        global = true,
        env = "REQUIREFLOW_DATA_DIR",
        default_value = "data"
    )]
    pub data_dir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the data directory and write first-run documents
    Init,

    /// Start the API server
    Serve(serve::ServeArgs),

    /// Manage requirements
    #[command(subcommand)]
    Requirement(requirement::RequirementCommands),

    /// Manage customers
    #[command(subcommand)]
    Customer(customer::CustomerCommands),

    /// Browse the user directory
    #[command(subcommand)]
    User(user::UserCommands),

    /// Show dashboard statistics
    Stats(stats::StatsArgs),

    /// Import complete requirement records from a JSON file
    Import(import::ImportArgs),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let data_dir = self.data_dir;

        match self.command {
            Commands::Init => init::execute(&data_dir).await,
            Commands::Serve(args) => serve::execute(args, &data_dir).await,
            Commands::Requirement(cmd) => requirement::execute(cmd, &data_dir).await,
            Commands::Customer(cmd) => customer::execute(cmd, &data_dir).await,
            Commands::User(cmd) => user::execute(cmd, &data_dir).await,
            Commands::Stats(args) => stats::execute(args, &data_dir).await,
            Commands::Import(args) => import::execute(args, &data_dir).await,
        }
    }
}

/// Open the workspace, seeding it on first use.
pub(crate) async fn open_workspace(data_dir: &Path) -> Result<Workspace> {
    Ok(Workspace::open(data_dir).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_requirement_list_filters() {
        let cli = Cli::try_parse_from([
            "requireflow",
            "--data-dir",
            "/tmp/rf",
            "requirement",
            "list",
            "--status",
            "developing",
            "--search",
            "环比",
        ])
        .unwrap();

        assert_eq!(cli.data_dir, PathBuf::from("/tmp/rf"));
        match cli.command {
            Commands::Requirement(requirement::RequirementCommands::List(args)) => {
                assert_eq!(args.status.as_deref(), Some("developing"));
                assert_eq!(args.search.as_deref(), Some("环比"));
            }
            _ => panic!("expected requirement list"),
        }
    }

    #[test]
    fn test_serve_defaults() {
        let cli = Cli::try_parse_from(["requireflow", "serve"]).unwrap();
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.host, "127.0.0.1");
                assert_eq!(args.port, 3001);
                assert!(!args.log);
            }
            _ => panic!("expected serve"),
        }
    }
}
