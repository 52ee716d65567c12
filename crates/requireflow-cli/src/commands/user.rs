//! User directory commands.

use anyhow::Result;
use clap::Subcommand;
use std::path::Path;

use crate::output;

#[derive(Subcommand)]
pub enum UserCommands {
    /// List users
    List,
}

pub async fn execute(cmd: UserCommands, data_dir: &Path) -> Result<()> {
    let ws = super::open_workspace(data_dir).await?;

    match cmd {
        UserCommands::List => {
            let users = requireflow_core::user::list_users(&ws).await?;
            output::print_users_table(&users);
        }
    }

    Ok(())
}
