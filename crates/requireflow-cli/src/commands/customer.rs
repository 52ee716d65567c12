//! Customer commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use requireflow_core::customer::{self, model::NewCustomer};
use requireflow_core::requirement::filter::parse_param;
use std::path::Path;
use tracing::info;

use crate::output;

#[derive(Subcommand)]
pub enum CustomerCommands {
    /// List customers
    List,

    /// Show a customer and its contacts
    Show {
        /// Customer ID
        id: String,
    },

    /// Register a new customer
    New(NewCustomerArgs),
}

#[derive(Args)]
pub struct NewCustomerArgs {
    /// Customer name
    pub name: String,

    /// Industry
    #[arg(short, long)]
    pub industry: String,

    /// large, medium or small
    #[arg(long, default_value = "medium")]
    pub size: String,

    /// potential, trial, paid or renewal
    #[arg(long, default_value = "potential")]
    pub stage: String,

    /// Annual contract value
    #[arg(long)]
    pub contract_value: Option<f64>,
}

pub async fn execute(cmd: CustomerCommands, data_dir: &Path) -> Result<()> {
    let ws = super::open_workspace(data_dir).await?;

    match cmd {
        CustomerCommands::List => {
            let customers = customer::list_customers(&ws).await?;
            output::print_customers_table(&customers);
        }

        CustomerCommands::Show { id } => {
            let found = customer::get_customer(&ws, &id).await?;
            output::print_customer(&found);
        }

        CustomerCommands::New(args) => {
            let input = NewCustomer {
                name: args.name,
                industry: args.industry,
                size: parse_param("size", Some(args.size))?
                    .ok_or_else(|| anyhow::anyhow!("size must not be empty"))?,
                stage: parse_param("stage", Some(args.stage))?
                    .ok_or_else(|| anyhow::anyhow!("stage must not be empty"))?,
                contract_value: args.contract_value,
                contacts: None,
            };

            let created = customer::create_customer(&ws, input).await?;
            info!(id = %created.id, name = %created.name, "Customer created from CLI");
            println!(
                "{} Created customer: {} ({})",
                "✓".green().bold(),
                created.name.cyan(),
                created.id.dimmed()
            );
        }
    }

    Ok(())
}
