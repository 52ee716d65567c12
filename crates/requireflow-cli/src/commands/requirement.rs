//! Requirement management commands.

use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use dialoguer::Confirm;
use requireflow_core::customer;
use requireflow_core::requirement::{
    self,
    filter::{parse_param, FilterParams, RequirementFilter},
    input::{NewComment, NewRequirement, RequirementPatch},
    model::{RequirementSource, SourceType},
};
use requireflow_core::user;
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::info;

use crate::output;

#[derive(Subcommand)]
pub enum RequirementCommands {
    /// List requirements, newest first
    List(ListArgs),

    /// Show a requirement with its comments and links
    Show {
        /// Requirement ID
        id: String,
    },

    /// Capture a new requirement
    New(NewRequirementArgs),

    /// Change a requirement's status
    Status {
        /// Requirement ID
        id: String,

        /// New status (pending_review, planned, developing, testing, released, rejected, merged)
        status: String,
    },

    /// Comment on a requirement
    Comment {
        /// Requirement ID
        id: String,

        /// Comment text
        content: String,

        /// Commenting user ID
        #[arg(long = "user", default_value = "1")]
        user_id: String,
    },

    /// Permanently delete a requirement
    Delete {
        /// Requirement ID
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Args)]
pub struct ListArgs {
    #[arg(long)]
    pub status: Option<String>,

    #[arg(long)]
    pub priority: Option<String>,

    /// Customer ID
    #[arg(long)]
    pub customer: Option<String>,

    #[arg(long)]
    pub module: Option<String>,

    /// Requirement type
    #[arg(long = "type")]
    pub kind: Option<String>,

    /// online, offline or backend
    #[arg(long)]
    pub source_category: Option<String>,

    /// Case-insensitive text in title or description
    #[arg(short, long)]
    pub search: Option<String>,
}

#[derive(Args)]
pub struct NewRequirementArgs {
    /// Requirement title
    pub title: String,

    /// Requirement description (defaults to the title)
    #[arg(long)]
    pub description: Option<String>,

    /// Customer ID
    #[arg(short, long)]
    pub customer: String,

    /// Capture channel, e.g. meeting_requirement, chat_wechat, ticket
    #[arg(long, default_value = "meeting_requirement")]
    pub source: String,

    /// Verbatim customer wording
    #[arg(long)]
    pub original_content: Option<String>,

    /// Collecting user ID
    #[arg(long, default_value = "1")]
    pub collector: String,

    /// Requirement type
    #[arg(long = "type", default_value = "new_feature")]
    pub kind: String,

    /// Product module
    #[arg(short, long, default_value = "other")]
    pub module: String,

    /// Tag (repeatable)
    #[arg(short, long = "tag")]
    pub tags: Vec<String>,

    /// P0 (most urgent) to P3
    #[arg(short, long, default_value = "P2")]
    pub priority: String,

    /// urgent, important, normal or low
    #[arg(long, default_value = "normal")]
    pub urgency: String,

    /// Business value, 1-10
    #[arg(long, default_value = "5")]
    pub business_value: u8,

    /// How many times the request has come up
    #[arg(long, default_value = "1")]
    pub frequency: u32,
}

pub async fn execute(cmd: RequirementCommands, data_dir: &Path) -> Result<()> {
    let ws = super::open_workspace(data_dir).await?;

    match cmd {
        RequirementCommands::List(args) => {
            let filter = RequirementFilter::try_from(FilterParams {
                status: args.status,
                priority: args.priority,
                customer_id: args.customer,
                module: args.module,
                kind: args.kind,
                source_category: args.source_category,
                search: args.search,
            })?;
            let list = requirement::list_requirements(&ws, &filter).await?;
            output::print_requirements_table(&list.requirements, list.total);
        }

        RequirementCommands::Show { id } => {
            let req = requirement::get_requirement(&ws, &id).await?;
            output::print_requirement(&req);
            let links = requirement::linked_requirements(&ws, &id).await?;
            output::print_links(&links);
        }

        RequirementCommands::New(args) => {
            let customer = customer::get_customer(&ws, &args.customer).await?;
            let collector = user::get_user(&ws, &args.collector).await?;
            let source_type: SourceType = parse_required("source", args.source)?;

            let input = NewRequirement {
                description: args.description.unwrap_or_else(|| args.title.clone()),
                title: args.title,
                source: RequirementSource {
                    kind: source_type,
                    category: source_type.default_category(),
                    original_content: args.original_content,
                    meeting_recording: None,
                    attachments: None,
                    collector_id: collector.id,
                    collector_name: collector.name,
                    collect_time: chrono::Local::now().format("%Y-%m-%dT%H:%M:%S").to_string(),
                },
                customer_id: customer.id,
                customer_name: customer.name,
                customer_industry: customer.industry,
                kind: parse_required("type", args.kind)?,
                module: parse_required("module", args.module)?,
                tags: args.tags,
                priority: parse_required("priority", args.priority)?,
                customer_urgency: parse_required("urgency", args.urgency)?,
                business_value: args.business_value,
                frequency: args.frequency,
                status: None,
                linked_requirements: Vec::new(),
                planned_version: None,
                released_at: None,
                ai_assessment: None,
            };

            let req = requirement::create_requirement(&ws, input).await?;
            info!(id = %req.id, customer = %req.customer_id, "Requirement captured from CLI");
            println!(
                "{} Created requirement: {} ({})",
                "✓".green().bold(),
                req.title.cyan(),
                req.id.dimmed()
            );
        }

        RequirementCommands::Status { id, status } => {
            let patch = RequirementPatch {
                status: Some(parse_required("status", status)?),
                ..Default::default()
            };
            let req = requirement::update_requirement(&ws, &id, patch).await?;
            info!(id = %req.id, status = req.status.as_str(), "Requirement status changed from CLI");
            println!(
                "{} Moved requirement {} to {}",
                "✓".green().bold(),
                req.id.dimmed(),
                req.status.as_str().cyan()
            );
        }

        RequirementCommands::Comment {
            id,
            content,
            user_id,
        } => {
            let author = user::get_user(&ws, &user_id).await?;
            let comment = requirement::add_comment(
                &ws,
                &id,
                NewComment {
                    user_id: author.id,
                    user_name: author.name,
                    user_avatar: author.avatar,
                    content,
                },
            )
            .await?;
            info!(id = %id, comment = %comment.id, "Comment added from CLI");
            println!(
                "{} Comment added by {} ({})",
                "✓".green().bold(),
                comment.user_name.cyan(),
                comment.id.dimmed()
            );
        }

        RequirementCommands::Delete { id, yes } => {
            let req = requirement::get_requirement(&ws, &id).await?;
            let confirmed = yes
                || Confirm::new()
                    .with_prompt(format!("Delete requirement '{}'?", req.title))
                    .default(false)
                    .interact()?;

            if !confirmed {
                println!("{}", "Cancelled.".dimmed());
                return Ok(());
            }

            requirement::delete_requirement(&ws, &id).await?;
            info!(id = %id, "Requirement deleted from CLI");
            println!("{} Deleted requirement {}", "✓".green().bold(), id.dimmed());
        }
    }

    Ok(())
}

/// Parse an enum flag from its wire name.
fn parse_required<T: DeserializeOwned>(field: &str, value: String) -> Result<T> {
    parse_param(field, Some(value))?.ok_or_else(|| anyhow!("{} must not be empty", field))
}
