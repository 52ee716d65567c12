//! Requirement store.
//!
//! Every operation reads the whole requirement collection. Mutations rewrite
//! it wholesale while holding the collection's write lock, so each mutation
//! either lands completely or not at all.

pub mod assessment;
pub mod filter;
pub mod input;
pub mod model;

use std::collections::HashSet;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::customer::{self, model::Customer};
use crate::error::{CoreError, CoreResult};
use crate::workspace::Workspace;
use filter::RequirementFilter;
use input::{NewComment, NewRequirement, RequirementPatch};
use model::{later_than, Comment, Requirement};

/// Result of a list query.
#[derive(Debug, Clone, Serialize)]
pub struct RequirementList {
    pub requirements: Vec<Requirement>,
    pub total: usize,
}

/// Linked requirement ids split by whether they still resolve.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedRequirements {
    pub found: Vec<Requirement>,
    pub missing: Vec<String>,
}

/// List requirements matching `filter`, newest first.
///
/// Requirements created at the same instant keep their stored order.
pub async fn list_requirements(
    ws: &Workspace,
    filter: &RequirementFilter,
) -> CoreResult<RequirementList> {
    let mut requirements: Vec<Requirement> = ws
        .requirements
        .load()
        .await?
        .into_iter()
        .filter(|r| filter.matches(r))
        .collect();

    // sort_by is stable
    requirements.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let total = requirements.len();
    debug!(?filter, total, "Listed requirements");
    Ok(RequirementList {
        requirements,
        total,
    })
}

/// Get a requirement by ID.
pub async fn get_requirement(ws: &Workspace, id: &str) -> CoreResult<Requirement> {
    ws.requirements
        .load()
        .await?
        .into_iter()
        .find(|r| r.id == id)
        .ok_or_else(|| not_found(id))
}

/// Create a new requirement.
///
/// `status` defaults to `pending_review`; `comments` starts empty and
/// `created_at == updated_at`. The customer reference is not checked.
pub async fn create_requirement(ws: &Workspace, input: NewRequirement) -> CoreResult<Requirement> {
    input.validate()?;

    let requirement = input.into_requirement(Uuid::new_v4().to_string(), Utc::now());
    let created = requirement.clone();

    ws.requirements
        .modify(move |requirements| {
            requirements.push(requirement);
            Ok::<_, CoreError>(())
        })
        .await?;

    info!(id = %created.id, title = %created.title, status = created.status.as_str(), "Created requirement");
    Ok(created)
}

/// Shallow-merge `patch` onto a requirement and refresh `updated_at`.
pub async fn update_requirement(
    ws: &Workspace,
    id: &str,
    patch: RequirementPatch,
) -> CoreResult<Requirement> {
    patch.validate()?;

    let updated = ws
        .requirements
        .modify(|requirements| {
            let req = find_mut(requirements, id)?;
            patch.apply(req);
            req.touch();
            Ok::<_, CoreError>(req.clone())
        })
        .await?;

    info!(id = %updated.id, status = updated.status.as_str(), "Updated requirement");
    Ok(updated)
}

/// Permanently remove a requirement.
pub async fn delete_requirement(ws: &Workspace, id: &str) -> CoreResult<()> {
    ws.requirements
        .modify(|requirements| {
            let before = requirements.len();
            requirements.retain(|r| r.id != id);
            if requirements.len() == before {
                return Err(not_found(id));
            }
            Ok(())
        })
        .await?;

    info!(id, "Deleted requirement");
    Ok(())
}

/// Append a comment and refresh the requirement's `updated_at`.
pub async fn add_comment(ws: &Workspace, requirement_id: &str, input: NewComment) -> CoreResult<Comment> {
    input.validate()?;

    let comment = ws
        .requirements
        .modify(|requirements| {
            let req = find_mut(requirements, requirement_id)?;
            let comment = Comment {
                id: Uuid::new_v4().to_string(),
                user_id: input.user_id,
                user_name: input.user_name,
                user_avatar: input.user_avatar,
                content: input.content,
                created_at: later_than(req.updated_at),
            };
            req.comments.push(comment.clone());
            req.updated_at = comment.created_at;
            Ok::<_, CoreError>(comment)
        })
        .await?;

    info!(requirement_id, comment_id = %comment.id, "Added comment");
    Ok(comment)
}

/// Append complete records, keeping their ids, timestamps, comments and
/// assessments. Fails without writing anything if any id is already taken.
pub async fn import_requirements(ws: &Workspace, records: Vec<Requirement>) -> CoreResult<usize> {
    for record in &records {
        input::require_text("title", &record.title)?;
        if let Some(assessment) = &record.ai_assessment {
            assessment.validate()?;
        }
    }

    let count = records.len();
    ws.requirements
        .modify(move |requirements| {
            let mut seen: HashSet<String> = requirements.iter().map(|r| r.id.clone()).collect();
            for record in &records {
                if !seen.insert(record.id.clone()) {
                    return Err(CoreError::DuplicateId(record.id.clone()));
                }
            }
            requirements.extend(records);
            Ok(())
        })
        .await?;

    info!(count, "Imported requirements");
    Ok(count)
}

/// Resolve the customer a requirement points at. `None` when the reference
/// dangles.
pub async fn requirement_customer(ws: &Workspace, id: &str) -> CoreResult<Option<Customer>> {
    let req = get_requirement(ws, id).await?;
    let customer = customer::find_customer(ws, &req.customer_id).await?;
    if customer.is_none() {
        warn!(id, customer_id = %req.customer_id, "Requirement references unknown customer");
    }
    Ok(customer)
}

/// Resolve a requirement's linked ids against the collection.
pub async fn linked_requirements(ws: &Workspace, id: &str) -> CoreResult<LinkedRequirements> {
    let all = ws.requirements.load().await?;
    let req = all.iter().find(|r| r.id == id).ok_or_else(|| not_found(id))?;

    let mut found = Vec::new();
    let mut missing = Vec::new();
    for linked_id in &req.linked_requirements {
        match all.iter().find(|r| &r.id == linked_id) {
            Some(linked) => found.push(linked.clone()),
            None => missing.push(linked_id.clone()),
        }
    }
    Ok(LinkedRequirements { found, missing })
}

fn find_mut<'a>(requirements: &'a mut [Requirement], id: &str) -> CoreResult<&'a mut Requirement> {
    requirements
        .iter_mut()
        .find(|r| r.id == id)
        .ok_or_else(|| not_found(id))
}

fn not_found(id: &str) -> CoreError {
    warn!(id, "Requirement not found");
    CoreError::RequirementNotFound(id.to_string())
}
