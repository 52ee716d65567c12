//! Requirement route handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use requireflow_core::customer::model::Customer;
use requireflow_core::requirement::{
    self,
    filter::{FilterParams, RequirementFilter},
    input::{NewComment, NewRequirement, RequirementPatch},
    model::{Comment, Requirement},
    LinkedRequirements,
};

use super::Envelope;
use crate::error::{ApiJson, ApiQuery, ApiResult};
use crate::state::AppState;

pub async fn list_requirements(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<FilterParams>,
) -> ApiResult<Json<Envelope<Vec<Requirement>>>> {
    let filter = RequirementFilter::try_from(params)?;
    let list = requirement::list_requirements(&state.ws, &filter).await?;
    Ok(Envelope::list(list.requirements, list.total))
}

pub async fn get_requirement(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Envelope<Requirement>>> {
    let req = requirement::get_requirement(&state.ws, &id).await?;
    Ok(Envelope::ok(req))
}

pub async fn create_requirement(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewRequirement>,
) -> ApiResult<(StatusCode, Json<Envelope<Requirement>>)> {
    let req = requirement::create_requirement(&state.ws, input).await?;
    Ok(Envelope::created(req))
}

pub async fn update_requirement(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<RequirementPatch>,
) -> ApiResult<Json<Envelope<Requirement>>> {
    let req = requirement::update_requirement(&state.ws, &id, patch).await?;
    Ok(Envelope::ok(req))
}

pub async fn delete_requirement(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Envelope<()>>> {
    requirement::delete_requirement(&state.ws, &id).await?;
    Ok(Envelope::message("Requirement deleted"))
}

pub async fn add_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(input): ApiJson<NewComment>,
) -> ApiResult<(StatusCode, Json<Envelope<Comment>>)> {
    let comment = requirement::add_comment(&state.ws, &id, input).await?;
    Ok(Envelope::created(comment))
}

/// The referenced customer, or `data: null` when the reference dangles.
pub async fn get_requirement_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Envelope<Option<Customer>>>> {
    let customer = requirement::requirement_customer(&state.ws, &id).await?;
    Ok(Envelope::ok(customer))
}

pub async fn get_linked_requirements(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Envelope<LinkedRequirements>>> {
    let links = requirement::linked_requirements(&state.ws, &id).await?;
    Ok(Envelope::ok(links))
}
