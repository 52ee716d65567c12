//! User directory handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use requireflow_core::user::{self, model::User};

use super::Envelope;
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Envelope<Vec<User>>>> {
    let users = user::list_users(&state.ws).await?;
    Ok(Envelope::ok(users))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Envelope<User>>> {
    let user = user::get_user(&state.ws, &id).await?;
    Ok(Envelope::ok(user))
}
