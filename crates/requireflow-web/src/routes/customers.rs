//! Customer route handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use requireflow_core::customer::{
    self,
    model::{Customer, NewCustomer},
};

use super::Envelope;
use crate::error::{ApiJson, ApiResult};
use crate::state::AppState;

pub async fn list_customers(
    State(state): State<AppState>,
) -> ApiResult<Json<Envelope<Vec<Customer>>>> {
    let customers = customer::list_customers(&state.ws).await?;
    Ok(Envelope::ok(customers))
}

pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Envelope<Customer>>> {
    let customer = customer::get_customer(&state.ws, &id).await?;
    Ok(Envelope::ok(customer))
}

pub async fn create_customer(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewCustomer>,
) -> ApiResult<(StatusCode, Json<Envelope<Customer>>)> {
    let customer = customer::create_customer(&state.ws, input).await?;
    Ok(Envelope::created(customer))
}
