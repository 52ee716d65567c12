//! Statistics handlers.

use axum::{extract::State, Json};
use requireflow_core::dashboard::{
    self,
    model::{Breakdown, DashboardSummary},
};

use super::Envelope;
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn get_dashboard(
    State(state): State<AppState>,
) -> ApiResult<Json<Envelope<DashboardSummary>>> {
    let summary = dashboard::get_summary(&state.ws).await?;
    Ok(Envelope::ok(summary))
}

pub async fn get_breakdown(State(state): State<AppState>) -> ApiResult<Json<Envelope<Breakdown>>> {
    let breakdown = dashboard::get_breakdown(&state.ws).await?;
    Ok(Envelope::ok(breakdown))
}
