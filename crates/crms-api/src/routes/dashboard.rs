//! Dashboard overview

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::AppState;
use axum::{extract::State, Json};
use crms_core::DashboardSummary;
use std::sync::Arc;

pub async fn summary(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
) -> ApiResult<Json<DashboardSummary>> {
    Ok(Json(state.service.dashboard_summary(&actor).await?))
}
