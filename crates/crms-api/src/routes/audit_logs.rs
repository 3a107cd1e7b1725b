//! Audit trail

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use crms_core::store::ListParams;
use crms_core::AuditLogView;
use std::sync::Arc;

pub async fn list(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<AuditLogView>>> {
    Ok(Json(state.service.list_audit_logs(&actor, &params).await?))
}
