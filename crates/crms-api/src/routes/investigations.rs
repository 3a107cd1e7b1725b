//! Investigation routes

use super::Deleted;
use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use crms_core::store::ListParams;
use crms_core::{Investigation, InvestigationUpdate, InvestigationView, NewInvestigation};
use std::sync::Arc;
use uuid::Uuid;

pub async fn list(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<InvestigationView>>> {
    Ok(Json(state.service.list_investigations(&actor, &params).await?))
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<InvestigationView>> {
    Ok(Json(state.service.get_investigation(&actor, id).await?))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Json(payload): Json<NewInvestigation>,
) -> ApiResult<(StatusCode, Json<Investigation>)> {
    let investigation = state.service.create_investigation(&actor, payload).await?;
    Ok((StatusCode::CREATED, Json(investigation)))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<InvestigationUpdate>,
) -> ApiResult<Json<Investigation>> {
    Ok(Json(state.service.update_investigation(&actor, id, payload).await?))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Deleted>> {
    state.service.delete_investigation(&actor, id).await?;
    Ok(Json(Deleted { deleted: true }))
}
