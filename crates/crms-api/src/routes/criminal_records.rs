//! Criminal record routes

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
use crms_core::{CriminalRecord, CriminalRecordInput};
use std::sync::Arc;
use uuid::Uuid;

pub async fn list(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<CriminalRecord>>> {
    Ok(Json(state.service.list_criminal_records(&actor, &params).await?))
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<CriminalRecord>> {
    Ok(Json(state.service.get_criminal_record(&actor, id).await?))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Json(payload): Json<CriminalRecordInput>,
) -> ApiResult<(StatusCode, Json<CriminalRecord>)> {
    let record = state.service.create_criminal_record(&actor, payload).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CriminalRecordInput>,
) -> ApiResult<Json<CriminalRecord>> {
    Ok(Json(state.service.update_criminal_record(&actor, id, payload).await?))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Deleted>> {
    state.service.delete_criminal_record(&actor, id).await?;
    Ok(Json(Deleted { deleted: true }))
}
