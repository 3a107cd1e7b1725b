//! Crime report routes

use super::Deleted;
use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use crms_core::service::CrimeReportQuery;
use crms_core::{Assignment, CrimeReport, CrimeReportUpdate, CrimeReportView, NewCrimeReport};
use std::sync::Arc;
use uuid::Uuid;

pub async fn list(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Query(query): Query<CrimeReportQuery>,
) -> ApiResult<Json<Vec<CrimeReportView>>> {
    Ok(Json(state.service.list_crime_reports(&actor, query).await?))
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<CrimeReportView>> {
    Ok(Json(state.service.get_crime_report(&actor, id).await?))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Json(payload): Json<NewCrimeReport>,
) -> ApiResult<(StatusCode, Json<CrimeReport>)> {
    let report = state.service.create_crime_report(&actor, payload).await?;
    Ok((StatusCode::CREATED, Json(report)))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CrimeReportUpdate>,
) -> ApiResult<Json<CrimeReport>> {
    Ok(Json(state.service.update_crime_report(&actor, id, payload).await?))
}

pub async fn assign(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<Assignment>,
) -> ApiResult<Json<CrimeReport>> {
    Ok(Json(state.service.assign_officer(&actor, id, payload).await?))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Deleted>> {
    state.service.delete_crime_report(&actor, id).await?;
    Ok(Json(Deleted { deleted: true }))
}
