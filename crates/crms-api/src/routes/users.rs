//! User and officer administration

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use crms_core::{NewAccount, Profile, ProfileUpdate, Role};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Deserialize)]
pub struct UserQuery {
    pub role: Option<Role>,
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Query(query): Query<UserQuery>,
) -> ApiResult<Json<Vec<Profile>>> {
    Ok(Json(state.service.list_users(&actor, query.role).await?))
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Profile>> {
    Ok(Json(state.service.get_user(&actor, id).await?))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProfileUpdate>,
) -> ApiResult<Json<Profile>> {
    Ok(Json(state.service.update_user(&actor, id, payload).await?))
}

pub async fn list_officers(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
) -> ApiResult<Json<Vec<Profile>>> {
    Ok(Json(state.service.list_officers(&actor).await?))
}

pub async fn create_officer(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Json(payload): Json<NewAccount>,
) -> ApiResult<(StatusCode, Json<Profile>)> {
    let officer = state.service.create_officer(&actor, payload).await?;
    Ok((StatusCode::CREATED, Json(officer)))
}
