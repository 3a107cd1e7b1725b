//! Authentication routes

use crate::auth::{client_ip, create_token, AuthUser};
use crate::error::{ApiError, ApiResult};
use crate::AppState;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use crms_core::access::{navigation_for, NavItem};
use crms_core::{NewAccount, OwnProfileUpdate, Profile};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_in: i64,
    pub profile: Profile,
}

#[derive(Serialize)]
pub struct MeResponse {
    pub profile: Profile,
    pub navigation: Vec<NavItem>,
}

fn issue(state: &AppState, profile: Profile) -> ApiResult<LoginResponse> {
    let token = create_token(&profile, &state.config.jwt_secret, state.config.token_ttl_secs)
        .map_err(|e| ApiError::Internal(format!("token signing failed: {}", e)))?;
    Ok(LoginResponse {
        token,
        expires_in: state.config.token_ttl_secs,
        profile,
    })
}

pub async fn sign_up(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<NewAccount>,
) -> ApiResult<(StatusCode, Json<Profile>)> {
    let profile = state.service.sign_up(payload, client_ip(&headers)).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let profile = state
        .service
        .authenticate(&payload.email, &payload.password)
        .await?;
    info!("{} signed in", profile.email);
    Ok(Json(issue(&state, profile)?))
}

pub async fn refresh(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
) -> ApiResult<Json<LoginResponse>> {
    let profile = state.service.profile(&actor).await?;
    Ok(Json(issue(&state, profile)?))
}

pub async fn me(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
) -> ApiResult<Json<MeResponse>> {
    let profile = state.service.profile(&actor).await?;
    Ok(Json(MeResponse {
        navigation: navigation_for(profile.role),
        profile,
    }))
}

pub async fn update_me(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Json(payload): Json<OwnProfileUpdate>,
) -> ApiResult<Json<Profile>> {
    Ok(Json(state.service.update_own_profile(&actor, payload).await?))
}
