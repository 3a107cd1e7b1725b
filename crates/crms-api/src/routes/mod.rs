//! API routes

pub mod audit_logs;
pub mod auth;
pub mod crime_reports;
pub mod criminal_records;
pub mod dashboard;
pub mod evidence;
pub mod investigations;
pub mod users;

use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Body of a successful delete.
#[derive(Serialize)]
pub struct Deleted {
    pub deleted: bool,
}
