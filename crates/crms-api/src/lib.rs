//! CRCRMS API
//!
//! Axum front end over [`crms_core::RecordService`]. Handlers authenticate
//! the caller, hand the resulting actor to the service, and map its errors
//! to HTTP status codes.

pub mod auth;
pub mod blob;
pub mod config;
pub mod db;
pub mod error;
pub mod routes;

pub use config::AppConfig;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use crms_core::RecordService;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers
pub struct AppState {
    pub service: RecordService,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(service: RecordService, config: AppConfig) -> Arc<Self> {
        Arc::new(Self { service, config })
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    let evidence = Router::new()
        .route(
            "/api/crime-reports/:id/evidence",
            post(routes::evidence::upload_evidence),
        )
        .layer(DefaultBodyLimit::max(state.config.max_upload_size));

    Router::new()
        // Health check
        .route("/health", get(routes::health_check))

        // Authentication
        .route("/api/auth/signup", post(routes::auth::sign_up))
        .route("/api/auth/login", post(routes::auth::login))
        .route("/api/auth/refresh", post(routes::auth::refresh))
        .route("/api/auth/me", get(routes::auth::me).put(routes::auth::update_me))

        .route("/api/dashboard", get(routes::dashboard::summary))

        // Crime reports
        .route(
            "/api/crime-reports",
            get(routes::crime_reports::list).post(routes::crime_reports::create),
        )
        .route(
            "/api/crime-reports/:id",
            get(routes::crime_reports::get)
                .put(routes::crime_reports::update)
                .delete(routes::crime_reports::delete),
        )
        .route("/api/crime-reports/:id/assign", post(routes::crime_reports::assign))
        .merge(evidence)

        // Investigations
        .route(
            "/api/investigations",
            get(routes::investigations::list).post(routes::investigations::create),
        )
        .route(
            "/api/investigations/:id",
            get(routes::investigations::get)
                .put(routes::investigations::update)
                .delete(routes::investigations::delete),
        )

        // Criminal records
        .route(
            "/api/criminal-records",
            get(routes::criminal_records::list).post(routes::criminal_records::create),
        )
        .route(
            "/api/criminal-records/:id",
            get(routes::criminal_records::get)
                .put(routes::criminal_records::update)
                .delete(routes::criminal_records::delete),
        )

        // Accounts
        .route(
            "/api/officers",
            get(routes::users::list_officers).post(routes::users::create_officer),
        )
        .route("/api/users", get(routes::users::list))
        .route("/api/users/:id", get(routes::users::get).put(routes::users::update))

        .route("/api/audit-logs", get(routes::audit_logs::list))

        // Uploaded evidence
        .nest_service("/files", ServeDir::new(&state.config.upload_dir))

        // CORS
        .layer(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any))

        // Tracing
        .layer(TraceLayer::new_for_http())

        // State
        .with_state(state)
}
