//! Evidence upload

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::AppState;
use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::StatusCode,
    Json,
};
use crms_core::{CoreError, CrimeReport, EvidenceUpload};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

fn multipart_error(e: MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        CoreError::TooLarge(e.body_text()).into()
    } else {
        ApiError::BadRequest(e.body_text())
    }
}

/// Accepts one or more `file` fields and attaches them all to the report.
pub async fn upload_evidence(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> ApiResult<Json<CrimeReport>> {
    let mut uploads = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("file") {
            debug!("Ignoring multipart field {:?}", field.name());
            continue;
        }
        let file_name = field.file_name().unwrap_or("evidence.bin").to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(multipart_error)?;

        if bytes.len() > state.config.max_upload_size {
            return Err(CoreError::TooLarge(format!(
                "{} exceeds {} bytes",
                file_name, state.config.max_upload_size
            ))
            .into());
        }

        uploads.push(EvidenceUpload {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }

    Ok(Json(state.service.attach_evidence(&actor, id, uploads).await?))
}
