//! Document download endpoints
//!
//! - POST /export/{format} - Download form from the result page
//! - POST /api/v1/exports - JSON export

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};

use crate::api::middleware::{ApiError, AppState};
use crate::api::responses::{ExportForm, ExportRequest};
use crate::models::{ExportArtifact, ExportFormat};

/// Respond with the artifact bytes as a file download
fn attachment(artifact: ExportArtifact) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", artifact.filename);
    (
        [
            (header::CONTENT_TYPE, artifact.format.mime_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        artifact.bytes,
    )
        .into_response()
}

/// POST /export/{format}
pub async fn download(
    State(state): State<AppState>,
    Path(format): Path<ExportFormat>,
    Form(form): Form<ExportForm>,
) -> Response {
    match state.contract_service.export(&form.content, format).await {
        Ok((artifact, _)) => attachment(artifact),
        Err(e) => {
            tracing::warn!("{} export failed: {}", format, e);
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Error: {}", e)).into_response()
        }
    }
}

/// POST /api/v1/exports
pub async fn export_json(
    State(state): State<AppState>,
    body: Result<Json<ExportRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = body?;
    let (artifact, _) = state
        .contract_service
        .export(&request.content, request.format)
        .await?;
    Ok(attachment(artifact))
}
