use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    response::IntoResponse,
    Json,
};
use pdfdock_core::models::PdfRecordResponse;
use pdfdock_core::AppError;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/v0/pdfs",
    tag = "pdfs",
    responses(
        (status = 200, description = "PDF uploaded successfully", body = PdfRecordResponse),
        (status = 400, description = "Invalid input or file extension", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn upload_pdf(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let mut candidate: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Invalid multipart form: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let declared_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::InvalidInput("File field has no filename".to_string()))?;

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidInput(format!("Failed to read file field: {}", e)))?;

        candidate = Some((declared_name, data.to_vec()));
        break;
    }

    let (declared_name, data) =
        candidate.ok_or_else(|| AppError::InvalidInput("Missing 'file' field".to_string()))?;

    let record = state.lifecycle.upload(&declared_name, &data).await?;

    Ok(Json(PdfRecordResponse::from(record)))
}
