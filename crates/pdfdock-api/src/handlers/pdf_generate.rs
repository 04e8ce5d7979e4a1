use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use pdfdock_core::models::{GenerateRequest, PdfRecordResponse};
use pdfdock_core::AppError;
use validator::Validate;

use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/v0/pdfs/generate",
    tag = "pdfs",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "PDF generated successfully", body = PdfRecordResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 422, description = "Document could not be rendered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn generate_pdf(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<GenerateRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    req.validate().map_err(AppError::from)?;

    let record = state.lifecycle.generate(&req).await?;

    Ok(Json(PdfRecordResponse::from(record)))
}
