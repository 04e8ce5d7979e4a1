use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use pdfdock_core::models::PdfRecordResponse;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

#[utoipa::path(
    delete,
    path = "/api/v0/pdfs/{id}",
    tag = "pdfs",
    params(
        ("id" = i64, Path, description = "PDF record ID")
    ),
    responses(
        (status = 200, description = "PDF soft-deleted", body = PdfRecordResponse),
        (status = 404, description = "Record missing or already deleted", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn delete_pdf(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HttpAppError> {
    let record = state.lifecycle.delete(id).await?;

    Ok(Json(PdfRecordResponse::from(record)))
}
