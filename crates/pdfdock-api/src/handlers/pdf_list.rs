use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use pdfdock_core::models::{PdfListResponse, PdfStatus};
use serde::Deserialize;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

/// Paging query. Values below 1 (including the omitted-field default of 0)
/// fall back to the service defaults; the limit is capped server-side.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ListQuery {
    /// Optional status filter; absent means all statuses, deleted included.
    pub status: Option<PdfStatus>,
    #[serde(default)]
    pub page: i64,
    #[serde(default)]
    pub limit: i64,
}

#[utoipa::path(
    get,
    path = "/api/v0/pdfs",
    tag = "pdfs",
    params(ListQuery),
    responses(
        (status = 200, description = "Page of PDF records", body = PdfListResponse),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_pdfs(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let page = state
        .lifecycle
        .list(query.status, query.page, query.limit)
        .await?;

    Ok(Json(PdfListResponse::from(page)))
}
