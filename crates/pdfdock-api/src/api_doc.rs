//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::handlers;
use pdfdock_core::models::{
    GenerateRequest, PaginationMeta, PdfListResponse, PdfRecordResponse, PdfStatus,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::pdf_generate::generate_pdf,
        handlers::pdf_upload::upload_pdf,
        handlers::pdf_list::list_pdfs,
        handlers::pdf_delete::delete_pdf,
    ),
    components(schemas(
        GenerateRequest,
        PdfRecordResponse,
        PdfListResponse,
        PaginationMeta,
        PdfStatus,
        ErrorResponse,
    )),
    tags(
        (name = "pdfs", description = "PDF generation, upload, listing and soft deletion")
    )
)]
pub struct ApiDoc;
