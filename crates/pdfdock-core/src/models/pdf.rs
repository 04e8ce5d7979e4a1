use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Lifecycle status of a PDF record.
///
/// A record is created as `Created` (generation path) or `Uploaded` (upload
/// path) and can only transition to `Deleted`. Deletion is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "pdf_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum PdfStatus {
    Created,
    Uploaded,
    Deleted,
}

impl FromStr for PdfStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "CREATED" => Ok(PdfStatus::Created),
            "UPLOADED" => Ok(PdfStatus::Uploaded),
            "DELETED" => Ok(PdfStatus::Deleted),
            _ => Err(anyhow::anyhow!("Invalid PDF status: {}", s)),
        }
    }
}

impl Display for PdfStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            PdfStatus::Created => write!(f, "CREATED"),
            PdfStatus::Uploaded => write!(f, "UPLOADED"),
            PdfStatus::Deleted => write!(f, "DELETED"),
        }
    }
}

/// A persisted PDF record. The database row is the sole index into the
/// content directory; `filepath` names the artifact on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfRecord {
    pub id: i64,
    pub filename: String,
    pub original_name: Option<String>,
    pub filepath: String,
    pub size: i64,
    pub status: PdfStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Insert payload for a new PDF record. `id` and timestamps are assigned by
/// the database.
#[derive(Debug, Clone)]
pub struct NewPdfRecord {
    pub filename: String,
    pub original_name: Option<String>,
    pub filepath: String,
    pub size: i64,
    pub status: PdfStatus,
}

/// Request body for the generation endpoint.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct GenerateRequest {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "institution_name must not be empty"))]
    pub institution_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub content: String,
}

/// One page of list results plus the pre-pagination total, with the
/// normalized paging values actually applied.
#[derive(Debug, Clone)]
pub struct PdfPage {
    pub records: Vec<PdfRecord>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PdfRecordResponse {
    pub id: i64,
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
    pub filepath: String,
    pub size: i64,
    pub status: PdfStatus,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<PdfRecord> for PdfRecordResponse {
    fn from(record: PdfRecord) -> Self {
        PdfRecordResponse {
            id: record.id,
            filename: record.filename,
            original_name: record.original_name,
            filepath: record.filepath,
            size: record.size,
            status: record.status,
            created_at: record.created_at,
            updated_at: record.updated_at,
            deleted_at: record.deleted_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginationMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PdfListResponse {
    pub data: Vec<PdfRecordResponse>,
    pub pagination: PaginationMeta,
}

impl From<PdfPage> for PdfListResponse {
    fn from(page: PdfPage) -> Self {
        PdfListResponse {
            pagination: PaginationMeta {
                page: page.page,
                limit: page.limit,
                total: page.total,
            },
            data: page.records.into_iter().map(PdfRecordResponse::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record(status: PdfStatus) -> PdfRecord {
        PdfRecord {
            id: 7,
            filename: "report_20260807_d1f8.pdf".to_string(),
            original_name: Some("Quarterly Report.pdf".to_string()),
            filepath: "./data/pdfs/report_20260807_d1f8.pdf".to_string(),
            size: 2048,
            status,
            created_at: Utc::now(),
            updated_at: None,
            deleted_at: None,
        }
    }

    #[test]
    fn test_status_serialization_uppercase() {
        let json = serde_json::to_string(&PdfStatus::Created).unwrap();
        assert_eq!(json, "\"CREATED\"");
        let parsed: PdfStatus = serde_json::from_str("\"DELETED\"").unwrap();
        assert_eq!(parsed, PdfStatus::Deleted);
    }

    #[test]
    fn test_status_from_str_case_insensitive() {
        assert_eq!("uploaded".parse::<PdfStatus>().unwrap(), PdfStatus::Uploaded);
        assert!("ARCHIVED".parse::<PdfStatus>().is_err());
    }

    #[test]
    fn test_record_response_from_record() {
        let record = sample_record(PdfStatus::Created);
        let response = PdfRecordResponse::from(record.clone());
        assert_eq!(response.id, record.id);
        assert_eq!(response.filename, record.filename);
        assert_eq!(response.status, PdfStatus::Created);
        assert_eq!(response.size, 2048);

        // Optional fields are omitted when unset
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("updated_at").is_none());
        assert!(json.get("deleted_at").is_none());
    }

    #[test]
    fn test_list_response_carries_pagination() {
        let page = PdfPage {
            records: vec![sample_record(PdfStatus::Uploaded)],
            total: 15,
            page: 2,
            limit: 10,
        };
        let response = PdfListResponse::from(page);
        assert_eq!(response.data.len(), 1);
        assert_eq!(response.pagination.total, 15);
        assert_eq!(response.pagination.page, 2);
        assert_eq!(response.pagination.limit, 10);
    }

    #[test]
    fn test_generate_request_rejects_empty_title() {
        let req = GenerateRequest {
            title: String::new(),
            institution_name: "Acme Institute".to_string(),
            address: String::new(),
            phone: String::new(),
            logo_url: None,
            content: String::new(),
        };
        assert!(req.validate().is_err());
    }
}
