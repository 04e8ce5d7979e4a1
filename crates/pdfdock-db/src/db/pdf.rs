//! PDF record repository: CRUD for the pdf_files table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pdfdock_core::models::{NewPdfRecord, PdfRecord, PdfStatus};
use pdfdock_core::AppError;
use sqlx::{PgPool, Postgres};

const PDF_COLUMNS: &str =
    "id, filename, original_name, filepath, size, status, created_at, updated_at, deleted_at";

/// Row type for the pdf_files table (for FromRow).
#[derive(Debug, sqlx::FromRow)]
pub struct PdfRow {
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

impl PdfRow {
    pub fn into_record(self) -> PdfRecord {
        PdfRecord {
            id: self.id,
            filename: self.filename,
            original_name: self.original_name,
            filepath: self.filepath,
            size: self.size,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: self.deleted_at,
        }
    }
}

/// Persistence seam for PDF records.
///
/// The lifecycle service depends on this trait rather than a concrete
/// repository so tests can substitute an in-memory store.
#[async_trait]
pub trait PdfStore: Send + Sync {
    /// Insert a new record and return it with its assigned id and timestamps.
    async fn insert(&self, record: NewPdfRecord) -> Result<PdfRecord, AppError>;

    /// Page through records, newest first, with an optional status filter.
    /// Returns the page plus the pre-pagination total for the same filter.
    async fn list(
        &self,
        status: Option<PdfStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<PdfRecord>, i64), AppError>;

    /// Fetch a record by id.
    async fn get_by_id(&self, id: i64) -> Result<Option<PdfRecord>, AppError>;

    /// Transition a record to DELETED. The update is conditional on the row
    /// not already being deleted; `None` means no live row matched (missing id
    /// or already deleted).
    async fn soft_delete(&self, id: i64) -> Result<Option<PdfRecord>, AppError>;
}

/// Repository for the pdf_files table.
#[derive(Clone)]
pub struct PdfRepository {
    pool: PgPool,
}

impl PdfRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PdfStore for PdfRepository {
    #[tracing::instrument(skip(self, record), fields(db.table = "pdf_files", db.operation = "insert"))]
    async fn insert(&self, record: NewPdfRecord) -> Result<PdfRecord, AppError> {
        let row: PdfRow = sqlx::query_as::<Postgres, PdfRow>(&format!(
            r#"
            INSERT INTO pdf_files (filename, original_name, filepath, size, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {PDF_COLUMNS}
            "#,
        ))
        .bind(&record.filename)
        .bind(&record.original_name)
        .bind(&record.filepath)
        .bind(record.size)
        .bind(record.status)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into_record())
    }

    #[tracing::instrument(skip(self), fields(db.table = "pdf_files", db.operation = "list"))]
    async fn list(
        &self,
        status: Option<PdfStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<PdfRecord>, i64), AppError> {
        let total: i64 = sqlx::query_scalar::<Postgres, i64>(
            "SELECT COUNT(*) FROM pdf_files WHERE $1::pdf_status IS NULL OR status = $1",
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        let rows: Vec<PdfRow> = sqlx::query_as::<Postgres, PdfRow>(&format!(
            r#"
            SELECT {PDF_COLUMNS} FROM pdf_files
            WHERE $1::pdf_status IS NULL OR status = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        ))
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((rows.into_iter().map(PdfRow::into_record).collect(), total))
    }

    #[tracing::instrument(skip(self), fields(db.table = "pdf_files", db.record_id = %id))]
    async fn get_by_id(&self, id: i64) -> Result<Option<PdfRecord>, AppError> {
        let row: Option<PdfRow> = sqlx::query_as::<Postgres, PdfRow>(&format!(
            "SELECT {PDF_COLUMNS} FROM pdf_files WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(PdfRow::into_record))
    }

    // Single conditional update: a concurrent delete of the same id makes one
    // caller win and the other observe zero affected rows.
    #[tracing::instrument(skip(self), fields(db.table = "pdf_files", db.operation = "soft_delete", db.record_id = %id))]
    async fn soft_delete(&self, id: i64) -> Result<Option<PdfRecord>, AppError> {
        let row: Option<PdfRow> = sqlx::query_as::<Postgres, PdfRow>(&format!(
            r#"
            UPDATE pdf_files
            SET status = 'DELETED', deleted_at = now(), updated_at = now()
            WHERE id = $1 AND status <> 'DELETED'
            RETURNING {PDF_COLUMNS}
            "#,
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(PdfRow::into_record))
    }
}
