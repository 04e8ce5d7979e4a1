//! PDF lifecycle service
//!
//! The orchestration core. Owns the two-phase protocol shared by both
//! creation paths: write the artifact first, then persist the record, and on
//! persist failure remove the just-written artifact so no file outlives a
//! row that was never created. Soft-delete never touches the artifact.

use std::sync::Arc;

use pdfdock_core::models::{GenerateRequest, NewPdfRecord, PdfPage, PdfRecord, PdfStatus};
use pdfdock_core::{AppError, UploadPolicy};
use pdfdock_db::PdfStore;
use pdfdock_render::ReportRenderer;
use pdfdock_storage::{ArtifactKind, ArtifactStore, StoredArtifact};

/// Paging defaults applied when the caller omits or under-specifies values.
#[derive(Debug, Clone, Copy)]
pub struct PageDefaults {
    pub default_limit: i64,
    pub max_limit: i64,
}

pub struct PdfLifecycleService {
    store: Arc<dyn PdfStore>,
    artifacts: ArtifactStore,
    renderer: ReportRenderer,
    policy: UploadPolicy,
    paging: PageDefaults,
}

impl PdfLifecycleService {
    pub fn new(
        store: Arc<dyn PdfStore>,
        artifacts: ArtifactStore,
        renderer: ReportRenderer,
        policy: UploadPolicy,
        paging: PageDefaults,
    ) -> Self {
        Self {
            store,
            artifacts,
            renderer,
            policy,
            paging,
        }
    }

    /// Render a report and persist it as a `CREATED` record.
    pub async fn generate(&self, req: &GenerateRequest) -> Result<PdfRecord, AppError> {
        let bytes = self.renderer.render(req).await?;
        let artifact = self.artifacts.write(ArtifactKind::Report, &bytes).await?;

        let record = NewPdfRecord {
            filename: artifact.filename.clone(),
            original_name: Some(format!("{}.pdf", req.title)),
            filepath: artifact.path.display().to_string(),
            size: artifact.size as i64,
            status: PdfStatus::Created,
        };

        let record = self.persist_or_rollback(record, &artifact).await?;
        tracing::info!(id = record.id, filename = %record.filename, "PDF generated");
        Ok(record)
    }

    /// Validate and persist an uploaded PDF as an `UPLOADED` record.
    ///
    /// Validation runs before any side effect: a rejected candidate touches
    /// neither the filesystem nor the database.
    pub async fn upload(&self, declared_name: &str, data: &[u8]) -> Result<PdfRecord, AppError> {
        self.policy.validate(declared_name, data.len() as u64)?;

        let artifact = self.artifacts.write(ArtifactKind::Upload, data).await?;

        let record = NewPdfRecord {
            filename: artifact.filename.clone(),
            original_name: Some(declared_name.to_string()),
            filepath: artifact.path.display().to_string(),
            size: artifact.size as i64,
            status: PdfStatus::Uploaded,
        };

        let record = self.persist_or_rollback(record, &artifact).await?;
        tracing::info!(id = record.id, filename = %record.filename, "PDF uploaded");
        Ok(record)
    }

    /// List records newest-first with an optional status filter.
    ///
    /// `page < 1` falls back to 1; `limit < 1` falls back to the default page
    /// size, and the limit is capped. No filter means all statuses, deleted
    /// rows included.
    pub async fn list(
        &self,
        status: Option<PdfStatus>,
        page: i64,
        limit: i64,
    ) -> Result<PdfPage, AppError> {
        let page = if page < 1 { 1 } else { page };
        let limit = if limit < 1 {
            self.paging.default_limit
        } else {
            limit.min(self.paging.max_limit)
        };
        let offset = (page - 1).saturating_mul(limit);

        let (records, total) = self.store.list(status, limit, offset).await?;
        Ok(PdfPage {
            records,
            total,
            page,
            limit,
        })
    }

    /// Soft-delete a record. Deleting a missing or already-deleted record is
    /// an error; the artifact file stays on disk.
    pub async fn delete(&self, id: i64) -> Result<PdfRecord, AppError> {
        let record = self
            .store
            .soft_delete(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("PDF {} not found or already deleted", id)))?;
        tracing::info!(id = record.id, filename = %record.filename, "PDF soft-deleted");
        Ok(record)
    }

    /// Insert the record; on failure remove the just-written artifact
    /// (best-effort, the insert error stays the reported one).
    async fn persist_or_rollback(
        &self,
        record: NewPdfRecord,
        artifact: &StoredArtifact,
    ) -> Result<PdfRecord, AppError> {
        match self.store.insert(record).await {
            Ok(record) => Ok(record),
            Err(err) => {
                if let Err(cleanup_err) = self.artifacts.remove(&artifact.path).await {
                    tracing::warn!(
                        error = %cleanup_err,
                        path = %artifact.path.display(),
                        "Failed to remove artifact after insert failure"
                    );
                }
                Err(err)
            }
        }
    }
}
