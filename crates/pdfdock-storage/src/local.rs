use std::path::{Path, PathBuf};

use pdfdock_core::AppError;
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::naming::{self, ArtifactKind};

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Remove failed: {0}")]
    RemoveFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ConfigError(msg) => AppError::Internal(msg),
            other => AppError::Io(other.to_string()),
        }
    }
}

/// A durably written artifact: the generated filename, its path in the
/// content directory, and the byte count written.
#[derive(Debug, Clone)]
pub struct StoredArtifact {
    pub filename: String,
    pub path: PathBuf,
    pub size: u64,
}

/// Content-directory artifact writer.
///
/// The directory is created once at construction; writes are durable
/// (`write_all` + `sync_all`). On a write error the partially written file is
/// the caller's cleanup responsibility, matching the rollback contract of the
/// lifecycle service.
#[derive(Clone)]
pub struct ArtifactStore {
    content_dir: PathBuf,
}

impl ArtifactStore {
    /// Create a new ArtifactStore rooted at `content_dir`, creating the
    /// directory recursively if absent.
    pub async fn new(content_dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let content_dir = content_dir.into();

        fs::create_dir_all(&content_dir).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create content directory {}: {}",
                content_dir.display(),
                e
            ))
        })?;

        Ok(ArtifactStore { content_dir })
    }

    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    /// Write the full byte content to a freshly named artifact and return its
    /// location and size.
    pub async fn write(&self, kind: ArtifactKind, data: &[u8]) -> StorageResult<StoredArtifact> {
        let filename = naming::artifact_filename(kind);
        let path = self.content_dir.join(&filename);
        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(data).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Artifact written"
        );

        Ok(StoredArtifact {
            filename,
            path,
            size: data.len() as u64,
        })
    }

    /// Remove an artifact file. Removing a missing file is not an error, so
    /// rollback stays idempotent.
    pub async fn remove(&self, path: &Path) -> StorageResult<()> {
        if !fs::try_exists(path).await.unwrap_or(false) {
            return Ok(());
        }

        fs::remove_file(path).await.map_err(|e| {
            StorageError::RemoveFailed(format!("Failed to delete file {}: {}", path.display(), e))
        })?;

        tracing::info!(path = %path.display(), "Artifact removed");

        Ok(())
    }

    /// Check if an artifact file exists.
    pub async fn exists(&self, path: &Path) -> bool {
        fs::try_exists(path).await.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_write_creates_file_with_content() {
        let dir = tempdir().unwrap();
        let store = ArtifactStore::new(dir.path()).await.unwrap();

        let data = b"%PDF-1.7 test bytes";
        let artifact = store.write(ArtifactKind::Report, data).await.unwrap();

        assert!(artifact.filename.starts_with("report_"));
        assert!(artifact.filename.ends_with(".pdf"));
        assert_eq!(artifact.size, data.len() as u64);
        assert_eq!(artifact.path, dir.path().join(&artifact.filename));

        let on_disk = tokio::fs::read(&artifact.path).await.unwrap();
        assert_eq!(on_disk, data);
    }

    #[tokio::test]
    async fn test_new_creates_nested_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a/b/pdfs");
        let store = ArtifactStore::new(&nested).await.unwrap();

        assert!(nested.is_dir());
        let artifact = store.write(ArtifactKind::Upload, b"data").await.unwrap();
        assert!(store.exists(&artifact.path).await);
    }

    #[tokio::test]
    async fn test_remove_deletes_file() {
        let dir = tempdir().unwrap();
        let store = ArtifactStore::new(dir.path()).await.unwrap();

        let artifact = store.write(ArtifactKind::Upload, b"data").await.unwrap();
        assert!(store.exists(&artifact.path).await);

        store.remove(&artifact.path).await.unwrap();
        assert!(!store.exists(&artifact.path).await);
    }

    #[tokio::test]
    async fn test_remove_missing_file_is_ok() {
        let dir = tempdir().unwrap();
        let store = ArtifactStore::new(dir.path()).await.unwrap();

        let result = store.remove(&dir.path().join("nonexistent.pdf")).await;
        assert!(result.is_ok());
    }

    #[test]
    fn test_storage_error_maps_to_io_kind() {
        use pdfdock_core::ErrorMetadata;

        let err = AppError::from(StorageError::WriteFailed("disk full".to_string()));
        assert_eq!(err.error_code(), "IO_ERROR");

        let err = AppError::from(StorageError::ConfigError("bad dir".to_string()));
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
    }
}
