//! Application setup and initialization
//!
//! All initialization logic lives here rather than in main.rs so the pieces
//! stay individually testable.

pub mod database;
pub mod routes;
pub mod server;

use std::sync::Arc;

use anyhow::{Context, Result};
use pdfdock_core::{Config, UploadPolicy};
use pdfdock_db::{PdfRepository, PdfStore};
use pdfdock_render::ReportRenderer;
use pdfdock_storage::ArtifactStore;

use crate::services::lifecycle::{PageDefaults, PdfLifecycleService};
use crate::state::AppState;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Fail fast on misconfiguration
    config.validate().context("Configuration validation failed")?;

    let pool = database::setup_database(&config).await?;

    // Content-directory setup happens exactly once, here.
    let artifacts = ArtifactStore::new(&config.content_dir)
        .await
        .with_context(|| format!("Failed to initialize content directory {}", config.content_dir))?;
    tracing::info!(content_dir = %config.content_dir, "Content directory ready");

    let store: Arc<dyn PdfStore> = Arc::new(PdfRepository::new(pool));
    let lifecycle = PdfLifecycleService::new(
        store,
        artifacts,
        ReportRenderer::new(),
        UploadPolicy::new(config.max_upload_size_bytes),
        PageDefaults {
            default_limit: config.default_page_size,
            max_limit: config.max_page_size,
        },
    );

    let state = Arc::new(AppState {
        lifecycle: Arc::new(lifecycle),
        config: config.clone(),
    });

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
