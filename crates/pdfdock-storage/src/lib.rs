//! Pdfdock Storage Library
//!
//! The artifact writer for the content directory. Artifacts are named
//! `{report_|upload_}{YYYYMMDD}_{uuid}.pdf` so names never collide and the
//! origin of a file is visible on disk. The database row is the sole index
//! into this directory; this crate never tracks state of its own.

pub mod local;
pub(crate) mod naming;

// Re-export commonly used types
pub use local::{ArtifactStore, StorageError, StorageResult, StoredArtifact};
pub use naming::ArtifactKind;
