//! Service layer: orchestration between storage, rendering, and the database.

pub mod lifecycle;

pub use lifecycle::PdfLifecycleService;
