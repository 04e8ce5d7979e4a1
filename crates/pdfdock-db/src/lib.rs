//! Pdfdock Database Library
//!
//! Repositories for the data access layer. The `pdf_files` table is the sole
//! index into the content directory; every read and write of PDF records goes
//! through [`PdfRepository`].

pub mod db;

// Re-export commonly used types
pub use db::{PdfRepository, PdfStore};
