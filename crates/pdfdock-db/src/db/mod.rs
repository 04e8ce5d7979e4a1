//! Database repositories for data access layer

pub mod pdf;

pub use pdf::{PdfRepository, PdfStore};
