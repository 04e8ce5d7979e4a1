//! Data models for the application
//!
//! Each sub-module represents a specific feature area.

mod pdf;

// Re-export all models for convenient imports
pub use pdf::*;
