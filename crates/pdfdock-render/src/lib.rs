//! Pdfdock Render Library
//!
//! Builds report PDFs in memory for the generation path. Layout is a fixed
//! A4 report template: header with logo and institution block, title, date
//! line, word-wrapped body, and a page-numbered footer carrying the
//! generation timestamp. Callers treat this crate as a black box that either
//! returns finished PDF bytes or fails with a [`RenderError`].

mod error;
mod layout;
mod renderer;

pub use error::RenderError;
pub use renderer::ReportRenderer;
