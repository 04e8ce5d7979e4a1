use pdfdock_core::AppError;

/// Rendering failures. The dominant cause is a logo URL that cannot be
/// fetched or decoded; encoding failures are unexpected.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to fetch logo {url}: {reason}")]
    LogoFetch { url: String, reason: String },

    #[error("Failed to decode logo image: {0}")]
    LogoDecode(String),

    #[error("Failed to encode PDF document: {0}")]
    Encode(String),
}

impl From<RenderError> for AppError {
    fn from(err: RenderError) -> Self {
        AppError::Render(err.to_string())
    }
}
