//! Upload validation
//!
//! Pure checks applied to upload candidates before any side effect. The
//! generation path produces its own trusted artifact and is not subject to
//! these checks; its optional logo URL is screened with
//! [`has_allowed_extension`] instead.

use std::path::Path;

use crate::error::AppError;

/// Image extensions accepted for a remote logo URL. Anything else falls back
/// to the bundled default image.
pub const ALLOWED_LOGO_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Size and extension constraints for uploaded PDF files.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    max_size_bytes: u64,
}

impl UploadPolicy {
    pub fn new(max_size_bytes: u64) -> Self {
        Self { max_size_bytes }
    }

    pub fn max_size_bytes(&self) -> u64 {
        self.max_size_bytes
    }

    /// Validate a candidate's declared filename and size.
    ///
    /// The extension check is case-insensitive and runs before the size check,
    /// matching the order failures are reported to callers.
    pub fn validate(&self, filename: &str, size: u64) -> Result<(), AppError> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match extension.as_deref() {
            Some("pdf") => {}
            _ => return Err(AppError::InvalidFileExtension(filename.to_string())),
        }

        if size > self.max_size_bytes {
            return Err(AppError::FileTooLarge {
                size,
                max: self.max_size_bytes,
            });
        }

        Ok(())
    }
}

/// Case-insensitive suffix match against an extension allow-list.
///
/// Works on bare filenames and URL paths alike, so `https://cdn/x/logo.PNG`
/// passes for `png`.
pub fn has_allowed_extension(name: &str, allowed: &[&str]) -> bool {
    let lower = name.to_lowercase();
    allowed.iter().any(|ext| lower.ends_with(&format!(".{}", ext)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEN_MIB: u64 = 10 * 1024 * 1024;

    #[test]
    fn test_accepts_pdf_extension() {
        let policy = UploadPolicy::new(TEN_MIB);
        assert!(policy.validate("invoice.pdf", 1024).is_ok());
        assert!(policy.validate("INVOICE.PDF", 1024).is_ok());
        assert!(policy.validate("archive.2025.pdf", 1024).is_ok());
    }

    #[test]
    fn test_rejects_non_pdf_extension() {
        let policy = UploadPolicy::new(TEN_MIB);
        let err = policy.validate("notes.txt", 1024).unwrap_err();
        assert!(matches!(err, AppError::InvalidFileExtension(_)));
    }

    #[test]
    fn test_rejects_missing_extension() {
        let policy = UploadPolicy::new(TEN_MIB);
        assert!(matches!(
            policy.validate("pdf", 1024),
            Err(AppError::InvalidFileExtension(_))
        ));
        assert!(matches!(
            policy.validate("", 1024),
            Err(AppError::InvalidFileExtension(_))
        ));
    }

    #[test]
    fn test_rejects_oversized_file() {
        let policy = UploadPolicy::new(TEN_MIB);
        let err = policy.validate("big.pdf", TEN_MIB + 1).unwrap_err();
        match err {
            AppError::FileTooLarge { size, max } => {
                assert_eq!(size, TEN_MIB + 1);
                assert_eq!(max, TEN_MIB);
            }
            other => panic!("Expected FileTooLarge, got {:?}", other),
        }
    }

    #[test]
    fn test_size_at_limit_is_accepted() {
        let policy = UploadPolicy::new(TEN_MIB);
        assert!(policy.validate("exact.pdf", TEN_MIB).is_ok());
    }

    #[test]
    fn test_extension_checked_before_size() {
        let policy = UploadPolicy::new(TEN_MIB);
        // Both constraints violated: the extension failure wins.
        assert!(matches!(
            policy.validate("huge.zip", TEN_MIB * 2),
            Err(AppError::InvalidFileExtension(_))
        ));
    }

    #[test]
    fn test_logo_allow_list() {
        assert!(has_allowed_extension("logo.png", &ALLOWED_LOGO_EXTENSIONS));
        assert!(has_allowed_extension("LOGO.JPG", &ALLOWED_LOGO_EXTENSIONS));
        assert!(has_allowed_extension(
            "https://cdn.example.com/assets/brand.jpeg",
            &ALLOWED_LOGO_EXTENSIONS
        ));
        assert!(!has_allowed_extension("logo.gif", &ALLOWED_LOGO_EXTENSIONS));
        assert!(!has_allowed_extension("", &ALLOWED_LOGO_EXTENSIONS));
        assert!(!has_allowed_extension("png", &ALLOWED_LOGO_EXTENSIONS));
    }
}
