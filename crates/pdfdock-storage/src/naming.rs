//! Collision-resistant artifact naming.
//!
//! Name format: `{prefix}_{YYYYMMDD}_{uuid}.pdf`. The prefix records which
//! path produced the file; the UUID makes the name unique without consulting
//! the database.

use chrono::Utc;
use uuid::Uuid;

/// Origin of an artifact, encoded into its filename prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// Produced by the generation path.
    Report,
    /// Received through the upload path.
    Upload,
}

impl ArtifactKind {
    pub fn prefix(self) -> &'static str {
        match self {
            ArtifactKind::Report => "report",
            ArtifactKind::Upload => "upload",
        }
    }
}

pub(crate) fn artifact_filename(kind: ArtifactKind) -> String {
    format!(
        "{}_{}_{}.pdf",
        kind.prefix(),
        Utc::now().format("%Y%m%d"),
        Uuid::new_v4()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_shape() {
        let name = artifact_filename(ArtifactKind::Report);
        assert!(name.starts_with("report_"));
        assert!(name.ends_with(".pdf"));

        let stem = name.trim_end_matches(".pdf");
        let parts: Vec<&str> = stem.splitn(3, '_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[1].len(), 8);
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        assert!(Uuid::parse_str(parts[2]).is_ok());
    }

    #[test]
    fn test_upload_prefix() {
        let name = artifact_filename(ArtifactKind::Upload);
        assert!(name.starts_with("upload_"));
    }

    #[test]
    fn test_names_are_unique() {
        let a = artifact_filename(ArtifactKind::Report);
        let b = artifact_filename(ArtifactKind::Report);
        assert_ne!(a, b);
    }
}
