//! Report outcome types.

use crate::core::ReportDigest;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a report sink did with a filtered batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReportStatus {
    /// The report was persisted.
    Written {
        /// Where the report went (file path or sink-specific label).
        location: String,
        /// Number of non-compliant assets in the report.
        asset_count: usize,
        /// Digest of the persisted bytes.
        digest: ReportDigest,
        /// When the write completed.
        written_at: DateTime<Utc>,
    },

    /// Every asset was compliant; nothing was written.
    CleanRun,
}

impl ReportStatus {
    /// Creates a `Written` status timestamped now.
    pub fn written(location: impl Into<String>, asset_count: usize, digest: ReportDigest) -> Self {
        Self::Written {
            location: location.into(),
            asset_count,
            digest,
            written_at: Utc::now(),
        }
    }

    /// Returns true if nothing needed reporting.
    pub fn is_clean_run(&self) -> bool {
        matches!(self, Self::CleanRun)
    }

    /// Returns the number of reported assets.
    pub fn asset_count(&self) -> usize {
        match self {
            Self::Written { asset_count, .. } => *asset_count,
            Self::CleanRun => 0,
        }
    }

    /// Returns the report location, if one was written.
    pub fn location(&self) -> Option<&str> {
        match self {
            Self::Written { location, .. } => Some(location),
            Self::CleanRun => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ReportHasher;

    #[test]
    fn test_report_status_helpers() {
        let digest = ReportHasher::new().hash_bytes(b"[]");
        let written = ReportStatus::written("compliance_report.json", 2, digest);

        assert!(!written.is_clean_run());
        assert_eq!(written.asset_count(), 2);
        assert_eq!(written.location(), Some("compliance_report.json"));

        assert!(ReportStatus::CleanRun.is_clean_run());
        assert_eq!(ReportStatus::CleanRun.asset_count(), 0);
        assert_eq!(ReportStatus::CleanRun.location(), None);
    }

    #[test]
    fn test_report_status_json_tag() {
        let json = serde_json::to_value(ReportStatus::CleanRun).unwrap();
        assert_eq!(json["status"], "clean_run");
    }
}
