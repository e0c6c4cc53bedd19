//! Report sink trait definition.

use crate::core::{Asset, ReportError, ReportHasher};
use crate::report::status::ReportStatus;

use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

/// Trait for report sink implementations.
///
/// A sink receives the filtered, non-compliant assets of one scan and
/// persists them. An empty slice means every asset passed: sinks must not
/// write anything and return [`ReportStatus::CleanRun`].
///
/// # Example Implementation
///
/// ```rust,ignore
/// use cloudscan::core::{Asset, ReportError};
/// use cloudscan::report::{ReportSink, ReportStatus};
/// use async_trait::async_trait;
///
/// #[derive(Debug)]
/// struct TicketSink {
///     // Your ticketing client
/// }
///
/// #[async_trait]
/// impl ReportSink for TicketSink {
///     fn name(&self) -> &str {
///         "tickets"
///     }
///
///     async fn publish(&self, assets: &[&Asset]) -> Result<ReportStatus, ReportError> {
///         // Open one ticket per failing asset
///         todo!()
///     }
/// }
/// ```
#[async_trait]
pub trait ReportSink: Send + Sync + Debug {
    /// Returns a stable, human-readable name for this sink.
    fn name(&self) -> &str;

    /// Persists the non-compliant assets.
    ///
    /// # Errors
    ///
    /// - `Serialization` - the report could not be encoded.
    /// - `Persistence` - the report could not be stored. A previously
    ///   persisted report must be left untouched.
    async fn publish(&self, assets: &[&Asset]) -> Result<ReportStatus, ReportError>;
}

/// Encodes assets as the report document: a JSON array indented with two
/// spaces.
pub fn encode_report(assets: &[&Asset]) -> Result<Vec<u8>, ReportError> {
    serde_json::to_vec_pretty(assets).map_err(ReportError::Serialization)
}

/// A sink that keeps reports in memory.
///
/// Useful for testing or for embedding the scanner in a service that ships
/// reports elsewhere.
#[derive(Debug, Default)]
pub struct InMemoryReportSink {
    reports: RwLock<Vec<Vec<Asset>>>,
    failing: AtomicBool,
    hasher: ReportHasher,
}

impl InMemoryReportSink {
    /// Creates a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent publish fail with a persistence error.
    pub fn fail_writes(&self, failing: bool) {
        self.failing.store(failing, Ordering::Relaxed);
    }

    /// Returns every published report, oldest first.
    pub fn reports(&self) -> Vec<Vec<Asset>> {
        self.reports
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Returns the most recent report.
    pub fn last_report(&self) -> Option<Vec<Asset>> {
        self.reports
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .last()
            .cloned()
    }

    /// Returns the number of reports written.
    pub fn publish_count(&self) -> usize {
        self.reports
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

#[async_trait]
impl ReportSink for InMemoryReportSink {
    fn name(&self) -> &str {
        "memory"
    }

    async fn publish(&self, assets: &[&Asset]) -> Result<ReportStatus, ReportError> {
        if assets.is_empty() {
            return Ok(ReportStatus::CleanRun);
        }

        if self.failing.load(Ordering::Relaxed) {
            return Err(ReportError::persistence(
                "memory",
                std::io::Error::new(std::io::ErrorKind::Other, "simulated write failure"),
            ));
        }

        let bytes = encode_report(assets)?;
        let digest = self.hasher.hash_bytes(&bytes);

        self.reports
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(assets.iter().map(|&a| a.clone()).collect());

        tracing::debug!(count = assets.len(), digest = %digest, "Report kept in memory");

        Ok(ReportStatus::written("memory", assets.len(), digest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AssetType;

    #[test]
    fn test_encode_report_shape() {
        let asset = Asset::new("gcp-002", AssetType::VmInstance, "worker").with_tag("development");
        let bytes = encode_report(&[&asset]).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.starts_with("[\n  {\n    \"ID\": \"gcp-002\""));
        for field in ["\"Type\"", "\"Name\"", "\"IsPublic\"", "\"Tags\"", "\"ComplianceScore\"", "\"Violations\""] {
            assert!(text.contains(field), "missing {}", field);
        }
    }

    #[tokio::test]
    async fn test_in_memory_clean_run() {
        let sink = InMemoryReportSink::new();
        let status = sink.publish(&[]).await.unwrap();

        assert!(status.is_clean_run());
        assert_eq!(sink.publish_count(), 0);
        assert!(sink.last_report().is_none());
    }

    #[tokio::test]
    async fn test_in_memory_publish() {
        let sink = InMemoryReportSink::new();
        let asset = Asset::new("b-1", AssetType::StorageBucket, "photos").with_public(true);

        let status = sink.publish(&[&asset]).await.unwrap();
        assert_eq!(status.asset_count(), 1);
        assert_eq!(sink.publish_count(), 1);
        assert_eq!(sink.last_report().unwrap()[0].id(), "b-1");
    }

    #[tokio::test]
    async fn test_in_memory_failure() {
        let sink = InMemoryReportSink::new();
        sink.fail_writes(true);

        let asset = Asset::new("b-1", AssetType::StorageBucket, "photos");
        let err = sink.publish(&[&asset]).await.unwrap_err();
        assert!(matches!(err, ReportError::Persistence { .. }));
        assert!(sink.reports().is_empty());
    }
}
