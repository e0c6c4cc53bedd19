//! The result of one scan.

use crate::core::{Asset, ReportError};
use crate::engine::{non_compliant, AssetSummary, RejectedAsset};
use crate::report::ReportStatus;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Everything a scan produced.
#[derive(Debug)]
pub struct ScanRun {
    /// Unique run ID.
    pub id: Uuid,

    /// Name of the inventory source.
    pub source: String,

    /// When the run started.
    pub started_at: DateTime<Utc>,

    /// When the run finished.
    pub completed_at: DateTime<Utc>,

    /// Evaluated assets, in inventory order.
    pub assets: Vec<Asset>,

    /// Assets excluded before evaluation.
    pub rejected: Vec<RejectedAsset>,

    /// Outcome of the report sink.
    pub report: Result<ReportStatus, ReportError>,
}

impl ScanRun {
    /// Returns the run duration.
    pub fn duration(&self) -> chrono::Duration {
        self.completed_at - self.started_at
    }

    /// Returns the assets scoring below 100.
    pub fn non_compliant(&self) -> Vec<&Asset> {
        non_compliant(&self.assets)
    }

    /// Returns a summary line per evaluated asset.
    pub fn summaries(&self) -> Vec<AssetSummary> {
        self.assets.iter().map(AssetSummary::from).collect()
    }

    /// Returns true if every evaluated asset passed.
    pub fn is_clean(&self) -> bool {
        self.non_compliant().is_empty()
    }

    /// Returns true if the sink persisted a report.
    pub fn report_written(&self) -> bool {
        matches!(self.report, Ok(ReportStatus::Written { .. }))
    }
}
