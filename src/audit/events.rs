//! Audit event types and emission functions.

use crate::core::{Asset, ReportError, Violation};
use crate::engine::RejectedAsset;
use crate::report::ReportStatus;

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Summary of a violation for audit logging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationSummary {
    /// Rule that fired.
    pub rule_id: String,
    /// Severity level.
    pub severity: String,
}

impl From<&Violation> for ViolationSummary {
    fn from(v: &Violation) -> Self {
        Self {
            rule_id: v.rule_id.clone(),
            severity: v.severity.to_string(),
        }
    }
}

/// Emits an audit event for a scan starting.
pub fn emit_scan_started(run_id: &str, source: &str, rule_ids: &[&str]) {
    tracing::info!(
        target: "cloudscan::audit",
        event_type = "scan_started",
        run_id = %run_id,
        source = %source,
        rule_ids = ?rule_ids,
        rule_count = rule_ids.len(),
        "Compliance scan started"
    );
}

/// Emits an audit event for an evaluated asset.
pub fn emit_asset_evaluated(run_id: &str, asset: &Asset) {
    let violations: Vec<ViolationSummary> =
        asset.violations().iter().map(ViolationSummary::from).collect();

    tracing::info!(
        target: "cloudscan::audit",
        event_type = "asset_evaluated",
        run_id = %run_id,
        asset_id = %asset.id(),
        asset_type = %asset.asset_type,
        score = ?asset.compliance_score(),
        status = ?asset.status().map(|s| s.to_string()),
        violations = ?violations,
        violation_count = violations.len(),
        "Asset evaluated"
    );
}

/// Emits an audit event for an asset excluded before evaluation.
pub fn emit_asset_rejected(run_id: &str, rejected: &RejectedAsset) {
    tracing::warn!(
        target: "cloudscan::audit",
        event_type = "asset_rejected",
        run_id = %run_id,
        index = rejected.index,
        asset_id = %rejected.asset.id(),
        reason = %rejected.error,
        "Asset rejected"
    );
}

/// Emits an audit event for a report sink outcome.
pub fn emit_report_outcome(run_id: &str, sink: &str, outcome: &Result<ReportStatus, ReportError>) {
    match outcome {
        Ok(ReportStatus::Written {
            location,
            asset_count,
            digest,
            ..
        }) => tracing::info!(
            target: "cloudscan::audit",
            event_type = "report_written",
            run_id = %run_id,
            sink = %sink,
            location = %location,
            asset_count = *asset_count,
            digest_blake3 = %digest.blake3,
            digest_sha256 = ?digest.sha256,
            "Compliance report written"
        ),
        Ok(ReportStatus::CleanRun) => tracing::info!(
            target: "cloudscan::audit",
            event_type = "report_clean",
            run_id = %run_id,
            sink = %sink,
            "No compliance failures, nothing reported"
        ),
        Err(error) => tracing::error!(
            target: "cloudscan::audit",
            event_type = "report_failed",
            run_id = %run_id,
            sink = %sink,
            error = %error,
            "Compliance report could not be written"
        ),
    }
}

/// Emits an audit event for a completed scan.
pub fn emit_scan_completed(
    run_id: &str,
    evaluated: usize,
    non_compliant: usize,
    rejected: usize,
    duration: Duration,
) {
    tracing::info!(
        target: "cloudscan::audit",
        event_type = "scan_completed",
        run_id = %run_id,
        evaluated,
        non_compliant,
        rejected,
        duration_ms = duration.as_millis() as u64,
        "Compliance scan completed"
    );
}
