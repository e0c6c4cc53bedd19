//! Structured audit logging for compliance environments.
//!
//! This module provides functions for emitting structured audit events
//! using the `tracing` crate under the `cloudscan::audit` target. Events can
//! be captured by any tracing subscriber (JSON file, OpenTelemetry, etc.).

mod events;

pub use events::{
    emit_asset_evaluated, emit_asset_rejected, emit_report_outcome, emit_scan_completed,
    emit_scan_started, ViolationSummary,
};
