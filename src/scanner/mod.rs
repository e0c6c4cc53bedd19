//! Scan orchestration.
//!
//! The [`ComplianceScanner`] is the main entry point for running compliance
//! scans. It fetches assets from an inventory source, evaluates them against
//! a rule set, and hands the failing ones to a report sink.

mod compliance_scanner;
mod run;

pub use compliance_scanner::{ComplianceScanner, ComplianceScannerBuilder, ScannerConfig};
pub use run::ScanRun;
