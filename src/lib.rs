//! # Cloudscan
//!
//! A compliance rule engine for cloud asset inventories, with pluggable
//! inventory sources, declarative rules, atomic JSON reports, and
//! compliance-ready audit logging.
//!
//! ## Overview
//!
//! Cloudscan evaluates each asset of an inventory against an ordered set of
//! rules. Every failed rule records a violation and deducts its penalty from
//! a starting score of 100 (floored at 0). Assets scoring below 100 are
//! written to a compliance report.
//!
//! - Fetch assets through a consistent [`InventorySource`] API
//! - Combine built-in checks with rules declared in JSON
//! - Evaluate batches sequentially or on the rayon pool
//! - Persist reports atomically through a [`ReportSink`](report::ReportSink)
//! - Generate structured audit logs for every run
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cloudscan::inventory::MockInventory;
//! use cloudscan::ComplianceScanner;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let scanner = ComplianceScanner::builder()
//!         .with_inventory(MockInventory::new())
//!         .build()?;
//!
//!     let run = scanner.run().await?;
//!     for summary in run.summaries() {
//!         println!("{}", summary);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - `default` - Includes tokio runtime support
//! - `tokio-runtime` - Async file I/O and timers via tokio
//! - `parallel` - Batch evaluation on the rayon thread pool
//!
//! ## Architecture
//!
//! - **Core**: The asset model, traits, errors and digests
//! - **Rules**: Built-in and declarative rules, the ordered rule set
//! - **Engine**: Scoring and report filtering
//! - **Inventory**: Asset sources
//! - **Report**: Report sinks
//! - **Scanner**: Orchestration of one scan run
//! - **Audit**: Structured logging for compliance

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod audit;
pub mod core;
pub mod engine;
pub mod inventory;
pub mod report;
pub mod rules;
pub mod scanner;

// Re-export commonly used types at the crate root
pub use crate::core::{
    Asset, AssetStatus, AssetType, InventoryError, InventorySource, ReportError, Rule,
    RuleError, ScanError, Severity, Violation,
};

pub use crate::engine::{evaluate, non_compliant, ComplianceEvaluator, EvaluatorConfig};
pub use crate::report::{FilesystemReportSink, ReportSink, ReportStatus};
pub use crate::rules::{RuleSet, RuleSetConfig};
pub use crate::scanner::{ComplianceScanner, ScanRun, ScannerConfig};

/// Prelude module for convenient imports.
///
/// ```rust
/// use cloudscan::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::{
        Asset, AssetStatus, AssetType, InventoryError, InventorySource, ReportError, Rule,
        RuleError, ScanError, Severity, Violation,
    };
    pub use crate::engine::{evaluate, non_compliant, AssetSummary, ComplianceEvaluator};
    pub use crate::report::{FilesystemReportSink, ReportSink, ReportStatus};
    pub use crate::rules::{Condition, DeclarativeRule, RuleSet};
    pub use crate::scanner::{ComplianceScanner, ScanRun, ScannerConfig};
}
