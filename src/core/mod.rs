//! Core types and traits for the cloudscan library.
//!
//! This module provides the fundamental building blocks used throughout
//! the library:
//!
//! - [`types`] - The asset model: `Asset`, `Violation`, `AssetType`, `Severity`
//! - [`traits`] - The `Rule` and `InventorySource` traits
//! - [`error`] - Structured error types
//! - [`digest`] - BLAKE3/SHA-256 report digests

pub mod digest;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types at the core level
pub use digest::{ReportDigest, ReportHasher};
pub use error::{
    InventoryError, InventoryResult, ReportError, ReportResult, RuleError, RuleResult, ScanError,
};
pub use traits::{ArcInventorySource, ArcRule, Finding, InventorySource, Rule};
pub use types::{Asset, AssetStatus, AssetType, Severity, Violation, MAX_SCORE};
