//! Error types for the cloudscan library.
//!
//! Evaluation and filtering are total and have no error type. Failures
//! surface only where the engine meets the outside world: loading the
//! inventory, loading rule definitions, and persisting the report.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while obtaining or validating an asset inventory.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// The inventory source could not produce assets.
    #[error("inventory source '{source_name}' is unavailable: {reason}")]
    SourceUnavailable {
        /// Name of the inventory source.
        source_name: String,
        /// Human-readable reason.
        reason: String,
    },

    /// An asset is missing required identity fields.
    #[error("malformed asset '{id}': {reason}")]
    MalformedAsset {
        /// The offending asset id, as received.
        id: String,
        /// What is wrong with it.
        reason: String,
    },

    /// Two assets in one batch share an id.
    #[error("duplicate asset id '{id}'")]
    DuplicateAssetId {
        /// The repeated id.
        id: String,
    },

    /// An I/O error occurred while reading the inventory.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The inventory document could not be parsed.
    #[error("failed to parse inventory: {0}")]
    Parse(#[from] serde_json::Error),
}

impl InventoryError {
    /// Creates a `SourceUnavailable` error.
    pub fn source_unavailable(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// Creates a `MalformedAsset` error.
    pub fn malformed(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedAsset {
            id: id.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while building or loading a rule set.
#[derive(Debug, Error)]
pub enum RuleError {
    /// Two rules share an id.
    #[error("duplicate rule id '{rule_id}'")]
    DuplicateRuleId {
        /// The repeated id.
        rule_id: String,
    },

    /// A rule's penalty is outside 1..=100.
    #[error("rule '{rule_id}' has invalid penalty {penalty}: must be between 1 and 100")]
    InvalidPenalty {
        /// ID of the rule.
        rule_id: String,
        /// The rejected penalty.
        penalty: u32,
    },

    /// A rule definition is otherwise invalid.
    #[error("invalid rule '{rule_id}': {reason}")]
    InvalidRule {
        /// ID of the rule.
        rule_id: String,
        /// Reason for invalidity.
        reason: String,
    },

    /// An I/O error occurred while reading rule definitions.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Rule definitions could not be parsed.
    #[error("failed to parse rule definitions: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors raised by a report sink.
///
/// A failing sink never invalidates the evaluation that produced the report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The report could not be encoded.
    #[error("failed to serialize report: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The report could not be written to storage.
    #[error("failed to write report to '{}': {source}", .path.display())]
    Persistence {
        /// Destination of the report.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

impl ReportError {
    /// Creates a `Persistence` error.
    pub fn persistence(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Persistence {
            path: path.into(),
            source,
        }
    }
}

/// Errors that abort a scan run before any report is attempted.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The inventory could not be fetched or failed validation.
    #[error(transparent)]
    Inventory(#[from] InventoryError),

    /// The rule set is invalid.
    #[error(transparent)]
    Rules(#[from] RuleError),

    /// The scanner was configured incorrectly.
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the configuration error.
        message: String,
    },
}

impl ScanError {
    /// Creates a `Configuration` error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

/// A specialized `Result` type for inventory operations.
pub type InventoryResult<T> = Result<T, InventoryError>;

/// A specialized `Result` type for rule set operations.
pub type RuleResult<T> = Result<T, RuleError>;

/// A specialized `Result` type for report operations.
pub type ReportResult<T> = Result<T, ReportError>;
