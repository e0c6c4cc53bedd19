//! Core types used throughout the cloudscan library.
//!
//! This module defines the asset and violation records that flow through
//! evaluation and reporting, together with the closed sets of asset
//! categories and severity levels.

use crate::core::error::InventoryError;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// The score of an asset that no rule fired against.
pub const MAX_SCORE: u8 = 100;

/// Category of a cloud resource.
///
/// Serialized in `SCREAMING_SNAKE_CASE` (`STORAGE_BUCKET`, `VM_INSTANCE`, ...),
/// the form inventory APIs usually report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetType {
    /// Object storage bucket.
    StorageBucket,
    /// Virtual machine instance.
    VmInstance,
    /// Managed database instance.
    DatabaseInstance,
    /// Network load balancer.
    LoadBalancer,
    /// Workload identity / service account.
    ServiceAccount,
}

impl AssetType {
    /// Returns the wire name of this asset type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StorageBucket => "STORAGE_BUCKET",
            Self::VmInstance => "VM_INSTANCE",
            Self::DatabaseInstance => "DATABASE_INSTANCE",
            Self::LoadBalancer => "LOAD_BALANCER",
            Self::ServiceAccount => "SERVICE_ACCOUNT",
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity level of a compliance violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Hygiene issue with little direct exposure.
    Low,
    /// Weakens defence in depth.
    Medium,
    /// Likely to cause a security or classification gap.
    High,
    /// Direct exposure requiring immediate action.
    Critical,
}

impl Severity {
    /// Returns the conventional score penalty for this severity.
    ///
    /// Rules may override it; the penalty belongs to the rule, not to the
    /// violation it records.
    pub fn default_penalty(&self) -> u32 {
        match self {
            Self::Low => 5,
            Self::Medium => 15,
            Self::High => 30,
            Self::Critical => 50,
        }
    }

    /// Returns the wire name of this severity.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One failed rule instance for one asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Identifier of the rule that produced this violation.
    #[serde(rename = "RuleID")]
    pub rule_id: String,

    /// Human-readable explanation.
    #[serde(rename = "Description")]
    pub description: String,

    /// Severity of the failed rule.
    #[serde(rename = "Severity")]
    pub severity: Severity,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(
        rule_id: impl Into<String>,
        description: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            description: description.into(),
            severity,
        }
    }
}

/// Pass/fail status of an evaluated asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AssetStatus {
    /// Score of exactly 100.
    Pass,
    /// Score below 100.
    Fail,
}

impl AssetStatus {
    /// Derives the status from a compliance score.
    pub fn from_score(score: u8) -> Self {
        if score < MAX_SCORE {
            Self::Fail
        } else {
            Self::Pass
        }
    }
}

impl fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "PASS"),
            Self::Fail => write!(f, "FAIL"),
        }
    }
}

/// A single cloud resource subject to compliance evaluation.
///
/// The identity fields are supplied by the inventory source. The score and
/// violation list are owned by the evaluator: they stay empty until the asset
/// is evaluated and are replaced wholesale on every evaluation.
///
/// # Examples
///
/// ```rust
/// use cloudscan::core::{Asset, AssetType};
///
/// let asset = Asset::new("gcp-001", AssetType::StorageBucket, "prod-user-photos")
///     .with_public(true)
///     .with_tags(["production", "user_data"]);
///
/// assert!(asset.has_tag("production"));
/// assert_eq!(asset.compliance_score(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    #[serde(rename = "ID")]
    id: String,

    /// Resource category.
    #[serde(rename = "Type")]
    pub asset_type: AssetType,

    /// Display name; not required to be unique.
    #[serde(rename = "Name", default)]
    pub name: String,

    /// Whether the resource is exposed to the public network.
    #[serde(rename = "IsPublic", default)]
    pub is_public: bool,

    /// Classification tags.
    #[serde(rename = "Tags", default)]
    pub tags: BTreeSet<String>,

    #[serde(rename = "ComplianceScore", default)]
    compliance_score: Option<u8>,

    #[serde(rename = "Violations", default)]
    violations: Vec<Violation>,
}

impl Asset {
    /// Creates a new, unevaluated asset.
    pub fn new(id: impl Into<String>, asset_type: AssetType, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            asset_type,
            name: name.into(),
            is_public: false,
            tags: BTreeSet::new(),
            compliance_score: None,
            violations: Vec::new(),
        }
    }

    /// Sets the public exposure flag.
    pub fn with_public(mut self, is_public: bool) -> Self {
        self.is_public = is_public;
        self
    }

    /// Adds a tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Adds several tags.
    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Returns the asset's unique identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns true if the asset carries the given tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Returns the compliance score, or `None` before evaluation.
    pub fn compliance_score(&self) -> Option<u8> {
        self.compliance_score
    }

    /// Returns the violations recorded by the last evaluation.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Returns true once the asset has been evaluated.
    pub fn is_evaluated(&self) -> bool {
        self.compliance_score.is_some()
    }

    /// Returns the pass/fail status, or `None` before evaluation.
    pub fn status(&self) -> Option<AssetStatus> {
        self.compliance_score.map(AssetStatus::from_score)
    }

    /// Checks that the asset carries a usable identity.
    pub fn validate(&self) -> Result<(), InventoryError> {
        if self.id.trim().is_empty() {
            return Err(InventoryError::malformed(&self.id, "asset id is empty"));
        }
        if self.id.trim() != self.id {
            return Err(InventoryError::malformed(
                &self.id,
                "asset id has leading or trailing whitespace",
            ));
        }
        Ok(())
    }

    /// Stores the outcome of an evaluation.
    pub(crate) fn record_evaluation(&mut self, score: u8, violations: Vec<Violation>) {
        self.compliance_score = Some(score.min(MAX_SCORE));
        self.violations = violations;
    }

    /// Drops any previous evaluation outcome.
    pub(crate) fn reset_evaluation(&mut self) {
        self.compliance_score = None;
        self.violations.clear();
    }
}
