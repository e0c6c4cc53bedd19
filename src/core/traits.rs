//! Core traits for the cloudscan library.
//!
//! This module defines the `Rule` trait that every compliance check
//! implements, and the `InventorySource` trait that supplies assets.

use crate::core::error::InventoryError;
use crate::core::types::{Asset, Severity, Violation};

use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

/// A violation paired with the penalty of the rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// The recorded violation.
    pub violation: Violation,
    /// Points subtracted from the asset's score.
    pub penalty: u32,
}

/// A stateless compliance check applied to one asset at a time.
///
/// New checks are added by implementing this trait and registering the rule
/// in a [`RuleSet`](crate::rules::RuleSet); the evaluator never needs to
/// change.
///
/// # Implementation Notes
///
/// - Rules must be pure: the same asset state always yields the same result.
/// - Rules inspect identity, type, exposure and tags only. They must not read
///   the asset's score or violations.
/// - Rules must never panic.
///
/// # Example Implementation
///
/// ```rust
/// use cloudscan::core::{Asset, AssetType, Rule, Severity};
///
/// #[derive(Debug)]
/// struct PublicDatabaseRule;
///
/// impl Rule for PublicDatabaseRule {
///     fn id(&self) -> &str {
///         "NET_R10"
///     }
///
///     fn description(&self) -> &str {
///         "Database instance reachable from the internet."
///     }
///
///     fn severity(&self) -> Severity {
///         Severity::Critical
///     }
///
///     fn violated_by(&self, asset: &Asset) -> bool {
///         asset.asset_type == AssetType::DatabaseInstance && asset.is_public
///     }
/// }
///
/// let db = Asset::new("db-1", AssetType::DatabaseInstance, "orders").with_public(true);
/// let finding = PublicDatabaseRule.evaluate(&db).unwrap();
/// assert_eq!(finding.penalty, 50);
/// ```
pub trait Rule: Send + Sync + Debug {
    /// Returns the stable identifier recorded on violations (e.g. `SEC_R01`).
    fn id(&self) -> &str;

    /// Returns the human-readable explanation recorded on violations.
    fn description(&self) -> &str;

    /// Returns the severity of a violation of this rule.
    fn severity(&self) -> Severity;

    /// Returns the score penalty applied when this rule fires.
    fn penalty(&self) -> u32 {
        self.severity().default_penalty()
    }

    /// Returns `true` if the asset violates this rule.
    fn violated_by(&self, asset: &Asset) -> bool;

    /// Evaluates the rule, producing a finding when it fires.
    fn evaluate(&self, asset: &Asset) -> Option<Finding> {
        if !self.violated_by(asset) {
            return None;
        }

        Some(Finding {
            violation: Violation::new(self.id(), self.description(), self.severity()),
            penalty: self.penalty(),
        })
    }
}

/// A rule behind shared ownership.
pub type ArcRule = Arc<dyn Rule>;

/// A supplier of asset records, typically a cloud inventory API client.
///
/// Sources only populate identity fields. Scores and violations on returned
/// assets are ignored and overwritten by evaluation.
#[async_trait]
pub trait InventorySource: Send + Sync + Debug {
    /// Returns a stable, human-readable name for this source.
    fn name(&self) -> &str;

    /// Fetches the current batch of assets.
    ///
    /// # Errors
    ///
    /// - `SourceUnavailable` - the backing inventory could not be reached.
    /// - `Io` / `Parse` - the inventory document could not be read.
    async fn fetch(&self) -> Result<Vec<Asset>, InventoryError>;
}

/// An inventory source behind shared ownership.
pub type ArcInventorySource = Arc<dyn InventorySource>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::AssetType;

    #[derive(Debug)]
    struct TaggedRule;

    impl Rule for TaggedRule {
        fn id(&self) -> &str {
            "TEST_R01"
        }

        fn description(&self) -> &str {
            "Asset is tagged 'legacy'."
        }

        fn severity(&self) -> Severity {
            Severity::Low
        }

        fn violated_by(&self, asset: &Asset) -> bool {
            asset.has_tag("legacy")
        }
    }

    #[test]
    fn test_rule_default_penalty_follows_severity() {
        assert_eq!(TaggedRule.penalty(), Severity::Low.default_penalty());
    }

    #[test]
    fn test_rule_evaluate() {
        let clean = Asset::new("a", AssetType::VmInstance, "a");
        assert!(TaggedRule.evaluate(&clean).is_none());

        let legacy = clean.clone().with_tag("legacy");
        let finding = TaggedRule.evaluate(&legacy).unwrap();
        assert_eq!(finding.violation.rule_id, "TEST_R01");
        assert_eq!(finding.violation.severity, Severity::Low);
        assert_eq!(finding.penalty, 5);
    }
}
