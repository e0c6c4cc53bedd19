//! Compliance evaluator implementation.

use crate::core::{Asset, InventoryError, InventoryResult, MAX_SCORE};
use crate::engine::filter::{non_compliant, AssetSummary};
use crate::rules::RuleSet;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Evaluates one asset against every rule in the set.
///
/// Any previous outcome on the asset is discarded first, so rules only ever
/// see the asset's identity fields. Each fired rule appends its violation in
/// registration order and subtracts its penalty; the final score is floored
/// at 0. An asset no rule fires against scores 100 with no violations.
pub fn evaluate(rules: &RuleSet, asset: &mut Asset) {
    asset.reset_evaluation();

    let mut violations = Vec::new();
    let mut total_penalty: u32 = 0;

    for rule in rules.rules() {
        if let Some(finding) = rule.evaluate(asset) {
            tracing::debug!(
                asset_id = %asset.id(),
                rule_id = %finding.violation.rule_id,
                severity = %finding.violation.severity,
                penalty = finding.penalty,
                "Compliance rule fired"
            );

            total_penalty = total_penalty.saturating_add(finding.penalty);
            violations.push(finding.violation);
        }
    }

    let penalty = u8::try_from(total_penalty).unwrap_or(u8::MAX);
    asset.record_evaluation(MAX_SCORE.saturating_sub(penalty), violations);
}

/// How batch evaluation treats assets with a malformed identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationPolicy {
    /// The first malformed or duplicate asset fails the whole batch.
    #[default]
    Strict,
    /// Malformed or duplicate assets are removed and reported; the rest of
    /// the batch is evaluated.
    RejectInvalid,
}

/// Configuration for the compliance evaluator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    /// Treatment of malformed input.
    #[serde(default)]
    pub validation: ValidationPolicy,

    /// Evaluate assets on the rayon pool. Only honoured when the crate is
    /// built with the `parallel` feature.
    #[serde(default)]
    pub parallel: bool,
}

impl EvaluatorConfig {
    /// Creates a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the validation policy.
    pub fn with_validation(mut self, validation: ValidationPolicy) -> Self {
        self.validation = validation;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }
}

/// An asset removed from a batch before evaluation.
#[derive(Debug)]
pub struct RejectedAsset {
    /// Position of the asset in the submitted batch.
    pub index: usize,
    /// The asset as submitted.
    pub asset: Asset,
    /// Why it was rejected.
    pub error: InventoryError,
}

/// The result of evaluating a batch.
#[derive(Debug, Default)]
pub struct BatchEvaluation {
    /// Evaluated assets, in submission order.
    pub assets: Vec<Asset>,
    /// Assets removed under [`ValidationPolicy::RejectInvalid`].
    pub rejected: Vec<RejectedAsset>,
}

impl BatchEvaluation {
    /// Returns the assets scoring below 100, in submission order.
    pub fn non_compliant(&self) -> Vec<&Asset> {
        non_compliant(&self.assets)
    }

    /// Returns the number of assets scoring exactly 100.
    pub fn compliant_count(&self) -> usize {
        self.assets.len() - self.non_compliant().len()
    }

    /// Returns one summary per evaluated asset.
    pub fn summaries(&self) -> Vec<AssetSummary> {
        self.assets.iter().map(AssetSummary::from).collect()
    }
}

/// Applies a rule set to assets.
#[derive(Debug, Clone, Default)]
pub struct ComplianceEvaluator {
    rules: RuleSet,
    config: EvaluatorConfig,
}

impl ComplianceEvaluator {
    /// Creates an evaluator with the default configuration.
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules,
            config: EvaluatorConfig::default(),
        }
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: EvaluatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the rule set.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Returns the configuration.
    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Evaluates a single asset.
    pub fn evaluate(&self, asset: &mut Asset) {
        evaluate(&self.rules, asset);
    }

    /// Evaluates every asset in place without validating identities.
    pub fn evaluate_all(&self, assets: &mut [Asset]) {
        #[cfg(feature = "parallel")]
        if self.config.parallel {
            use rayon::prelude::*;

            assets
                .par_iter_mut()
                .for_each(|asset| evaluate(&self.rules, asset));
            return;
        }

        for asset in assets.iter_mut() {
            evaluate(&self.rules, asset);
        }
    }

    /// Validates and evaluates a batch.
    ///
    /// # Errors
    ///
    /// Under [`ValidationPolicy::Strict`], returns `MalformedAsset` or
    /// `DuplicateAssetId` for the first offending asset; nothing is
    /// evaluated in that case.
    pub fn evaluate_batch(&self, assets: Vec<Asset>) -> InventoryResult<BatchEvaluation> {
        let mut batch = self.screen(assets)?;
        self.evaluate_all(&mut batch.assets);

        tracing::info!(
            assets = batch.assets.len(),
            rejected = batch.rejected.len(),
            rules = self.rules.len(),
            non_compliant = batch.non_compliant().len(),
            "Batch evaluated"
        );

        Ok(batch)
    }

    fn screen(&self, assets: Vec<Asset>) -> InventoryResult<BatchEvaluation> {
        let mut seen = HashSet::with_capacity(assets.len());
        let mut batch = BatchEvaluation {
            assets: Vec::with_capacity(assets.len()),
            rejected: Vec::new(),
        };

        for (index, asset) in assets.into_iter().enumerate() {
            let problem = match asset.validate() {
                Err(e) => Some(e),
                Ok(()) if !seen.insert(asset.id().to_string()) => {
                    Some(InventoryError::DuplicateAssetId {
                        id: asset.id().to_string(),
                    })
                }
                Ok(()) => None,
            };

            match (problem, self.config.validation) {
                (None, _) => batch.assets.push(asset),
                (Some(error), ValidationPolicy::Strict) => return Err(error),
                (Some(error), ValidationPolicy::RejectInvalid) => {
                    tracing::warn!(
                        index,
                        asset_id = %asset.id(),
                        error = %error,
                        "Asset rejected before evaluation"
                    );
                    batch.rejected.push(RejectedAsset {
                        index,
                        asset,
                        error,
                    });
                }
            }
        }

        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AssetType, Severity};
    use crate::rules::{Condition, DeclarativeRule};

    fn mock_assets() -> Vec<Asset> {
        vec![
            Asset::new("gcp-001", AssetType::StorageBucket, "prod-user-photos")
                .with_public(true)
                .with_tags(["production", "user_data"]),
            Asset::new("gcp-002", AssetType::VmInstance, "dev-worker-01")
                .with_tags(["development", "no_pii"]),
            Asset::new("gcp-003", AssetType::StorageBucket, "logs-archive")
                .with_tags(["logs", "archived"]),
        ]
    }

    #[test]
    fn test_evaluate_public_bucket() {
        let mut asset = mock_assets().remove(0);
        evaluate(&RuleSet::builtin(), &mut asset);

        assert_eq!(asset.compliance_score(), Some(50));
        assert_eq!(asset.violations().len(), 1);
        assert_eq!(asset.violations()[0].rule_id, "SEC_R01");
        assert_eq!(asset.violations()[0].severity, Severity::Critical);
    }

    #[test]
    fn test_evaluate_untagged_vm() {
        let mut asset = mock_assets().remove(1);
        evaluate(&RuleSet::builtin(), &mut asset);

        assert_eq!(asset.compliance_score(), Some(70));
        assert_eq!(asset.violations()[0].rule_id, "TAG_R02");
        assert_eq!(asset.violations()[0].severity, Severity::High);
    }

    #[test]
    fn test_evaluate_clean_asset() {
        let mut asset = mock_assets().remove(2);
        evaluate(&RuleSet::builtin(), &mut asset);

        assert_eq!(asset.compliance_score(), Some(100));
        assert!(asset.violations().is_empty());
    }

    #[test]
    fn test_evaluate_empty_rule_set() {
        let mut asset = mock_assets().remove(0);
        evaluate(&RuleSet::new(), &mut asset);
        assert_eq!(asset.compliance_score(), Some(100));
    }

    #[test]
    fn test_evaluate_accumulates_and_floors() {
        let rules = RuleSet::builtin()
            .with_rule(
                DeclarativeRule::new(
                    "PII_R03",
                    "Public bucket holding user data.",
                    Severity::Critical,
                    Condition::all(vec![Condition::IsPublic, Condition::has_tag("user_data")]),
                )
                .with_penalty(60),
            );

        let mut asset = mock_assets().remove(0);
        evaluate(&rules, &mut asset);

        assert_eq!(asset.compliance_score(), Some(0));
        let ids: Vec<_> = asset.violations().iter().map(|v| v.rule_id.as_str()).collect();
        assert_eq!(ids, vec!["SEC_R01", "PII_R03"]);
    }

    #[test]
    fn test_reevaluation_replaces_previous_outcome() {
        let rules = RuleSet::builtin();
        let mut asset = mock_assets().remove(1);

        evaluate(&rules, &mut asset);
        evaluate(&rules, &mut asset);
        assert_eq!(asset.violations().len(), 1);
        assert_eq!(asset.compliance_score(), Some(70));

        asset.tags.insert("production".into());
        evaluate(&rules, &mut asset);
        assert_eq!(asset.compliance_score(), Some(100));
        assert!(asset.violations().is_empty());
    }

    #[test]
    fn test_batch_strict_rejects_malformed() {
        let evaluator = ComplianceEvaluator::new(RuleSet::builtin());
        let mut assets = mock_assets();
        assets.push(Asset::new("", AssetType::VmInstance, "ghost"));

        let err = evaluator.evaluate_batch(assets).unwrap_err();
        assert!(matches!(err, InventoryError::MalformedAsset { .. }));
    }

    #[test]
    fn test_batch_strict_rejects_duplicates() {
        let evaluator = ComplianceEvaluator::new(RuleSet::builtin());
        let mut assets = mock_assets();
        assets.push(Asset::new("gcp-001", AssetType::VmInstance, "dup"));

        let err = evaluator.evaluate_batch(assets).unwrap_err();
        assert!(matches!(err, InventoryError::DuplicateAssetId { id } if id == "gcp-001"));
    }

    #[test]
    fn test_batch_reject_invalid_keeps_going() {
        let evaluator = ComplianceEvaluator::new(RuleSet::builtin()).with_config(
            EvaluatorConfig::new().with_validation(ValidationPolicy::RejectInvalid),
        );

        let mut assets = mock_assets();
        assets.insert(1, Asset::new(" ", AssetType::VmInstance, "ghost"));
        assets.push(Asset::new("gcp-002", AssetType::StorageBucket, "dup"));

        let batch = evaluator.evaluate_batch(assets).unwrap();
        assert_eq!(batch.assets.len(), 3);
        assert_eq!(batch.rejected.len(), 2);
        assert_eq!(batch.rejected[0].index, 1);
        assert_eq!(batch.rejected[1].index, 4);
        assert!(!batch.rejected[1].asset.is_evaluated());

        let failing: Vec<_> = batch.non_compliant().iter().map(|a| a.id()).collect();
        assert_eq!(failing, vec!["gcp-001", "gcp-002"]);
        assert_eq!(batch.compliant_count(), 1);
    }

    #[test]
    fn test_evaluate_all_parallel_flag_matches_sequential() {
        let sequential = ComplianceEvaluator::new(RuleSet::builtin());
        let parallel = ComplianceEvaluator::new(RuleSet::builtin())
            .with_config(EvaluatorConfig::new().with_parallel(true));

        let mut a = mock_assets();
        let mut b = mock_assets();
        sequential.evaluate_all(&mut a);
        parallel.evaluate_all(&mut b);

        assert_eq!(a, b);
    }

    #[test]
    fn test_config_from_json() {
        let config: EvaluatorConfig =
            serde_json::from_str(r#"{"validation": "reject_invalid"}"#).unwrap();
        assert_eq!(config.validation, ValidationPolicy::RejectInvalid);
        assert!(!config.parallel);
    }
}
