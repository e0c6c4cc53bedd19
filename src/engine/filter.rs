//! Report filtering and per-asset summaries.

use crate::core::{Asset, AssetStatus, MAX_SCORE};

use serde::Serialize;
use std::fmt;

/// Returns every asset scoring below 100, preserving input order.
///
/// The score is the only criterion. Assets that were never evaluated carry
/// no score and are not reported. An empty result means a clean run.
pub fn non_compliant(assets: &[Asset]) -> Vec<&Asset> {
    assets
        .iter()
        .filter(|a| matches!(a.compliance_score(), Some(score) if score < MAX_SCORE))
        .collect()
}

/// One line of the console summary.
///
/// Renders as `Asset ID: <id> | Score: <score> | Violations: <count> | Status: <PASS|FAIL>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetSummary {
    /// Asset identifier.
    pub id: String,
    /// Compliance score, if evaluated.
    pub score: Option<u8>,
    /// Number of recorded violations.
    pub violation_count: usize,
    /// Pass/fail status, if evaluated.
    pub status: Option<AssetStatus>,
}

impl From<&Asset> for AssetSummary {
    fn from(asset: &Asset) -> Self {
        Self {
            id: asset.id().to_string(),
            score: asset.compliance_score(),
            violation_count: asset.violations().len(),
            status: asset.status(),
        }
    }
}

impl fmt::Display for AssetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Asset ID: {} | Score: ", self.id)?;
        match self.score {
            Some(score) => write!(f, "{}", score)?,
            None => write!(f, "-")?,
        }
        write!(f, " | Violations: {} | Status: ", self.violation_count)?;
        match self.status {
            Some(status) => write!(f, "{}", status),
            None => write!(f, "UNEVALUATED"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AssetType;
    use crate::engine::evaluate;
    use crate::rules::RuleSet;

    fn evaluated(assets: Vec<Asset>) -> Vec<Asset> {
        let rules = RuleSet::builtin();
        assets
            .into_iter()
            .map(|mut a| {
                evaluate(&rules, &mut a);
                a
            })
            .collect()
    }

    #[test]
    fn test_non_compliant_preserves_order() {
        let assets = evaluated(vec![
            Asset::new("vm-1", AssetType::VmInstance, "a"),
            Asset::new("b-1", AssetType::StorageBucket, "b"),
            Asset::new("b-2", AssetType::StorageBucket, "c").with_public(true),
            Asset::new("vm-2", AssetType::VmInstance, "d").with_tag("production"),
        ]);

        let ids: Vec<_> = non_compliant(&assets).iter().map(|a| a.id()).collect();
        assert_eq!(ids, vec!["vm-1", "b-2"]);
    }

    #[test]
    fn test_non_compliant_all_clean_is_empty() {
        let assets = evaluated(vec![
            Asset::new("b-1", AssetType::StorageBucket, "logs"),
            Asset::new("vm-1", AssetType::VmInstance, "api").with_tag("production"),
        ]);
        assert!(non_compliant(&assets).is_empty());
        assert!(non_compliant(&[]).is_empty());
    }

    #[test]
    fn test_unevaluated_assets_are_not_reported() {
        let assets = vec![Asset::new("vm-1", AssetType::VmInstance, "a")];
        assert!(non_compliant(&assets).is_empty());
    }

    #[test]
    fn test_summary_line() {
        let assets = evaluated(vec![
            Asset::new("gcp-001", AssetType::StorageBucket, "photos").with_public(true),
            Asset::new("gcp-003", AssetType::StorageBucket, "logs"),
        ]);

        assert_eq!(
            AssetSummary::from(&assets[0]).to_string(),
            "Asset ID: gcp-001 | Score: 50 | Violations: 1 | Status: FAIL"
        );
        assert_eq!(
            AssetSummary::from(&assets[1]).to_string(),
            "Asset ID: gcp-003 | Score: 100 | Violations: 0 | Status: PASS"
        );
    }

    #[test]
    fn test_summary_line_unevaluated() {
        let asset = Asset::new("gcp-009", AssetType::VmInstance, "new");
        assert_eq!(
            AssetSummary::from(&asset).to_string(),
            "Asset ID: gcp-009 | Score: - | Violations: 0 | Status: UNEVALUATED"
        );
    }
}
