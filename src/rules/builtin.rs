//! Built-in compliance rules.

use crate::core::{Asset, AssetType, Rule, Severity};

/// Storage buckets must not be publicly exposed.
#[derive(Debug, Clone, Copy, Default)]
pub struct PublicStorageRule;

impl PublicStorageRule {
    /// Stable rule identifier.
    pub const ID: &'static str = "SEC_R01";
}

impl Rule for PublicStorageRule {
    fn id(&self) -> &str {
        Self::ID
    }

    fn description(&self) -> &str {
        "Publicly exposed storage bucket."
    }

    fn severity(&self) -> Severity {
        Severity::Critical
    }

    fn penalty(&self) -> u32 {
        50
    }

    fn violated_by(&self, asset: &Asset) -> bool {
        asset.asset_type == AssetType::StorageBucket && asset.is_public
    }
}

/// VM instances must carry the `production` classification tag.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductionTagRule;

impl ProductionTagRule {
    /// Stable rule identifier.
    pub const ID: &'static str = "TAG_R02";

    /// The tag every VM instance must carry.
    pub const REQUIRED_TAG: &'static str = "production";
}

impl Rule for ProductionTagRule {
    fn id(&self) -> &str {
        Self::ID
    }

    fn description(&self) -> &str {
        "Missing essential 'production' tag for classification."
    }

    fn severity(&self) -> Severity {
        Severity::High
    }

    fn penalty(&self) -> u32 {
        30
    }

    fn violated_by(&self, asset: &Asset) -> bool {
        asset.asset_type == AssetType::VmInstance && !asset.has_tag(Self::REQUIRED_TAG)
    }
}
