//! Declarative rules built from serializable conditions.

use crate::core::{Asset, AssetType, Rule, Severity};

use serde::{Deserialize, Serialize};

/// A rule defined by data rather than code.
///
/// Declarative rules are loaded from JSON through
/// [`RuleSetConfig`](crate::rules::RuleSetConfig) and behave exactly like
/// compiled rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeclarativeRule {
    /// Unique identifier for this rule.
    pub id: String,

    /// Explanation recorded on violations.
    pub description: String,

    /// Severity of a violation.
    pub severity: Severity,

    /// Penalty override; the severity's default penalty applies when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub penalty: Option<u32>,

    /// The rule fires when this condition matches.
    pub condition: Condition,
}

impl DeclarativeRule {
    /// Creates a new declarative rule.
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        severity: Severity,
        condition: Condition,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            severity,
            penalty: None,
            condition,
        }
    }

    /// Overrides the penalty.
    pub fn with_penalty(mut self, penalty: u32) -> Self {
        self.penalty = Some(penalty);
        self
    }
}

impl Rule for DeclarativeRule {
    fn id(&self) -> &str {
        &self.id
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn severity(&self) -> Severity {
        self.severity
    }

    fn penalty(&self) -> u32 {
        self.penalty.unwrap_or_else(|| self.severity.default_penalty())
    }

    fn violated_by(&self, asset: &Asset) -> bool {
        self.condition.matches(asset)
    }
}

/// A condition that can be evaluated against an asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    /// Matches if the asset is of the given type.
    TypeIs {
        /// The asset type to match.
        asset_type: AssetType,
    },

    /// Matches if the asset type is in the list.
    TypeIn {
        /// Asset types to match.
        asset_types: Vec<AssetType>,
    },

    /// Matches if the asset is publicly exposed.
    IsPublic,

    /// Matches if the asset carries the tag.
    HasTag {
        /// Tag to look for.
        tag: String,
    },

    /// Matches if the asset does not carry the tag.
    MissingTag {
        /// Tag to look for.
        tag: String,
    },

    /// Matches if the display name contains the substring, ignoring case.
    NameContains {
        /// Substring to search for.
        substring: String,
    },

    /// Always matches.
    Always,

    /// Never matches.
    Never,

    /// Logical AND of multiple conditions.
    And {
        /// Conditions that must all match.
        conditions: Vec<Condition>,
    },

    /// Logical OR of multiple conditions.
    Or {
        /// Conditions where at least one must match.
        conditions: Vec<Condition>,
    },

    /// Logical NOT of a condition.
    Not {
        /// Condition to negate.
        condition: Box<Condition>,
    },
}

impl Condition {
    /// Creates a condition matching one asset type.
    pub fn type_is(asset_type: AssetType) -> Self {
        Self::TypeIs { asset_type }
    }

    /// Creates a condition matching a tag.
    pub fn has_tag(tag: impl Into<String>) -> Self {
        Self::HasTag { tag: tag.into() }
    }

    /// Creates a condition matching a missing tag.
    pub fn missing_tag(tag: impl Into<String>) -> Self {
        Self::MissingTag { tag: tag.into() }
    }

    /// Creates a conjunction.
    pub fn all(conditions: Vec<Condition>) -> Self {
        Self::And { conditions }
    }

    /// Creates a disjunction.
    pub fn any(conditions: Vec<Condition>) -> Self {
        Self::Or { conditions }
    }

    /// Negates a condition.
    pub fn negate(condition: Condition) -> Self {
        Self::Not {
            condition: Box::new(condition),
        }
    }

    /// Evaluates this condition against the asset.
    pub fn matches(&self, asset: &Asset) -> bool {
        match self {
            Self::TypeIs { asset_type } => asset.asset_type == *asset_type,

            Self::TypeIn { asset_types } => asset_types.contains(&asset.asset_type),

            Self::IsPublic => asset.is_public,

            Self::HasTag { tag } => asset.has_tag(tag),

            Self::MissingTag { tag } => !asset.has_tag(tag),

            Self::NameContains { substring } => asset
                .name
                .to_lowercase()
                .contains(&substring.to_lowercase()),

            Self::Always => true,

            Self::Never => false,

            Self::And { conditions } => conditions.iter().all(|c| c.matches(asset)),

            Self::Or { conditions } => conditions.iter().any(|c| c.matches(asset)),

            Self::Not { condition } => !condition.matches(asset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket() -> Asset {
        Asset::new("b-1", AssetType::StorageBucket, "Prod-User-Photos")
            .with_public(true)
            .with_tags(["production", "user_data"])
    }

    #[test]
    fn test_leaf_conditions() {
        let asset = bucket();

        assert!(Condition::type_is(AssetType::StorageBucket).matches(&asset));
        assert!(!Condition::type_is(AssetType::VmInstance).matches(&asset));
        assert!(Condition::IsPublic.matches(&asset));
        assert!(Condition::has_tag("user_data").matches(&asset));
        assert!(Condition::missing_tag("pci").matches(&asset));
        assert!(Condition::NameContains {
            substring: "user-photos".into()
        }
        .matches(&asset));
        assert!(Condition::TypeIn {
            asset_types: vec![AssetType::VmInstance, AssetType::StorageBucket]
        }
        .matches(&asset));
    }

    #[test]
    fn test_composite_conditions() {
        let asset = bucket();

        let public_pii = Condition::all(vec![Condition::IsPublic, Condition::has_tag("user_data")]);
        assert!(public_pii.matches(&asset));

        let either = Condition::any(vec![Condition::Never, Condition::has_tag("production")]);
        assert!(either.matches(&asset));

        assert!(!Condition::negate(Condition::Always).matches(&asset));
        assert!(Condition::all(vec![]).matches(&asset));
        assert!(!Condition::any(vec![]).matches(&asset));
    }

    #[test]
    fn test_declarative_rule_penalty() {
        let rule = DeclarativeRule::new(
            "PII_R03",
            "Public bucket holding user data.",
            Severity::Medium,
            Condition::all(vec![Condition::IsPublic, Condition::has_tag("user_data")]),
        );
        assert_eq!(rule.penalty(), 15);

        let rule = rule.with_penalty(40);
        let finding = rule.evaluate(&bucket()).unwrap();
        assert_eq!(finding.penalty, 40);
        assert_eq!(finding.violation.rule_id, "PII_R03");
    }

    #[test]
    fn test_condition_json_shape() {
        let json = r#"{
            "type": "and",
            "conditions": [
                { "type": "type_is", "asset_type": "VM_INSTANCE" },
                { "type": "not", "condition": { "type": "has_tag", "tag": "owner" } }
            ]
        }"#;

        let condition: Condition = serde_json::from_str(json).unwrap();
        let vm = Asset::new("vm-1", AssetType::VmInstance, "worker");
        assert!(condition.matches(&vm));
        assert!(!condition.matches(&vm.with_tag("owner")));
    }
}
