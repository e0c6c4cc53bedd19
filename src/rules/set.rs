//! Ordered rule registry and its JSON configuration.

use crate::core::{ArcRule, Rule, RuleError, RuleResult, MAX_SCORE};
use crate::rules::builtin::{ProductionTagRule, PublicStorageRule};
use crate::rules::condition::DeclarativeRule;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

/// An ordered collection of rules.
///
/// Rules run in registration order. Order only affects the sequence of
/// recorded violations; penalties are summed, so the final score does not
/// depend on it.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<ArcRule>,
}

impl RuleSet {
    /// Creates an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the default rule set: `SEC_R01` then `TAG_R02`.
    pub fn builtin() -> Self {
        Self::new()
            .with_rule(PublicStorageRule)
            .with_rule(ProductionTagRule)
    }

    /// Registers a rule at the end of the set.
    pub fn add_rule<R: Rule + 'static>(&mut self, rule: R) {
        self.rules.push(Arc::new(rule));
    }

    /// Registers a shared rule at the end of the set.
    pub fn add_arc_rule(&mut self, rule: ArcRule) {
        self.rules.push(rule);
    }

    /// Registers a rule and returns self for chaining.
    pub fn with_rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.add_rule(rule);
        self
    }

    /// Registers a shared rule and returns self for chaining.
    pub fn with_arc_rule(mut self, rule: ArcRule) -> Self {
        self.add_arc_rule(rule);
        self
    }

    /// Returns the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no rules are registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns the rules in registration order.
    pub fn rules(&self) -> &[ArcRule] {
        &self.rules
    }

    /// Returns the rule ids in registration order.
    pub fn ids(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.id()).collect()
    }

    /// Looks up a rule by id.
    pub fn get(&self, id: &str) -> Option<&ArcRule> {
        self.rules.iter().find(|r| r.id() == id)
    }

    /// Checks the set for programming errors.
    ///
    /// Rejects empty or duplicate ids and penalties outside 1..=100.
    pub fn validate(&self) -> RuleResult<()> {
        let mut seen = HashSet::new();

        for rule in &self.rules {
            let id = rule.id();
            if id.trim().is_empty() {
                return Err(RuleError::InvalidRule {
                    rule_id: id.to_string(),
                    reason: "rule id is empty".into(),
                });
            }
            if !seen.insert(id) {
                return Err(RuleError::DuplicateRuleId {
                    rule_id: id.to_string(),
                });
            }

            let penalty = rule.penalty();
            if penalty == 0 || penalty > u32::from(MAX_SCORE) {
                return Err(RuleError::InvalidPenalty {
                    rule_id: id.to_string(),
                    penalty,
                });
            }
        }

        Ok(())
    }
}

/// JSON document describing a rule set.
///
/// ```json
/// {
///   "include_builtin": true,
///   "rules": [
///     {
///       "id": "NET_R03",
///       "description": "Public load balancer without a WAF tag.",
///       "severity": "MEDIUM",
///       "condition": {
///         "type": "and",
///         "conditions": [
///           { "type": "type_is", "asset_type": "LOAD_BALANCER" },
///           { "type": "is_public" },
///           { "type": "missing_tag", "tag": "waf" }
///         ]
///       }
///     }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSetConfig {
    /// Whether to register the built-in rules ahead of the declared ones.
    #[serde(default = "default_include_builtin")]
    pub include_builtin: bool,

    /// Declared rules, in evaluation order.
    #[serde(default)]
    pub rules: Vec<DeclarativeRule>,
}

fn default_include_builtin() -> bool {
    true
}

impl Default for RuleSetConfig {
    fn default() -> Self {
        Self {
            include_builtin: true,
            rules: Vec::new(),
        }
    }
}

impl RuleSetConfig {
    /// Creates a configuration holding only the built-in rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether built-in rules are included.
    pub fn with_builtin(mut self, include: bool) -> Self {
        self.include_builtin = include;
        self
    }

    /// Appends a declared rule.
    pub fn with_rule(mut self, rule: DeclarativeRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Parses a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> RuleResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> RuleResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&content)?;

        tracing::debug!(
            path = %path.as_ref().display(),
            declared = config.rules.len(),
            include_builtin = config.include_builtin,
            "Loaded rule set configuration"
        );

        Ok(config)
    }

    /// Builds and validates the rule set.
    pub fn into_rule_set(self) -> RuleResult<RuleSet> {
        let mut set = if self.include_builtin {
            RuleSet::builtin()
        } else {
            RuleSet::new()
        };

        for rule in self.rules {
            set.add_rule(rule);
        }

        set.validate()?;
        Ok(set)
    }
}
