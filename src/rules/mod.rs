//! Compliance rules.
//!
//! Every check implements [`Rule`](crate::core::Rule). This module provides
//! the built-in checks, condition-based rules that can be declared in JSON,
//! and the ordered [`RuleSet`] the evaluator runs.

mod builtin;
mod condition;
mod set;

pub use builtin::{ProductionTagRule, PublicStorageRule};
pub use condition::{Condition, DeclarativeRule};
pub use set::{RuleSet, RuleSetConfig};
