//! The compliance engine.
//!
//! The evaluator scores assets against a [`RuleSet`](crate::rules::RuleSet);
//! the filter selects the assets that belong in the report. Both are pure and
//! never fail on well-formed input.

mod evaluator;
mod filter;

pub use evaluator::{
    evaluate, BatchEvaluation, ComplianceEvaluator, EvaluatorConfig, RejectedAsset,
    ValidationPolicy,
};
pub use filter::{non_compliant, AssetSummary};
