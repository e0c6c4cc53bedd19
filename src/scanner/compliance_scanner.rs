//! The compliance scanner implementation.

use crate::audit;
use crate::core::{ArcInventorySource, InventorySource, ScanError};
use crate::engine::{ComplianceEvaluator, EvaluatorConfig};
use crate::report::{FilesystemReportSink, ReportSink};
use crate::rules::RuleSet;
use crate::scanner::run::ScanRun;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// Configuration for the compliance scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Evaluation settings.
    pub evaluator: EvaluatorConfig,

    /// Whether to emit an audit event for every evaluated asset.
    pub audit_assets: bool,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            evaluator: EvaluatorConfig::default(),
            audit_assets: true,
        }
    }
}

impl ScannerConfig {
    /// Creates a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the evaluator configuration.
    pub fn with_evaluator(mut self, evaluator: EvaluatorConfig) -> Self {
        self.evaluator = evaluator;
        self
    }

    /// Enables or disables per-asset audit events.
    pub fn with_asset_audit(mut self, enabled: bool) -> Self {
        self.audit_assets = enabled;
        self
    }
}

/// Builder for creating a `ComplianceScanner`.
#[derive(Debug, Default)]
pub struct ComplianceScannerBuilder {
    inventory: Option<ArcInventorySource>,
    rules: Option<RuleSet>,
    sink: Option<Arc<dyn ReportSink>>,
    config: ScannerConfig,
}

impl ComplianceScannerBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the inventory source.
    pub fn with_inventory<S: InventorySource + 'static>(mut self, source: S) -> Self {
        self.inventory = Some(Arc::new(source));
        self
    }

    /// Sets an inventory source wrapped in an Arc.
    pub fn with_arc_inventory(mut self, source: ArcInventorySource) -> Self {
        self.inventory = Some(source);
        self
    }

    /// Sets the rule set. Defaults to the built-in rules.
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Sets the report sink. Defaults to `compliance_report.json` in the
    /// working directory.
    pub fn with_sink<K: ReportSink + 'static>(mut self, sink: K) -> Self {
        self.sink = Some(Arc::new(sink));
        self
    }

    /// Sets a report sink wrapped in an Arc.
    pub fn with_arc_sink(mut self, sink: Arc<dyn ReportSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: ScannerConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds the scanner.
    ///
    /// # Errors
    ///
    /// - `Configuration` if no inventory source was set.
    /// - `Rules` if the rule set has duplicate ids or invalid penalties.
    pub fn build(self) -> Result<ComplianceScanner, ScanError> {
        let inventory = self
            .inventory
            .ok_or_else(|| ScanError::configuration("An inventory source is required"))?;

        let rules = self.rules.unwrap_or_else(RuleSet::builtin);
        rules.validate()?;

        let sink = self
            .sink
            .unwrap_or_else(|| Arc::new(FilesystemReportSink::default()));

        Ok(ComplianceScanner {
            inventory,
            evaluator: ComplianceEvaluator::new(rules).with_config(self.config.evaluator.clone()),
            sink,
            config: self.config,
        })
    }
}

/// Runs the fetch, evaluate, filter and report pipeline.
///
/// # Examples
///
/// ```rust,no_run
/// use cloudscan::inventory::MockInventory;
/// use cloudscan::scanner::ComplianceScanner;
///
/// # async fn example() -> Result<(), cloudscan::core::ScanError> {
/// let scanner = ComplianceScanner::builder()
///     .with_inventory(MockInventory::new())
///     .build()?;
///
/// let run = scanner.run().await?;
/// for summary in run.summaries() {
///     println!("{}", summary);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ComplianceScanner {
    inventory: ArcInventorySource,
    evaluator: ComplianceEvaluator,
    sink: Arc<dyn ReportSink>,
    config: ScannerConfig,
}

impl ComplianceScanner {
    /// Creates a new builder.
    pub fn builder() -> ComplianceScannerBuilder {
        ComplianceScannerBuilder::new()
    }

    /// Returns the rule set in use.
    pub fn rules(&self) -> &RuleSet {
        self.evaluator.rules()
    }

    /// Returns a reference to the configuration.
    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Returns the inventory source.
    pub fn inventory(&self) -> &ArcInventorySource {
        &self.inventory
    }

    /// Runs one scan.
    ///
    /// Inventory and validation failures abort the run. A report sink
    /// failure does not: it is recorded in [`ScanRun::report`] alongside the
    /// evaluated assets.
    pub async fn run(&self) -> Result<ScanRun, ScanError> {
        let id = Uuid::new_v4();
        let run_id = id.to_string();
        let started_at = Utc::now();
        let timer = Instant::now();
        let source = self.inventory.name().to_string();

        audit::emit_scan_started(&run_id, &source, &self.rules().ids());

        let fetched = self.inventory.fetch().await.map_err(|e| {
            tracing::warn!(run_id = %run_id, source = %source, error = %e, "Inventory fetch failed");
            e
        })?;

        tracing::info!(
            run_id = %run_id,
            source = %source,
            count = fetched.len(),
            "Scanning assets"
        );

        let batch = self.evaluator.evaluate_batch(fetched)?;

        for rejected in &batch.rejected {
            audit::emit_asset_rejected(&run_id, rejected);
        }
        if self.config.audit_assets {
            for asset in &batch.assets {
                audit::emit_asset_evaluated(&run_id, asset);
            }
        }

        let failing = batch.non_compliant();
        let non_compliant = failing.len();
        let report = self.sink.publish(&failing).await;

        if let Err(ref e) = report {
            tracing::warn!(
                run_id = %run_id,
                sink = self.sink.name(),
                error = %e,
                "Report sink failed, evaluation results kept"
            );
        }
        audit::emit_report_outcome(&run_id, self.sink.name(), &report);
        audit::emit_scan_completed(
            &run_id,
            batch.assets.len(),
            non_compliant,
            batch.rejected.len(),
            timer.elapsed(),
        );

        Ok(ScanRun {
            id,
            source,
            started_at,
            completed_at: Utc::now(),
            assets: batch.assets,
            rejected: batch.rejected,
            report,
        })
    }
}
