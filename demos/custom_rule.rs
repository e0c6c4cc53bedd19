//! Custom rule example demonstrating how to implement a new check.
//!
//! This example shows how to:
//! - Implement the Rule trait for a custom check
//! - Combine it with the built-in rules
//! - Run the whole pipeline through the ComplianceScanner
//!
//! Run with: cargo run --example custom_rule

use cloudscan::inventory::{sample_assets, MockInventory};
use cloudscan::prelude::*;

/// Flags database instances reachable from the internet.
///
/// Only `id`, `description`, `severity` and `violated_by` are required; the
/// penalty defaults to the severity's.
#[derive(Debug)]
struct PublicDatabaseRule;

impl Rule for PublicDatabaseRule {
    fn id(&self) -> &str {
        "DB_R03"
    }

    fn description(&self) -> &str {
        "Database instance reachable from the internet."
    }

    fn severity(&self) -> Severity {
        Severity::Critical
    }

    fn violated_by(&self, asset: &Asset) -> bool {
        asset.asset_type == AssetType::DatabaseInstance && asset.is_public
    }
}

/// Flags dev resources that carry the production tag.
#[derive(Debug)]
struct MislabeledDevRule;

impl Rule for MislabeledDevRule {
    fn id(&self) -> &str {
        "TAG_R04"
    }

    fn description(&self) -> &str {
        "Development resource labelled as production."
    }

    fn severity(&self) -> Severity {
        Severity::Medium
    }

    fn penalty(&self) -> u32 {
        10
    }

    fn violated_by(&self, asset: &Asset) -> bool {
        asset.name.contains("-dev-") && asset.has_tag("production")
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    println!("=== Cloudscan Custom Rule Example ===\n");

    let mut assets = sample_assets();
    assets.push(
        Asset::new("gcp-004", AssetType::DatabaseInstance, "mercad-prod-orders")
            .with_public(true)
            .with_tag("production"),
    );
    assets.push(
        Asset::new("gcp-005", AssetType::VmInstance, "mercad-dev-batch-02")
            .with_tag("production"),
    );

    let rules = RuleSet::builtin()
        .with_rule(PublicDatabaseRule)
        .with_rule(MislabeledDevRule);

    println!("Rules in order: {:?}", rules.ids());

    let report_dir = std::env::temp_dir().join("cloudscan-custom-rule");
    let scanner = ComplianceScanner::builder()
        .with_inventory(MockInventory::empty().with_assets(assets))
        .with_rules(rules)
        .with_sink(FilesystemReportSink::in_dir(&report_dir).with_sha256(true))
        .build()?;

    let run = scanner.run().await?;

    println!("\n=== Scan Results ===");
    println!("Run ID: {}", run.id);
    println!("Duration: {} ms", run.duration().num_milliseconds());
    for summary in run.summaries() {
        println!("{}", summary);
    }

    for asset in run.non_compliant() {
        println!("\n{} ({})", asset.id(), asset.name);
        for violation in asset.violations() {
            println!(
                "  - [{}] {}: {}",
                violation.severity, violation.rule_id, violation.description
            );
        }
    }

    match &run.report {
        Ok(ReportStatus::Written {
            location, digest, ..
        }) => {
            println!("\n✅ Report written to {} ({})", location, digest);
        }
        Ok(ReportStatus::CleanRun) => println!("\nNo compliance failures found. Clean run!"),
        Err(e) => println!("\n❌ Report not written: {}", e),
    }

    Ok(())
}
