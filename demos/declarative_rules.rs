//! Declarative rules example demonstrating rules loaded from JSON.
//!
//! This example shows how to:
//! - Load a rule set configuration from a JSON file
//! - Read assets from a JSON inventory export
//! - Inspect violations and report status
//!
//! Run with: cargo run --example declarative_rules

use cloudscan::inventory::JsonFileInventory;
use cloudscan::prelude::*;
use cloudscan::report::InMemoryReportSink;
use cloudscan::RuleSetConfig;

use std::io::Write;
use std::sync::Arc;

const INVENTORY: &str = r#"[
  { "ID": "gcp-101", "Type": "LOAD_BALANCER", "Name": "checkout-lb", "IsPublic": true, "Tags": ["production"] },
  { "ID": "gcp-102", "Type": "SERVICE_ACCOUNT", "Name": "ci-deployer", "Tags": ["ci"] },
  { "ID": "gcp-103", "Type": "STORAGE_BUCKET", "Name": "orders-archive", "IsPublic": true, "Tags": ["production"] },
  { "ID": "gcp-104", "Type": "LOAD_BALANCER", "Name": "cdn-lb", "IsPublic": true, "Tags": ["production", "edge"] }
]"#;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    println!("=== Cloudscan Declarative Rules Example ===\n");

    let config = RuleSetConfig::load(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/demos/rules/network.json"
    ))?;
    let rules = config.into_rule_set()?;
    println!("Loaded {} rules: {:?}", rules.len(), rules.ids());

    // Stand-in for an inventory export
    let mut export = tempfile::NamedTempFile::new()?;
    export.write_all(INVENTORY.as_bytes())?;

    let sink = Arc::new(InMemoryReportSink::new());
    let scanner = ComplianceScanner::builder()
        .with_inventory(JsonFileInventory::new(export.path()).with_name("inventory-export"))
        .with_rules(rules)
        .with_arc_sink(sink.clone())
        .build()?;

    let run = scanner.run().await?;

    println!("\n=== Summary ===");
    for summary in run.summaries() {
        println!("{}", summary);
    }

    println!("\n=== Violations ===");
    for asset in run.non_compliant() {
        for violation in asset.violations() {
            println!(
                "{:<8} {:<9} {:<8} {}",
                asset.id(),
                violation.rule_id,
                violation.severity,
                violation.description
            );
        }
    }

    match &run.report {
        Ok(status) if status.is_clean_run() => {
            println!("\nNo compliance failures found. Clean run!");
        }
        Ok(status) => {
            println!(
                "\n✅ {} failed assets kept in memory ({} report(s) total)",
                status.asset_count(),
                sink.publish_count()
            );
        }
        Err(e) => println!("\n❌ Report not written: {}", e),
    }

    Ok(())
}
