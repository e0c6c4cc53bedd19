//! Basic scan example running the pipeline step by step.
//!
//! This example shows how to:
//! - Fetch assets from an inventory source
//! - Evaluate them against the built-in rules
//! - Print a summary and write the report of failing assets
//!
//! Run with: cargo run --example basic_scan

use cloudscan::engine::AssetSummary;
use cloudscan::inventory::MockInventory;
use cloudscan::prelude::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    println!("Welcome to the Automated Cloud Asset & Compliance Scanner!");
    println!("Initiating scan for Mercari compliance...");
    println!("-------------------------------------------------------");

    let inventory = MockInventory::new();
    let mut assets = inventory.fetch().await?;

    println!("Scanning {} assets...\n", assets.len());

    let evaluator = ComplianceEvaluator::new(RuleSet::builtin());
    evaluator.evaluate_all(&mut assets);

    println!("\n-------------------------------------------------------");
    println!("Scan Complete. Summary:");
    for asset in &assets {
        println!("{}", AssetSummary::from(asset));
    }
    println!("-------------------------------------------------------");

    let sink = FilesystemReportSink::default();
    match sink.publish(&non_compliant(&assets)).await {
        Ok(ReportStatus::Written { asset_count, .. }) => {
            println!(
                "✅ Detailed report for {} failed assets written to: {}",
                asset_count,
                sink.path().display()
            );
        }
        Ok(ReportStatus::CleanRun) => {
            println!("No compliance failures found. Clean run!");
        }
        Err(e) => {
            println!("❌ Report not written: {}", e);
        }
    }

    Ok(())
}
