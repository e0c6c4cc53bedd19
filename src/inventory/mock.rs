//! Mock inventory for demos and tests.
//!
//! This module provides a configurable inventory source that stands in for a
//! cloud asset inventory API.

use crate::core::{Asset, AssetType, InventoryError, InventorySource};

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

/// Returns the sample inventory: a public production bucket, an untagged
/// development VM, and a private log archive.
pub fn sample_assets() -> Vec<Asset> {
    vec![
        Asset::new("gcp-001", AssetType::StorageBucket, "mercad-prod-user-photos")
            .with_public(true)
            .with_tags(["production", "user_data"]),
        Asset::new("gcp-002", AssetType::VmInstance, "mercad-dev-worker-01")
            .with_tags(["development", "no_pii"]),
        Asset::new("gcp-003", AssetType::StorageBucket, "mercad-logs-archive")
            .with_tags(["logs", "archived"]),
    ]
}

/// A mock inventory source.
///
/// # Examples
///
/// ```rust
/// use cloudscan::inventory::MockInventory;
/// use cloudscan::core::{Asset, AssetType};
/// use std::time::Duration;
///
/// // The three sample assets
/// let inventory = MockInventory::new();
///
/// // A custom batch with simulated API latency
/// let inventory = MockInventory::empty()
///     .with_asset(Asset::new("vm-1", AssetType::VmInstance, "api"))
///     .with_latency(Duration::from_millis(20));
/// ```
#[derive(Debug)]
pub struct MockInventory {
    name: String,
    assets: Vec<Asset>,
    latency: Option<Duration>,
    fetch_count: AtomicU64,
    unavailable: AtomicBool,
}

impl MockInventory {
    /// Creates a mock inventory holding the sample assets.
    pub fn new() -> Self {
        Self {
            assets: sample_assets(),
            ..Self::empty()
        }
    }

    /// Creates a mock inventory with no assets.
    pub fn empty() -> Self {
        Self {
            name: "mock".to_string(),
            assets: Vec::new(),
            latency: None,
            fetch_count: AtomicU64::new(0),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Sets the name of this source.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Replaces the served assets.
    pub fn with_assets(mut self, assets: Vec<Asset>) -> Self {
        self.assets = assets;
        self
    }

    /// Appends one served asset.
    pub fn with_asset(mut self, asset: Asset) -> Self {
        self.assets.push(asset);
        self
    }

    /// Sets the simulated fetch latency.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Returns the number of fetches performed.
    pub fn fetch_count(&self) -> u64 {
        self.fetch_count.load(Ordering::Relaxed)
    }

    /// Sets whether fetches succeed.
    pub fn set_available(&self, available: bool) {
        self.unavailable.store(!available, Ordering::Relaxed);
    }

    /// Makes fetches fail with `SourceUnavailable`.
    pub fn make_unavailable(&self) {
        self.set_available(false);
    }

    /// Makes fetches succeed again.
    pub fn make_available(&self) {
        self.set_available(true);
    }
}

impl Default for MockInventory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InventorySource for MockInventory {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> Result<Vec<Asset>, InventoryError> {
        self.fetch_count.fetch_add(1, Ordering::Relaxed);

        if let Some(latency) = self.latency {
            #[cfg(feature = "tokio-runtime")]
            tokio::time::sleep(latency).await;
            #[cfg(not(feature = "tokio-runtime"))]
            std::thread::sleep(latency);
        }

        if self.unavailable.load(Ordering::Relaxed) {
            return Err(InventoryError::source_unavailable(
                &self.name,
                "simulated inventory outage",
            ));
        }

        Ok(self.assets.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_inventory_sample() {
        let inventory = MockInventory::new();
        let assets = inventory.fetch().await.unwrap();

        let ids: Vec<_> = assets.iter().map(|a| a.id()).collect();
        assert_eq!(ids, vec!["gcp-001", "gcp-002", "gcp-003"]);
        assert!(assets.iter().all(|a| !a.is_evaluated()));
        assert_eq!(inventory.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_inventory_outage() {
        let inventory = MockInventory::new().with_name("flaky");

        inventory.make_unavailable();
        let err = inventory.fetch().await.unwrap_err();
        assert!(matches!(
            err,
            InventoryError::SourceUnavailable { ref source_name, .. } if source_name == "flaky"
        ));

        inventory.make_available();
        assert!(inventory.fetch().await.is_ok());
        assert_eq!(inventory.fetch_count(), 2);
    }

    #[tokio::test]
    async fn test_mock_inventory_custom_assets() {
        let inventory = MockInventory::empty()
            .with_asset(Asset::new("lb-1", AssetType::LoadBalancer, "edge"))
            .with_latency(Duration::from_millis(1));

        let assets = inventory.fetch().await.unwrap();
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].asset_type, AssetType::LoadBalancer);
    }
}
