//! Inventory loaded from a JSON export.

use crate::core::{Asset, AssetType, InventoryError, InventorySource};

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// One asset as it appears in an inventory export.
///
/// `null` is accepted for the optional fields. `ComplianceScore`,
/// `Violations` and any other unknown keys are skipped.
#[derive(Debug, Deserialize)]
struct InventoryRecord {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Type")]
    asset_type: AssetType,
    #[serde(rename = "Name", default)]
    name: Option<String>,
    #[serde(rename = "IsPublic", default)]
    is_public: Option<bool>,
    #[serde(rename = "Tags", default)]
    tags: Option<BTreeSet<String>>,
}

impl From<InventoryRecord> for Asset {
    fn from(record: InventoryRecord) -> Self {
        Asset::new(record.id, record.asset_type, record.name.unwrap_or_default())
            .with_public(record.is_public.unwrap_or(false))
            .with_tags(record.tags.unwrap_or_default())
    }
}

/// Reads assets from a JSON array on disk.
///
/// The document uses the same field names as the compliance report (`ID`,
/// `Type`, `Name`, `IsPublic`, `Tags`). Any `ComplianceScore` or
/// `Violations` present in the file are discarded on load.
#[derive(Debug, Clone)]
pub struct JsonFileInventory {
    name: String,
    path: PathBuf,
}

impl JsonFileInventory {
    /// Creates a source reading from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            name: "json-file".to_string(),
            path: path.into(),
        }
    }

    /// Sets the name of this source.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses an inventory document.
    pub fn parse(content: &[u8]) -> Result<Vec<Asset>, InventoryError> {
        let records: Vec<InventoryRecord> = serde_json::from_slice(content)?;
        Ok(records.into_iter().map(Asset::from).collect())
    }

    async fn read(&self) -> Result<Vec<u8>, InventoryError> {
        #[cfg(feature = "tokio-runtime")]
        let content = tokio::fs::read(&self.path).await;
        #[cfg(not(feature = "tokio-runtime"))]
        let content = std::fs::read(&self.path);

        content.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                InventoryError::source_unavailable(
                    &self.name,
                    format!("inventory file not found: {}", self.path.display()),
                )
            } else {
                InventoryError::Io(e)
            }
        })
    }
}

#[async_trait]
impl InventorySource for JsonFileInventory {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> Result<Vec<Asset>, InventoryError> {
        let content = self.read().await?;
        let assets = Self::parse(&content)?;

        tracing::debug!(
            source = %self.name,
            path = %self.path.display(),
            count = assets.len(),
            "Loaded inventory file"
        );

        Ok(assets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AssetType;
    use std::io::Write;

    #[test]
    fn test_parse_discards_previous_results() {
        let json = br#"[
            {
                "ID": "gcp-001",
                "Type": "STORAGE_BUCKET",
                "Name": "photos",
                "IsPublic": true,
                "Tags": ["user_data", "production"],
                "ComplianceScore": 100,
                "Violations": [
                    { "RuleID": "OLD", "Description": "stale", "Severity": "LOW" }
                ]
            },
            { "ID": "gcp-002", "Type": "VM_INSTANCE" }
        ]"#;

        let assets = JsonFileInventory::parse(json).unwrap();
        assert_eq!(assets.len(), 2);
        assert_eq!(assets[0].asset_type, AssetType::StorageBucket);
        assert!(assets[0].has_tag("production"));
        assert!(!assets[0].is_evaluated());
        assert!(assets[0].violations().is_empty());
        assert!(assets[1].tags.is_empty());
    }

    #[test]
    fn test_parse_accepts_null_fields() {
        let json = br#"[
            {"ID":"gcp-001","Type":"STORAGE_BUCKET","Name":"photos","IsPublic":true,"Tags":null,"ComplianceScore":0,"Violations":null},
            {"ID":"gcp-002","Type":"VM_INSTANCE","Name":null,"IsPublic":null,"Tags":["dev"],"ComplianceScore":0,"Violations":null}
        ]"#;

        let assets = JsonFileInventory::parse(json).unwrap();
        assert_eq!(assets.len(), 2);
        assert!(assets[0].tags.is_empty());
        assert!(assets[0].is_public);
        assert_eq!(assets[1].name, "");
        assert!(!assets[1].is_public);
        assert!(assets[1].has_tag("dev"));
        assert!(assets.iter().all(|a| !a.is_evaluated()));
    }

    #[test]
    fn test_parse_ignores_stale_evaluation() {
        let json = br#"[
            {"ID":"a","Type":"VM_INSTANCE","ComplianceScore":-1},
            {"ID":"b","Type":"VM_INSTANCE","ComplianceScore":300,
             "Violations":[{"RuleID":"X","Description":"old","Severity":"SEVERE"}]},
            {"ID":"c","Type":"VM_INSTANCE","Violations":"corrupt","Region":"us-east1"}
        ]"#;

        let assets = JsonFileInventory::parse(json).unwrap();
        let ids: Vec<_> = assets.iter().map(|a| a.id()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert!(assets.iter().all(|a| a.violations().is_empty()));
        assert!(assets.iter().all(|a| a.compliance_score().is_none()));
    }

    #[test]
    fn test_parse_rejects_unknown_type() {
        let json = br#"[{ "ID": "x", "Type": "MAINFRAME" }]"#;
        assert!(matches!(
            JsonFileInventory::parse(json),
            Err(InventoryError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"ID": "db-1", "Type": "DATABASE_INSTANCE", "IsPublic": true}}]"#)
            .unwrap();

        let inventory = JsonFileInventory::new(file.path()).with_name("export");
        let assets = inventory.fetch().await.unwrap();
        assert_eq!(assets[0].id(), "db-1");
        assert!(assets[0].is_public);
        assert_eq!(inventory.name(), "export");
    }

    #[tokio::test]
    async fn test_fetch_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let inventory = JsonFileInventory::new(dir.path().join("missing.json"));

        let err = inventory.fetch().await.unwrap_err();
        assert!(matches!(err, InventoryError::SourceUnavailable { .. }));
    }
}
