//! Inventory source implementations.
//!
//! This module contains implementations of the
//! [`InventorySource`](crate::core::InventorySource) trait.
//!
//! ## Available Sources
//!
//! - [`MockInventory`] - Static assets for demos and tests
//! - [`JsonFileInventory`] - A JSON export of an asset inventory
//!
//! ## Implementing a Custom Source
//!
//! A cloud API client implements the trait directly:
//!
//! ```rust,ignore
//! use cloudscan::core::{Asset, InventoryError, InventorySource};
//! use async_trait::async_trait;
//!
//! #[derive(Debug)]
//! pub struct AssetApiClient {
//!     // Your client's configuration
//! }
//!
//! #[async_trait]
//! impl InventorySource for AssetApiClient {
//!     fn name(&self) -> &str {
//!         "asset-api"
//!     }
//!
//!     async fn fetch(&self) -> Result<Vec<Asset>, InventoryError> {
//!         // Page through the provider's inventory API
//!         todo!()
//!     }
//! }
//! ```

mod json_file;
mod mock;

pub use json_file::JsonFileInventory;
pub use mock::{sample_assets, MockInventory};
