//! # Catalog Loaders
//!
//! The catalog comes from an external collaborator that may be slow and may
//! fail. The engine only knows the [`CatalogLoader`] port.
//!
//! ## Source Format
//! ```json
//! [
//!   { "id": 1, "name": "Wireless Mouse", "price": 24.99, "availableCount": 4 }
//! ]
//! ```
//!
//! ## Implementations
//! - [`JsonFileLoader`] - reads the format above from disk after a simulated
//!   network delay
//! - [`StaticLoader`] - hands out a fixed list (tests, demos)

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use checkout_core::validation::{validate_available_count, validate_price};
use checkout_core::{CoreError, Product};

use crate::error::CatalogError;

/// Delay the file loader waits before answering, mimicking a network call.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(1500);

// =============================================================================
// Loader Port
// =============================================================================

/// Asynchronous source of the product catalog.
#[async_trait]
pub trait CatalogLoader: Send + Sync {
    /// Fetches the whole catalog. Resolves or fails exactly once per call.
    async fn fetch_catalog(&self) -> Result<Vec<Product>, CatalogError>;
}

#[async_trait]
impl<L: CatalogLoader + ?Sized> CatalogLoader for Box<L> {
    async fn fetch_catalog(&self) -> Result<Vec<Product>, CatalogError> {
        (**self).fetch_catalog().await
    }
}

// =============================================================================
// Catalog Record
// =============================================================================

/// One entry of the catalog source, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRecord {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub available_count: i64,
}

impl TryFrom<CatalogRecord> for Product {
    type Error = CoreError;

    fn try_from(record: CatalogRecord) -> Result<Self, Self::Error> {
        let invalid = |source| CoreError::InvalidProduct {
            id: record.id,
            source,
        };

        let price = validate_price(record.price).map_err(invalid)?;
        let available_count = validate_available_count(record.available_count).map_err(invalid)?;

        Ok(Product::new(record.id, record.name, price.cents(), available_count))
    }
}

impl From<&Product> for CatalogRecord {
    fn from(product: &Product) -> Self {
        CatalogRecord {
            id: product.id,
            name: product.name.clone(),
            price: product.price().to_decimal(),
            available_count: i64::from(product.available_count),
        }
    }
}

/// Parses catalog JSON into products.
///
/// Name and id-uniqueness rules are checked by the engine after the fetch,
/// so they apply to every loader alike.
pub fn parse_catalog(raw: &str) -> Result<Vec<Product>, CatalogError> {
    let records: Vec<CatalogRecord> =
        serde_json::from_str(raw).map_err(|e| CatalogError::Parse(e.to_string()))?;

    records
        .into_iter()
        .map(|record| Product::try_from(record).map_err(CatalogError::from))
        .collect()
}

// =============================================================================
// JSON File Loader
// =============================================================================

/// Reads the catalog from a JSON file after a simulated delay.
#[derive(Debug, Clone)]
pub struct JsonFileLoader {
    path: PathBuf,
    latency: Duration,
}

impl JsonFileLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileLoader {
            path: path.into(),
            latency: DEFAULT_LATENCY,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

#[async_trait]
impl CatalogLoader for JsonFileLoader {
    async fn fetch_catalog(&self) -> Result<Vec<Product>, CatalogError> {
        debug!(path = ?self.path, latency_ms = self.latency.as_millis() as u64, "Fetching catalog");

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| CatalogError::Unavailable(format!("{}: {}", self.path.display(), e)))?;

        let products = parse_catalog(&raw)?;
        info!(count = products.len(), "Catalog fetched");
        Ok(products)
    }
}

// =============================================================================
// Static Loader
// =============================================================================

/// Serves a fixed product list, optionally after a delay.
#[derive(Debug, Clone, Default)]
pub struct StaticLoader {
    products: Vec<Product>,
    latency: Duration,
}

impl StaticLoader {
    pub fn new(products: Vec<Product>) -> Self {
        StaticLoader {
            products,
            latency: Duration::ZERO,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

#[async_trait]
impl CatalogLoader for StaticLoader {
    async fn fetch_catalog(&self) -> Result<Vec<Product>, CatalogError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(self.products.clone())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
