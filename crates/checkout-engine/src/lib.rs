//! # checkout-engine: The Cart Engine
//!
//! Owns one checkout session: the catalog, the per-product quantities, the
//! view settings and the coupon. All pricing is delegated to
//! `checkout-core`; all persistence goes through a
//! [`checkout_store::KeyValueStore`].
//!
//! ## Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CartEngine::new(loader, store)                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  initialize().await                                                    │
//! │       ├── loading = true  ──────────────► watch::Receiver<bool>        │
//! │       ├── loader.fetch_catalog().await   (may be slow, may fail)       │
//! │       ├── loading = false                                              │
//! │       ├── every quantity = 0                                           │
//! │       └── merge snapshot from store["cart"], if any                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  set_quantity / increment / decrement / set_search_query / ...         │
//! │  apply_coupon / save_cart / clear_cart                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  visible_products() / breakdown()   (recomputed on every call)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use checkout_core::Product;
//! use checkout_engine::{CartEngine, StaticLoader};
//! use checkout_store::MemoryStore;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let loader = StaticLoader::new(vec![Product::new(1, "Lamp", 120_000, 2)]);
//! let mut engine = CartEngine::new(loader, MemoryStore::new());
//!
//! engine.initialize().await.unwrap();
//! engine.increment_quantity(1);
//! assert_eq!(engine.breakdown().discount_percent, 10);
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod engine;
pub mod error;
pub mod loader;

// =============================================================================
// Re-exports
// =============================================================================

pub use engine::{CartEngine, InitReport};
pub use error::{CatalogError, EngineError, EngineResult};
pub use loader::{CatalogLoader, CatalogRecord, JsonFileLoader, StaticLoader};
