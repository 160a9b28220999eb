//! # checkout-store: Local Persistence for the Checkout Cart
//!
//! The cart is persisted locally under a single key, as a JSON array of
//! product lines. Storage access is abstracted behind [`KeyValueStore`] so the
//! engine never touches a global store directly.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Persistence Data Flow                            │
//! │                                                                         │
//! │  CartEngine::save_cart()                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  checkout-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────────┐    ┌─────────────────┐                     │   │
//! │  │   │   snapshot     │    │  KeyValueStore  │                     │   │
//! │  │   │ encode/decode  │───►│  MemoryStore    │                     │   │
//! │  │   │ 5 MiB ceiling  │    │  FileStore      │                     │   │
//! │  │   └────────────────┘    └─────────────────┘                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  <data dir>/cart.json                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use checkout_core::{CartLine, Product};
//! use checkout_store::{snapshot, KeyValueStore, MemoryStore, CART_STORAGE_KEY};
//!
//! let mut line = CartLine::new(Product::new(1, "Pen", 150, 10));
//! line.set_quantity(4);
//!
//! let mut store = MemoryStore::new();
//! let json = snapshot::encode(&[line], snapshot::STORAGE_QUOTA_BYTES).unwrap();
//! store.set(CART_STORAGE_KEY, &json).unwrap();
//!
//! let raw = store.get(CART_STORAGE_KEY).unwrap().unwrap();
//! let restored = snapshot::decode(&raw).unwrap();
//! assert_eq!(restored[0].quantity, 4);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod file;
pub mod memory;
pub mod port;
pub mod snapshot;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use port::KeyValueStore;
pub use snapshot::{SnapshotLine, STORAGE_QUOTA_BYTES};

/// Key the cart snapshot is stored under.
pub const CART_STORAGE_KEY: &str = "cart";
