//! # Storage Port
//!
//! The engine talks to local storage only through this trait.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CartEngine<L, S: KeyValueStore>                                        │
//! │       │                                                                 │
//! │       ├── get("cart")     → Option<String>                              │
//! │       ├── set("cart", v)  → ()                                          │
//! │       └── remove("cart")  → ()                                          │
//! │                                                                         │
//! │  Implementations: MemoryStore (tests), FileStore (terminal app)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::StoreResult;

/// String key-value storage, in the shape of a browser's local storage.
pub trait KeyValueStore {
    /// Returns the value under `key`, or `None` if nothing is stored.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> StoreResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}
