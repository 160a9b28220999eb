//! # Store Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds context and categorization            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  EngineError (checkout-engine)                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (terminal app) ← What the user reads                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Persistence errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The encoded snapshot is at or above the size ceiling.
    ///
    /// ## When This Occurs
    /// - A very large catalog is saved
    /// - The ceiling was configured lower than the cart needs
    ///
    /// Nothing is written; the previous snapshot is left as it was.
    #[error("Snapshot of {size} bytes exceeds the storage quota of {limit} bytes")]
    QuotaExceeded { size: usize, limit: usize },

    /// The stored value is not a valid snapshot.
    #[error("Persisted cart is malformed: {0}")]
    MalformedSnapshot(String),

    /// Key contains characters that cannot be used as a file name.
    #[error("Invalid storage key: '{0}'")]
    InvalidKey(String),

    /// Serializing the snapshot failed.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Reading or writing the backing file failed.
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_message() {
        let err = StoreError::QuotaExceeded {
            size: 6_000_000,
            limit: 5_242_880,
        };
        assert_eq!(
            err.to_string(),
            "Snapshot of 6000000 bytes exceeds the storage quota of 5242880 bytes"
        );
    }
}
