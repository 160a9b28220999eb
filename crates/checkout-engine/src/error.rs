//! # Engine Error Types
//!
//! ## Recovery Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Condition                 Engine state afterwards                      │
//! │  ─────────                 ───────────────────────                      │
//! │  CatalogUnavailable        no products, loading = false                │
//! │  StorageQuotaExceeded      nothing written, old snapshot kept          │
//! │  Malformed snapshot        ignored during initialize, quantities = 0   │
//! │  Storage                   operation skipped, state unchanged          │
//! │                                                                         │
//! │  None of these end the session.                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use checkout_core::CoreError;
use checkout_store::StoreError;

// =============================================================================
// Catalog Error
// =============================================================================

/// Why a catalog fetch failed. Cloneable so the engine can keep the last one.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    /// The source could not be reached or read.
    #[error("Catalog source unavailable: {0}")]
    Unavailable(String),

    /// The source was read but is not a catalog.
    #[error("Catalog could not be parsed: {0}")]
    Parse(String),

    /// The catalog parsed but broke a product rule.
    #[error("Catalog is invalid: {0}")]
    Invalid(#[from] CoreError),
}

// =============================================================================
// Engine Error
// =============================================================================

#[derive(Debug, Error)]
pub enum EngineError {
    /// Catalog fetch failed; the product list is empty.
    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(#[from] CatalogError),

    /// Save refused because the snapshot is too large.
    #[error("Storage quota exceeded: snapshot is {size} bytes, limit is {limit} bytes")]
    StorageQuotaExceeded { size: usize, limit: usize },

    /// Any other storage failure.
    #[error("Storage error: {0}")]
    Storage(StoreError),
}

impl From<StoreError> for EngineError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::QuotaExceeded { size, limit } => {
                EngineError::StorageQuotaExceeded { size, limit }
            }
            other => EngineError::Storage(other),
        }
    }
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_error_is_lifted() {
        let err: EngineError = StoreError::QuotaExceeded {
            size: 10,
            limit: 5,
        }
        .into();
        assert!(matches!(
            err,
            EngineError::StorageQuotaExceeded { size: 10, limit: 5 }
        ));
    }

    #[test]
    fn test_catalog_error_message() {
        let err: EngineError = CatalogError::Unavailable("timed out".into()).into();
        assert_eq!(
            err.to_string(),
            "Catalog unavailable: Catalog source unavailable: timed out"
        );
    }
}
