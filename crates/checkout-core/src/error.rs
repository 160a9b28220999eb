//! # Error Types
//!
//! Domain-specific error types for checkout-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  checkout-core errors (this file)                                      │
//! │  ├── CoreError        - Catalog-level rule violations                  │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  checkout-store errors                                                 │
//! │  └── StoreError       - Quota, malformed snapshot, I/O                 │
//! │                                                                         │
//! │  checkout-engine errors                                                │
//! │  └── EngineError      - CatalogUnavailable, StorageQuotaExceeded       │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → EngineError → ApiError → User     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A rejected coupon is deliberately absent from this list: it is a normal
//! outcome ([`crate::coupon::CouponOutcome::Invalid`]), not a fault.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Catalog-level business rule violations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// A single catalog record broke a field rule.
    #[error("Product {id} is invalid: {source}")]
    InvalidProduct {
        id: i64,
        #[source]
        source: ValidationError,
    },

    /// Two catalog records share the same id.
    ///
    /// ## When This Occurs
    /// - The catalog source lists a product twice
    /// - Two different products were assigned the same id upstream
    #[error("Duplicate product id {0} in catalog")]
    DuplicateProduct(i64),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value is NaN or infinite.
    #[error("{field} must be a finite number")]
    MustBeFinite { field: String },

    /// Invalid format.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidProduct {
            id: 7,
            source: ValidationError::Required {
                field: "name".to_string(),
            },
        };
        assert_eq!(err.to_string(), "Product 7 is invalid: name is required");
        assert_eq!(
            CoreError::DuplicateProduct(3).to_string(),
            "Duplicate product id 3 in catalog"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::OutOfRange {
            field: "availableCount".to_string(),
            min: 0,
            max: u32::MAX as i64,
        };
        assert_eq!(
            err.to_string(),
            "availableCount must be between 0 and 4294967295"
        );

        let err = ValidationError::NotAllowed {
            field: "sort field".to_string(),
            allowed: vec!["price".to_string(), "name".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "sort field must be one of: [\"price\", \"name\"]"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
