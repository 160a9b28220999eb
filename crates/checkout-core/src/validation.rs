//! # Validation Module
//!
//! Checks applied to catalog records before they become [`Product`]s.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                      │
//! │  └── Field presence and JSON types                                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Field rules (THIS MODULE)                                    │
//! │  ├── price finite and ≥ 0                                              │
//! │  └── availableCount in 0..=u32::MAX                                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Catalog rules (THIS MODULE)                                  │
//! │  └── ids unique                                                        │
//! │                                                                         │
//! │  Names are free text: empty and very long names are both accepted.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use checkout_core::validation::{validate_price, validate_available_count};
//!
//! assert_eq!(validate_price(12.5).unwrap().cents(), 1250);
//! assert!(validate_price(-1.0).is_err());
//! assert!(validate_available_count(-3).is_err());
//! ```

use std::collections::HashSet;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::Product;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a decimal price and converts it to [`Money`].
///
/// ## Rules
/// - Must be finite
/// - Must be non-negative (zero is a free item)
pub fn validate_price(price: f64) -> ValidationResult<Money> {
    let money = Money::from_decimal(price).ok_or_else(|| ValidationError::MustBeFinite {
        field: "price".to_string(),
    })?;

    if money.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(money)
}

/// Validates a stock count and narrows it to `u32`.
pub fn validate_available_count(count: i64) -> ValidationResult<u32> {
    u32::try_from(count).map_err(|_| ValidationError::OutOfRange {
        field: "availableCount".to_string(),
        min: 0,
        max: i64::from(u32::MAX),
    })
}

// =============================================================================
// Catalog Validators
// =============================================================================

/// Validates a single, already-typed product.
pub fn validate_product(product: &Product) -> CoreResult<()> {
    if product.price_cents < 0 {
        return Err(CoreError::InvalidProduct {
            id: product.id,
            source: ValidationError::OutOfRange {
                field: "price".to_string(),
                min: 0,
                max: i64::MAX,
            },
        });
    }

    Ok(())
}

/// Validates a full catalog: every product, plus id uniqueness.
pub fn validate_catalog(products: &[Product]) -> CoreResult<()> {
    let mut seen = HashSet::with_capacity(products.len());

    for product in products {
        validate_product(product)?;
        if !seen.insert(product.id) {
            return Err(CoreError::DuplicateProduct(product.id));
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_price() {
        assert_eq!(validate_price(0.0).unwrap(), Money::zero());
        assert_eq!(validate_price(1000.01).unwrap().cents(), 100_001);
        assert!(matches!(
            validate_price(-0.5),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            validate_price(f64::NAN),
            Err(ValidationError::MustBeFinite { .. })
        ));
    }

    #[test]
    fn test_validate_available_count() {
        assert_eq!(validate_available_count(0).unwrap(), 0);
        assert_eq!(validate_available_count(42).unwrap(), 42);
        assert!(validate_available_count(-1).is_err());
        assert!(validate_available_count(i64::from(u32::MAX) + 1).is_err());
    }

    #[test]
    fn test_validate_catalog() {
        let good = vec![
            Product::new(1, "Pen", 100, 1),
            Product::new(2, "Ink", 250, 0),
        ];
        assert!(validate_catalog(&good).is_ok());
        assert!(validate_catalog(&[]).is_ok());

        let duplicate = vec![Product::new(1, "Pen", 100, 1), Product::new(1, "Ink", 250, 0)];
        assert_eq!(
            validate_catalog(&duplicate),
            Err(CoreError::DuplicateProduct(1))
        );

        let negative = vec![Product::new(5, "Refund", -100, 1)];
        assert!(matches!(
            validate_catalog(&negative),
            Err(CoreError::InvalidProduct { id: 5, .. })
        ));
    }

    #[test]
    fn test_validate_catalog_accepts_any_name() {
        let names = vec![
            Product::new(1, "A".repeat(10_000), 100, 1),
            Product::new(2, "", 100, 1),
            Product::new(3, "   ", 100, 1),
        ];
        assert!(validate_catalog(&names).is_ok());
    }
}
