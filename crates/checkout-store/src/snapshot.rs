//! # Cart Snapshot
//!
//! Wire format of the persisted cart and the rules for writing and reading it.
//!
//! ## Format
//! ```json
//! [
//!   { "id": 1, "name": "Pen", "unitPrice": 1.5, "availableCount": 10, "quantity": 4 },
//!   { "id": 2, "name": "Ink", "unitPrice": 2.5, "availableCount": 0,  "quantity": 0 }
//! ]
//! ```
//! Every catalog line is written, including zero quantities. Only `id` and
//! `quantity` are needed to restore; the other fields default when absent.
//!
//! ## Restore Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  snapshot id in catalog?      → quantity restored (clamped to stock)   │
//! │  snapshot id NOT in catalog?  → dropped                                │
//! │  catalog id NOT in snapshot?  → stays 0                                │
//! │  snapshot unparseable?        → MalformedSnapshot, caller ignores it   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use checkout_core::{CartLine, CartState};

use crate::error::{StoreError, StoreResult};

/// Size ceiling for an encoded snapshot: 5 MiB.
pub const STORAGE_QUOTA_BYTES: usize = 5 * 1024 * 1024;

/// One persisted cart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotLine {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub unit_price: f64,
    #[serde(default)]
    pub available_count: u32,
    pub quantity: u32,
}

impl From<&CartLine> for SnapshotLine {
    fn from(line: &CartLine) -> Self {
        let product = line.product();
        SnapshotLine {
            id: product.id,
            name: product.name.clone(),
            unit_price: product.price().to_decimal(),
            available_count: product.available_count,
            quantity: line.quantity(),
        }
    }
}

/// Encodes `lines` as a snapshot.
///
/// Fails with [`StoreError::QuotaExceeded`] if the encoded size is `>= limit`
/// bytes. Nothing is written by this function; callers write the result.
pub fn encode(lines: &[CartLine], limit: usize) -> StoreResult<String> {
    let snapshot: Vec<SnapshotLine> = lines.iter().map(SnapshotLine::from).collect();
    let json = serde_json::to_string(&snapshot)?;

    if json.len() >= limit {
        return Err(StoreError::QuotaExceeded {
            size: json.len(),
            limit,
        });
    }

    Ok(json)
}

/// Parses a stored snapshot.
pub fn decode(raw: &str) -> StoreResult<Vec<SnapshotLine>> {
    serde_json::from_str(raw).map_err(|e| StoreError::MalformedSnapshot(e.to_string()))
}

/// Merges snapshot quantities into `cart` by product id.
///
/// Returns how many snapshot lines matched a catalog product.
pub fn restore(cart: &mut CartState, snapshot: &[SnapshotLine]) -> usize {
    let mut restored = 0;

    for saved in snapshot {
        match cart.set_quantity(saved.id, i64::from(saved.quantity)) {
            Some(_) => restored += 1,
            None => debug!(product_id = saved.id, "Dropping saved line for unknown product"),
        }
    }

    restored
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_core::Product;

    fn cart() -> CartState {
        let mut cart = CartState::new();
        cart.load_products(vec![
            Product::new(1, "Pen", 150, 10),
            Product::new(2, "Ink", 250, 3),
            Product::new(3, "Pad", 400, 5),
        ]);
        cart
    }

    #[test]
    fn test_encode_writes_every_line_in_camel_case() {
        let mut cart = cart();
        cart.set_quantity(1, 4);

        let json = encode(cart.lines(), STORAGE_QUOTA_BYTES).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let lines = value.as_array().unwrap();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["id"], 1);
        assert_eq!(lines[0]["name"], "Pen");
        assert_eq!(lines[0]["unitPrice"], 1.5);
        assert_eq!(lines[0]["availableCount"], 10);
        assert_eq!(lines[0]["quantity"], 4);
        assert_eq!(lines[1]["quantity"], 0);
    }

    #[test]
    fn test_encode_rejects_at_the_limit() {
        let cart = cart();
        let json = encode(cart.lines(), STORAGE_QUOTA_BYTES).unwrap();

        let err = encode(cart.lines(), json.len()).unwrap_err();
        assert!(matches!(err, StoreError::QuotaExceeded { size, limit } if size == limit));
        assert!(encode(cart.lines(), json.len() + 1).is_ok());
    }

    #[test]
    fn test_decode_accepts_minimal_lines() {
        let lines = decode(r#"[{"id":2,"quantity":1}]"#).unwrap();
        assert_eq!(lines[0].id, 2);
        assert_eq!(lines[0].quantity, 1);
        assert_eq!(lines[0].name, "");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        for raw in ["", "{", "{\"id\":1}", "[{\"id\":\"one\",\"quantity\":1}]", "[{\"id\":1,\"quantity\":-2}]"] {
            assert!(matches!(decode(raw), Err(StoreError::MalformedSnapshot(_))), "{raw}");
        }
    }

    #[test]
    fn test_restore_merges_by_id() {
        let mut cart = cart();
        let snapshot = decode(
            r#"[
                {"id": 1, "quantity": 4},
                {"id": 2, "quantity": 9},
                {"id": 42, "quantity": 7}
            ]"#,
        )
        .unwrap();

        let restored = restore(&mut cart, &snapshot);

        assert_eq!(restored, 2);
        assert_eq!(cart.quantity(1), Some(4));
        // Clamped to the current stock of 3
        assert_eq!(cart.quantity(2), Some(3));
        // Not in the snapshot
        assert_eq!(cart.quantity(3), Some(0));
        assert_eq!(cart.quantity(42), None);
    }

    #[test]
    fn test_round_trip_restores_quantities() {
        let mut original = cart();
        original.set_quantity(1, 7);
        original.set_quantity(3, 5);
        let json = encode(original.lines(), STORAGE_QUOTA_BYTES).unwrap();

        let mut fresh = cart();
        restore(&mut fresh, &decode(&json).unwrap());

        for line in original.lines() {
            assert_eq!(fresh.quantity(line.product_id()), Some(line.quantity()));
        }
    }
}
