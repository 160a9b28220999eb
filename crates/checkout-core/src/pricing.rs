//! # Pricing
//!
//! Subtotal, tiered discount and total, computed from cart lines on demand.
//!
//! ## Discount Tiers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  subtotal            discount                                           │
//! │  ────────────────    ────────                                           │
//! │  ≤ 1000.00              0%                                              │
//! │  (1000.00, 1500.00]    10%                                              │
//! │  (1500.00, 2000.00]    15%                                              │
//! │  > 2000.00             20%                                              │
//! │                                                                         │
//! │  Boundaries belong to the LOWER tier: comparisons are strict `>`.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Total
//! `total = max(0, subtotal × (1 − discount% − additional%))`

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::CartLine;
use crate::money::Money;

/// Tier thresholds, highest first: (exclusive lower bound, percent).
const DISCOUNT_TIERS: [(Money, u32); 3] = [
    (Money::from_cents(200_000), 20),
    (Money::from_cents(150_000), 15),
    (Money::from_cents(100_000), 10),
];

/// Sum of `unit price × quantity` over every line.
pub fn subtotal(lines: &[CartLine]) -> Money {
    lines.iter().map(CartLine::line_total).sum()
}

/// Tiered discount percentage for a subtotal.
pub fn discount_percent(subtotal: Money) -> u32 {
    DISCOUNT_TIERS
        .iter()
        .find(|(threshold, _)| subtotal > *threshold)
        .map(|(_, percent)| *percent)
        .unwrap_or(0)
}

/// Applies both discounts to `subtotal` and floors the result at zero.
///
/// The floor matters whenever the combined percentage exceeds 100.
pub fn total_after_discounts(subtotal: Money, discount_percent: u32, additional_percent: u32) -> Money {
    let combined_bps = (discount_percent + additional_percent) * 100;
    subtotal
        .apply_percentage_discount(combined_bps)
        .max(Money::zero())
}

// =============================================================================
// Price Breakdown
// =============================================================================

/// Everything the totals panel shows, computed in one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    /// Number of lines with a non-zero quantity.
    pub item_count: usize,
    pub total_quantity: u64,
    pub subtotal: Money,
    pub discount_percent: u32,
    /// `subtotal × discount%`, as displayed next to the tier.
    pub discount_amount: Money,
    pub additional_discount_percent: u32,
    pub additional_discount_amount: Money,
    pub total: Money,
}

impl PriceBreakdown {
    pub fn compute(lines: &[CartLine], additional_discount_percent: u32) -> Self {
        let subtotal = subtotal(lines);
        let discount_percent = discount_percent(subtotal);

        PriceBreakdown {
            item_count: lines.iter().filter(|l| l.quantity() > 0).count(),
            total_quantity: lines.iter().map(|l| u64::from(l.quantity())).sum(),
            subtotal,
            discount_percent,
            discount_amount: subtotal.percent_of(discount_percent),
            additional_discount_percent,
            additional_discount_amount: subtotal.percent_of(additional_discount_percent),
            total: total_after_discounts(subtotal, discount_percent, additional_discount_percent),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Product;

    fn cents(c: i64) -> Money {
        Money::from_cents(c)
    }

    #[test]
    fn test_discount_tier_boundaries() {
        assert_eq!(discount_percent(cents(0)), 0);
        assert_eq!(discount_percent(cents(100_000)), 0);
        assert_eq!(discount_percent(cents(100_001)), 10);
        assert_eq!(discount_percent(cents(150_000)), 10);
        assert_eq!(discount_percent(cents(150_001)), 15);
        assert_eq!(discount_percent(cents(200_000)), 15);
        assert_eq!(discount_percent(cents(200_001)), 20);
    }

    #[test]
    fn test_total_with_coupon() {
        // 2500.00 × (1 − 0.20 − 0.05) = 1875.00
        let total = total_after_discounts(cents(250_000), 20, 5);
        assert_eq!(total, cents(187_500));
    }

    #[test]
    fn test_total_is_clamped_at_zero() {
        // 80% + 30% would leave −10% of the subtotal
        let total = total_after_discounts(cents(50_000), 80, 30);
        assert_eq!(total, Money::zero());
        assert_eq!(total_after_discounts(Money::zero(), 20, 5), Money::zero());
    }

    #[test]
    fn test_subtotal_is_exact_sum() {
        let mut a = CartLine::new(Product::new(1, "A", 333, 10));
        let mut b = CartLine::new(Product::new(2, "B", 1_999, 10));
        let c = CartLine::new(Product::new(3, "C", 50_000, 10));
        a.set_quantity(3);
        b.set_quantity(7);

        let lines = vec![a, b, c];
        assert_eq!(subtotal(&lines), cents(333 * 3 + 1_999 * 7));
    }

    #[test]
    fn test_breakdown_amounts() {
        let mut line = CartLine::new(Product::new(1, "Chair", 125_000, 5));
        line.set_quantity(2); // 2500.00

        let breakdown = PriceBreakdown::compute(&[line], 5);
        assert_eq!(breakdown.item_count, 1);
        assert_eq!(breakdown.total_quantity, 2);
        assert_eq!(breakdown.subtotal, cents(250_000));
        assert_eq!(breakdown.discount_percent, 20);
        assert_eq!(breakdown.discount_amount, cents(50_000));
        assert_eq!(breakdown.additional_discount_amount, cents(12_500));
        assert_eq!(breakdown.total, cents(187_500));
    }

    #[test]
    fn test_empty_cart_breakdown() {
        let breakdown = PriceBreakdown::compute(&[], 0);
        assert_eq!(breakdown.subtotal, Money::zero());
        assert_eq!(breakdown.discount_percent, 0);
        assert_eq!(breakdown.total, Money::zero());
    }
}
