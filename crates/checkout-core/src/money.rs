//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │    0.1 + 0.2 = 0.30000000000000004                                      │
//! │                                                                         │
//! │  The discount tiers switch at exactly 1000.00 / 1500.00 / 2000.00.      │
//! │  A float subtotal of 1000.0000000001 would jump a whole tier.           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Catalog prices are converted to cents once, at the boundary.         │
//! │    Every sum and comparison after that is exact.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use checkout_core::money::Money;
//!
//! let price = Money::from_cents(1099); // 10.99
//! let line = price.multiply_quantity(3);
//! assert_eq!(line.cents(), 3297);
//!
//! // Catalog JSON carries decimals; convert once
//! assert_eq!(Money::from_decimal(1000.01), Some(Money::from_cents(100_001)));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents / paise).
///
/// ## Design Decisions
/// - **i64 (signed)**: a pre-clamp total may go negative
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Ord**: totals are clamped with `max(Money::zero())`
/// - **Saturating arithmetic**: catalog prices have no upper bound, so
///   products and sums stop at `i64::MIN` / `i64::MAX` instead of wrapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a decimal amount (as found in catalog JSON) to cents.
    ///
    /// Rounds half away from zero. Returns `None` for NaN, infinities and
    /// values that do not fit in i64 cents.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(12.5), Some(Money::from_cents(1250)));
    /// assert_eq!(Money::from_decimal(0.1 + 0.2), Some(Money::from_cents(30)));
    /// assert_eq!(Money::from_decimal(f64::NAN), None);
    /// ```
    pub fn from_decimal(amount: f64) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }

        let cents = (amount * 100.0).round();
        if cents < i64::MIN as f64 || cents > i64::MAX as f64 {
            return None;
        }

        Some(Money(cents as i64))
    }

    /// Returns the amount as a decimal number (for JSON output only).
    #[inline]
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## User Workflow
    /// ```text
    /// Product: Notebook 600.00
    /// Quantity: 3
    ///      │
    ///      ▼
    /// multiply_quantity(3) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Line Total: 1800.00
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }

    /// Returns `bps` basis points of this amount, rounded half up.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`. i128 keeps large
    /// carts from overflowing; the result saturates back into i64.
    pub fn portion_bps(&self, bps: u32) -> Money {
        let portion = (self.0 as i128 * bps as i128 + 5000) / 10000;
        Money::from_cents(portion.clamp(i64::MIN as i128, i64::MAX as i128) as i64)
    }

    /// Returns `percent`% of this amount.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    ///
    /// let subtotal = Money::from_cents(250_000); // 2500.00
    /// assert_eq!(subtotal.percent_of(20).cents(), 50_000);
    /// ```
    #[inline]
    pub fn percent_of(&self, percent: u32) -> Money {
        self.portion_bps(percent * 100)
    }

    /// Applies a percentage discount and returns the discounted amount.
    ///
    /// The result is NOT clamped: a discount above 10000 bps yields a
    /// negative amount. Callers that need a floor apply it themselves.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    ///
    /// let subtotal = Money::from_cents(10000);
    /// assert_eq!(subtotal.apply_percentage_discount(1000).cents(), 9000);
    /// assert_eq!(subtotal.apply_percentage_discount(12000).cents(), -2000);
    /// ```
    pub fn apply_percentage_discount(&self, discount_bps: u32) -> Money {
        Money::from_cents(self.0.saturating_sub(self.portion_bps(discount_bps).0))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders as `1234.50` / `-5.50`. The currency symbol is a display concern
/// and is added by the front end.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.major(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_decimal_rounds_to_cents() {
        assert_eq!(Money::from_decimal(1000.01), Some(Money::from_cents(100_001)));
        assert_eq!(Money::from_decimal(1500.0), Some(Money::from_cents(150_000)));
        assert_eq!(Money::from_decimal(19.999), Some(Money::from_cents(2000)));
        assert_eq!(Money::from_decimal(0.0), Some(Money::zero()));
        assert_eq!(Money::from_decimal(f64::INFINITY), None);
        assert_eq!(Money::from_decimal(1e30), None);
    }

    #[test]
    fn test_to_decimal() {
        assert!((Money::from_cents(1250).to_decimal() - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "10.99");
        assert_eq!(format!("{}", Money::from_cents(187_500)), "1875.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-5.50");
        assert_eq!(format!("{}", Money::zero()), "0.00");
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_percent_of_rounds_half_up() {
        // 10% of 0.05 = 0.005 → 0.01
        assert_eq!(Money::from_cents(5).percent_of(10).cents(), 1);
        assert_eq!(Money::from_cents(150_000).percent_of(10).cents(), 15_000);
    }

    #[test]
    fn test_percentage_discount_can_go_negative() {
        let subtotal = Money::from_cents(10_000);
        assert_eq!(subtotal.apply_percentage_discount(2500).cents(), 7500);
        assert!(subtotal.apply_percentage_discount(15_000).is_negative());
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_cents(299);
        assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
        assert!(unit_price.multiply_quantity(0).is_zero());
    }

    #[test]
    fn test_large_amounts_saturate() {
        let yacht = Money::from_cents(100_000_000_000_000_000);
        let max = Money::from_cents(i64::MAX);

        assert_eq!(yacht.multiply_quantity(100), max);
        assert_eq!(yacht.multiply_quantity(u32::MAX), max);
        assert_eq!(max + yacht, max);

        let total: Money = vec![max, max, yacht].into_iter().sum();
        assert_eq!(total, max);

        let mut running = max;
        running += yacht;
        assert_eq!(running, max);

        assert_eq!(Money::from_cents(i64::MIN) - yacht, Money::from_cents(i64::MIN));
        assert_eq!(max.portion_bps(12_000), max);
        assert!(max.apply_percentage_discount(2_500) < max);
    }
}
