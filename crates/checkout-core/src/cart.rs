//! # Cart State
//!
//! The authoritative, mutable state of one checkout session.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  User Action              Method                  State Change          │
//! │  ───────────              ──────                  ────────────          │
//! │                                                                         │
//! │  Type quantity ─────────► set_quantity() ───────► line.qty = clamp(n)  │
//! │  Click + / − ───────────► increment / decrement ► line.qty = clamp(±1) │
//! │  Type in search ────────► set_search_query() ───► query = text         │
//! │  Pick sort options ─────► set_sort_field/dir() ─► sort = ...           │
//! │  Enter coupon ──────────► apply_coupon() ───────► coupon state machine │
//! │  Click Clear ───────────► clear() ──────────────► every qty = 0        │
//! │                                                                         │
//! │  Read-only, recomputed on every call:                                  │
//! │  visible_lines()  subtotal()  discount_percent()  total()  breakdown() │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Exactly one line per catalog product, in catalog order
//! - `0 ≤ quantity ≤ product.available_count` on every line

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::coupon::{CouponOutcome, CouponState};
use crate::money::Money;
use crate::pricing::{self, PriceBreakdown};
use crate::query;
use crate::types::{Product, SortDirection, SortField};

// =============================================================================
// Cart Line
// =============================================================================

/// A product together with its requested quantity.
///
/// The quantity is private so the clamp cannot be bypassed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    product: Product,
    quantity: u32,
}

impl CartLine {
    /// Creates a line with zero quantity.
    pub fn new(product: Product) -> Self {
        CartLine {
            product,
            quantity: 0,
        }
    }

    #[inline]
    pub fn product(&self) -> &Product {
        &self.product
    }

    #[inline]
    pub fn product_id(&self) -> i64 {
        self.product.id
    }

    #[inline]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Sets the quantity, clamped into `[0, available_count]`.
    ///
    /// Returns the quantity actually stored.
    pub fn set_quantity(&mut self, requested: i64) -> u32 {
        let clamped = requested.clamp(0, i64::from(self.product.available_count));
        // In range for u32 after the clamp
        self.quantity = clamped as u32;
        self.quantity
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.product.price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart State
// =============================================================================

/// Everything a session can change. Derived values are methods, not fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartState {
    lines: Vec<CartLine>,
    search_query: String,
    sort_field: SortField,
    sort_direction: SortDirection,
    coupon_code: String,
    coupon: CouponState,
    created_at: DateTime<Utc>,
}

impl Default for CartState {
    fn default() -> Self {
        Self::new()
    }
}

impl CartState {
    /// Creates an empty session: no products, default sort, no coupon.
    pub fn new() -> Self {
        CartState {
            lines: Vec::new(),
            search_query: String::new(),
            sort_field: SortField::default(),
            sort_direction: SortDirection::default(),
            coupon_code: String::new(),
            coupon: CouponState::default(),
            created_at: Utc::now(),
        }
    }

    /// Replaces the catalog. Every product starts with quantity 0.
    pub fn load_products(&mut self, products: Vec<Product>) {
        self.lines = products.into_iter().map(CartLine::new).collect();
    }

    // -------------------------------------------------------------------------
    // Quantity operations
    // -------------------------------------------------------------------------

    /// Sets the quantity for `product_id`, clamped to stock.
    ///
    /// Returns the stored quantity, or `None` if the product is unknown
    /// (the call is then a no-op).
    pub fn set_quantity(&mut self, product_id: i64, requested: i64) -> Option<u32> {
        self.line_mut(product_id)
            .map(|line| line.set_quantity(requested))
    }

    pub fn increment(&mut self, product_id: i64) -> Option<u32> {
        let current = self.quantity(product_id)?;
        self.set_quantity(product_id, i64::from(current) + 1)
    }

    /// Decrementing at zero stays at zero; the product remains listed.
    pub fn decrement(&mut self, product_id: i64) -> Option<u32> {
        let current = self.quantity(product_id)?;
        self.set_quantity(product_id, i64::from(current) - 1)
    }

    /// Resets every quantity to 0.
    pub fn clear(&mut self) {
        for line in &mut self.lines {
            line.set_quantity(0);
        }
        self.created_at = Utc::now();
    }

    // -------------------------------------------------------------------------
    // View settings
    // -------------------------------------------------------------------------

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn set_sort_field(&mut self, field: SortField) {
        self.sort_field = field;
    }

    pub fn set_sort_direction(&mut self, direction: SortDirection) {
        self.sort_direction = direction;
    }

    // -------------------------------------------------------------------------
    // Coupon
    // -------------------------------------------------------------------------

    /// Records the entered code and runs it through the coupon state machine.
    pub fn apply_coupon(&mut self, code: impl Into<String>) -> CouponOutcome {
        self.coupon_code = code.into();
        self.coupon.apply(&self.coupon_code)
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, product_id: i64) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id() == product_id)
    }

    fn line_mut(&mut self, product_id: i64) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|l| l.product_id() == product_id)
    }

    pub fn quantity(&self, product_id: i64) -> Option<u32> {
        self.line(product_id).map(CartLine::quantity)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|l| l.quantity() == 0)
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn sort_field(&self) -> SortField {
        self.sort_field
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    pub fn coupon_code(&self) -> &str {
        &self.coupon_code
    }

    pub fn coupon(&self) -> CouponState {
        self.coupon
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    // -------------------------------------------------------------------------
    // Derived values
    // -------------------------------------------------------------------------

    /// Lines matching the search query, in the selected order.
    pub fn visible_lines(&self) -> Vec<&CartLine> {
        query::visible_lines(
            &self.lines,
            &self.search_query,
            self.sort_field,
            self.sort_direction,
        )
    }

    pub fn subtotal(&self) -> Money {
        pricing::subtotal(&self.lines)
    }

    pub fn discount_percent(&self) -> u32 {
        pricing::discount_percent(self.subtotal())
    }

    pub fn additional_discount_percent(&self) -> u32 {
        self.coupon.additional_discount_percent()
    }

    pub fn total(&self) -> Money {
        pricing::total_after_discounts(
            self.subtotal(),
            self.discount_percent(),
            self.additional_discount_percent(),
        )
    }

    pub fn breakdown(&self) -> PriceBreakdown {
        PriceBreakdown::compute(&self.lines, self.additional_discount_percent())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn cart() -> CartState {
        let mut cart = CartState::new();
        cart.load_products(vec![
            Product::new(1, "Keyboard", 45_000, 3),
            Product::new(2, "Monitor", 110_000, 2),
            Product::new(3, "Sticker", 50, 0),
        ]);
        cart
    }

    fn assert_clamped(cart: &CartState) {
        for line in cart.lines() {
            assert!(line.quantity() <= line.product().available_count);
        }
    }

    #[test]
    fn test_new_products_start_at_zero() {
        let cart = cart();
        assert!(cart.lines().iter().all(|l| l.quantity() == 0));
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Money::zero());
    }

    #[test]
    fn test_set_quantity_clamps_to_stock() {
        let mut cart = cart();
        assert_eq!(cart.set_quantity(1, 10), Some(3));
        assert_eq!(cart.set_quantity(2, -4), Some(0));
        assert_eq!(cart.set_quantity(3, 1), Some(0));
        assert_eq!(cart.set_quantity(1, 2), Some(2));
        assert_clamped(&cart);
    }

    #[test]
    fn test_unknown_product_is_ignored() {
        let mut cart = cart();
        assert_eq!(cart.set_quantity(99, 1), None);
        assert_eq!(cart.increment(99), None);
        assert_eq!(cart.decrement(99), None);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_increment_and_decrement_respect_bounds() {
        let mut cart = cart();
        for _ in 0..5 {
            cart.increment(2);
            assert_clamped(&cart);
        }
        assert_eq!(cart.quantity(2), Some(2));

        for _ in 0..5 {
            cart.decrement(2);
            assert_clamped(&cart);
        }
        assert_eq!(cart.quantity(2), Some(0));
    }

    #[test]
    fn test_zeroed_product_stays_visible() {
        let mut cart = cart();
        cart.increment(1);
        cart.decrement(1);
        assert_eq!(cart.quantity(1), Some(0));
        assert!(cart.visible_lines().iter().any(|l| l.product_id() == 1));
    }

    #[test]
    fn test_derived_values_follow_state() {
        let mut cart = cart();
        cart.set_quantity(1, 2); // 900.00
        assert_eq!(cart.subtotal(), Money::from_cents(90_000));
        assert_eq!(cart.discount_percent(), 0);

        cart.set_quantity(2, 1); // 2000.00
        assert_eq!(cart.subtotal(), Money::from_cents(200_000));
        assert_eq!(cart.discount_percent(), 15);
        assert_eq!(cart.total(), Money::from_cents(170_000));

        cart.set_quantity(1, 3); // 2450.00
        assert_eq!(cart.discount_percent(), 20);

        cart.set_quantity(2, 0); // back to 1350.00
        assert_eq!(cart.discount_percent(), 10);
        assert_eq!(cart.total(), Money::from_cents(121_500));
    }

    #[test]
    fn test_coupon_adds_to_total_discount() {
        let mut cart = cart();
        cart.set_quantity(1, 3);
        cart.set_quantity(2, 1); // 2450.00, 20% tier
        assert_eq!(cart.apply_coupon("New"), CouponOutcome::Applied);
        assert_eq!(cart.coupon_code(), "New");
        // 2450.00 × 0.75
        assert_eq!(cart.total(), Money::from_cents(183_750));

        assert_eq!(cart.apply_coupon("X"), CouponOutcome::Invalid);
        assert_eq!(cart.coupon(), CouponState::Applied);
        assert_eq!(cart.additional_discount_percent(), 5);
    }

    #[test]
    fn test_clear_keeps_catalog_and_coupon() {
        let mut cart = cart();
        cart.set_quantity(1, 2);
        cart.apply_coupon("New");
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.lines().len(), 3);
        assert_eq!(cart.coupon(), CouponState::Applied);
    }

    #[test]
    fn test_view_settings_shape_visible_lines() {
        let mut cart = cart();
        cart.set_sort_field(SortField::Name);
        cart.set_sort_direction(SortDirection::Desc);
        let ids: Vec<i64> = cart.visible_lines().iter().map(|l| l.product_id()).collect();
        assert_eq!(ids, vec![3, 2, 1]);

        cart.set_search_query("mon");
        let ids: Vec<i64> = cart.visible_lines().iter().map(|l| l.product_id()).collect();
        assert_eq!(ids, vec![2]);
        assert_eq!(cart.search_query(), "mon");
    }
}
