//! # checkout-core: Pure Business Logic for the Checkout Cart
//!
//! Every rule the cart obeys lives here as a pure function or a small state
//! type. Nothing in this crate performs I/O or awaits anything.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Checkout Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    checkout-cli (terminal shell)                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          checkout-engine (CartEngine, CatalogLoader)            │   │
//! │  └───────────────┬─────────────────────────────┬───────────────────┘   │
//! │                  │                             │                        │
//! │  ┌───────────────▼─────────────────┐  ┌────────▼───────────────────┐   │
//! │  │   ★ checkout-core (THIS) ★      │  │  checkout-store            │   │
//! │  │                                 │  │  KeyValueStore, snapshot   │   │
//! │  │  money   types   cart   pricing │  └────────────────────────────┘   │
//! │  │  query   coupon   validation    │                                   │
//! │  │                                 │                                   │
//! │  │  NO I/O • PURE FUNCTIONS        │                                   │
//! │  └─────────────────────────────────┘                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`types`] - Product, sort field/direction, stock level
//! - [`cart`] - Cart lines and the authoritative cart state
//! - [`pricing`] - Discount tiers and the price breakdown
//! - [`query`] - Search filtering and sorting
//! - [`coupon`] - The single-coupon state machine
//! - [`validation`] - Catalog record validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Derived, never stored**: subtotal, discount, total and the visible
//!    product list are recomputed from [`cart::CartState`] on every query
//! 2. **Integer Money**: all monetary values are in cents (i64)
//! 3. **Clamped quantities**: a cart line can never hold more than stock
//!
//! ## Example Usage
//!
//! ```rust
//! use checkout_core::cart::CartState;
//! use checkout_core::types::Product;
//!
//! let mut cart = CartState::new();
//! cart.load_products(vec![Product::new(1, "Notebook", 60_000, 3)]);
//!
//! // Requests above stock are clamped
//! cart.set_quantity(1, 5);
//! assert_eq!(cart.quantity(1), Some(3));
//!
//! // 1800.00 falls in the 15% tier
//! let breakdown = cart.breakdown();
//! assert_eq!(breakdown.discount_percent, 15);
//! assert_eq!(breakdown.total.cents(), 153_000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod coupon;
pub mod error;
pub mod money;
pub mod pricing;
pub mod query;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{CartLine, CartState};
pub use coupon::{CouponOutcome, CouponState};
pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use pricing::PriceBreakdown;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// The one coupon code the cart recognizes. Matching is case-sensitive.
pub const COUPON_CODE: &str = "New";

/// Additional discount granted while the coupon is applied, in percent.
pub const COUPON_DISCOUNT_PERCENT: u32 = 5;
