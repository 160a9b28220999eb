//! # Coupon & Totals Commands
//!
//! ## Totals Panel
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Session started             2026-10-19 09:41:07 UTC                   │
//! │  Items                       2 products, 4 units                       │
//! │  Subtotal                    ₹2500.00                                  │
//! │  Discount (20%)              -₹500.00                                  │
//! │  Coupon (5%)                 -₹125.00                                  │
//! │  ─────────────────────────────────────                                 │
//! │  TOTAL                       ₹1875.00                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt::Write;

use checkout_core::CouponOutcome;
use checkout_engine::{CartEngine, CatalogLoader};
use checkout_store::KeyValueStore;

use crate::state::CheckoutConfig;

/// Applies `code` and reports the outcome with the new totals.
///
/// An unrecognised code is a normal outcome, not an error.
pub fn apply<L, S>(engine: &mut CartEngine<L, S>, config: &CheckoutConfig, code: &str) -> String
where
    L: CatalogLoader,
    S: KeyValueStore,
{
    let outcome = engine.apply_coupon(code);
    match outcome {
        CouponOutcome::Applied => format!("{}\n\n{}", outcome, totals(engine, config)),
        CouponOutcome::AlreadyApplied | CouponOutcome::Invalid => outcome.to_string(),
    }
}

pub fn totals<L, S>(engine: &CartEngine<L, S>, config: &CheckoutConfig) -> String
where
    L: CatalogLoader,
    S: KeyValueStore,
{
    let breakdown = engine.breakdown();
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{:<28} {}",
        "Session started",
        engine.state().created_at().format("%Y-%m-%d %H:%M:%S UTC")
    );
    let _ = writeln!(
        out,
        "{:<28} {} products, {} units",
        "Items", breakdown.item_count, breakdown.total_quantity
    );
    let _ = writeln!(out, "{:<28} {}", "Subtotal", config.format_money(breakdown.subtotal));

    if breakdown.discount_percent > 0 {
        let _ = writeln!(
            out,
            "{:<28} -{}",
            format!("Discount ({}%)", breakdown.discount_percent),
            config.format_money(breakdown.discount_amount)
        );
    }

    if breakdown.additional_discount_percent > 0 {
        let _ = writeln!(
            out,
            "{:<28} -{}",
            format!("Coupon ({}%)", breakdown.additional_discount_percent),
            config.format_money(breakdown.additional_discount_amount)
        );
    }

    let _ = writeln!(out, "{}", "─".repeat(37));
    let _ = write!(out, "{:<28} {}", "TOTAL", config.format_money(breakdown.total));

    out
}
