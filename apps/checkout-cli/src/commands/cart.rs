//! # Cart Commands
//!
//! Quantity changes and persistence.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌──────────┐   set/add/remove   ┌──────────┐      save      ┌───────┐ │
//! │  │  Empty   │──────────────────►│ In Cart  │──────────────►│ Saved │ │
//! │  │  Cart    │◄──────────────────│          │               │       │ │
//! │  └──────────┘       clear        └──────────┘               └───────┘ │
//! │                                                                 │      │
//! │                 forget ◄────────────────────────────────────────┘      │
//! │                 (deletes the saved snapshot only)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use checkout_engine::{CartEngine, CatalogLoader};
use checkout_store::KeyValueStore;
use tracing::debug;

use crate::error::ApiError;
use crate::state::CheckoutConfig;

use super::catalog::render_table;

/// Shows only the products with a non-zero quantity.
pub fn show<L, S>(engine: &CartEngine<L, S>, config: &CheckoutConfig) -> String
where
    L: CatalogLoader,
    S: KeyValueStore,
{
    let in_cart: Vec<_> = engine
        .lines()
        .iter()
        .filter(|line| line.quantity() > 0)
        .collect();

    if in_cart.is_empty() {
        return "Cart is empty.".to_string();
    }

    format!(
        "{}\nSubtotal: {}",
        render_table(&in_cart, config),
        config.format_money(engine.subtotal())
    )
}

fn quantity_changed<L, S>(
    engine: &CartEngine<L, S>,
    config: &CheckoutConfig,
    product_id: i64,
    requested: i64,
    stored: u32,
) -> String
where
    L: CatalogLoader,
    S: KeyValueStore,
{
    let name = engine
        .state()
        .line(product_id)
        .map(|line| line.product().name.as_str())
        .unwrap_or_default();

    let mut out = format!("{}: quantity {}", name, stored);
    if i64::from(stored) != requested {
        let limit = if requested < 0 { "0" } else { "available stock" };
        out.push_str(&format!(" (limited to {})", limit));
    }
    out.push_str(&format!(". Subtotal {}", config.format_money(engine.subtotal())));
    out
}

pub fn set<L, S>(
    engine: &mut CartEngine<L, S>,
    config: &CheckoutConfig,
    product_id: i64,
    quantity: i64,
) -> Result<String, ApiError>
where
    L: CatalogLoader,
    S: KeyValueStore,
{
    debug!(product_id, quantity, "set command");
    let stored = engine
        .set_quantity(product_id, quantity)
        .ok_or_else(|| ApiError::not_found("Product", product_id))?;
    Ok(quantity_changed(engine, config, product_id, quantity, stored))
}

pub fn add<L, S>(
    engine: &mut CartEngine<L, S>,
    config: &CheckoutConfig,
    product_id: i64,
) -> Result<String, ApiError>
where
    L: CatalogLoader,
    S: KeyValueStore,
{
    let before = engine
        .quantity(product_id)
        .ok_or_else(|| ApiError::not_found("Product", product_id))?;
    let stored = engine.increment_quantity(product_id).unwrap_or(before);
    Ok(quantity_changed(engine, config, product_id, i64::from(before) + 1, stored))
}

pub fn remove<L, S>(
    engine: &mut CartEngine<L, S>,
    config: &CheckoutConfig,
    product_id: i64,
) -> Result<String, ApiError>
where
    L: CatalogLoader,
    S: KeyValueStore,
{
    let before = engine
        .quantity(product_id)
        .ok_or_else(|| ApiError::not_found("Product", product_id))?;
    let stored = engine.decrement_quantity(product_id).unwrap_or(before);
    Ok(quantity_changed(engine, config, product_id, i64::from(before) - 1, stored))
}

pub fn clear<L, S>(engine: &mut CartEngine<L, S>) -> String
where
    L: CatalogLoader,
    S: KeyValueStore,
{
    engine.clear_cart();
    "Cart cleared. The saved cart is unchanged; use 'forget' to delete it.".to_string()
}

pub fn save<L, S>(engine: &mut CartEngine<L, S>) -> Result<String, ApiError>
where
    L: CatalogLoader,
    S: KeyValueStore,
{
    let bytes = engine.save_cart()?;
    Ok(format!("Cart saved ({} bytes).", bytes))
}

pub fn forget<L, S>(engine: &mut CartEngine<L, S>) -> Result<String, ApiError>
where
    L: CatalogLoader,
    S: KeyValueStore,
{
    engine.forget_saved_cart()?;
    Ok("Saved cart deleted.".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{config, engine};
    use crate::error::ErrorCode;
    use checkout_store::CART_STORAGE_KEY;

    #[tokio::test]
    async fn test_set_reports_clamping() {
        let mut engine = engine().await;
        let config = config();

        let out = set(&mut engine, &config, 1, 9).unwrap();
        assert_eq!(
            out,
            "Notebook: quantity 3 (limited to available stock). Subtotal ₹1800.00"
        );

        let out = set(&mut engine, &config, 1, -2).unwrap();
        assert_eq!(out, "Notebook: quantity 0 (limited to 0). Subtotal ₹0.00");
    }

    #[tokio::test]
    async fn test_add_and_remove() {
        let mut engine = engine().await;
        let config = config();

        assert_eq!(
            add(&mut engine, &config, 2).unwrap(),
            "Desk Lamp: quantity 1. Subtotal ₹450.00"
        );
        assert_eq!(
            add(&mut engine, &config, 3).unwrap(),
            "Pencil: quantity 0 (limited to available stock). Subtotal ₹450.00"
        );
        assert_eq!(
            remove(&mut engine, &config, 2).unwrap(),
            "Desk Lamp: quantity 0. Subtotal ₹0.00"
        );
        assert_eq!(
            remove(&mut engine, &config, 2).unwrap(),
            "Desk Lamp: quantity 0 (limited to 0). Subtotal ₹0.00"
        );
    }

    #[tokio::test]
    async fn test_unknown_product_is_not_found() {
        let mut engine = engine().await;
        let config = config();

        for err in [
            set(&mut engine, &config, 42, 1).unwrap_err(),
            add(&mut engine, &config, 42).unwrap_err(),
            remove(&mut engine, &config, 42).unwrap_err(),
        ] {
            assert_eq!(err.code, ErrorCode::NotFound);
        }
    }

    #[tokio::test]
    async fn test_show_lists_only_cart_lines() {
        let mut engine = engine().await;
        let config = config();
        assert_eq!(show(&engine, &config), "Cart is empty.");

        engine.set_quantity(2, 2);
        let out = show(&engine, &config);
        assert!(out.contains("Desk Lamp"));
        assert!(!out.contains("Notebook"));
        assert!(out.ends_with("Subtotal: ₹900.00"));
    }

    #[tokio::test]
    async fn test_save_clear_forget() {
        let mut engine = engine().await;
        engine.set_quantity(1, 1);

        assert!(save(&mut engine).unwrap().starts_with("Cart saved ("));
        clear(&mut engine);
        assert_eq!(engine.quantity(1), Some(0));
        assert!(engine.store().get(CART_STORAGE_KEY).unwrap().is_some());

        forget(&mut engine).unwrap();
        assert!(engine.store().get(CART_STORAGE_KEY).unwrap().is_none());
    }
}
