//! # Catalog Commands
//!
//! Listing, filtering and ordering the product table, plus reloading the
//! catalog.
//!
//! ## Product Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │    ID  Name                        Price   Stock          Qty  Line     │
//! │     3  Pencil                     ₹25.00   0 (Low)          0  ₹0.00    │
//! │     2  Desk Lamp                 ₹450.00   10 (Moderate)    1  ₹450.00  │
//! │     1  Notebook                  ₹600.00   3 (Low)          0  ₹0.00    │
//! │                                                                         │
//! │  Sorted by price asc, filter: none                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt::Write;

use checkout_core::{CartLine, SortDirection, SortField};
use checkout_engine::{CartEngine, CatalogLoader, InitReport};
use checkout_store::KeyValueStore;
use tracing::debug;

use crate::error::ApiError;
use crate::state::CheckoutConfig;

/// Renders `lines` as a fixed-width table.
pub fn render_table(lines: &[&CartLine], config: &CheckoutConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>6}  {:<28} {:>12}  {:<14} {:>4}  {:>12}",
        "ID", "Name", "Price", "Stock", "Qty", "Line"
    );

    for line in lines {
        let product = line.product();
        let stock = format!("{} ({})", product.available_count, product.stock_level());
        let _ = writeln!(
            out,
            "{:>6}  {:<28} {:>12}  {:<14} {:>4}  {:>12}",
            product.id,
            truncate(&product.name, 28),
            config.format_money(product.price()),
            stock,
            line.quantity(),
            config.format_money(line.line_total()),
        );
    }

    out
}

fn truncate(name: &str, width: usize) -> String {
    if name.chars().count() <= width {
        name.to_string()
    } else {
        let mut short: String = name.chars().take(width - 1).collect();
        short.push('…');
        short
    }
}

pub fn list<L, S>(engine: &CartEngine<L, S>, config: &CheckoutConfig) -> String
where
    L: CatalogLoader,
    S: KeyValueStore,
{
    if engine.lines().is_empty() {
        return match engine.last_error() {
            Some(err) => format!("No products available ({}). Try 'reload'.", err),
            None => "No products available.".to_string(),
        };
    }

    let visible = engine.visible_products();
    let state = engine.state();

    let mut out = if visible.is_empty() {
        format!("No products match '{}'.\n", state.search_query())
    } else {
        render_table(&visible, config)
    };

    let filter = if state.search_query().is_empty() {
        "none".to_string()
    } else {
        format!("'{}'", state.search_query())
    };
    let _ = write!(
        out,
        "\nSorted by {} {}, filter: {} ({} of {} shown)",
        state.sort_field(),
        state.sort_direction(),
        filter,
        visible.len(),
        engine.lines().len()
    );

    out
}

pub fn search<L, S>(engine: &mut CartEngine<L, S>, config: &CheckoutConfig, query: String) -> String
where
    L: CatalogLoader,
    S: KeyValueStore,
{
    debug!(query = %query, "search command");
    engine.set_search_query(query);
    list(engine, config)
}

/// Changes the sort field, and the direction when one is given.
pub fn sort<L, S>(
    engine: &mut CartEngine<L, S>,
    config: &CheckoutConfig,
    field: SortField,
    direction: Option<SortDirection>,
) -> String
where
    L: CatalogLoader,
    S: KeyValueStore,
{
    debug!(%field, ?direction, "sort command");
    engine.set_sort_field(field);
    if let Some(direction) = direction {
        engine.set_sort_direction(direction);
    }
    list(engine, config)
}

/// Starts a fresh session from the catalog source.
pub async fn reload<L, S>(engine: &mut CartEngine<L, S>) -> Result<String, ApiError>
where
    L: CatalogLoader,
    S: KeyValueStore,
{
    let report = engine.initialize().await?;
    Ok(describe_report(&report))
}

/// One-line summary of a finished `initialize()`.
pub fn describe_report(report: &InitReport) -> String {
    let mut out = format!("Loaded {} products.", report.product_count);
    if report.restored_lines > 0 {
        let _ = write!(out, " Restored saved cart ({} lines).", report.restored_lines);
    }
    if report.ignored_malformed_snapshot {
        out.push_str(" The saved cart was unreadable and has been ignored.");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{config, engine};

    fn ids_in(output: &str) -> Vec<i64> {
        output
            .lines()
            .skip(1)
            .filter_map(|line| line.split_whitespace().next()?.parse().ok())
            .collect()
    }

    #[tokio::test]
    async fn test_list_default_order() {
        let engine = engine().await;
        let out = list(&engine, &config());

        assert_eq!(ids_in(&out), vec![3, 2, 1]);
        assert!(out.contains("Sorted by price asc, filter: none (3 of 3 shown)"));
        assert!(out.contains("₹600.00"));
        assert!(out.contains("10 (Moderate)"));
    }

    #[tokio::test]
    async fn test_search_and_sort() {
        let mut engine = engine().await;
        let config = config();

        let out = search(&mut engine, &config, "e".into());
        // "Desk Lamp", "Notebook", "Pencil" all contain an "e"
        assert_eq!(ids_in(&out), vec![3, 2, 1]);

        let out = sort(&mut engine, &config, SortField::Name, Some(SortDirection::Desc));
        assert_eq!(ids_in(&out), vec![3, 1, 2]);

        let out = search(&mut engine, &config, "lamp".into());
        assert_eq!(ids_in(&out), vec![2]);

        let out = search(&mut engine, &config, "zzz".into());
        assert!(out.starts_with("No products match 'zzz'."));
    }

    #[tokio::test]
    async fn test_reload_restores_saved_cart() {
        let mut engine = engine().await;
        engine.set_quantity(2, 4);
        engine.save_cart().unwrap();
        engine.set_quantity(2, 0);

        let out = reload(&mut engine).await.unwrap();

        assert_eq!(out, "Loaded 3 products. Restored saved cart (3 lines).");
        assert_eq!(engine.quantity(2), Some(4));
    }

    #[test]
    fn test_describe_malformed_snapshot() {
        let report = InitReport {
            product_count: 2,
            restored_lines: 0,
            ignored_malformed_snapshot: true,
        };
        assert_eq!(
            describe_report(&report),
            "Loaded 2 products. The saved cart was unreadable and has been ignored."
        );
    }

    #[test]
    fn test_truncate_long_names() {
        assert_eq!(truncate("Pen", 5), "Pen");
        assert_eq!(truncate("Fountain Pen", 5), "Foun…");
    }
}
