//! # Sample Catalog Generator
//!
//! Writes a catalog JSON file that `JsonFileLoader` can read.
//!
//! ## Usage
//! ```bash
//! # 40 products to data/catalog.json (default)
//! cargo run -p checkout-engine --bin seed-catalog
//!
//! # Custom amount and destination
//! cargo run -p checkout-engine --bin seed-catalog -- --count 2000 --out /tmp/big.json
//! ```
//!
//! ## Generated Products
//! Names combine a category item with a size variant. Prices run from
//! ₹49 to roughly ₹1,400 so that small carts cross every discount tier.
//! Stock cycles through 0..=40, so some products are sold out and the
//! Low/Moderate/High stock levels all show up.

use std::env;
use std::path::PathBuf;

use checkout_core::validation::validate_catalog;
use checkout_core::Product;
use checkout_engine::CatalogRecord;

/// Product families for realistic sample data
const CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Stationery",
        &[
            "Notebook",
            "Gel Pen",
            "Pencil Box",
            "Sticky Notes",
            "Highlighter",
            "Stapler",
            "Desk Organizer",
            "Sketchbook",
        ],
    ),
    (
        "Electronics",
        &[
            "Wireless Mouse",
            "USB-C Cable",
            "Power Bank",
            "Bluetooth Speaker",
            "Earphones",
            "Keyboard",
            "Webcam",
            "Memory Card",
        ],
    ),
    (
        "Home",
        &[
            "Desk Lamp",
            "Coffee Mug",
            "Water Bottle",
            "Cushion Cover",
            "Wall Clock",
            "Photo Frame",
            "Scented Candle",
            "Plant Pot",
        ],
    ),
];

/// Size variants and the price they add, in paise
const SIZES: &[(&str, i64)] = &[
    ("", 0),
    ("Mini", 2_000),
    ("Classic", 10_000),
    ("Plus", 25_000),
    ("Pro", 60_000),
];

const DEFAULT_COUNT: usize = 40;
const DEFAULT_OUT: &str = "data/catalog.json";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut count = DEFAULT_COUNT;
    let mut out = PathBuf::from(DEFAULT_OUT);

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(DEFAULT_COUNT);
                    i += 1;
                }
            }
            "--out" | "-o" => {
                if i + 1 < args.len() {
                    out = PathBuf::from(&args[i + 1]);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Checkout sample catalog generator");
                println!();
                println!("Usage: seed-catalog [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>     Number of products to generate (default: {DEFAULT_COUNT})");
                println!("  -o, --out <PATH>    Output file (default: {DEFAULT_OUT})");
                println!("  -h, --help          Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let products = generate_catalog(count);
    validate_catalog(&products)?;

    let records: Vec<CatalogRecord> = products.iter().map(CatalogRecord::from).collect();
    let json = serde_json::to_string_pretty(&records)?;

    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&out, json).await?;

    println!("✓ Wrote {} products to {}", products.len(), out.display());
    Ok(())
}

/// Generates `count` products with sequential ids, cycling through
/// categories and sizes.
fn generate_catalog(count: usize) -> Vec<Product> {
    let combos = CATEGORIES
        .iter()
        .flat_map(|(_, items)| items.iter())
        .flat_map(|item| SIZES.iter().map(move |size| (*item, *size)));

    combos
        .cycle()
        .take(count)
        .enumerate()
        .map(|(index, (item, (size, price_addon)))| generate_product(index, item, size, price_addon))
        .collect()
}

/// Distinct item/size combinations before names start repeating.
fn combo_count() -> usize {
    CATEGORIES.iter().map(|(_, items)| items.len()).sum::<usize>() * SIZES.len()
}

fn generate_product(index: usize, item: &str, size: &str, price_addon: i64) -> Product {
    let id = index as i64 + 1;
    let round = index / combo_count();

    let mut name = if size.is_empty() {
        item.to_string()
    } else {
        format!("{item} {size}")
    };
    if round > 0 {
        name = format!("{name} #{}", round + 1);
    }

    // ₹49.00 - ₹798.00 base, plus the size addon
    let base_price = 4_900 + ((index * 1_733) % 75_000) as i64;
    let price_cents = (base_price + price_addon) / 100 * 100;

    let available_count = ((index * 7) % 41) as u32;

    Product::new(id, name, price_cents, available_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_catalog_is_valid() {
        let products = generate_catalog(500);
        assert_eq!(products.len(), 500);
        assert!(validate_catalog(&products).is_ok());
        assert!(products.iter().any(|p| p.available_count == 0));
    }

    #[test]
    fn test_names_stay_distinct_across_rounds() {
        let products = generate_catalog(combo_count() + 1);
        let last = products.last().unwrap();
        assert_eq!(last.name, "Notebook #2");
    }
}
