//! # Search & Sort
//!
//! Builds the visible product list from the cart lines.
//!
//! ## Matching Rules
//! - Name: case-insensitive substring
//! - Id: substring of the decimal id (`"1"` matches 1, 10, 21, ...)
//! - An empty query matches everything
//!
//! ## Ordering
//! Price and id compare numerically, name compares lexicographically.
//! The sort is stable, so products with equal keys keep catalog order in
//! both directions.

use std::cmp::Ordering;

use crate::cart::CartLine;
use crate::types::{Product, SortDirection, SortField};

/// Whether `product` matches the search `query`.
pub fn matches_query(product: &Product, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    product.id.to_string().contains(query)
        || product.name.to_lowercase().contains(&query.to_lowercase())
}

/// Compares two products by `field`, ascending.
pub fn compare_by(a: &Product, b: &Product, field: SortField) -> Ordering {
    match field {
        SortField::Price => a.price_cents.cmp(&b.price_cents),
        SortField::Name => a.name.cmp(&b.name),
        SortField::Id => a.id.cmp(&b.id),
    }
}

/// Filters `lines` by `query`, then orders them by `field` / `direction`.
pub fn visible_lines<'a>(
    lines: &'a [CartLine],
    query: &str,
    field: SortField,
    direction: SortDirection,
) -> Vec<&'a CartLine> {
    let mut visible: Vec<&CartLine> = lines
        .iter()
        .filter(|line| matches_query(line.product(), query))
        .collect();

    visible.sort_by(|a, b| {
        let ordering = compare_by(a.product(), b.product(), field);
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });

    visible
}

// =============================================================================
// Unit Tests
// =============================================================================
