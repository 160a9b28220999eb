//! # Domain Types
//!
//! Core domain types used throughout the checkout cart.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   SortField     │   │  SortDirection  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  Price          │   │  Asc            │       │
//! │  │  name           │   │  Name           │   │  Desc           │       │
//! │  │  price_cents    │   │  Id             │   └─────────────────┘       │
//! │  │  available_count│   └─────────────────┘                             │
//! │  └─────────────────┘                                                   │
//! │                        ┌─────────────────┐                              │
//! │                        │   StockLevel    │                              │
//! │                        │  Low ≤ 5        │                              │
//! │                        │  Moderate ≤ 30  │                              │
//! │                        │  High           │                              │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A purchasable product. Immutable once the catalog is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique, stable identifier from the catalog.
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Unit price in cents.
    pub price_cents: i64,

    /// Units in stock; the upper bound for a cart line.
    pub available_count: u32,
}

impl Product {
    pub fn new(id: i64, name: impl Into<String>, price_cents: i64, available_count: u32) -> Self {
        Product {
            id,
            name: name.into(),
            price_cents,
            available_count,
        }
    }

    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Stock badge shown next to the product.
    pub fn stock_level(&self) -> StockLevel {
        StockLevel::from_count(self.available_count)
    }
}

// =============================================================================
// Stock Level
// =============================================================================

/// Coarse stock indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    /// 5 or fewer units.
    Low,
    /// 6 to 30 units.
    Moderate,
    /// More than 30 units.
    High,
}

impl StockLevel {
    pub const fn from_count(count: u32) -> Self {
        if count <= 5 {
            StockLevel::Low
        } else if count <= 30 {
            StockLevel::Moderate
        } else {
            StockLevel::High
        }
    }
}

impl fmt::Display for StockLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockLevel::Low => write!(f, "Low"),
            StockLevel::Moderate => write!(f, "Moderate"),
            StockLevel::High => write!(f, "High"),
        }
    }
}

// =============================================================================
// Sort Field
// =============================================================================

/// Field the visible product list is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Price,
    Name,
    Id,
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortField::Price => write!(f, "price"),
            SortField::Name => write!(f, "name"),
            SortField::Id => write!(f, "id"),
        }
    }
}

impl FromStr for SortField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "price" => Ok(SortField::Price),
            "name" => Ok(SortField::Name),
            "id" => Ok(SortField::Id),
            _ => Err(ValidationError::NotAllowed {
                field: "sort field".to_string(),
                allowed: vec!["price".into(), "name".into(), "id".into()],
            }),
        }
    }
}

// =============================================================================
// Sort Direction
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

impl FromStr for SortDirection {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            _ => Err(ValidationError::NotAllowed {
                field: "sort direction".to_string(),
                allowed: vec!["asc".into(), "desc".into()],
            }),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
