//! # Domain Types
//!
//! Core domain types used throughout Grocery Hub.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  CatalogEntry   │   │    CartLine     │   │  OrderSummary   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name           │──►│  item_name      │   │  subtotal       │       │
//! │  │  unit_price     │   │  unit_price     │   │  tax_rate       │       │
//! │  │  category       │   │  quantity (≥1)  │   │  tax            │       │
//! │  └─────────────────┘   │  category       │   │  total          │       │
//! │                        └─────────────────┘   │  generated_at   │       │
//! │  ┌─────────────────┐                         └─────────────────┘       │
//! │  │    TaxRate      │                                                    │
//! │  │  bps (u32)      │   CatalogEntry is read-only reference data,       │
//! │  │  800 = 8%       │   CartLine is session state, OrderSummary is       │
//! │  └─────────────────┘   derived on demand and never stored.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 800 bps = 8% (the storefront's sales tax)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for config values like `8.25`).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        crate::DEFAULT_TAX_RATE
    }
}

/// Percentage label without trailing zeros: `8%`, `8.5%`, `8.25%`.
impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 100;
        let frac = self.0 % 100;
        if frac == 0 {
            write!(f, "{}%", whole)
        } else if frac % 10 == 0 {
            write!(f, "{}.{}%", whole, frac / 10)
        } else {
            write!(f, "{}.{:02}%", whole, frac)
        }
    }
}

// =============================================================================
// Catalog Entry
// =============================================================================

/// A product on the shelf.
///
/// Names are unique within a category only; always look an entry up by
/// `(category, name)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CatalogEntry {
    /// Display name, e.g. "Apples (1kg)".
    pub name: String,

    /// Shelf price.
    pub unit_price: Money,

    /// Category heading, e.g. "🍎 Fruits".
    pub category: String,
}

// =============================================================================
// Cart Line
// =============================================================================

/// One distinct item in the cart with its quantity.
///
/// ## Snapshot Pattern
/// Price and category are copied from the catalog (or the custom item
/// form) when the line is created. Later adds of the same name only bump
/// the quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    /// Display name; the cart's key.
    pub item_name: String,

    /// Unit price frozen at first add.
    pub unit_price: Money,

    /// Always at least one; a line dropping to zero is removed instead.
    #[ts(type = "number")]
    pub quantity: NonZeroU32,

    /// Category heading used for grouping the order message.
    pub category: String,
}

impl CartLine {
    /// Creates a line with quantity 1.
    pub fn new(item_name: impl Into<String>, unit_price: Money, category: impl Into<String>) -> Self {
        CartLine {
            item_name: item_name.into(),
            unit_price,
            quantity: NonZeroU32::MIN,
            category: category.into(),
        }
    }

    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity.get())
    }
}

// =============================================================================
// Order Summary
// =============================================================================

/// Totals derived from the current cart. Computed on demand, never stored.
///
/// ## Rounding
/// The subtotal is an exact number of cents, so rounding only the tax and
/// adding it back gives the same total as rounding `subtotal + exact tax`.
/// The three printed figures always add up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderSummary {
    pub subtotal: Money,
    pub tax_rate: TaxRate,
    pub tax: Money,
    pub total: Money,
    #[ts(as = "String")]
    pub generated_at: DateTime<FixedOffset>,
}

impl OrderSummary {
    /// Computes tax and total for a subtotal.
    pub fn compute(subtotal: Money, tax_rate: TaxRate, generated_at: DateTime<FixedOffset>) -> Self {
        let tax = subtotal.calculate_tax(tax_rate);
        OrderSummary {
            subtotal,
            tax_rate,
            tax,
            total: subtotal + tax,
            generated_at,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
