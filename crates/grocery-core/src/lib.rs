//! # grocery-core: Pure Storefront Logic for Grocery Hub
//!
//! This crate is the engine behind the storefront. It contains all cart
//! and order logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Grocery Hub Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Storefront shell (apps/storefront)              │   │
//! │  │    Browse ──► Add to cart ──► Cart view ──► Preview / Share     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ one Session owns one Cart              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ grocery-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │   cart    │  │  summary  │  │ validation│  │   │
//! │  │   │  Catalog  │  │   Cart    │  │ Formatter │  │   input   │  │   │
//! │  │   │  listing  │  │ CartLine  │  │  message  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │        money (integer cents) · types (TaxRate, OrderSummary)    │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO GLOBAL STATE • PURE FUNCTIONS          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - Product reference data, browse listing
//! - [`cart`] - Cart engine (add, remove, set quantity, totals)
//! - [`summary`] - Order message formatter
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`types`] - Domain types (TaxRate, CatalogEntry, CartLine, OrderSummary)
//! - [`validation`] - Input validation for the presentation layer
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::{FixedOffset, TimeZone};
//! use grocery_core::{format_summary, Cart, Catalog, TaxRate};
//!
//! let catalog = Catalog::builtin();
//! let mut cart = Cart::new();
//!
//! let apples = catalog.entry("🍎 Fruits", "Apples (1kg)").unwrap();
//! cart.add_entry(&apples);
//! cart.add_entry(&apples);
//!
//! let at = FixedOffset::east_opt(0).unwrap()
//!     .with_ymd_and_hms(2026, 10, 17, 9, 30, 0).unwrap();
//! let message = format_summary(&cart, TaxRate::from_bps(800), at);
//!
//! assert!(message.contains("*TOTAL:* $8.62"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod summary;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CategoryGroup};
pub use catalog::{Catalog, CatalogQuery, CategoryListing, ItemCode, ListedItem};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use summary::{format_summary, OrderFormatter, EMPTY_CART_MESSAGE};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Sales tax applied to every order: 8%.
pub const DEFAULT_TAX_RATE: TaxRate = TaxRate::from_bps(800);

/// Store name used in the order message header and sign-off.
pub const DEFAULT_STORE_NAME: &str = "Grocery Hub";

/// Category tag for items typed in by the customer.
pub const CUSTOM_ITEMS_CATEGORY: &str = "🛍️ Custom Items";

/// Largest quantity the cart's quantity field accepts.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
/// The engine itself never rejects a quantity; this bounds user input.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Largest price the custom item form accepts ($1,000,000.00).
///
/// ## Business Reason
/// Keeps a mistyped price from reaching the totals. A line at this price
/// times `MAX_ITEM_QUANTITY`, plus tax, stays far inside `i64` cents.
pub const MAX_CUSTOM_PRICE: Money = Money::from_cents(100_000_000);
