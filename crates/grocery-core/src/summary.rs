//! # Order Summary Formatter
//!
//! Turns a cart into the text message the customer previews and shares.
//!
//! ## Message Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  🛒 *GROCERY HUB - Shopping List*                                       │
//! │  ══════════════════════════════                                         │
//! │                                                                         │
//! │  *🥛 Dairy*                       ◄── categories in first-add order     │
//! │    ▪️ Whole Milk (1L) (x2) - $5.98                                      │
//! │                                                                         │
//! │  *🍎 Fruits*                                                            │
//! │    ▪️ Apples (1kg) (x1) - $3.99                                         │
//! │                                                                         │
//! │  ──────────────────────────────                                         │
//! │  *Subtotal:* $9.97                                                      │
//! │  *Tax (8%):* $0.80                                                      │
//! │  *TOTAL:* $10.77                                                        │
//! │  ──────────────────────────────                                         │
//! │                                                                         │
//! │  📅 October 17, 2026 at 09:30 AM                                        │
//! │                                                                         │
//! │  Thank you for shopping with Grocery Hub! 🙏                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `*bold*` markers are the messaging app's markup. The text holds no
//! control characters other than `\n`, so it survives percent-encoding
//! into a share link unchanged.
//!
//! ## Determinism
//! The timestamp is an argument. Same cart + same timestamp = same bytes,
//! which is what lets preview and export share one code path.

use chrono::{DateTime, FixedOffset};
use std::fmt;

use crate::cart::Cart;
use crate::types::{OrderSummary, TaxRate};
use crate::DEFAULT_STORE_NAME;

/// Returned instead of a summary when the cart has no lines.
pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty!";

/// Width of the `═` and `─` rules.
const RULE_WIDTH: usize = 30;

/// Timestamp layout, e.g. "October 17, 2026 at 09:30 AM".
const TIMESTAMP_FORMAT: &str = "%B %d, %Y at %I:%M %p";

/// Formats carts for a given store name and tax rate.
///
/// ## Example
/// ```rust
/// use chrono::{FixedOffset, TimeZone};
/// use grocery_core::{Cart, Money, OrderFormatter, TaxRate};
///
/// let mut cart = Cart::new();
/// cart.add_item("Apples (1kg)", Money::from_cents(399), "🍎 Fruits");
///
/// let at = FixedOffset::east_opt(0).unwrap()
///     .with_ymd_and_hms(2026, 10, 17, 9, 30, 0).unwrap();
/// let text = OrderFormatter::new("Corner Shop", TaxRate::from_bps(800)).format(&cart, at);
///
/// assert!(text.starts_with("🛒 *CORNER SHOP - Shopping List*"));
/// assert!(text.contains("*TOTAL:* $4.31"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderFormatter {
    store_name: String,
    tax_rate: TaxRate,
}

impl OrderFormatter {
    pub fn new(store_name: impl Into<String>, tax_rate: TaxRate) -> Self {
        OrderFormatter {
            store_name: store_name.into(),
            tax_rate,
        }
    }

    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    /// The shareable message for `cart`, or [`EMPTY_CART_MESSAGE`].
    pub fn format(&self, cart: &Cart, generated_at: DateTime<FixedOffset>) -> String {
        if cart.is_empty() {
            return EMPTY_CART_MESSAGE.to_string();
        }

        SummaryText {
            store_name: &self.store_name,
            cart,
            summary: cart.summary(self.tax_rate, generated_at),
        }
        .to_string()
    }
}

impl Default for OrderFormatter {
    fn default() -> Self {
        OrderFormatter::new(DEFAULT_STORE_NAME, TaxRate::default())
    }
}

/// Formats `cart` with the default store name.
///
/// Preview and share both call this; do not build the message elsewhere.
pub fn format_summary(cart: &Cart, tax_rate: TaxRate, generated_at: DateTime<FixedOffset>) -> String {
    OrderFormatter::new(DEFAULT_STORE_NAME, tax_rate).format(cart, generated_at)
}

struct SummaryText<'a> {
    store_name: &'a str,
    cart: &'a Cart,
    summary: OrderSummary,
}

impl fmt::Display for SummaryText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let heavy_rule = "═".repeat(RULE_WIDTH);
        let rule = "─".repeat(RULE_WIDTH);

        writeln!(f, "🛒 *{} - Shopping List*", self.store_name.to_uppercase())?;
        writeln!(f, "{}", heavy_rule)?;
        writeln!(f)?;

        for group in self.cart.groups() {
            writeln!(f, "*{}*", group.category)?;
            for line in group.lines {
                writeln!(
                    f,
                    "  ▪️ {} (x{}) - {}",
                    line.item_name,
                    line.quantity,
                    line.line_total()
                )?;
            }
            writeln!(f)?;
        }

        writeln!(f, "{}", rule)?;
        writeln!(f, "*Subtotal:* {}", self.summary.subtotal)?;
        writeln!(f, "*Tax ({}):* {}", self.summary.tax_rate, self.summary.tax)?;
        writeln!(f, "*TOTAL:* {}", self.summary.total)?;
        writeln!(f, "{}", rule)?;
        writeln!(f)?;
        writeln!(f, "📅 {}", self.summary.generated_at.format(TIMESTAMP_FORMAT))?;
        writeln!(f)?;
        write!(f, "Thank you for shopping with {}! 🙏", self.store_name)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::money::Money;
    use chrono::TimeZone;

    fn at() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2026, 10, 17, 9, 30, 0)
            .unwrap()
    }

    fn rate() -> TaxRate {
        TaxRate::from_bps(800)
    }

    #[test]
    fn test_empty_cart_returns_sentinel() {
        let text = format_summary(&Cart::new(), rate(), at());
        assert_eq!(text, EMPTY_CART_MESSAGE);
        assert!(!text.to_lowercase().contains("total"));
    }

    #[test]
    fn test_full_message_layout() {
        let mut cart = Cart::new();
        cart.add_item("Whole Milk (1L)", Money::from_cents(299), "🥛 Dairy");
        cart.add_item("Whole Milk (1L)", Money::from_cents(299), "🥛 Dairy");
        cart.add_item("Apples (1kg)", Money::from_cents(399), "🍎 Fruits");

        let expected = "🛒 *GROCERY HUB - Shopping List*\n\
            ══════════════════════════════\n\
            \n\
            *🥛 Dairy*\n  \
            ▪️ Whole Milk (1L) (x2) - $5.98\n\
            \n\
            *🍎 Fruits*\n  \
            ▪️ Apples (1kg) (x1) - $3.99\n\
            \n\
            ──────────────────────────────\n\
            *Subtotal:* $9.97\n\
            *Tax (8%):* $0.80\n\
            *TOTAL:* $10.77\n\
            ──────────────────────────────\n\
            \n\
            📅 October 17, 2026 at 09:30 AM\n\
            \n\
            Thank you for shopping with Grocery Hub! 🙏";

        assert_eq!(format_summary(&cart, rate(), at()), expected);
    }

    #[test]
    fn test_apples_totals() {
        let mut cart = Cart::new();
        cart.add_item("Apples (1kg)", Money::from_cents(399), "🍎 Fruits");
        cart.set_quantity("Apples (1kg)", 2);

        let text = format_summary(&cart, rate(), at());
        assert!(text.contains("  ▪️ Apples (1kg) (x2) - $7.98\n"));
        assert!(text.contains("*Subtotal:* $7.98\n"));
        assert!(text.contains("*Tax (8%):* $0.64\n"));
        assert!(text.contains("*TOTAL:* $8.62\n"));
    }

    #[test]
    fn test_headings_follow_first_add_not_catalog_order() {
        let catalog = Catalog::builtin();
        // The catalog lists Dairy first and Fruits third; add Fruits first.
        let mut cart = Cart::new();
        cart.add_entry(&catalog.entry("🍎 Fruits", "Bananas (1kg)").unwrap());
        cart.add_entry(&catalog.entry("🥛 Dairy", "Butter (250g)").unwrap());

        let text = format_summary(&cart, rate(), at());
        let fruits = text.find("*🍎 Fruits*").unwrap();
        let dairy = text.find("*🥛 Dairy*").unwrap();
        assert!(fruits < dairy);

        // And the other way round
        let mut cart = Cart::new();
        cart.add_entry(&catalog.entry("🥛 Dairy", "Butter (250g)").unwrap());
        cart.add_entry(&catalog.entry("🍎 Fruits", "Bananas (1kg)").unwrap());

        let text = format_summary(&cart, rate(), at());
        assert!(text.find("*🥛 Dairy*").unwrap() < text.find("*🍎 Fruits*").unwrap());
    }

    #[test]
    fn test_items_within_category_keep_insertion_order() {
        let mut cart = Cart::new();
        cart.add_item("Onions (1kg)", Money::from_cents(299), "🥕 Vegetables");
        cart.add_item("Earbuds", Money::from_cents(2499), "📱 Electronics");
        cart.add_item("Carrots (1kg)", Money::from_cents(249), "🥕 Vegetables");

        let text = format_summary(&cart, rate(), at());
        let onions = text.find("Onions (1kg)").unwrap();
        let carrots = text.find("Carrots (1kg)").unwrap();
        let earbuds = text.find("Earbuds").unwrap();
        assert!(onions < carrots);
        assert!(carrots < earbuds);
    }

    #[test]
    fn test_format_is_deterministic() {
        let mut cart = Cart::new();
        cart.add_item("Phone Case", Money::from_cents(1499), "📱 Electronics");
        cart.add_item("Custom Flowers", Money::from_cents(1250), crate::CUSTOM_ITEMS_CATEGORY);

        let first = format_summary(&cart, rate(), at());
        let second = format_summary(&cart.clone(), rate(), at());
        assert_eq!(first, second);
    }

    #[test]
    fn test_branding_and_tax_label() {
        let mut cart = Cart::new();
        cart.add_item("Garlic (bulb)", Money::from_cents(99), "🥕 Vegetables");

        let formatter = OrderFormatter::new("Corner Shop", TaxRate::from_bps(825));
        let text = formatter.format(&cart, at());

        assert!(text.starts_with("🛒 *CORNER SHOP - Shopping List*\n"));
        assert!(text.contains("*Tax (8.25%):* $0.08\n"));
        assert!(text.ends_with("Thank you for shopping with Corner Shop! 🙏"));
    }

    #[test]
    fn test_message_has_no_control_characters_besides_newline() {
        let mut cart = Cart::new();
        cart.add_item("Apples (1kg)", Money::from_cents(399), "🍎 Fruits");

        let text = format_summary(&cart, rate(), at());
        assert!(text.chars().all(|c| c == '\n' || !c.is_control()));
    }

    #[test]
    fn test_timestamp_uses_supplied_offset() {
        let mut cart = Cart::new();
        cart.add_item("Apples (1kg)", Money::from_cents(399), "🍎 Fruits");

        let evening = FixedOffset::east_opt(5 * 3600)
            .unwrap()
            .with_ymd_and_hms(2026, 1, 2, 18, 5, 0)
            .unwrap();
        let text = format_summary(&cart, rate(), evening);
        assert!(text.contains("📅 January 02, 2026 at 06:05 PM\n"));
    }

    #[test]
    fn test_huge_prices_saturate_instead_of_panicking() {
        let mut cart = Cart::new();
        cart.add_item("Big", Money::from_cents(i64::MAX), "🛍️ Custom Items");
        cart.set_quantity("Big", 2);
        cart.add_item("Apples (1kg)", Money::from_cents(399), "🍎 Fruits");

        let summary = cart.summary(rate(), at());
        assert_eq!(summary.subtotal.cents(), i64::MAX);
        assert_eq!(summary.total.cents(), i64::MAX);

        let text = format_summary(&cart, rate(), at());
        assert!(text.contains("  ▪️ Big (x2) - $92233720368547758.07\n"));
        assert!(text.contains("*TOTAL:* $92233720368547758.07\n"));
    }
}
