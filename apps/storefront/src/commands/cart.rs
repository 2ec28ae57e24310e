//! # Cart Commands
//!
//! Cart manipulation for one session.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Preview/ │────►│ Checked  │       │
//! │  │  Cart    │     │          │     │  Share   │     │   Out    │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                                  │             │
//! │                   add_catalog_item                   checkout          │
//! │                   add_custom_item                   (order.rs)         │
//! │                   update_quantity                         │             │
//! │                   remove_from_cart                        │             │
//! │                        │                                  │             │
//! │                        ▼                                  ▼             │
//! │                   clear_cart ──────────────────────► (back to empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every mutating command goes through `Session::with_cart_mut`, which is
//! what tells the console to redraw the cart status.

use serde::Serialize;
use tracing::debug;

use grocery_core::validation::{validate_custom_price, validate_item_name, validate_quantity_input};
use grocery_core::{Cart, CartLine, Catalog, ItemCode, Money, TaxRate, CUSTOM_ITEMS_CATEGORY};

use crate::error::{AppError, AppResult};
use crate::state::{LineRef, Session};

/// Running totals shown under the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub line_count: usize,
    pub total_units: u64,
    pub subtotal: Money,
    pub tax_rate: TaxRate,
    pub tax: Money,
    pub total: Money,
}

impl CartTotals {
    pub fn new(cart: &Cart, tax_rate: TaxRate) -> Self {
        let subtotal = cart.subtotal();
        let tax = subtotal.calculate_tax(tax_rate);
        CartTotals {
            line_count: cart.line_count(),
            total_units: cart.total_units(),
            subtotal,
            tax_rate,
            tax,
            total: subtotal + tax,
        }
    }
}

/// Cart response including lines and totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
}

impl CartResponse {
    pub fn new(cart: &Cart, tax_rate: TaxRate) -> Self {
        CartResponse {
            lines: cart.lines().to_vec(),
            totals: CartTotals::new(cart, tax_rate),
        }
    }
}

/// The line a command touched, after the change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineChange {
    pub item_name: String,
    /// 0 once the line is gone.
    pub quantity: u32,
}

/// Gets the current cart contents.
pub fn get_cart(session: &Session, tax_rate: TaxRate) -> CartResponse {
    debug!(session_id = %session.id(), "get_cart command");
    session.with_cart(|c| CartResponse::new(c, tax_rate))
}

/// Adds one unit of a catalog item, picked by its browse code.
///
/// ## Behavior
/// - Already in cart: quantity goes up by one
/// - Not in cart: new line at the catalog price
///
/// ## Errors
/// `NOT_FOUND` if the code is outside the catalog.
pub fn add_catalog_item(
    catalog: &Catalog,
    session: &mut Session,
    code: ItemCode,
) -> AppResult<LineChange> {
    debug!(session_id = %session.id(), %code, "add_catalog_item command");

    let entry = catalog.entry_at(code)?;
    session.with_cart_mut(|c| c.add_entry(&entry));

    Ok(LineChange {
        quantity: session.cart().quantity_of(&entry.name),
        item_name: entry.name,
    })
}

/// Adds one unit of an item typed in by the customer.
///
/// The line goes under the custom items category. A name that is already
/// in the cart bumps that line and keeps its existing price.
///
/// ## Errors
/// `VALIDATION_ERROR` for a blank or over-long name, or a price that is not
/// a positive amount up to `MAX_CUSTOM_PRICE`.
pub fn add_custom_item(session: &mut Session, name: &str, price: &str) -> AppResult<LineChange> {
    debug!(session_id = %session.id(), item = %name, price = %price, "add_custom_item command");

    validate_item_name(name)?;
    let unit_price = validate_custom_price(price)?;

    session.with_cart_mut(|c| c.add_item(name, unit_price, CUSTOM_ITEMS_CATEGORY));

    Ok(LineChange {
        item_name: name.to_string(),
        quantity: session.cart().quantity_of(name),
    })
}

/// Sets the quantity of a cart line. 0 removes it.
///
/// ## Errors
/// - `VALIDATION_ERROR` for a quantity outside 0..=999
/// - `NOT_FOUND` if the line reference matches nothing
pub fn update_quantity(session: &mut Session, line: &LineRef, quantity: i64) -> AppResult<LineChange> {
    debug!(session_id = %session.id(), %line, quantity, "update_quantity command");

    validate_quantity_input(quantity)?;
    let name = resolve_name(session, line)?;

    session.with_cart_mut(|c| c.set_quantity(&name, quantity));

    Ok(LineChange {
        quantity: session.cart().quantity_of(&name),
        item_name: name,
    })
}

/// Removes a cart line.
///
/// ## Errors
/// `NOT_FOUND` if the line reference matches nothing.
pub fn remove_from_cart(session: &mut Session, line: &LineRef) -> AppResult<LineChange> {
    debug!(session_id = %session.id(), %line, "remove_from_cart command");

    let name = resolve_name(session, line)?;
    session.with_cart_mut(|c| c.remove_item(&name));

    Ok(LineChange {
        item_name: name,
        quantity: 0,
    })
}

/// Empties the cart.
///
/// ## Returns
/// Whether there was anything to remove.
pub fn clear_cart(session: &mut Session) -> bool {
    debug!(session_id = %session.id(), "clear_cart command");
    session.with_cart_mut(Cart::clear)
}

fn resolve_name(session: &Session, line: &LineRef) -> AppResult<String> {
    session
        .resolve_line(line)
        .map(|l| l.item_name.clone())
        .ok_or_else(|| AppError::not_found("Cart line", &line.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn code(s: &str) -> ItemCode {
        s.parse().unwrap()
    }

    #[test]
    fn test_add_catalog_item_twice() {
        let catalog = Catalog::builtin();
        let mut session = Session::new();

        let first = add_catalog_item(&catalog, &mut session, code("3.1")).unwrap();
        assert_eq!(first.item_name, "Apples (1kg)");
        assert_eq!(first.quantity, 1);

        let second = add_catalog_item(&catalog, &mut session, code("3.1")).unwrap();
        assert_eq!(second.quantity, 2);
        assert_eq!(session.cart().line_count(), 1);
        assert!(session.take_render_request());
    }

    #[test]
    fn test_add_unknown_code() {
        let catalog = Catalog::builtin();
        let mut session = Session::new();

        let err = add_catalog_item(&catalog, &mut session, code("99.1")).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(session.cart().is_empty());
        assert!(!session.take_render_request());
    }

    #[test]
    fn test_add_custom_item() {
        let mut session = Session::new();

        let change = add_custom_item(&mut session, "Fresh Basil", "2.50").unwrap();
        assert_eq!(change.quantity, 1);

        let line = session.cart().line("Fresh Basil").unwrap();
        assert_eq!(line.unit_price, Money::from_cents(250));
        assert_eq!(line.category, CUSTOM_ITEMS_CATEGORY);
    }

    #[test]
    fn test_add_custom_item_validation() {
        let mut session = Session::new();

        let err = add_custom_item(&mut session, "  ", "2.50").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = add_custom_item(&mut session, "Fresh Basil", "0").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = add_custom_item(&mut session, "Fresh Basil", "cheap").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = add_custom_item(&mut session, "Big", "92233720368547758").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "price must not exceed $1000000.00");

        assert!(session.cart().is_empty());
    }

    #[test]
    fn test_custom_item_with_catalog_name_keeps_catalog_price() {
        let catalog = Catalog::builtin();
        let mut session = Session::new();
        add_catalog_item(&catalog, &mut session, code("3.1")).unwrap();

        let change = add_custom_item(&mut session, "Apples (1kg)", "1.00").unwrap();
        assert_eq!(change.quantity, 2);

        let line = session.cart().line("Apples (1kg)").unwrap();
        assert_eq!(line.unit_price, Money::from_cents(399));
        assert_eq!(line.category, "🍎 Fruits");
    }

    #[test]
    fn test_update_quantity_by_position_and_name() {
        let catalog = Catalog::builtin();
        let mut session = Session::new();
        add_catalog_item(&catalog, &mut session, code("3.1")).unwrap();
        add_custom_item(&mut session, "Fresh Basil", "2.50").unwrap();

        let change = update_quantity(&mut session, &LineRef::Position(1), 5).unwrap();
        assert_eq!(change.item_name, "Apples (1kg)");
        assert_eq!(change.quantity, 5);

        let change =
            update_quantity(&mut session, &LineRef::Name("Fresh Basil".to_string()), 0).unwrap();
        assert_eq!(change.quantity, 0);
        assert_eq!(session.cart().line_count(), 1);
    }

    #[test]
    fn test_update_quantity_errors() {
        let mut session = Session::new();
        add_custom_item(&mut session, "Fresh Basil", "2.50").unwrap();
        session.take_render_request();

        let err = update_quantity(&mut session, &LineRef::Position(1), 1000).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = update_quantity(&mut session, &LineRef::Position(1), -1).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = update_quantity(&mut session, &LineRef::Position(2), 3).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Cart line not found: #2");

        assert_eq!(session.cart().quantity_of("Fresh Basil"), 1);
        assert!(!session.take_render_request());
    }

    #[test]
    fn test_same_quantity_is_not_a_change() {
        let mut session = Session::new();
        add_custom_item(&mut session, "Fresh Basil", "2.50").unwrap();
        session.take_render_request();

        update_quantity(&mut session, &LineRef::Position(1), 1).unwrap();
        assert!(!session.take_render_request());
    }

    #[test]
    fn test_remove_from_cart() {
        let mut session = Session::new();
        add_custom_item(&mut session, "Fresh Basil", "2.50").unwrap();

        let change = remove_from_cart(&mut session, &LineRef::Position(1)).unwrap();
        assert_eq!(change.item_name, "Fresh Basil");
        assert!(session.cart().is_empty());

        let err = remove_from_cart(&mut session, &LineRef::Position(1)).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_clear_cart() {
        let mut session = Session::new();
        assert!(!clear_cart(&mut session));

        add_custom_item(&mut session, "Fresh Basil", "2.50").unwrap();
        assert!(clear_cart(&mut session));
        assert!(session.cart().is_empty());
    }

    #[test]
    fn test_get_cart_totals() {
        let catalog = Catalog::builtin();
        let mut session = Session::new();
        add_catalog_item(&catalog, &mut session, code("3.1")).unwrap();
        add_catalog_item(&catalog, &mut session, code("3.1")).unwrap();

        let cart = get_cart(&session, TaxRate::from_bps(800));
        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.totals.line_count, 1);
        assert_eq!(cart.totals.total_units, 2);
        assert_eq!(cart.totals.subtotal, Money::from_cents(798));
        assert_eq!(cart.totals.tax, Money::from_cents(64));
        assert_eq!(cart.totals.total, Money::from_cents(862));
    }

    #[test]
    fn test_get_empty_cart() {
        let cart = get_cart(&Session::new(), TaxRate::from_bps(800));
        assert!(cart.lines.is_empty());
        assert_eq!(cart.totals.total, Money::zero());
    }

    #[test]
    fn test_totals_saturate_for_huge_lines() {
        let mut session = Session::new();
        session.with_cart_mut(|c| c.add_item("Big", Money::from_cents(i64::MAX), CUSTOM_ITEMS_CATEGORY));
        update_quantity(&mut session, &LineRef::Position(1), 2).unwrap();

        let response = get_cart(&session, TaxRate::from_bps(800));
        assert_eq!(response.lines[0].line_total().cents(), i64::MAX);
        assert_eq!(response.totals.subtotal.cents(), i64::MAX);
        assert_eq!(response.totals.total.cents(), i64::MAX);
    }
}
