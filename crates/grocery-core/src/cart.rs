//! # Cart Engine
//!
//! The session's shopping cart and everything computed from it.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  User Action              Engine Call              Cart Change          │
//! │  ───────────              ───────────              ───────────          │
//! │                                                                         │
//! │  "Add to Cart" ──────────► add_item() ───────────► push or qty += 1     │
//! │                                                                         │
//! │  Change Quantity ────────► set_quantity() ───────► qty = n (n ≤ 0: rm)  │
//! │                                                                         │
//! │  Click Remove ───────────► remove_item() ────────► line removed         │
//! │                                                                         │
//! │  Clear / Checkout ───────► clear() ──────────────► no lines             │
//! │                                                                         │
//! │  Every mutator returns a dirty flag: `true` means the cart changed      │
//! │  and the caller should re-render. Nothing here can fail.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! A `Cart` is a plain value. Each session owns its own; there is no
//! shared or global cart, so no locking is involved.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

use crate::money::Money;
use crate::types::{CartLine, CatalogEntry, OrderSummary, TaxRate};

/// Lines of one category, in cart insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup<'a> {
    pub category: &'a str,
    pub lines: Vec<&'a CartLine>,
}

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by `item_name` (adding the same name bumps quantity)
/// - Lines keep first-add order
/// - Quantity is at least 1 (enforced by `NonZeroU32`)
///
/// ## Keying
/// Lines are keyed by display name only. A custom item typed with the
/// same name as a catalog item merges into that line and keeps the
/// catalog price.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds one unit of an item.
    ///
    /// ## Behavior
    /// - Name already in cart: quantity + 1; `unit_price` and `category`
    ///   are ignored, the existing line's values win
    /// - Name not in cart: new line with quantity 1, appended at the end
    ///
    /// The caller is responsible for rejecting blank names.
    ///
    /// ## Example
    /// ```rust
    /// use grocery_core::{Cart, Money};
    ///
    /// let mut cart = Cart::new();
    /// cart.add_item("Bananas (1kg)", Money::from_cents(199), "🍎 Fruits");
    /// cart.add_item("Bananas (1kg)", Money::from_cents(199), "🍎 Fruits");
    ///
    /// assert_eq!(cart.line_count(), 1);
    /// assert_eq!(cart.total_units(), 2);
    /// ```
    pub fn add_item(&mut self, name: &str, unit_price: Money, category: &str) -> bool {
        match self.position(name) {
            Some(idx) => {
                let line = &mut self.lines[idx];
                line.quantity = line.quantity.saturating_add(1);
            }
            None => self.lines.push(CartLine::new(name, unit_price, category)),
        }
        true
    }

    /// Adds one unit of a catalog entry.
    pub fn add_entry(&mut self, entry: &CatalogEntry) -> bool {
        self.add_item(&entry.name, entry.unit_price, &entry.category)
    }

    /// Removes the line for `name`. Absent names are a no-op.
    pub fn remove_item(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(idx) => {
                self.lines.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Sets a line's quantity to exactly `quantity`.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: same as `remove_item`
    /// - Name not in cart: no-op
    /// - Values above `u32::MAX` saturate
    pub fn set_quantity(&mut self, name: &str, quantity: i64) -> bool {
        let Some(idx) = self.position(name) else {
            return false;
        };

        let clamped = u32::try_from(quantity.max(0)).unwrap_or(u32::MAX);
        match NonZeroU32::new(clamped) {
            Some(quantity) => {
                let line = &mut self.lines[idx];
                let changed = line.quantity != quantity;
                line.quantity = quantity;
                changed
            }
            None => {
                self.lines.remove(idx);
                true
            }
        }
    }

    /// Removes every line.
    pub fn clear(&mut self) -> bool {
        let had_lines = !self.lines.is_empty();
        self.lines.clear();
        had_lines
    }

    /// Σ unit price × quantity, exact to the cent.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Σ quantity.
    pub fn total_units(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity.get())).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines in first-add order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for `name`, if present.
    pub fn line(&self, name: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.item_name == name)
    }

    /// Quantity of `name` in the cart, 0 when absent.
    pub fn quantity_of(&self, name: &str) -> u32 {
        self.line(name).map_or(0, |l| l.quantity.get())
    }

    /// Lines grouped by category.
    ///
    /// Groups appear in the order each category's first line was added,
    /// which is not necessarily catalog order.
    pub fn groups(&self) -> Vec<CategoryGroup<'_>> {
        let mut groups: Vec<CategoryGroup<'_>> = Vec::new();
        for line in &self.lines {
            match groups.iter_mut().find(|g| g.category == line.category) {
                Some(group) => group.lines.push(line),
                None => groups.push(CategoryGroup {
                    category: &line.category,
                    lines: vec![line],
                }),
            }
        }
        groups
    }

    /// Subtotal, tax and total at `generated_at`.
    pub fn summary(&self, tax_rate: TaxRate, generated_at: DateTime<FixedOffset>) -> OrderSummary {
        OrderSummary::compute(self.subtotal(), tax_rate, generated_at)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.lines.iter().position(|l| l.item_name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const FRUITS: &str = "🍎 Fruits";
    const DAIRY: &str = "🥛 Dairy";

    fn cents(c: i64) -> Money {
        Money::from_cents(c)
    }

    fn fruit_and_milk() -> Cart {
        let mut cart = Cart::new();
        cart.add_item("Apples (1kg)", cents(399), FRUITS);
        cart.add_item("Whole Milk (1L)", cents(299), DAIRY);
        cart
    }

    #[test]
    fn test_cart_add_item() {
        let mut cart = Cart::new();
        assert!(cart.add_item("Apples (1kg)", cents(399), FRUITS));

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total_units(), 1);
        assert_eq!(cart.subtotal().cents(), 399);
    }

    #[test]
    fn test_repeated_add_keeps_one_line() {
        let mut cart = Cart::new();
        for n in 1..=5u32 {
            cart.add_item("Bananas (1kg)", cents(199), FRUITS);
            assert_eq!(cart.line_count(), 1);
            assert_eq!(cart.quantity_of("Bananas (1kg)"), n);
        }
        assert_eq!(cart.total_units(), 5);
    }

    #[test]
    fn test_repeat_add_keeps_original_price_and_category() {
        let mut cart = Cart::new();
        cart.add_item("Apples (1kg)", cents(399), FRUITS);
        // A custom item with the same display name merges into the catalog line
        cart.add_item("Apples (1kg)", cents(100), crate::CUSTOM_ITEMS_CATEGORY);

        let line = cart.line("Apples (1kg)").unwrap();
        assert_eq!(line.quantity.get(), 2);
        assert_eq!(line.unit_price, cents(399));
        assert_eq!(line.category, FRUITS);
        assert_eq!(cart.subtotal().cents(), 798);
    }

    #[test]
    fn test_remove_item() {
        let mut cart = fruit_and_milk();
        assert!(cart.remove_item("Apples (1kg)"));
        assert_eq!(cart.line_count(), 1);
        assert!(cart.line("Apples (1kg)").is_none());

        // Absent name: no-op, not dirty
        assert!(!cart.remove_item("Apples (1kg)"));
        assert_eq!(cart.line_count(), 1);
    }

    #[test]
    fn test_set_quantity_is_absolute() {
        let mut cart = fruit_and_milk();
        assert!(cart.set_quantity("Apples (1kg)", 4));
        assert_eq!(cart.quantity_of("Apples (1kg)"), 4);
        assert!(cart.set_quantity("Apples (1kg)", 2));
        assert_eq!(cart.quantity_of("Apples (1kg)"), 2);

        // Same value: nothing changed
        assert!(!cart.set_quantity("Apples (1kg)", 2));
    }

    #[test]
    fn test_set_quantity_zero_equals_remove() {
        let mut by_set = fruit_and_milk();
        let mut by_remove = fruit_and_milk();

        assert!(by_set.set_quantity("Whole Milk (1L)", 0));
        assert!(by_remove.remove_item("Whole Milk (1L)"));

        assert_eq!(by_set, by_remove);
        assert_eq!(by_set.line_count(), 1);
    }

    #[test]
    fn test_set_quantity_negative_removes() {
        let mut cart = fruit_and_milk();
        assert!(cart.set_quantity("Apples (1kg)", -3));
        assert!(cart.line("Apples (1kg)").is_none());
    }

    #[test]
    fn test_set_quantity_on_absent_name_is_noop() {
        let mut cart = fruit_and_milk();
        let before = cart.clone();

        assert!(!cart.set_quantity("Earbuds", 3));
        assert!(!cart.set_quantity("Earbuds", 0));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_set_quantity_saturates() {
        let mut cart = fruit_and_milk();
        cart.set_quantity("Apples (1kg)", i64::MAX);
        assert_eq!(cart.quantity_of("Apples (1kg)"), u32::MAX);

        // Adding past the top stays at the top
        cart.add_item("Apples (1kg)", cents(399), FRUITS);
        assert_eq!(cart.quantity_of("Apples (1kg)"), u32::MAX);
    }

    #[test]
    fn test_cart_clear() {
        let mut cart = fruit_and_milk();
        assert!(cart.clear());
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Money::zero());

        // Clearing an empty cart changes nothing
        assert!(!cart.clear());
    }

    #[test]
    fn test_subtotal_depends_only_on_final_state() {
        let mut a = Cart::new();
        a.add_item("Apples (1kg)", cents(399), FRUITS);
        a.add_item("Apples (1kg)", cents(399), FRUITS);
        a.add_item("Earbuds", cents(2499), "📱 Electronics");
        a.remove_item("Earbuds");
        a.add_item("Bananas (1kg)", cents(199), FRUITS);
        a.set_quantity("Bananas (1kg)", 3);

        let mut b = Cart::new();
        b.add_item("Apples (1kg)", cents(399), FRUITS);
        b.set_quantity("Apples (1kg)", 2);
        b.add_item("Bananas (1kg)", cents(199), FRUITS);
        b.add_item("Bananas (1kg)", cents(199), FRUITS);
        b.add_item("Bananas (1kg)", cents(199), FRUITS);

        assert_eq!(a, b);
        assert_eq!(a.subtotal().cents(), 399 * 2 + 199 * 3);
        assert_eq!(a.subtotal(), b.subtotal());
    }

    #[test]
    fn test_groups_follow_first_add_order() {
        let mut cart = Cart::new();
        cart.add_item("Whole Milk (1L)", cents(299), DAIRY);
        cart.add_item("Apples (1kg)", cents(399), FRUITS);
        cart.add_item("Butter (250g)", cents(349), DAIRY);

        let groups = cart.groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].category, DAIRY);
        assert_eq!(groups[1].category, FRUITS);

        let dairy: Vec<&str> = groups[0].lines.iter().map(|l| l.item_name.as_str()).collect();
        assert_eq!(dairy, vec!["Whole Milk (1L)", "Butter (250g)"]);
    }

    #[test]
    fn test_summary_apples_scenario() {
        let mut cart = Cart::new();
        cart.add_item("Apples (1kg)", cents(399), FRUITS);
        cart.set_quantity("Apples (1kg)", 2);

        let at = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2026, 10, 17, 12, 0, 0)
            .unwrap();
        let summary = cart.summary(TaxRate::from_bps(800), at);

        assert_eq!(summary.subtotal.to_string(), "$7.98");
        assert_eq!(summary.tax.to_string(), "$0.64");
        assert_eq!(summary.total.to_string(), "$8.62");
    }

    #[test]
    fn test_cart_serializes_lines_in_order() {
        let cart = fruit_and_milk();
        let json = serde_json::to_value(&cart).unwrap();
        assert_eq!(json["lines"][0]["item_name"], "Apples (1kg)");
        assert_eq!(json["lines"][1]["quantity"], 1);
    }
}
