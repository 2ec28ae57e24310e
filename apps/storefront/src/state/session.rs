//! # Session State
//!
//! One customer visit: the cart, the current browse query, and whether
//! the cart display is stale.
//!
//! ## Render Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  command ──► session.with_cart_mut(|c| c.add_item(..)) ──► bool dirty   │
//! │                                     │                                   │
//! │                                     ▼                                   │
//! │                     needs_render |= dirty                               │
//! │                                     │                                   │
//! │  console, after the command ──► take_render_request()                   │
//! │                                     │                                   │
//! │                      true ──► print cart status line                    │
//! │                      false ─► nothing changed, nothing redrawn          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A session is owned by exactly one console; nothing is shared between
//! sessions, so there is no locking here.

use chrono::{DateTime, Utc};
use std::str::FromStr;
use uuid::Uuid;

use grocery_core::{Cart, CartLine, CatalogQuery};

/// A reference to a cart line typed by the user: its 1-based position in
/// the cart view, or its exact name.
///
/// An all-digit token parses as a position, but [`Session::resolve_line`]
/// still tries it as a name first, so an item called "2" stays reachable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineRef {
    Position(usize),
    Name(String),
}

impl From<&str> for LineRef {
    fn from(s: &str) -> Self {
        let s = s.trim();
        match s.parse::<usize>() {
            Ok(position) => LineRef::Position(position),
            Err(_) => LineRef::Name(s.to_string()),
        }
    }
}

impl FromStr for LineRef {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(LineRef::from(s))
    }
}

impl std::fmt::Display for LineRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LineRef::Position(p) => write!(f, "#{}", p),
            LineRef::Name(name) => write!(f, "{}", name),
        }
    }
}

/// Per-customer state.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    started_at: DateTime<Utc>,
    cart: Cart,
    query: CatalogQuery,
    needs_render: bool,
}

impl Session {
    /// Starts a session with an empty cart and an unfiltered catalog view.
    pub fn new() -> Self {
        Session {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            cart: Cart::new(),
            query: CatalogQuery::default(),
            needs_render: false,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn query(&self) -> &CatalogQuery {
        &self.query
    }

    /// Executes a function with read access to the cart.
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        f(&self.cart)
    }

    /// Executes a cart mutation and records whether it changed anything.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let changed = session.with_cart_mut(|cart| cart.remove_item("Eggs (12)"));
    /// ```
    pub fn with_cart_mut<F>(&mut self, f: F) -> bool
    where
        F: FnOnce(&mut Cart) -> bool,
    {
        let changed = f(&mut self.cart);
        self.needs_render |= changed;
        changed
    }

    /// Returns whether the cart changed since the last call, and resets it.
    pub fn take_render_request(&mut self) -> bool {
        std::mem::take(&mut self.needs_render)
    }

    pub fn set_search(&mut self, search: String) {
        self.query.search = search;
    }

    pub fn set_categories(&mut self, categories: Option<Vec<String>>) {
        self.query.categories = categories;
    }

    /// Resolves a typed line reference to the line it names.
    ///
    /// A position that is also the exact name of a line resolves to that line.
    pub fn resolve_line(&self, line: &LineRef) -> Option<&CartLine> {
        match line {
            LineRef::Position(p) => self
                .cart
                .line(&p.to_string())
                .or_else(|| p.checked_sub(1).and_then(|i| self.cart.lines().get(i))),
            LineRef::Name(name) => self.cart.line(name),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grocery_core::Money;

    #[test]
    fn test_new_session_is_empty_and_clean() {
        let mut session = Session::new();
        assert!(session.cart().is_empty());
        assert_eq!(session.query(), &CatalogQuery::default());
        assert!(!session.take_render_request());
        assert_ne!(session.id(), Session::new().id());
    }

    #[test]
    fn test_render_request_tracks_changes() {
        let mut session = Session::new();

        assert!(!session.with_cart_mut(|c| c.remove_item("Eggs (12)")));
        assert!(!session.take_render_request());

        assert!(session.with_cart_mut(|c| c.add_item("Eggs (12)", Money::from_cents(399), "🥛 Dairy")));
        assert!(session.take_render_request());
        // Taken, so reset
        assert!(!session.take_render_request());
    }

    #[test]
    fn test_line_ref_parsing() {
        assert_eq!("2".parse::<LineRef>().unwrap(), LineRef::Position(2));
        assert_eq!(
            " Eggs (12) ".parse::<LineRef>().unwrap(),
            LineRef::Name("Eggs (12)".to_string())
        );
    }

    #[test]
    fn test_resolve_line() {
        let mut session = Session::new();
        session.with_cart_mut(|c| c.add_item("Eggs (12)", Money::from_cents(399), "🥛 Dairy"));
        session.with_cart_mut(|c| c.add_item("Rice (5kg)", Money::from_cents(1299), "🥫 Pantry"));

        let second = session.resolve_line(&LineRef::Position(2)).unwrap();
        assert_eq!(second.item_name, "Rice (5kg)");

        let by_name = session.resolve_line(&LineRef::Name("Eggs (12)".to_string())).unwrap();
        assert_eq!(by_name.item_name, "Eggs (12)");

        assert!(session.resolve_line(&LineRef::Position(0)).is_none());
        assert!(session.resolve_line(&LineRef::Position(3)).is_none());
        assert!(session.resolve_line(&LineRef::Name("Tofu".to_string())).is_none());
    }

    #[test]
    fn test_resolve_numeric_name_before_position() {
        let mut session = Session::new();
        session.with_cart_mut(|c| c.add_item("Eggs (12)", Money::from_cents(399), "🥛 Dairy"));
        session.with_cart_mut(|c| c.add_item("7", Money::from_cents(100), "🛍️ Custom Items"));
        session.with_cart_mut(|c| c.add_item("1", Money::from_cents(200), "🛍️ Custom Items"));

        // "1" names the third line
        let line = session.resolve_line(&"1".parse().unwrap()).unwrap();
        assert_eq!(line.item_name, "1");

        // "2" is no line's name, so it is a position
        let line = session.resolve_line(&"2".parse().unwrap()).unwrap();
        assert_eq!(line.item_name, "7");

        let line = session.resolve_line(&"7".parse().unwrap()).unwrap();
        assert_eq!(line.item_name, "7");
    }

    #[test]
    fn test_query_setters() {
        let mut session = Session::new();
        session.set_search("milk".to_string());
        session.set_categories(Some(vec!["🥛 Dairy".to_string()]));
        assert_eq!(session.query().search, "milk");
        assert_eq!(session.query().categories.as_deref(), Some(&["🥛 Dairy".to_string()][..]));
    }
}
