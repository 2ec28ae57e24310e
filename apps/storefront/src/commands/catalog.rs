//! # Catalog Commands
//!
//! Browse, search, category filter and quick stats.
//!
//! ## Shop View
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  search milk ──► session.query.search = "milk"                          │
//! │  filter 1,3  ──► session.query.categories = [Dairy, Fruits]             │
//! │                        │                                                │
//! │                        ▼                                                │
//! │  browse ──► catalog.listing(query) + cart quantities ──► BrowseResponse │
//! │                                                                         │
//! │   ### 🥛 Dairy (1)                                                      │
//! │     1.1  Whole Milk (1L) - $2.99   ✓ x2                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::debug;

use grocery_core::validation::validate_search_query;
use grocery_core::{Catalog, ItemCode, Money};

use crate::error::{AppError, AppResult};
use crate::state::Session;

/// One browse row, with how many are already in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseItem {
    pub code: ItemCode,
    pub name: String,
    pub price: Money,
    pub in_cart: u32,
}

/// One category heading in the browse view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseCategory {
    pub position: usize,
    pub category: String,
    pub items: Vec<BrowseItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseResponse {
    pub search: String,
    pub filtered: bool,
    pub categories: Vec<BrowseCategory>,
}

/// Category selection typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategorySelection {
    All,
    /// 1-based catalog positions.
    Positions(Vec<usize>),
}

/// Catalog and cart counters shown by `stats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub categories: usize,
    pub products: usize,
    pub cart_lines: usize,
    pub cart_units: u64,
    pub cart_subtotal: Money,
}

/// The shop view for the session's current query.
pub fn browse(catalog: &Catalog, session: &Session) -> BrowseResponse {
    let query = session.query();
    debug!(session_id = %session.id(), search = %query.search, "browse command");

    let categories = catalog
        .listing(query)
        .into_iter()
        .map(|listing| BrowseCategory {
            position: listing.position,
            category: listing.category,
            items: listing
                .items
                .into_iter()
                .map(|item| BrowseItem {
                    code: item.code,
                    in_cart: session.cart().quantity_of(&item.entry.name),
                    name: item.entry.name,
                    price: item.entry.unit_price,
                })
                .collect(),
        })
        .collect();

    BrowseResponse {
        search: query.search.clone(),
        filtered: query.categories.is_some(),
        categories,
    }
}

/// Sets the search term. Blank clears it.
///
/// ## Returns
/// The trimmed term now in effect.
pub fn search(session: &mut Session, term: &str) -> AppResult<String> {
    let term = validate_search_query(term)?;
    debug!(session_id = %session.id(), search = %term, "search command");
    session.set_search(term.clone());
    Ok(term)
}

/// Restricts browsing to the selected categories.
///
/// ## Returns
/// The selected category names, or every category for `All`.
///
/// ## Errors
/// `NOT_FOUND` for a position outside the catalog; the selection is left
/// unchanged in that case.
pub fn filter(
    catalog: &Catalog,
    session: &mut Session,
    selection: CategorySelection,
) -> AppResult<Vec<String>> {
    debug!(session_id = %session.id(), ?selection, "filter command");

    match selection {
        CategorySelection::All => {
            session.set_categories(None);
            Ok(catalog.categories().map(str::to_string).collect())
        }
        CategorySelection::Positions(positions) => {
            let names: Vec<&str> = catalog.categories().collect();
            let mut selected = Vec::with_capacity(positions.len());
            for position in positions {
                let name = position
                    .checked_sub(1)
                    .and_then(|i| names.get(i))
                    .ok_or_else(|| AppError::not_found("Category", &position.to_string()))?;
                if !selected.iter().any(|s: &String| s == name) {
                    selected.push(name.to_string());
                }
            }
            session.set_categories(Some(selected.clone()));
            Ok(selected)
        }
    }
}

/// Quick stats for the sidebar.
pub fn stats(catalog: &Catalog, session: &Session) -> StatsResponse {
    session.with_cart(|cart| StatsResponse {
        categories: catalog.category_count(),
        products: catalog.product_count(),
        cart_lines: cart.line_count(),
        cart_units: cart.total_units(),
        cart_subtotal: cart.subtotal(),
    })
}
