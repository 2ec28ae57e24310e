//! # Catalog Module
//!
//! The storefront's read-only product reference data:
//! category → item name → unit price.
//!
//! ## Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Catalog Sources                                  │
//! │                                                                         │
//! │  Catalog::builtin()        static table compiled into the binary        │
//! │                                                                         │
//! │  Catalog::from_json(doc)   { "🥛 Dairy": { "Whole Milk (1L)": 2.99 } }  │
//! │                            key order in the document is kept            │
//! │                                                                         │
//! │  Either way the catalog is loaded once at startup and never mutated.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Browse Codes
//! The shell shows every item with a `category.item` code, both 1-based and
//! counted in catalog order (not filtered order), so a code stays valid
//! while the user changes the search term.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::CatalogEntry;

// =============================================================================
// Builtin Table
// =============================================================================

/// Prices in cents, grouped by category, in shelf order.
const BUILTIN: &[(&str, &[(&str, i64)])] = &[
    (
        "🥛 Dairy",
        &[
            ("Whole Milk (1L)", 299),
            ("Skim Milk (1L)", 289),
            ("Cheddar Cheese (200g)", 499),
            ("Mozzarella Cheese (250g)", 549),
            ("Greek Yogurt (500g)", 399),
            ("Butter (250g)", 349),
            ("Cream Cheese (227g)", 299),
            ("Sour Cream (250ml)", 249),
        ],
    ),
    (
        "🧹 Cleaning Agents",
        &[
            ("Dish Soap (500ml)", 399),
            ("Laundry Detergent (2L)", 1299),
            ("All-Purpose Cleaner (750ml)", 449),
            ("Glass Cleaner (500ml)", 379),
            ("Floor Cleaner (1L)", 599),
            ("Bleach (1L)", 299),
            ("Paper Towels (6 rolls)", 899),
            ("Sponges (5 pack)", 349),
        ],
    ),
    (
        "🍎 Fruits",
        &[
            ("Apples (1kg)", 399),
            ("Bananas (1kg)", 199),
            ("Oranges (1kg)", 449),
            ("Grapes (500g)", 599),
            ("Strawberries (500g)", 499),
            ("Watermelon (each)", 699),
            ("Mangoes (each)", 249),
            ("Pineapple (each)", 399),
            ("Blueberries (250g)", 549),
            ("Avocado (each)", 199),
        ],
    ),
    (
        "🥕 Vegetables",
        &[
            ("Carrots (1kg)", 249),
            ("Broccoli (500g)", 349),
            ("Tomatoes (1kg)", 399),
            ("Cucumbers (each)", 149),
            ("Bell Peppers (each)", 199),
            ("Onions (1kg)", 299),
            ("Potatoes (2kg)", 499),
            ("Lettuce (head)", 249),
            ("Spinach (bunch)", 299),
            ("Garlic (bulb)", 99),
        ],
    ),
    (
        "🥩 Meats",
        &[
            ("Ground Beef (500g)", 899),
            ("Beef Steak (500g)", 1499),
            ("Pork Chops (500g)", 999),
            ("Lamb Chops (500g)", 1699),
            ("Bacon (250g)", 699),
            ("Sausages (6 pack)", 749),
            ("Ham Slices (200g)", 599),
        ],
    ),
    (
        "🍗 Poultry",
        &[
            ("Chicken Breast (500g)", 849),
            ("Chicken Thighs (500g)", 699),
            ("Whole Chicken (1.5kg)", 1299),
            ("Chicken Wings (1kg)", 999),
            ("Ground Chicken (500g)", 799),
            ("Turkey Breast (500g)", 1099),
            ("Chicken Drumsticks (1kg)", 749),
        ],
    ),
    (
        "📱 Electronics",
        &[
            ("USB Cable (1m)", 999),
            ("Power Bank (10000mAh)", 2999),
            ("Phone Case", 1499),
            ("Earbuds", 2499),
            ("Screen Protector", 1299),
            ("Phone Charger", 1999),
            ("Memory Card (32GB)", 1599),
            ("HDMI Cable (2m)", 1199),
        ],
    ),
    (
        "🍿 Snacks",
        &[
            ("Potato Chips (200g)", 399),
            ("Pretzels (250g)", 349),
            ("Cookies (300g)", 499),
            ("Chocolate Bar (100g)", 249),
            ("Popcorn (250g)", 299),
            ("Nuts Mix (200g)", 699),
            ("Granola Bars (6 pack)", 549),
            ("Crackers (250g)", 379),
            ("Candy Mix (300g)", 449),
            ("Trail Mix (250g)", 599),
        ],
    ),
];

// =============================================================================
// Item Code
// =============================================================================

/// A 1-based `category.item` position in catalog order, e.g. `3.1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemCode {
    pub category: usize,
    pub item: usize,
}

impl fmt::Display for ItemCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.category, self.item)
    }
}

impl FromStr for ItemCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidFormat {
            field: "item code".to_string(),
            reason: "expected <category>.<item>, e.g. 3.1".to_string(),
        };

        let (category, item) = s.trim().split_once('.').ok_or_else(invalid)?;
        let category: usize = category.parse().map_err(|_| invalid())?;
        let item: usize = item.parse().map_err(|_| invalid())?;
        if category == 0 || item == 0 {
            return Err(invalid());
        }
        Ok(ItemCode { category, item })
    }
}

// =============================================================================
// Browse Query & Listing
// =============================================================================

/// What the shop view is currently showing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuery {
    /// Case-insensitive substring of the item name. Empty shows everything.
    pub search: String,

    /// Selected category names. `None` selects every category.
    pub categories: Option<Vec<String>>,
}

impl CatalogQuery {
    fn selects(&self, category: &str) -> bool {
        match &self.categories {
            Some(selected) => selected.iter().any(|c| c == category),
            None => true,
        }
    }
}

/// One item as shown in the shop view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ListedItem {
    pub code: ItemCode,
    pub entry: CatalogEntry,
}

/// A category heading and its visible items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategoryListing {
    /// 1-based position in catalog order.
    pub position: usize,
    pub category: String,
    pub items: Vec<ListedItem>,
}

// =============================================================================
// Catalog
// =============================================================================

/// Immutable product reference data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    categories: IndexMap<String, IndexMap<String, Money>>,
}

impl Catalog {
    /// The grocery catalog shipped with the storefront.
    ///
    /// ## Example
    /// ```rust
    /// use grocery_core::catalog::Catalog;
    ///
    /// let catalog = Catalog::builtin();
    /// assert_eq!(catalog.category_count(), 8);
    /// assert_eq!(catalog.price("🍎 Fruits", "Apples (1kg)").unwrap().cents(), 399);
    /// ```
    pub fn builtin() -> Self {
        let categories = BUILTIN
            .iter()
            .map(|(category, items)| {
                let items = items
                    .iter()
                    .map(|(name, cents)| (name.to_string(), Money::from_cents(*cents)))
                    .collect();
                (category.to_string(), items)
            })
            .collect();
        Catalog { categories }
    }

    /// Loads a catalog from a JSON document.
    ///
    /// ## Document Shape
    /// ```json
    /// { "🥛 Dairy": { "Whole Milk (1L)": 2.99, "Butter (250g)": 3.49 } }
    /// ```
    ///
    /// Prices are read from the number's decimal text, so `2.99` becomes
    /// exactly 299 cents.
    ///
    /// ## Errors
    /// - `CoreError::CatalogFormat` if the JSON does not have this shape
    /// - `CoreError::InvalidCatalogEntry` for blank names, empty categories,
    ///   negative prices or sub-cent prices
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let raw: IndexMap<String, IndexMap<String, serde_json::Number>> =
            serde_json::from_str(json)?;

        let mut categories = IndexMap::with_capacity(raw.len());
        for (category, items) in raw {
            let reject = |item: &str, reason: &str| CoreError::InvalidCatalogEntry {
                category: category.clone(),
                item: item.to_string(),
                reason: reason.to_string(),
            };

            if category.trim().is_empty() {
                return Err(reject("", "category name is blank"));
            }
            if items.is_empty() {
                return Err(reject("", "category has no items"));
            }

            let mut priced = IndexMap::with_capacity(items.len());
            for (name, number) in items {
                if name.trim().is_empty() {
                    return Err(reject(&name, "item name is blank"));
                }
                let price: Money = number
                    .to_string()
                    .parse()
                    .map_err(|e: ValidationError| reject(&name, &e.to_string()))?;
                if price.is_negative() {
                    return Err(reject(&name, "price must not be negative"));
                }
                priced.insert(name, price);
            }
            categories.insert(category, priced);
        }

        Ok(Catalog { categories })
    }

    /// Category names in catalog order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// Entries of one category in catalog order, or `None` if unknown.
    pub fn items(&self, category: &str) -> Option<Vec<CatalogEntry>> {
        let (category, items) = self.categories.get_key_value(category)?;
        Some(
            items
                .iter()
                .map(|(name, price)| entry(category, name, *price))
                .collect(),
        )
    }

    /// Unit price of `(category, name)`.
    pub fn price(&self, category: &str, name: &str) -> Option<Money> {
        self.categories.get(category)?.get(name).copied()
    }

    /// Full entry for `(category, name)`.
    pub fn entry(&self, category: &str, name: &str) -> Option<CatalogEntry> {
        let (category, items) = self.categories.get_key_value(category)?;
        let (name, price) = items.get_key_value(name)?;
        Some(entry(category, name, *price))
    }

    /// Entry at a browse code.
    ///
    /// ## Errors
    /// `CoreError::UnknownCatalogItem` if the code is outside the catalog.
    pub fn entry_at(&self, code: ItemCode) -> CoreResult<CatalogEntry> {
        let lookup = || {
            let (category, items) = self.categories.get_index(code.category.checked_sub(1)?)?;
            let (name, price) = items.get_index(code.item.checked_sub(1)?)?;
            Some(entry(category, name, *price))
        };
        lookup().ok_or_else(|| CoreError::UnknownCatalogItem(code.to_string()))
    }

    /// The shop view for a search term and category selection.
    ///
    /// Catalog order is kept; categories with nothing to show are left out.
    ///
    /// ## Example
    /// ```rust
    /// use grocery_core::catalog::{Catalog, CatalogQuery};
    ///
    /// let catalog = Catalog::builtin();
    /// let query = CatalogQuery { search: "CHICKEN".to_string(), categories: None };
    /// let listing = catalog.listing(&query);
    ///
    /// assert_eq!(listing.len(), 1);
    /// assert_eq!(listing[0].category, "🍗 Poultry");
    /// ```
    pub fn listing(&self, query: &CatalogQuery) -> Vec<CategoryListing> {
        let needle = query.search.trim().to_lowercase();

        self.categories
            .iter()
            .enumerate()
            .filter(|(_, (category, _))| query.selects(category))
            .filter_map(|(ci, (category, items))| {
                let visible: Vec<ListedItem> = items
                    .iter()
                    .enumerate()
                    .filter(|(_, (name, _))| needle.is_empty() || name.to_lowercase().contains(&needle))
                    .map(|(ii, (name, price))| ListedItem {
                        code: ItemCode {
                            category: ci + 1,
                            item: ii + 1,
                        },
                        entry: entry(category, name, *price),
                    })
                    .collect();

                (!visible.is_empty()).then(|| CategoryListing {
                    position: ci + 1,
                    category: category.clone(),
                    items: visible,
                })
            })
            .collect()
    }

    /// Number of categories.
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    /// Number of products across all categories.
    pub fn product_count(&self) -> usize {
        self.categories.values().map(IndexMap::len).sum()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::builtin()
    }
}

fn entry(category: &str, name: &str, unit_price: Money) -> CatalogEntry {
    CatalogEntry {
        name: name.to_string(),
        unit_price,
        category: category.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_stats() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.category_count(), 8);
        assert_eq!(catalog.product_count(), 68);

        let first: Vec<&str> = catalog.categories().take(3).collect();
        assert_eq!(first, vec!["🥛 Dairy", "🧹 Cleaning Agents", "🍎 Fruits"]);
    }

    #[test]
    fn test_price_lookup_is_category_scoped() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.price("🍎 Fruits", "Bananas (1kg)"), Some(Money::from_cents(199)));
        assert_eq!(catalog.price("🥛 Dairy", "Bananas (1kg)"), None);
        assert_eq!(catalog.price("Nope", "Bananas (1kg)"), None);
    }

    #[test]
    fn test_items_in_catalog_order() {
        let catalog = Catalog::builtin();
        let meats = catalog.items("🥩 Meats").unwrap();
        assert_eq!(meats.len(), 7);
        assert_eq!(meats[0].name, "Ground Beef (500g)");
        assert_eq!(meats[0].category, "🥩 Meats");
        assert!(catalog.items("🚗 Cars").is_none());
    }

    #[test]
    fn test_entry_at_code() {
        let catalog = Catalog::builtin();
        let apples = catalog.entry_at("3.1".parse().unwrap()).unwrap();
        assert_eq!(apples.name, "Apples (1kg)");
        assert_eq!(apples.unit_price.cents(), 399);

        assert!(matches!(
            catalog.entry_at(ItemCode { category: 3, item: 99 }),
            Err(CoreError::UnknownCatalogItem(code)) if code == "3.99"
        ));
        assert!(catalog.entry_at(ItemCode { category: 42, item: 1 }).is_err());
    }

    #[test]
    fn test_item_code_parsing() {
        assert_eq!("2.7".parse::<ItemCode>().unwrap(), ItemCode { category: 2, item: 7 });
        assert_eq!(ItemCode { category: 8, item: 10 }.to_string(), "8.10");
        assert!("0.1".parse::<ItemCode>().is_err());
        assert!("1".parse::<ItemCode>().is_err());
        assert!("a.b".parse::<ItemCode>().is_err());
    }

    #[test]
    fn test_from_json_preserves_order_and_prices() {
        let json = r#"{
            "Zeta": { "Last": 1.5, "First": 0.99 },
            "Alpha": { "Only": 3 }
        }"#;
        let catalog = Catalog::from_json(json).unwrap();

        let categories: Vec<&str> = catalog.categories().collect();
        assert_eq!(categories, vec!["Zeta", "Alpha"]);

        let zeta: Vec<String> = catalog.items("Zeta").unwrap().into_iter().map(|e| e.name).collect();
        assert_eq!(zeta, vec!["Last", "First"]);

        assert_eq!(catalog.price("Zeta", "Last").unwrap().cents(), 150);
        assert_eq!(catalog.price("Zeta", "First").unwrap().cents(), 99);
        assert_eq!(catalog.price("Alpha", "Only").unwrap().cents(), 300);
    }

    #[test]
    fn test_from_json_rejects_bad_entries() {
        assert!(matches!(
            Catalog::from_json("[1, 2]"),
            Err(CoreError::CatalogFormat(_))
        ));
        assert!(matches!(
            Catalog::from_json(r#"{ "Dairy": { "Milk": -1.0 } }"#),
            Err(CoreError::InvalidCatalogEntry { .. })
        ));
        assert!(matches!(
            Catalog::from_json(r#"{ "Dairy": { "Milk": 2.999 } }"#),
            Err(CoreError::InvalidCatalogEntry { .. })
        ));
        assert!(matches!(
            Catalog::from_json(r#"{ "Dairy": {} }"#),
            Err(CoreError::InvalidCatalogEntry { .. })
        ));
        assert!(matches!(
            Catalog::from_json(r#"{ "Dairy": { "  ": 1.0 } }"#),
            Err(CoreError::InvalidCatalogEntry { .. })
        ));
    }

    #[test]
    fn test_listing_search_is_case_insensitive() {
        let catalog = Catalog::builtin();
        let query = CatalogQuery {
            search: "cheese".to_string(),
            categories: None,
        };
        let listing = catalog.listing(&query);

        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].category, "🥛 Dairy");
        let names: Vec<&str> = listing[0].items.iter().map(|i| i.entry.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Cheddar Cheese (200g)", "Mozzarella Cheese (250g)", "Cream Cheese (227g)"]
        );
        // Codes are catalog positions, not positions in the filtered list
        assert_eq!(listing[0].items[0].code, ItemCode { category: 1, item: 3 });
    }

    #[test]
    fn test_listing_category_filter() {
        let catalog = Catalog::builtin();
        let query = CatalogQuery {
            search: String::new(),
            categories: Some(vec!["🍿 Snacks".to_string(), "🍎 Fruits".to_string()]),
        };
        let listing = catalog.listing(&query);

        // Catalog order, not selection order
        let shown: Vec<&str> = listing.iter().map(|l| l.category.as_str()).collect();
        assert_eq!(shown, vec!["🍎 Fruits", "🍿 Snacks"]);
        assert_eq!(listing[0].position, 3);
        assert_eq!(listing[1].items.len(), 10);
    }

    #[test]
    fn test_listing_without_matches_is_empty() {
        let catalog = Catalog::builtin();
        let query = CatalogQuery {
            search: "caviar".to_string(),
            categories: None,
        };
        assert!(catalog.listing(&query).is_empty());

        let none_selected = CatalogQuery {
            search: String::new(),
            categories: Some(Vec::new()),
        };
        assert!(catalog.listing(&none_selected).is_empty());
    }
}
