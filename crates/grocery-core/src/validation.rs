//! # Validation Module
//!
//! Input checks the presentation layer runs before calling the engine.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Console input                                                │
//! │  └── Tokenising, numbers that parse                                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Custom item name / price                                          │
//! │  ├── Quantity field, search box, phone number                          │
//! │  └── Configured tax rate                                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Cart engine                                                  │
//! │  └── No checks at all: it is total over well-formed input              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use grocery_core::validation::{validate_custom_price, validate_item_name};
//!
//! validate_item_name("Fresh Basil").unwrap();
//! let price = validate_custom_price("2.50").unwrap();
//! assert_eq!(price.cents(), 250);
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_CUSTOM_PRICE, MAX_ITEM_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a custom item name.
///
/// ## Rules
/// - Must not be blank
/// - At most 200 characters
///
/// The name is not trimmed; what the user typed is what goes on the line.
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "item name".to_string(),
        });
    }

    if name.chars().count() > 200 {
        return Err(ValidationError::TooLong {
            field: "item name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (shows the whole catalog)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

/// Extracts and validates the digits of a phone number.
///
/// ## Rules
/// - Everything but ASCII digits is dropped (`+`, spaces, dashes, dots)
/// - 7 to 15 digits must remain (15 is the E.164 maximum)
///
/// ## Example
/// ```rust
/// use grocery_core::validation::validate_phone_number;
///
/// assert_eq!(validate_phone_number("+1 (234) 567-890").unwrap(), "1234567890");
/// assert!(validate_phone_number("call me").is_err());
/// ```
pub fn validate_phone_number(phone: &str) -> ValidationResult<String> {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();

    if digits.is_empty() {
        return Err(ValidationError::Required {
            field: "phone number".to_string(),
        });
    }

    if !(7..=15).contains(&digits.len()) {
        return Err(ValidationError::InvalidFormat {
            field: "phone number".to_string(),
            reason: "expected 7 to 15 digits including the country code".to_string(),
        });
    }

    Ok(digits)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Parses and validates the custom item price field.
///
/// ## Rules
/// - Must parse as a price (see [`Money`]'s `FromStr`)
/// - Must be at least $0.01
/// - Must not exceed MAX_CUSTOM_PRICE ($1000000.00)
pub fn validate_custom_price(text: &str) -> ValidationResult<Money> {
    let price: Money = text.parse().map_err(|_| ValidationError::InvalidFormat {
        field: "price".to_string(),
        reason: "expected a number like 3.99".to_string(),
    })?;

    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    if price > MAX_CUSTOM_PRICE {
        return Err(ValidationError::ExceedsMaximum {
            field: "price".to_string(),
            max: MAX_CUSTOM_PRICE.to_string(),
        });
    }

    Ok(price)
}

/// Validates the cart's quantity field.
///
/// ## Rules
/// - 0 is allowed and means "remove this line"
/// - Must not be negative
/// - Must not exceed MAX_ITEM_QUANTITY (999)
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Cart: change quantity                                                  │
/// │                                                                         │
/// │  User enters: qty 2 5                                                   │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity_input(5) ← THIS FUNCTION                             │
/// │       │                                                                 │
/// │       ├── qty < 0?   → Error: "quantity must be between 0 and 999"      │
/// │       ├── qty > 999? → Error: "quantity must be between 0 and 999"      │
/// │       │                                                                 │
/// │       └── OK → cart.set_quantity(name, 5)                               │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity_input(qty: i64) -> ValidationResult<()> {
    if !(0..=MAX_ITEM_QUANTITY).contains(&qty) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a tax rate in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0,
            max: 10000,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
