//! # Error Types
//!
//! Domain-specific error types for grocery-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  grocery-core errors (this file)                                       │
//! │  ├── CoreError        - Catalog loading and lookup failures            │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  storefront errors (app crate)                                         │
//! │  ├── ConfigError      - Configuration loading                          │
//! │  └── AppError         - What the user sees (code + message)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError → Console                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart engine and order formatter never fail: they are total over
//! their inputs, so nothing here describes a cart error.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Catalog and lookup errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The catalog document is not valid JSON of the expected shape.
    #[error("Catalog document is malformed: {0}")]
    CatalogFormat(#[from] serde_json::Error),

    /// A catalog entry failed validation while loading.
    ///
    /// ## When This Occurs
    /// - Negative price, or more than two decimals
    /// - Blank category or item name
    /// - A category with no items
    #[error("Invalid catalog entry '{item}' in '{category}': {reason}")]
    InvalidCatalogEntry {
        category: String,
        item: String,
        reason: String,
    },

    /// A browse code or lookup did not match any catalog item.
    #[error("No catalog item at {0}")]
    UnknownCatalogItem(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// The presentation layer checks user input with these before anything
/// reaches the cart engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value is above the largest accepted amount.
    #[error("{field} must not exceed {max}")]
    ExceedsMaximum { field: String, max: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g. price text that is not a number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
