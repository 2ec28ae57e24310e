//! # Storefront Error Types
//!
//! Unified error type for storefront commands, plus configuration errors.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  Console line ──► Command ──► Result<T, AppError>                       │
//! │                                   │                                     │
//! │        ValidationError ───────────┤  VALIDATION_ERROR                   │
//! │        CoreError::Unknown… ───────┤  NOT_FOUND                          │
//! │        empty cart checkout ───────┤  CART_ERROR                         │
//! │        ConfigError ───────────────┤  CONFIG_ERROR                       │
//! │        io::Error ─────────────────┘  INTERNAL                           │
//! │                                                                         │
//! │  Command errors are printed and the session carries on. Only startup   │
//! │  failures (config, catalog) end the process.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use thiserror::Error;

use grocery_core::{CoreError, ValidationError};

// =============================================================================
// Configuration Error
// =============================================================================

/// Errors while loading `StoreConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config or catalog file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for `StoreConfig`.
    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config loaded but failed validation.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Convenience type alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// App Error
// =============================================================================

/// Error returned from storefront commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "item name is required"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Catalog item or cart line not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Configuration or catalog could not be loaded
    ConfigError,

    /// Cart is not in a state that allows the operation
    CartError,

    /// Unexpected failure (I/O)
    Internal,
}

impl AppError {
    /// Creates a new app error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        AppError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a cart error.
    pub fn cart(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::CartError, message)
    }
}

/// Converts core errors to app errors.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnknownCatalogItem(code) => AppError::not_found("Catalog item", &code),
            CoreError::Validation(e) => AppError::validation(e.to_string()),
            e @ (CoreError::CatalogFormat(_) | CoreError::InvalidCatalogEntry { .. }) => {
                AppError::new(ErrorCode::ConfigError, e.to_string())
            }
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        tracing::error!("I/O failure: {}", err);
        AppError::new(ErrorCode::Internal, err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("Serialization failure: {}", err);
        AppError::new(ErrorCode::Internal, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}

/// Convenience type alias for command results.
pub type AppResult<T> = Result<T, AppError>;
