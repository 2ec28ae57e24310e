//! # Order Commands
//!
//! Preview, share and checkout. All three format the cart through the
//! store's `OrderFormatter`, so the previewed text is byte-for-byte what
//! gets shared.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  checkout                                                               │
//! │     │                                                                   │
//! │     ├── cart empty? ──► CART_ERROR, nothing happens                     │
//! │     │                                                                   │
//! │     ├── summary = cart.summary(tax_rate, now)                           │
//! │     ├── message = formatter.format(cart, now)                           │
//! │     ├── reference = UUID v4                                             │
//! │     ├── cart.clear() ──► render request                                 │
//! │     │                                                                   │
//! │     └── OrderConfirmation { reference, summary, message }               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use grocery_core::validation::validate_phone_number;
use grocery_core::{Cart, OrderSummary};

use crate::error::{AppError, AppResult};
use crate::share::ShareLink;
use crate::state::{Session, StoreConfig};

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub reference: Uuid,
    pub line_count: usize,
    pub total_units: u64,
    pub summary: OrderSummary,
    /// The order message as it stood before the cart was cleared.
    pub message: String,
}

/// The order message for the current cart.
///
/// An empty cart yields the empty-cart notice rather than an error.
pub fn preview(session: &Session, config: &StoreConfig, now: DateTime<FixedOffset>) -> String {
    debug!(session_id = %session.id(), "preview command");
    session.with_cart(|cart| config.formatter().format(cart, now))
}

/// Builds a WhatsApp link carrying the order message.
///
/// ## Errors
/// - `CART_ERROR` if the cart is empty
/// - `VALIDATION_ERROR` if the phone number has too few or too many digits
pub fn share(
    session: &Session,
    config: &StoreConfig,
    phone: &str,
    now: DateTime<FixedOffset>,
) -> AppResult<ShareLink> {
    debug!(session_id = %session.id(), "share command");

    ensure_not_empty(session.cart())?;
    let digits = validate_phone_number(phone)?;
    let message = preview(session, config, now);

    Ok(ShareLink::new(digits, message))
}

/// Places the order and empties the cart.
///
/// ## Errors
/// `CART_ERROR` if the cart is empty.
pub fn checkout(
    session: &mut Session,
    config: &StoreConfig,
    now: DateTime<FixedOffset>,
) -> AppResult<OrderConfirmation> {
    ensure_not_empty(session.cart())?;

    let confirmation = session.with_cart(|cart| OrderConfirmation {
        reference: Uuid::new_v4(),
        line_count: cart.line_count(),
        total_units: cart.total_units(),
        summary: cart.summary(config.tax_rate(), now),
        message: config.formatter().format(cart, now),
    });

    session.with_cart_mut(Cart::clear);

    info!(
        session_id = %session.id(),
        reference = %confirmation.reference,
        lines = confirmation.line_count,
        total = %confirmation.summary.total,
        "Order placed"
    );

    Ok(confirmation)
}

fn ensure_not_empty(cart: &Cart) -> AppResult<()> {
    if cart.is_empty() {
        return Err(AppError::cart("Your cart is empty. Add some items first."));
    }
    Ok(())
}
