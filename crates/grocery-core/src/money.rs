//! # Money Module
//!
//! Provides the `Money` type for handling prices and totals safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing shelf prices as floats:                                        │
//! │    2.99 + 2.89 + 4.99 = 10.870000000000001  ❌ cent drift               │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    299 + 289 + 499 = 1087 cents, exactly                               │
//! │    Rounding happens once, when tax is computed                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use grocery_core::money::Money;
//!
//! // Create from cents, or parse the decimal text a price field holds
//! let milk = Money::from_cents(299);
//! let custom: Money = "1.50".parse().unwrap();
//!
//! let line_total = milk.multiply_quantity(2);
//! assert_eq!((line_total + custom).to_string(), "$7.48");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents for USD).
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  CatalogEntry.unit_price ──► CartLine.unit_price ──► CartLine total     │
/// │                                                          │              │
/// │                                          Cart.subtotal ◄─┘              │
/// │                                               │                         │
/// │                        calculate_tax(8%) ◄────┤                         │
/// │                                               ▼                         │
/// │                                   OrderSummary.total ──► "$8.62"        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use grocery_core::money::Money;
    ///
    /// let price = Money::from_cents(399); // Represents $3.99
    /// assert_eq!(price.cents(), 399);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion, always 0-99.
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Calculates tax on this amount, rounding half up to the cent.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`.
    /// The +5000 is half of the 10000 divisor. Amounts in the storefront
    /// are never negative, so truncation toward zero is the floor here.
    /// A result outside the `i64` range clamps to the nearest bound.
    ///
    /// ## Example
    /// ```rust
    /// use grocery_core::money::Money;
    /// use grocery_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_cents(798); // $7.98
    /// let tax = subtotal.calculate_tax(TaxRate::from_bps(800));
    ///
    /// // $7.98 × 8% = $0.6384 → $0.64
    /// assert_eq!(tax.cents(), 64);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // i128 so that large subtotals times bps cannot overflow
        let tax_cents = (i128::from(self.0) * i128::from(rate.bps()) + 5000) / 10000;
        let clamped = i64::try_from(tax_cents).unwrap_or(if tax_cents < 0 {
            i64::MIN
        } else {
            i64::MAX
        });
        Money::from_cents(clamped)
    }

    /// Multiplies a unit price by a quantity, saturating at the `i64` bounds.
    ///
    /// ## Example
    /// ```rust
    /// use grocery_core::money::Money;
    ///
    /// let apples = Money::from_cents(399);
    /// assert_eq!(apples.multiply_quantity(2).cents(), 798);
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(i64::from(qty)))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money the way the storefront prints it: `$7.98`, `-$5.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

/// Parses decimal text such as `"3.99"`, `"3"`, `".5"` or `"$12.00"`.
///
/// ## Rules
/// - Optional leading `-`, then an optional `$`
/// - At most two fractional digits (no sub-cent prices)
/// - No exponents, separators or other currency symbols
///
/// This is how prices enter the system both from catalog documents and
/// from the custom item price field, so no float ever becomes Money.
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: reason.to_string(),
        };

        let text = s.trim();
        let (negative, text) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let text = text.strip_prefix('$').unwrap_or(text);
        let (whole, frac) = text.split_once('.').unwrap_or((text, ""));

        if whole.is_empty() && frac.is_empty() {
            return Err(invalid("expected a number like 3.99"));
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid("expected a number like 3.99"));
        }
        if frac.len() > 2 {
            return Err(invalid("at most two decimal places are allowed"));
        }

        let too_large = || invalid("amount is too large");
        let whole_cents = if whole.is_empty() {
            0
        } else {
            whole
                .parse::<i64>()
                .map_err(|_| too_large())?
                .checked_mul(100)
                .ok_or_else(too_large)?
        };
        // One fractional digit means tenths: "3.5" is 350 cents
        let frac_cents = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| too_large())? * 10,
            _ => frac.parse::<i64>().map_err(|_| too_large())?,
        };
        let cents = whole_cents.checked_add(frac_cents).ok_or_else(too_large)?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Saturating, so a sum of huge line totals pins at the bound instead of wrapping.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

/// Lets line totals be summed with `.sum()`.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
