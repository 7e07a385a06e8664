//! # Money Module
//!
//! Provides the `Money` type for prices, line totals and order totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  A cart summing float prices:                                           │
//! │    49.99 + 49.99 + 49.99 = 149.96999999999997  ❌                        │
//! │                                                                         │
//! │  ...which then decides whether shipping is free (> $150.00).            │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    4999 + 4999 + 4999 = 14997 cents, exactly                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use satchel_core::money::Money;
//!
//! let price = Money::from_major_minor(189, 0); // $189.00
//! let line_total = price.multiply_quantity(2);
//! assert_eq!(line_total.cents(), 37800);
//! assert_eq!(line_total.to_string(), "$378.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Sub};
use ts_rs::TS;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents.
///
/// ## Where Money Flows
/// ```text
/// Product.price ──► CartLine.line_total ──► cart subtotal
///                                              │
///                         shipping + tax ◄─────┤
///                                              ▼
///                                        OrderSummary.total
/// ```
///
/// Serialized as a bare integer of cents so catalog files and UI payloads
/// stay free of floats.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from dollars and cents.
    ///
    /// For negative amounts only the major unit carries the sign:
    /// `from_major_minor(-5, 50)` is -$5.50.
    ///
    /// ```rust
    /// use satchel_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(149, 99).cents(), 14999);
    /// assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Calculates tax at the given rate, rounding half up to the cent.
    ///
    /// ## Example
    /// ```rust
    /// use satchel_core::money::Money;
    /// use satchel_core::types::TaxRate;
    ///
    /// // $149.99 at 8% = $11.9992 → $12.00
    /// let tax = Money::from_cents(14999).calculate_tax(TaxRate::from_bps(800));
    /// assert_eq!(tax.cents(), 1200);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // i128 keeps large carts from overflowing: cents * bps / 10000
        let tax_cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(tax_cents as i64)
    }

    /// Multiplies a unit price by a quantity.
    ///
    /// Quantities are not checked here; a zero or negative quantity yields
    /// a zero or negative line total. Results past the i64 range clamp to
    /// `i64::MIN`/`i64::MAX` cents.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Percentage saved going from `original` to `self`, in whole percent.
    ///
    /// Used for the "20% off" badge on discounted products. Returns 0 when
    /// `original` is not above `self`.
    pub fn percent_off(&self, original: Money) -> u32 {
        if original.0 <= self.0 || original.0 <= 0 {
            return 0;
        }
        let saved = (original.0 - self.0) as i128;
        ((saved * 100 + original.0 as i128 / 2) / original.0 as i128) as u32
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

// Arithmetic saturates at the i64 bounds; quantities reach the store
// unchecked.

/// Shows money as `$12.34`, for logs and summaries. Localised formatting is
/// the UI's job.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            (self.0 / 100).unsigned_abs(),
            self.cents_part()
        )
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
