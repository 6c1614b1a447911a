//! # Amount Module
//!
//! Provides the `Amount` type for currency values in quotes.
//!
//! ## Why Not Integer Cents?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  LAYERED PERCENTAGES                                                    │
//! │                                                                         │
//! │  Quote prices are chains of percentages on running subtotals:           │
//! │    base ──► print (20% of base) ──► lamination (10% of base+print)      │
//! │                                                                         │
//! │  Rounding each step to cents would make the result depend on how       │
//! │  many steps were chained. Instead:                                      │
//! │    • arithmetic runs on the full f64 value                              │
//! │    • rounding to 2 decimals happens ONLY when rendering                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use wrap_core::amount::Amount;
//!
//! let base = Amount::new(1100.0);
//! let print = base.percent(20.0);        // 220.00
//! let subtotal = base + print;           // 1320.00
//! assert_eq!(subtotal.to_string(), "1320.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use ts_rs::TS;

// =============================================================================
// Amount Type
// =============================================================================

/// A currency amount in major units (e.g. euros), stored unrounded.
///
/// ## Where Amount is Used
/// ```text
/// Coverage.price ─┬─► base price ──► print cost ──┬─► lamination cost ─┐
/// Option.price ───┘                               └─► white print ─────┴─► total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Amount(f64);

impl Amount {
    /// Creates an amount from a value in major units.
    #[inline]
    pub const fn new(value: f64) -> Self {
        Amount(value)
    }

    /// Returns zero.
    #[inline]
    pub const fn zero() -> Self {
        Amount(0.0)
    }

    /// Returns the raw, unrounded value.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.0
    }

    /// Checks if the value is exactly zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    /// Checks if the value is strictly greater than zero.
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > 0.0
    }

    /// Checks that the value is neither NaN nor infinite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }

    /// Returns `pct` percent of this amount.
    ///
    /// ## Example
    /// ```rust
    /// use wrap_core::amount::Amount;
    ///
    /// assert_eq!(Amount::new(1320.0).percent(10.0).to_string(), "132.00");
    /// ```
    #[inline]
    pub fn percent(&self, pct: f64) -> Amount {
        Amount(self.0 * (pct / 100.0))
    }

    /// Returns the value rounded to two decimals.
    ///
    /// ## Note
    /// Presentation only. Never feed a rounded amount back into a calculation.
    pub fn rounded(&self) -> f64 {
        (self.0 * 100.0).round() / 100.0
    }

    /// Formats the amount with a currency symbol, e.g. `€ 1650.00`.
    pub fn format_with(&self, symbol: &str) -> String {
        format!("{} {}", symbol, self)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders with exactly two decimals.
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.rounded())
    }
}

impl Default for Amount {
    fn default() -> Self {
        Amount::zero()
    }
}

impl Add for Amount {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Amount(self.0 + other.0)
    }
}

impl AddAssign for Amount {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Left-to-right summation, starting from zero.
impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Amount(value)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
