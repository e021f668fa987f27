//! # Money Module
//!
//! Provides the `Money` type for product prices.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  A decimal(10, 2) column holds exact values like 9.99.                 │
//! │  An f64 cannot: 9.99 is stored as 9.9900000000000002131...             │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    "9.99" ──parse──► Money(999) ──store──► price_cents = 999           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::money::Money;
//!
//! let price = Money::from_cents(999);          // $9.99
//! let parsed: Money = "9.99".parse().unwrap(); // $9.99
//! assert_eq!(price, parsed);
//! assert_eq!(price.checked_mul(3), Some(Money::from_cents(2997)));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents. Serializes as the bare integer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let price = Money::from_cents(999); // Represents $9.99
    /// assert_eq!(price.cents(), 999);
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

    /// Multiplies by a quantity, `None` if the result would overflow i64.
    #[inline]
    pub const fn checked_mul(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses a decimal string with at most two fractional digits.
///
/// ## Accepted Forms
/// ```text
/// "9.99"  → 999     "10"   → 1000     "0.5" → 50
/// "-1.25" → -125    " 3.1 " → 310 (trimmed)
///
/// "9.999" ✗ (three fractional digits)
/// "9."    ✗   ".99" ✗   "abc" ✗   "" ✗
/// ```
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: reason.to_string(),
        };

        let s = s.trim();
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let (major, minor) = match digits.split_once('.') {
            Some((major, minor)) => (major, Some(minor)),
            None => (digits, None),
        };

        if major.is_empty() || !major.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("expected a decimal number"));
        }

        let minor_cents = match minor {
            None => 0,
            Some(m) if m.is_empty() || m.len() > 2 || !m.bytes().all(|b| b.is_ascii_digit()) => {
                return Err(invalid("expected one or two fractional digits"));
            }
            Some(m) if m.len() == 1 => m.parse::<i64>().map_err(|_| invalid("bad digits"))? * 10,
            Some(m) => m.parse::<i64>().map_err(|_| invalid("bad digits"))?,
        };

        let cents = major
            .parse::<i64>()
            .ok()
            .and_then(|major| major.checked_mul(100))
            .and_then(|cents| cents.checked_add(minor_cents))
            .ok_or_else(|| invalid("value too large"))?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money as `$D.CC`, for logs and diagnostics.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}${}.{:02}", abs / 100, abs % 100)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
