//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Coupon rows from the hosted backend carry decimals (19.99, 12.5%).    │
//! │  We convert them to cents ONCE at the boundary and do all the          │
//! │  arithmetic (clamps, caps, subtraction) on integers.                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding
//! Every decimal → cents conversion rounds **half away from zero**
//! (0.125 → 0.13, -0.125 → -0.13). This is the standard currency rounding
//! shoppers expect on a receipt.
//!
//! ## Usage
//! ```rust
//! use storefront_core::money::Money;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(1099); // $10.99
//!
//! // Arithmetic operations
//! let total = price + Money::from_cents(500); // $15.99
//! let doubled = price.checked_mul(2);         // Some($21.98)
//!
//! // Decimal amounts only at the boundary
//! let minimum = Money::from_decimal(25.5).unwrap();
//! assert_eq!(minimum.cents(), 2550);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

/// Largest magnitude (in major units) accepted from decimal input.
///
/// Keeps `value * 100` well inside the range where f64 represents whole
/// cents exactly.
pub const MAX_DECIMAL_AMOUNT: f64 = 1e13;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Subtraction never wraps; negative values are caught
///   by validation rather than by the type
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Cart.subtotal ──► apply_coupon() ──► PricingResult.discount           │
/// │                                   └─► PricingResult.total              │
/// │                                                                         │
/// │  Coupon.minimum_amount / max_discount / fixed value                     │
/// │       (decimal) ──► Money::from_decimal ──► compared in cents           │
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
    /// use storefront_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a decimal major-unit amount into cents, rounding half away
    /// from zero.
    ///
    /// Returns `None` for NaN, infinities and magnitudes above
    /// [`MAX_DECIMAL_AMOUNT`].
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(19.99).unwrap().cents(), 1999);
    /// assert_eq!(Money::from_decimal(0.125).unwrap().cents(), 13);
    /// assert!(Money::from_decimal(f64::NAN).is_none());
    /// ```
    pub fn from_decimal(amount: f64) -> Option<Self> {
        if !amount.is_finite() || amount.abs() > MAX_DECIMAL_AMOUNT {
            return None;
        }

        Some(Money(round_half_away(amount * 100.0)))
    }

    /// Like [`Money::from_decimal`], but finite amounts beyond
    /// [`MAX_DECIMAL_AMOUNT`] saturate to `i64::MAX` / `i64::MIN` cents
    /// instead of failing.
    ///
    /// Still `None` for NaN and infinities.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal_saturating(1e300).unwrap().cents(), i64::MAX);
    /// assert_eq!(Money::from_decimal_saturating(-1e300).unwrap().cents(), i64::MIN);
    /// assert_eq!(Money::from_decimal_saturating(5.0).unwrap().cents(), 500);
    /// ```
    pub fn from_decimal_saturating(amount: f64) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }
        if amount > MAX_DECIMAL_AMOUNT {
            return Some(Money(i64::MAX));
        }
        if amount < -MAX_DECIMAL_AMOUNT {
            return Some(Money(i64::MIN));
        }

        Money::from_decimal(amount)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Restricts the value to `[min, max]`.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let subtotal = Money::from_cents(3000);
    /// let fixed = Money::from_cents(5000);
    /// assert_eq!(fixed.clamp_to(Money::zero(), subtotal), subtotal);
    /// ```
    #[inline]
    pub fn clamp_to(self, min: Money, max: Money) -> Money {
        Money(self.0.clamp(min.0, max.0))
    }

    /// Adds two amounts, `None` on i64 overflow.
    #[inline]
    pub const fn checked_add(self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Multiplies by a quantity, `None` on i64 overflow.
    #[inline]
    pub const fn checked_mul(self, qty: i64) -> Option<Money> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Calculates `percent`% of this amount, rounded half away from zero
    /// to the cent, with an optional cap applied BEFORE rounding.
    ///
    /// `percent` is in percentage points (12.5 = 12.5%) and is used as
    /// given; callers clamp it first. Above 2^53 cents the f64 product is
    /// not exact, so the result can land a cent past `self`; callers that
    /// need `<= self` clamp afterwards.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let subtotal = Money::from_cents(20000); // $200.00
    /// assert_eq!(subtotal.percentage(10.0, None).cents(), 2000);
    ///
    /// // $1000.00 at 50% = $500.00, capped at $100.00
    /// let big = Money::from_cents(100000);
    /// let cap = Money::from_cents(10000);
    /// assert_eq!(big.percentage(50.0, Some(cap)).cents(), 10000);
    /// ```
    pub fn percentage(&self, percent: f64, cap: Option<Money>) -> Money {
        // Multiply first so whole-percent rates on whole cents stay exact
        let mut raw = self.0 as f64 * percent / 100.0;

        if let Some(cap) = cap {
            if raw > cap.0 as f64 {
                raw = cap.0 as f64;
            }
        }

        Money(round_half_away(raw))
    }
}

/// Rounds a cent amount to a whole cent, half away from zero.
#[inline]
fn round_half_away(cents: f64) -> i64 {
    // f64::round is half-away-from-zero
    cents.round() as i64
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging and logs. The storefront UI formats money itself
/// to handle localization properly.
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

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
