//! # Validation Module
//!
//! Input contract checks for the coupon flow.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Storefront UI (TypeScript)                                   │
//! │  ├── Coupon input box: trim, non-empty                                 │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Checkout (Rust)                                              │
//! │  ├── normalize_coupon_code() before lookup                             │
//! │  └── THIS MODULE: numeric sanity of subtotal and coupon rows           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Pricing engine                                               │
//! │  └── Business rules (inactive, expired, minimum, exhausted)            │
//! │                                                                         │
//! │  A failure here is a programming error, never a coupon rejection.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,no_run
//! use storefront_core::money::Money;
//! use storefront_core::validation::{normalize_coupon_code, validate_subtotal_cents};
//!
//! let code = normalize_coupon_code("  SPRING10 ", 50).unwrap();
//! validate_subtotal_cents(Money::from_cents(12000)).unwrap();
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Coupon, DiscountKind};
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Default maximum length of a coupon code.
pub const DEFAULT_MAX_CODE_LENGTH: usize = 50;

// =============================================================================
// String Validators
// =============================================================================

/// Normalizes a coupon code typed by the shopper before lookup.
///
/// ## Rules
/// - Leading/trailing whitespace is trimmed
/// - Must not be empty after trimming
/// - Must not exceed `max_len` characters
/// - Must not contain inner whitespace
/// - Case is preserved (codes are case-sensitive)
///
/// ## Example
/// ```rust
/// use storefront_core::validation::normalize_coupon_code;
///
/// assert_eq!(normalize_coupon_code(" Spring10 ", 50).unwrap(), "Spring10");
/// assert!(normalize_coupon_code("   ", 50).is_err());
/// assert!(normalize_coupon_code("TWO WORDS", 50).is_err());
/// ```
pub fn normalize_coupon_code(code: &str, max_len: usize) -> ValidationResult<String> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "coupon code".to_string(),
        });
    }

    if code.chars().count() > max_len {
        return Err(ValidationError::TooLong {
            field: "coupon code".to_string(),
            max: max_len,
        });
    }

    if code.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidFormat {
            field: "coupon code".to_string(),
            reason: "must not contain spaces".to_string(),
        });
    }

    Ok(code.to_string())
}

/// Validates an order identifier.
///
/// ## Rules
/// - Must be a valid UUID (orders are keyed by UUID in the backend)
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_order_id;
///
/// assert!(validate_order_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_order_id("not-a-uuid").is_err());
/// ```
pub fn validate_order_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "order id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "order id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a subtotal already in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free cart, coupon still evaluated)
pub fn validate_subtotal_cents(subtotal: Money) -> ValidationResult<()> {
    if subtotal.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "subtotal".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a unit price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Coupon Row Validators
// =============================================================================

/// Coupon amounts converted to cents, ready for the pricing engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CouponAmounts {
    /// Percent value as given; the engine clamps it.
    pub percent: f64,
    /// Fixed amount in cents (zero for percent coupons), may be negative if
    /// the row is.
    pub fixed: Money,
    pub minimum: Option<Money>,
    /// Cap in cents, never negative.
    pub max_discount: Option<Money>,
}

/// Checks that every numeric field of a coupon row is a finite number and
/// converts the money fields to cents.
///
/// Out-of-range but finite values (a 150% coupon, a negative fixed amount)
/// pass: the engine clamps them. Amounts too large for cents saturate to
/// `i64::MAX` / `i64::MIN`. Only NaN and infinities are rejected.
pub fn validate_coupon_amounts(coupon: &Coupon) -> ValidationResult<CouponAmounts> {
    if !coupon.discount_value.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "discount_value".to_string(),
        });
    }

    // Percent values are clamped by the engine, so only fixed values need
    // to fit in cents.
    let fixed = match coupon.discount_kind {
        DiscountKind::Fixed => decimal_amount("discount_value", coupon.discount_value)?,
        DiscountKind::Percent => Money::zero(),
    };

    let minimum = coupon
        .minimum_amount
        .map(|amount| decimal_amount("minimum_amount", amount))
        .transpose()?;

    let max_discount = coupon
        .max_discount
        .map(|amount| decimal_amount("max_discount", amount))
        .transpose()?
        .map(|cap| cap.max(Money::zero()));

    Ok(CouponAmounts {
        percent: coupon.discount_value,
        fixed,
        minimum,
        max_discount,
    })
}

fn decimal_amount(field: &str, amount: f64) -> ValidationResult<Money> {
    if !amount.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
        });
    }

    Money::from_decimal_saturating(amount).ok_or_else(|| ValidationError::NotFinite {
        field: field.to_string(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
