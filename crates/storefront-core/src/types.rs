//! # Domain Types
//!
//! Core domain types used by the storefront's coupon flow.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Coupon      │   │  PricingResult  │   │   Redemption    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  code           │   │  valid          │   │  id (UUID)      │       │
//! │  │  discount_kind  │   │  reason         │   │  coupon_code    │       │
//! │  │  discount_value │   │  discount_cents │   │  order_id       │       │
//! │  │  limits...      │   │  total_cents    │   │  discount_cents │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │  DiscountKind   │   │ RejectionReason │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  Percent        │   │  Inactive       │                             │
//! │  │  Fixed          │   │  Expired        │                             │
//! │  └─────────────────┘   │  BelowMinimum   │                             │
//! │                        │  Exhausted      │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Decimal vs Cents
//! `Coupon` mirrors the row stored in the hosted backend, so its amounts are
//! decimals in major units. Everything the engine *produces* is in cents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Discount Kind
// =============================================================================

/// How a coupon's `discount_value` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    /// `discount_value` is in percentage points (10 = 10% off).
    Percent,
    /// `discount_value` is a currency amount in major units (5.0 = $5.00 off).
    Fixed,
}

// =============================================================================
// Coupon
// =============================================================================

/// A coupon record as fetched from the remote `coupons` table.
///
/// The record is immutable input to the pricing engine. Usage accounting
/// (`used_count`) is owned by the store and only changes through an atomic
/// claim after an order is placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Coupon {
    /// Coupon code, case-sensitive.
    pub code: String,

    /// Percent or fixed amount.
    pub discount_kind: DiscountKind,

    /// Percentage points or major-unit amount, per `discount_kind`.
    ///
    /// Rows are not guaranteed clean: values outside the meaningful range
    /// are clamped by the engine rather than rejected.
    pub discount_value: f64,

    /// Minimum subtotal (major units) required to qualify.
    #[serde(default)]
    pub minimum_amount: Option<f64>,

    /// Whether the coupon is switched on.
    pub active: bool,

    /// Coupon stops working once the current time is past this instant.
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub expiration_date: Option<DateTime<Utc>>,

    /// Maximum number of redemptions.
    #[serde(default)]
    pub usage_limit: Option<u32>,

    /// Redemptions so far.
    #[serde(default)]
    pub used_count: Option<u32>,

    /// Upper bound (major units) on a percent discount.
    #[serde(default)]
    pub max_discount: Option<f64>,
}

impl Coupon {
    /// Creates an active, unlimited percent coupon.
    pub fn percent(code: impl Into<String>, percent: f64) -> Self {
        Coupon::new(code, DiscountKind::Percent, percent)
    }

    /// Creates an active, unlimited fixed-amount coupon.
    pub fn fixed(code: impl Into<String>, amount: f64) -> Self {
        Coupon::new(code, DiscountKind::Fixed, amount)
    }

    fn new(code: impl Into<String>, discount_kind: DiscountKind, discount_value: f64) -> Self {
        Coupon {
            code: code.into(),
            discount_kind,
            discount_value,
            minimum_amount: None,
            active: true,
            expiration_date: None,
            usage_limit: None,
            used_count: None,
            max_discount: None,
        }
    }

    /// Checks whether the redemption counter has reached the limit.
    ///
    /// Both fields must be present; a coupon without a limit never runs out.
    pub fn is_exhausted(&self) -> bool {
        match (self.usage_limit, self.used_count) {
            (Some(limit), Some(used)) => used >= limit,
            _ => false,
        }
    }

    /// Checks whether the coupon expired strictly before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiration_date.is_some_and(|expires| expires < now)
    }
}

// =============================================================================
// Rejection Reason
// =============================================================================

/// Why a coupon was not applied.
///
/// Variants are listed in evaluation order: when several rules fail, the
/// earliest one is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    /// Coupon is switched off.
    Inactive,
    /// Expiration date has passed.
    Expired,
    /// Subtotal is below the coupon's minimum amount.
    BelowMinimum,
    /// Usage limit reached.
    Exhausted,
}

impl RejectionReason {
    /// Stable machine-readable code (matches the serde representation).
    pub const fn as_str(&self) -> &'static str {
        match self {
            RejectionReason::Inactive => "inactive",
            RejectionReason::Expired => "expired",
            RejectionReason::BelowMinimum => "below_minimum",
            RejectionReason::Exhausted => "exhausted",
        }
    }

    /// Default English message for the shopper.
    ///
    /// The storefront may localize by matching on the variant instead.
    pub const fn message(&self) -> &'static str {
        match self {
            RejectionReason::Inactive => "This coupon is no longer active",
            RejectionReason::Expired => "This coupon has expired",
            RejectionReason::BelowMinimum => "Your order does not meet the coupon's minimum amount",
            RejectionReason::Exhausted => "This coupon has reached its usage limit",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Pricing Result
// =============================================================================

/// Outcome of applying a coupon to a subtotal.
///
/// ## Invariants
/// - `valid == reason.is_none()`
/// - invalid ⇒ `discount_cents == 0` and `total_cents == subtotal`
/// - `0 <= discount_cents <= subtotal` and `total_cents = subtotal - discount_cents`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PricingResult {
    pub valid: bool,
    pub reason: Option<RejectionReason>,
    pub discount_cents: i64,
    pub total_cents: i64,
}

impl PricingResult {
    /// A coupon that passed every rule.
    pub fn accepted(subtotal: Money, discount: Money) -> Self {
        PricingResult {
            valid: true,
            reason: None,
            discount_cents: discount.cents(),
            total_cents: (subtotal - discount).cents(),
        }
    }

    /// A coupon that failed `reason`; the subtotal passes through untouched.
    pub fn rejected(subtotal: Money, reason: RejectionReason) -> Self {
        PricingResult {
            valid: false,
            reason: Some(reason),
            discount_cents: 0,
            total_cents: subtotal.cents(),
        }
    }

    /// Returns the discount as Money.
    #[inline]
    pub fn discount(&self) -> Money {
        Money::from_cents(self.discount_cents)
    }

    /// Returns the total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Converts into a `Result`, for callers that treat a rejection as a
    /// failure.
    pub fn into_result(self) -> Result<Self, RejectionReason> {
        match self.reason {
            Some(reason) => Err(reason),
            None => Ok(self),
        }
    }
}

// =============================================================================
// Redemption
// =============================================================================

/// A record that an order consumed one use of a coupon.
///
/// Written by the checkout layer after the order is placed and the coupon
/// was claimed. Never produced by the pricing engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Redemption {
    pub id: String,
    pub coupon_code: String,
    pub order_id: String,
    pub discount_cents: i64,
    #[ts(as = "String")]
    pub redeemed_at: DateTime<Utc>,
}

impl Redemption {
    /// Creates a redemption with a fresh UUID v4.
    pub fn new(
        coupon_code: impl Into<String>,
        order_id: impl Into<String>,
        discount: Money,
        redeemed_at: DateTime<Utc>,
    ) -> Self {
        Redemption {
            id: uuid::Uuid::new_v4().to_string(),
            coupon_code: coupon_code.into(),
            order_id: order_id.into(),
            discount_cents: discount.cents(),
            redeemed_at,
        }
    }

    /// Returns the discount as Money.
    #[inline]
    pub fn discount(&self) -> Money {
        Money::from_cents(self.discount_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_coupon_deserializes_from_backend_row() {
        let row = r#"{
            "code": "SPRING10",
            "discount_kind": "percent",
            "discount_value": 10,
            "minimum_amount": 50.0,
            "active": true,
            "expiration_date": "2030-01-01T00:00:00Z",
            "usage_limit": 100,
            "used_count": 3,
            "max_discount": null
        }"#;

        let coupon: Coupon = serde_json::from_str(row).unwrap();
        assert_eq!(coupon.code, "SPRING10");
        assert_eq!(coupon.discount_kind, DiscountKind::Percent);
        assert_eq!(coupon.minimum_amount, Some(50.0));
        assert_eq!(coupon.usage_limit, Some(100));
        assert_eq!(coupon.max_discount, None);
        assert_eq!(
            coupon.expiration_date,
            Some(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_coupon_optional_fields_may_be_omitted() {
        let row = r#"{"code":"FLAT5","discount_kind":"fixed","discount_value":5,"active":false}"#;
        let coupon: Coupon = serde_json::from_str(row).unwrap();
        assert_eq!(coupon.discount_kind, DiscountKind::Fixed);
        assert!(!coupon.active);
        assert_eq!(coupon.expiration_date, None);
        assert_eq!(coupon.used_count, None);
    }

    #[test]
    fn test_coupon_missing_required_field_fails() {
        let row = r#"{"code":"NOKIND","discount_value":5,"active":true}"#;
        assert!(serde_json::from_str::<Coupon>(row).is_err());
    }

    #[test]
    fn test_is_exhausted_requires_both_fields() {
        let mut coupon = Coupon::percent("X", 10.0);
        coupon.usage_limit = Some(2);
        assert!(!coupon.is_exhausted());

        coupon.used_count = Some(1);
        assert!(!coupon.is_exhausted());

        coupon.used_count = Some(2);
        assert!(coupon.is_exhausted());

        coupon.usage_limit = None;
        assert!(!coupon.is_exhausted());
    }

    #[test]
    fn test_is_expired_at_is_strict() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let mut coupon = Coupon::fixed("X", 5.0);
        assert!(!coupon.is_expired_at(now));

        coupon.expiration_date = Some(now);
        assert!(!coupon.is_expired_at(now));

        coupon.expiration_date = Some(now - Duration::seconds(1));
        assert!(coupon.is_expired_at(now));
    }

    #[test]
    fn test_rejection_reason_serializes_snake_case() {
        let json = serde_json::to_string(&RejectionReason::BelowMinimum).unwrap();
        assert_eq!(json, "\"below_minimum\"");
        assert_eq!(RejectionReason::BelowMinimum.to_string(), "below_minimum");
    }

    #[test]
    fn test_pricing_result_constructors() {
        let subtotal = Money::from_cents(20000);

        let ok = PricingResult::accepted(subtotal, Money::from_cents(2000));
        assert!(ok.valid);
        assert_eq!(ok.total().cents(), 18000);
        assert!(ok.into_result().is_ok());

        let rejected = PricingResult::rejected(subtotal, RejectionReason::Expired);
        assert!(!rejected.valid);
        assert_eq!(rejected.discount(), Money::zero());
        assert_eq!(rejected.total(), subtotal);
        assert_eq!(rejected.into_result(), Err(RejectionReason::Expired));
    }

    #[test]
    fn test_redemption_new_generates_uuid() {
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let a = Redemption::new("SPRING10", "order-1", Money::from_cents(500), at);
        let b = Redemption::new("SPRING10", "order-1", Money::from_cents(500), at);
        assert_ne!(a.id, b.id);
        assert!(uuid::Uuid::parse_str(&a.id).is_ok());
        assert_eq!(a.discount().cents(), 500);
    }
}
