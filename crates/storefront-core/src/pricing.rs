//! # Pricing Module
//!
//! Applies a coupon to a cart subtotal.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        apply_coupon()                                   │
//! │                                                                         │
//! │  subtotal, coupon, now                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Input contract ── negative subtotal / NaN amounts ──► ValidationError  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Eligibility (first failure wins)                                      │
//! │   1. active?            ── no ──► Inactive                             │
//! │   2. expired?           ── yes ─► Expired                              │
//! │   3. below minimum?     ── yes ─► BelowMinimum                         │
//! │   4. usage exhausted?   ── yes ─► Exhausted                            │
//! │       │                                  │                              │
//! │       ▼                                  ▼                              │
//! │  Discount                          discount = 0, total = subtotal       │
//! │   percent: clamp [0,100] → × subtotal → cap → round                     │
//! │   fixed:   clamp [0, subtotal]                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  total = subtotal − discount                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here is pure: the caller supplies `now`, nothing is logged and
//! the coupon is never modified. Redemption happens elsewhere, after the
//! order is placed.

use chrono::{DateTime, Utc};

use crate::money::Money;
use crate::types::{Coupon, DiscountKind, PricingResult, RejectionReason};
use crate::validation::{
    validate_coupon_amounts, validate_subtotal_cents, CouponAmounts, ValidationResult,
};

/// Applies `coupon` to `subtotal` as of `now`.
///
/// Business-rule failures come back as `Ok` with `valid == false`; only a
/// broken input (negative subtotal, non-finite coupon amounts) is an `Err`.
///
/// ## Example
/// ```rust
/// use chrono::Utc;
/// use storefront_core::money::Money;
/// use storefront_core::pricing::apply_coupon;
/// use storefront_core::types::Coupon;
///
/// let coupon = Coupon::percent("SPRING10", 10.0);
/// let result = apply_coupon(Money::from_cents(20000), &coupon, Utc::now()).unwrap();
///
/// assert!(result.valid);
/// assert_eq!(result.discount_cents, 2000); // $20.00
/// assert_eq!(result.total_cents, 18000);   // $180.00
/// ```
pub fn apply_coupon(
    subtotal: Money,
    coupon: &Coupon,
    now: DateTime<Utc>,
) -> ValidationResult<PricingResult> {
    validate_subtotal_cents(subtotal)?;
    let amounts = validate_coupon_amounts(coupon)?;

    let result = match check_eligibility(subtotal, coupon, &amounts, now) {
        Ok(()) => {
            let discount = compute_discount(subtotal, coupon.discount_kind, &amounts);
            PricingResult::accepted(subtotal, discount)
        }
        Err(reason) => PricingResult::rejected(subtotal, reason),
    };

    Ok(result)
}

/// Runs the eligibility rules in order and reports the first one that fails.
pub fn check_eligibility(
    subtotal: Money,
    coupon: &Coupon,
    amounts: &CouponAmounts,
    now: DateTime<Utc>,
) -> Result<(), RejectionReason> {
    if !coupon.active {
        return Err(RejectionReason::Inactive);
    }

    if coupon.is_expired_at(now) {
        return Err(RejectionReason::Expired);
    }

    if let Some(minimum) = amounts.minimum {
        if subtotal < minimum {
            return Err(RejectionReason::BelowMinimum);
        }
    }

    if coupon.is_exhausted() {
        return Err(RejectionReason::Exhausted);
    }

    Ok(())
}

/// Computes the discount for an eligible coupon.
///
/// The result always lies in `[0, subtotal]`.
pub fn compute_discount(subtotal: Money, kind: DiscountKind, amounts: &CouponAmounts) -> Money {
    match kind {
        DiscountKind::Percent => {
            let percent = amounts.percent.clamp(0.0, 100.0);
            subtotal
                .percentage(percent, amounts.max_discount)
                .clamp_to(Money::zero(), subtotal)
        }
        DiscountKind::Fixed => amounts.fixed.clamp_to(Money::zero(), subtotal),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    use crate::error::ValidationError;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 15, 12, 0, 0).unwrap()
    }

    fn dollars(amount: i64) -> Money {
        Money::from_cents(amount * 100)
    }

    fn price(subtotal: Money, coupon: &Coupon) -> PricingResult {
        apply_coupon(subtotal, coupon, now()).unwrap()
    }

    /// A coupon that fails every rule at once.
    fn failing_everything() -> Coupon {
        let mut coupon = Coupon::percent("BROKEN", 10.0);
        coupon.active = false;
        coupon.expiration_date = Some(now() - Duration::days(1));
        coupon.minimum_amount = Some(1_000.0);
        coupon.usage_limit = Some(1);
        coupon.used_count = Some(1);
        coupon
    }

    // -------------------------------------------------------------------------
    // Eligibility
    // -------------------------------------------------------------------------

    #[test]
    fn test_inactive_coupon_is_rejected_untouched() {
        for subtotal in [0, 1, 4999, 20000] {
            let subtotal = Money::from_cents(subtotal);
            let mut coupon = Coupon::percent("OFF", 10.0);
            coupon.active = false;

            let result = price(subtotal, &coupon);
            assert_eq!(
                result,
                PricingResult {
                    valid: false,
                    reason: Some(RejectionReason::Inactive),
                    discount_cents: 0,
                    total_cents: subtotal.cents(),
                }
            );
        }
    }

    #[test]
    fn test_expired_coupon_is_rejected() {
        let mut coupon = Coupon::fixed("OLD", 5.0);
        coupon.expiration_date = Some(now() - Duration::seconds(1));
        coupon.max_discount = Some(1.0);

        let result = price(dollars(100), &coupon);
        assert_eq!(result.reason, Some(RejectionReason::Expired));
        assert_eq!(result.total(), dollars(100));
    }

    #[test]
    fn test_expiration_exactly_now_is_still_valid() {
        let mut coupon = Coupon::fixed("EDGE", 5.0);
        coupon.expiration_date = Some(now());
        assert!(price(dollars(100), &coupon).valid);

        coupon.expiration_date = Some(now() + Duration::days(7));
        assert!(price(dollars(100), &coupon).valid);
    }

    #[test]
    fn test_below_minimum_is_rejected() {
        let mut coupon = Coupon::percent("MIN50", 10.0);
        coupon.minimum_amount = Some(50.0);

        let result = price(Money::from_cents(4999), &coupon);
        assert_eq!(result.reason, Some(RejectionReason::BelowMinimum));
        assert_eq!(result.discount(), Money::zero());

        // Exactly the minimum qualifies
        let result = price(dollars(50), &coupon);
        assert!(result.valid);
        assert_eq!(result.discount_cents, 500);
    }

    #[test]
    fn test_exhausted_coupon_is_rejected() {
        let mut coupon = Coupon::fixed("ONCE", 5.0);
        coupon.usage_limit = Some(3);
        coupon.used_count = Some(3);
        assert_eq!(price(dollars(20), &coupon).reason, Some(RejectionReason::Exhausted));

        coupon.used_count = Some(7);
        assert_eq!(price(dollars(20), &coupon).reason, Some(RejectionReason::Exhausted));

        coupon.used_count = Some(2);
        assert!(price(dollars(20), &coupon).valid);
    }

    #[test]
    fn test_usage_limit_without_used_count_is_not_exhausted() {
        let mut coupon = Coupon::fixed("FRESH", 5.0);
        coupon.usage_limit = Some(0);
        assert!(price(dollars(20), &coupon).valid);
    }

    #[test]
    fn test_first_failing_rule_wins() {
        let mut coupon = failing_everything();
        let subtotal = dollars(10);
        assert_eq!(price(subtotal, &coupon).reason, Some(RejectionReason::Inactive));

        coupon.active = true;
        assert_eq!(price(subtotal, &coupon).reason, Some(RejectionReason::Expired));

        coupon.expiration_date = None;
        assert_eq!(price(subtotal, &coupon).reason, Some(RejectionReason::BelowMinimum));

        coupon.minimum_amount = None;
        assert_eq!(price(subtotal, &coupon).reason, Some(RejectionReason::Exhausted));

        coupon.used_count = Some(0);
        assert!(price(subtotal, &coupon).valid);
    }

    // -------------------------------------------------------------------------
    // Percent discounts
    // -------------------------------------------------------------------------

    #[test]
    fn test_percent_discount() {
        let result = price(dollars(200), &Coupon::percent("TEN", 10.0));
        assert!(result.valid);
        assert_eq!(result.reason, None);
        assert_eq!(result.discount_cents, 2000);
        assert_eq!(result.total_cents, 18000);
    }

    #[test]
    fn test_percent_discount_is_capped() {
        let mut coupon = Coupon::percent("HALF", 50.0);
        coupon.max_discount = Some(100.0);

        let result = price(dollars(1000), &coupon);
        assert_eq!(result.discount_cents, 10000);
        assert_eq!(result.total_cents, 90000);
    }

    #[test]
    fn test_percent_cap_above_raw_discount_has_no_effect() {
        let mut coupon = Coupon::percent("HALF", 50.0);
        coupon.max_discount = Some(100.0);

        let result = price(dollars(50), &coupon);
        assert_eq!(result.discount_cents, 2500);
    }

    #[test]
    fn test_percent_above_hundred_is_clamped() {
        let result = price(dollars(80), &Coupon::percent("TOO_MUCH", 150.0));
        assert_eq!(result.discount_cents, 8000);
        assert_eq!(result.total_cents, 0);
    }

    #[test]
    fn test_negative_percent_is_clamped_to_zero() {
        let result = price(dollars(80), &Coupon::percent("NEG", -20.0));
        assert!(result.valid);
        assert_eq!(result.discount_cents, 0);
        assert_eq!(result.total_cents, 8000);
    }

    #[test]
    fn test_percent_discount_rounds_half_away_from_zero() {
        // $10.05 × 10% = $1.005 → $1.01
        let result = price(Money::from_cents(1005), &Coupon::percent("TEN", 10.0));
        assert_eq!(result.discount_cents, 101);
        assert_eq!(result.total_cents, 904);

        // $33.33 × 33.3% = $11.09889 → $11.10
        let result = price(Money::from_cents(3333), &Coupon::percent("THIRD", 33.3));
        assert_eq!(result.discount_cents, 1110);
    }

    #[test]
    fn test_percent_discount_on_huge_subtotal_stays_within_subtotal() {
        // Past 2^53 cents the f64 product rounds up by a cent
        let subtotal = Money::from_cents((1 << 54) - 1);

        let result = price(subtotal, &Coupon::percent("ALL", 100.0));
        assert!(result.valid);
        assert_eq!(result.discount(), subtotal);
        assert_eq!(result.total_cents, 0);

        let result = price(subtotal, &Coupon::percent("MOST", 99.9));
        assert!(result.discount_cents <= subtotal.cents());
        assert!(result.total_cents >= 0);
        assert_eq!(result.discount_cents + result.total_cents, subtotal.cents());
    }

    // -------------------------------------------------------------------------
    // Fixed discounts
    // -------------------------------------------------------------------------

    #[test]
    fn test_fixed_discount() {
        let result = price(dollars(30), &Coupon::fixed("FIVE", 5.0));
        assert_eq!(result.discount_cents, 500);
        assert_eq!(result.total_cents, 2500);
    }

    #[test]
    fn test_fixed_discount_never_exceeds_subtotal() {
        let result = price(dollars(30), &Coupon::fixed("FIFTY", 50.0));
        assert!(result.valid);
        assert_eq!(result.discount_cents, 3000);
        assert_eq!(result.total_cents, 0);
    }

    #[test]
    fn test_negative_fixed_discount_applies_nothing() {
        let result = price(dollars(30), &Coupon::fixed("NEG", -5.0));
        assert!(result.valid);
        assert_eq!(result.discount_cents, 0);
        assert_eq!(result.total_cents, 3000);
    }

    #[test]
    fn test_fixed_ignores_max_discount() {
        let mut coupon = Coupon::fixed("FLAT20", 20.0);
        coupon.max_discount = Some(5.0);
        assert_eq!(price(dollars(100), &coupon).discount_cents, 2000);
    }

    #[test]
    fn test_huge_fixed_amount_is_clamped_to_subtotal() {
        let result = price(dollars(30), &Coupon::fixed("WHALE", 1e15));
        assert!(result.valid);
        assert_eq!(result.discount_cents, 3000);
        assert_eq!(result.total_cents, 0);
    }

    #[test]
    fn test_huge_minimum_is_below_minimum_not_an_error() {
        let mut coupon = Coupon::percent("VIP", 10.0);
        coupon.minimum_amount = Some(1e15);

        let result = apply_coupon(dollars(30), &coupon, now()).unwrap();
        assert_eq!(result.reason, Some(RejectionReason::BelowMinimum));
        assert_eq!(result.total_cents, 3000);
    }

    #[test]
    fn test_zero_subtotal() {
        assert_eq!(price(Money::zero(), &Coupon::fixed("FIVE", 5.0)).total_cents, 0);
        assert_eq!(price(Money::zero(), &Coupon::percent("TEN", 10.0)).discount_cents, 0);
    }

    // -------------------------------------------------------------------------
    // Properties
    // -------------------------------------------------------------------------

    #[test]
    fn test_idempotent() {
        let mut coupon = Coupon::percent("SAME", 12.5);
        coupon.max_discount = Some(40.0);
        let subtotal = Money::from_cents(123_456);

        let first = price(subtotal, &coupon);
        let second = price(subtotal, &coupon);
        assert_eq!(first, second);
        assert_eq!(coupon.max_discount, Some(40.0));
    }

    #[test]
    fn test_total_plus_discount_equals_subtotal() {
        let coupons = [
            Coupon::percent("P0", 0.0),
            Coupon::percent("P7", 7.5),
            Coupon::percent("P33", 33.3),
            Coupon::percent("P100", 100.0),
            Coupon::fixed("F1", 0.99),
            Coupon::fixed("F20", 20.0),
            Coupon::fixed("F999", 999.0),
        ];

        for cents in [0, 1, 99, 1005, 4_999, 20_000, 1_234_567] {
            let subtotal = Money::from_cents(cents);
            for coupon in &coupons {
                let result = price(subtotal, coupon);
                assert!(result.valid);
                assert!(result.discount_cents >= 0);
                assert!(result.total_cents >= 0);
                assert_eq!(result.discount_cents + result.total_cents, cents);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Input contract
    // -------------------------------------------------------------------------

    #[test]
    fn test_negative_subtotal_is_an_input_error() {
        let err = apply_coupon(Money::from_cents(-1), &Coupon::fixed("X", 1.0), now()).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { .. }));
    }

    #[test]
    fn test_non_finite_amounts_are_input_errors() {
        let coupon = Coupon::percent("NAN", f64::NAN);
        assert!(apply_coupon(dollars(10), &coupon, now()).is_err());

        let mut coupon = Coupon::percent("CAP", 10.0);
        coupon.max_discount = Some(f64::INFINITY);
        assert!(apply_coupon(dollars(10), &coupon, now()).is_err());
    }

    #[test]
    fn test_input_errors_take_precedence_over_rejections() {
        let mut coupon = Coupon::percent("NAN", f64::NAN);
        coupon.active = false;
        assert!(apply_coupon(dollars(10), &coupon, now()).is_err());
    }

    #[test]
    fn test_check_eligibility_directly() {
        let coupon = failing_everything();
        let amounts = validate_coupon_amounts(&coupon).unwrap();
        assert_eq!(
            check_eligibility(dollars(10), &coupon, &amounts, now()),
            Err(RejectionReason::Inactive)
        );
    }
}
