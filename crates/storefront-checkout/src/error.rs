//! # Checkout Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  ValidationError (storefront-core) ── caller bug ──┐                    │
//! │                                                    │                    │
//! │  RejectionReason (storefront-core) ── shopper ─────┤                    │
//! │                                                    ▼                    │
//! │  StoreError (this module) ── backend ──────► CheckoutError             │
//! │                                                    │                    │
//! │                                                    ▼                    │
//! │                              Storefront shows message / retries         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use storefront_core::{CoreError, RejectionReason, ValidationError};
use thiserror::Error;

// =============================================================================
// Store Error
// =============================================================================

/// Failures reported by a [`CouponStore`](crate::store::CouponStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// No coupon with this code.
    #[error("Coupon not found: {0}")]
    NotFound(String),

    /// Claim refused: the usage limit was reached.
    #[error("Coupon {code} has reached its usage limit of {limit}")]
    Exhausted { code: String, limit: u32 },

    /// Seed data could not be parsed.
    #[error("Invalid coupon data: {0}")]
    InvalidData(#[from] serde_json::Error),

    /// The backing service failed.
    #[error("Coupon store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Creates a NotFound error.
    pub fn not_found(code: impl Into<String>) -> Self {
        StoreError::NotFound(code.into())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Checkout Error
// =============================================================================

/// Errors surfaced by [`CheckoutService`](crate::service::CheckoutService).
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Bad input from the caller.
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// Cart operation failed.
    #[error(transparent)]
    Cart(#[from] CoreError),

    /// The shopper typed a code that does not exist.
    #[error("Coupon not found: {0}")]
    CouponNotFound(String),

    /// The coupon exists but cannot be applied to this order.
    #[error("Coupon rejected: {}", .0.message())]
    Rejected(RejectionReason),

    /// The coupon store failed.
    #[error("Coupon store error: {0}")]
    Store(StoreError),

    /// The coupon store did not answer in time.
    #[error("Coupon store timed out after {0:?}")]
    Timeout(Duration),
}

impl CheckoutError {
    /// Whether retrying the same request may succeed.
    ///
    /// Only backend failures qualify; rejections and bad input will fail
    /// the same way again.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CheckoutError::Timeout(_) | CheckoutError::Store(StoreError::Unavailable(_))
        )
    }

    /// The business rule that failed, if this is a rejection.
    pub fn rejection(&self) -> Option<RejectionReason> {
        match self {
            CheckoutError::Rejected(reason) => Some(*reason),
            _ => None,
        }
    }
}

/// Maps store failures onto what the shopper should see.
///
/// A lost claim race is the same outcome as an exhausted coupon.
impl From<StoreError> for CheckoutError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(code) => CheckoutError::CouponNotFound(code),
            StoreError::Exhausted { .. } => CheckoutError::Rejected(RejectionReason::Exhausted),
            other => CheckoutError::Store(other),
        }
    }
}

/// Result type for checkout operations.
pub type CheckoutResult<T> = Result<T, CheckoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_map_to_checkout_errors() {
        let err: CheckoutError = StoreError::not_found("NOPE").into();
        assert!(matches!(err, CheckoutError::CouponNotFound(ref code) if code == "NOPE"));

        let err: CheckoutError = StoreError::Exhausted {
            code: "ONCE".to_string(),
            limit: 1,
        }
        .into();
        assert_eq!(err.rejection(), Some(RejectionReason::Exhausted));

        let err: CheckoutError = StoreError::Unavailable("503".to_string()).into();
        assert!(err.is_retryable());
    }

    #[test]
    fn test_rejections_are_not_retryable() {
        assert!(!CheckoutError::Rejected(RejectionReason::Expired).is_retryable());
        assert!(CheckoutError::Timeout(Duration::from_millis(10)).is_retryable());
    }

    #[test]
    fn test_rejected_message_is_shopper_facing() {
        let err = CheckoutError::Rejected(RejectionReason::Expired);
        assert_eq!(err.to_string(), "Coupon rejected: This coupon has expired");
    }
}
