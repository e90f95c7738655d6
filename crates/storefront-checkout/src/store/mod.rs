//! # Coupon Store
//!
//! The checkout's view of the backend `coupons` and `coupon_redemptions`
//! tables.
//!
//! ## Claim Protocol
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Redeeming a Coupon                                   │
//! │                                                                         │
//! │  find_by_code("SPRING10")  ── snapshot, may be stale by checkout time   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  claim("SPRING10")         ── ATOMIC: used_count < usage_limit ?        │
//! │       │                        yes → used_count += 1, return snapshot   │
//! │       │                        no  → StoreError::Exhausted              │
//! │       ▼                                                                 │
//! │  record_redemption(..)     ── which order consumed the use              │
//! │                                                                         │
//! │  release("SPRING10")       ── undo a claim the order could not keep     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Two shoppers racing for the last use of a coupon both pass `find_by_code`;
//! only one of them wins `claim`.

pub mod memory;

use std::future::Future;

use storefront_core::{Coupon, Redemption};

use crate::error::StoreResult;

pub use memory::InMemoryCouponStore;

/// Access to coupon records and redemption history.
///
/// Implementations must make `claim` atomic with respect to other `claim`
/// and `release` calls on the same code.
pub trait CouponStore: Send + Sync {
    /// Fetches a coupon by exact (case-sensitive) code.
    fn find_by_code(&self, code: &str)
        -> impl Future<Output = StoreResult<Option<Coupon>>> + Send;

    /// Takes one use of the coupon.
    ///
    /// Returns the record as it was just before the increment. Fails with
    /// `StoreError::NotFound` or `StoreError::Exhausted`.
    fn claim(&self, code: &str) -> impl Future<Output = StoreResult<Coupon>> + Send;

    /// Gives back one use taken by `claim`. `used_count` never goes below 0.
    fn release(&self, code: &str) -> impl Future<Output = StoreResult<()>> + Send;

    /// Persists a redemption.
    fn record_redemption(
        &self,
        redemption: Redemption,
    ) -> impl Future<Output = StoreResult<()>> + Send;

    /// Lists redemptions of a coupon, oldest first.
    fn redemptions_for(&self, code: &str)
        -> impl Future<Output = StoreResult<Vec<Redemption>>> + Send;
}
