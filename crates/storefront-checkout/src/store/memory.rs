//! In-memory coupon store.
//!
//! Used by tests and by embedders that load a coupon snapshot at startup.
//! Every operation takes the same lock, which is what makes `claim`
//! atomic.

use std::collections::HashMap;
use std::sync::Arc;

use storefront_core::{Coupon, Redemption};
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::store::CouponStore;

#[derive(Debug, Default)]
struct Inner {
    coupons: HashMap<String, Coupon>,
    redemptions: Vec<Redemption>,
}

/// Coupon store backed by a `HashMap`.
///
/// ## Thread Safety
/// Uses `Arc<Mutex<_>>`:
/// - `Arc`: clones share the same data, so a handle can be given to each
///   request task
/// - `Mutex`: claims on the same code are serialized
#[derive(Debug, Clone, Default)]
pub struct InMemoryCouponStore {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryCouponStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        InMemoryCouponStore::default()
    }

    /// Creates a store seeded with `coupons`.
    ///
    /// A later coupon with the same code replaces an earlier one.
    pub fn with_coupons(coupons: impl IntoIterator<Item = Coupon>) -> Self {
        let coupons = coupons
            .into_iter()
            .map(|c| (c.code.clone(), c))
            .collect();

        InMemoryCouponStore {
            inner: Arc::new(Mutex::new(Inner {
                coupons,
                redemptions: Vec::new(),
            })),
        }
    }

    /// Creates a store from a JSON array of coupon rows, as exported from
    /// the backend's `coupons` table.
    pub fn from_json(rows: &str) -> StoreResult<Self> {
        let coupons: Vec<Coupon> = serde_json::from_str(rows)?;
        Ok(InMemoryCouponStore::with_coupons(coupons))
    }

    /// Inserts or replaces a coupon.
    pub async fn insert(&self, coupon: Coupon) {
        let mut inner = self.inner.lock().await;
        inner.coupons.insert(coupon.code.clone(), coupon);
    }

    /// Number of coupons held.
    pub async fn len(&self) -> usize {
        self.inner.lock().await.coupons.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.coupons.is_empty()
    }
}

impl CouponStore for InMemoryCouponStore {
    async fn find_by_code(&self, code: &str) -> StoreResult<Option<Coupon>> {
        let inner = self.inner.lock().await;
        Ok(inner.coupons.get(code).cloned())
    }

    async fn claim(&self, code: &str) -> StoreResult<Coupon> {
        let mut inner = self.inner.lock().await;
        let coupon = inner
            .coupons
            .get_mut(code)
            .ok_or_else(|| StoreError::not_found(code))?;

        let used = coupon.used_count.unwrap_or(0);
        if let Some(limit) = coupon.usage_limit {
            if used >= limit {
                return Err(StoreError::Exhausted {
                    code: code.to_string(),
                    limit,
                });
            }
        }

        let snapshot = coupon.clone();
        let used = used.saturating_add(1);
        coupon.used_count = Some(used);

        debug!(code, used_count = used, "Coupon claimed");
        Ok(snapshot)
    }

    async fn release(&self, code: &str) -> StoreResult<()> {
        let mut inner = self.inner.lock().await;
        let coupon = inner
            .coupons
            .get_mut(code)
            .ok_or_else(|| StoreError::not_found(code))?;

        let used = coupon.used_count.unwrap_or(0).saturating_sub(1);
        coupon.used_count = Some(used);

        debug!(code, used_count = used, "Coupon claim released");
        Ok(())
    }

    async fn record_redemption(&self, redemption: Redemption) -> StoreResult<()> {
        let mut inner = self.inner.lock().await;
        if !inner.coupons.contains_key(&redemption.coupon_code) {
            return Err(StoreError::not_found(redemption.coupon_code));
        }
        inner.redemptions.push(redemption);
        Ok(())
    }

    async fn redemptions_for(&self, code: &str) -> StoreResult<Vec<Redemption>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .redemptions
            .iter()
            .filter(|r| r.coupon_code == code)
            .cloned()
            .collect())
    }
}
