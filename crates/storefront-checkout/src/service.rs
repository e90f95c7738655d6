//! # Checkout Service
//!
//! Glue between the cart, the coupon store and the pricing engine.
//!
//! ## Order Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Checkout with a Coupon                           │
//! │                                                                         │
//! │  Shopper types code                                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  quote(code, cart)        normalize → find_by_code → apply_coupon       │
//! │       │                   (shows discount or the rejection reason)      │
//! │       ▼                                                                 │
//! │  Shopper confirms order                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  place_order(id, code, cart)                                           │
//! │       ├── quote again (coupon may have changed)                        │
//! │       ├── claim         (atomic; loses race → Rejected(Exhausted))     │
//! │       ├── re-price with the claimed snapshot                           │
//! │       │     └── rejected → release claim                               │
//! │       └── record_redemption                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::future::Future;
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use storefront_core::validation::{normalize_coupon_code, validate_order_id};
use storefront_core::{apply_coupon, Coupon, Money, PricingResult, Redemption, ValidationError};
use tracing::{debug, info, warn};

use crate::cart::Cart;
use crate::config::CheckoutConfig;
use crate::error::{CheckoutError, CheckoutResult, StoreResult};
use crate::store::CouponStore;

/// A priced coupon, shown to the shopper before they confirm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouponQuote {
    pub coupon_code: String,
    pub subtotal_cents: i64,
    pub pricing: PricingResult,
}

impl CouponQuote {
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }
}

/// An order that consumed a coupon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedOrder {
    pub order_id: String,
    pub subtotal_cents: i64,
    pub pricing: PricingResult,
    pub redemption: Redemption,
}

/// Checkout operations over a coupon store.
#[derive(Debug, Clone)]
pub struct CheckoutService<S> {
    store: S,
    config: CheckoutConfig,
}

impl<S: CouponStore> CheckoutService<S> {
    pub fn new(store: S, config: CheckoutConfig) -> Self {
        CheckoutService { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &CheckoutConfig {
        &self.config
    }

    /// Prices `code` against the cart without claiming anything.
    ///
    /// A coupon that fails a business rule is NOT an error here: the quote
    /// carries the reason so the storefront can explain it.
    pub async fn quote(&self, code: &str, cart: &Cart) -> CheckoutResult<CouponQuote> {
        let code = normalize_coupon_code(code, self.config.max_code_length)?;
        let subtotal = require_items(cart)?;

        let coupon = self
            .with_timeout(self.store.find_by_code(&code))
            .await?
            .ok_or_else(|| CheckoutError::CouponNotFound(code.clone()))?;

        let pricing = price(subtotal, &coupon)?;

        match pricing.reason {
            None => debug!(
                code = %code,
                subtotal_cents = subtotal.cents(),
                discount_cents = pricing.discount_cents,
                "Coupon quoted"
            ),
            Some(reason) => debug!(code = %code, reason = %reason, "Coupon rejected at quote"),
        }

        Ok(CouponQuote {
            coupon_code: code,
            subtotal_cents: subtotal.cents(),
            pricing,
        })
    }

    /// Places an order with `code`, consuming one use of the coupon.
    ///
    /// Call only once the order itself has been accepted; on success the
    /// redemption is already recorded.
    pub async fn place_order(
        &self,
        order_id: &str,
        code: &str,
        cart: &Cart,
    ) -> CheckoutResult<PlacedOrder> {
        validate_order_id(order_id)?;

        let quote = self.quote(code, cart).await?;
        if let Some(reason) = quote.pricing.reason {
            return Err(CheckoutError::Rejected(reason));
        }

        let code = quote.coupon_code;
        let subtotal = Money::from_cents(quote.subtotal_cents);

        let claimed = match self.with_timeout(self.store.claim(&code)).await {
            Ok(coupon) => coupon,
            Err(err) => {
                warn!(code = %code, order_id, error = %err, "Coupon claim failed");
                return Err(err);
            }
        };

        // The coupon may have been edited between quote and claim
        let repriced = price(subtotal, &claimed)
            .and_then(|pricing| pricing.into_result().map_err(CheckoutError::Rejected));
        let pricing = match repriced {
            Ok(pricing) => pricing,
            Err(err) => {
                debug!(code = %code, order_id, error = %err, "Claimed coupon no longer applies");
                self.release(&code).await;
                return Err(err);
            }
        };

        let redemption = Redemption::new(&code, order_id, pricing.discount(), Utc::now());
        if let Err(err) = self
            .with_timeout(self.store.record_redemption(redemption.clone()))
            .await
        {
            warn!(code = %code, order_id, error = %err, "Recording redemption failed");
            self.release(&code).await;
            return Err(err);
        }

        info!(
            code = %code,
            order_id,
            discount_cents = pricing.discount_cents,
            total_cents = pricing.total_cents,
            "Coupon redeemed"
        );

        Ok(PlacedOrder {
            order_id: order_id.to_string(),
            subtotal_cents: subtotal.cents(),
            pricing,
            redemption,
        })
    }

    /// Redemptions recorded for `code`.
    pub async fn redemptions(&self, code: &str) -> CheckoutResult<Vec<Redemption>> {
        let code = normalize_coupon_code(code, self.config.max_code_length)?;
        self.with_timeout(self.store.redemptions_for(&code)).await
    }

    /// Gives back a claim; failures are logged, the caller already has an
    /// error to report.
    async fn release(&self, code: &str) {
        if let Err(err) = self.with_timeout(self.store.release(code)).await {
            warn!(code, error = %err, "Releasing coupon claim failed");
        }
    }

    async fn with_timeout<T, F>(&self, fut: F) -> CheckoutResult<T>
    where
        F: Future<Output = StoreResult<T>>,
    {
        let limit: Duration = self.config.store_timeout();
        match tokio::time::timeout(limit, fut).await {
            Ok(result) => result.map_err(CheckoutError::from),
            Err(_) => {
                warn!(timeout_ms = self.config.store_timeout_ms, "Coupon store call timed out");
                Err(CheckoutError::Timeout(limit))
            }
        }
    }
}

fn require_items(cart: &Cart) -> CheckoutResult<Money> {
    if cart.is_empty() {
        return Err(ValidationError::Required {
            field: "cart items".to_string(),
        }
        .into());
    }
    Ok(cart.subtotal()?)
}

fn price(subtotal: Money, coupon: &Coupon) -> CheckoutResult<PricingResult> {
    apply_coupon(subtotal, coupon, Utc::now()).map_err(|err| {
        warn!(code = %coupon.code, error = %err, "Malformed coupon record");
        CheckoutError::Validation(err)
    })
}
