//! # storefront-checkout: Coupon Checkout Flow
//!
//! Feeds the pure pricing engine in `storefront-core` with a cart subtotal
//! and a coupon fetched from a [`CouponStore`], and records redemptions once
//! an order is placed.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Checkout Data Flow                                 │
//! │                                                                         │
//! │  Storefront (cart page / checkout page)                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              storefront-checkout (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │     Cart      │    │CheckoutService│    │ CouponStore  │  │   │
//! │  │   │  (cart.rs)    │───►│ (service.rs)  │───►│  (store/)    │  │   │
//! │  │   │  subtotal     │    │ quote         │    │ find / claim │  │   │
//! │  │   │               │    │ place_order   │    │ record       │  │   │
//! │  │   └───────────────┘    └───────┬───────┘    └──────────────┘  │   │
//! │  └────────────────────────────────┼────────────────────────────────┘   │
//! │                                   ▼                                     │
//! │                  storefront-core::apply_coupon (pure)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`cart`] - Cart lines and subtotal
//! - [`store`] - Coupon store trait and in-memory implementation
//! - [`service`] - Quote and order placement
//! - [`config`] - Environment-driven configuration
//! - [`telemetry`] - tracing-subscriber setup
//! - [`error`] - Store and checkout error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use storefront_checkout::{Cart, CheckoutConfig, CheckoutService, InMemoryCouponStore};
//!
//! let config = CheckoutConfig::load()?;
//! storefront_checkout::telemetry::init_tracing(&config)?;
//!
//! let store = InMemoryCouponStore::from_json(&coupon_rows)?;
//! let checkout = CheckoutService::new(store, config);
//!
//! let mut cart = Cart::new();
//! cart.add_line(product_id, "Ceramic mug", 1299, 2)?;
//!
//! let quote = checkout.quote("SPRING10", &cart).await?;
//! let placed = checkout.place_order(&order_id, "SPRING10", &cart).await?;
//! ```

pub mod cart;
pub mod config;
pub mod error;
pub mod service;
pub mod store;
pub mod telemetry;

pub use cart::{Cart, CartLine};
pub use config::{CheckoutConfig, ConfigError};
pub use error::{CheckoutError, CheckoutResult, StoreError, StoreResult};
pub use service::{CheckoutService, CouponQuote, PlacedOrder};
pub use store::{CouponStore, InMemoryCouponStore};
