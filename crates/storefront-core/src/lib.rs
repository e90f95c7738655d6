//! # storefront-core: Pure Pricing Logic for the Storefront
//!
//! This crate holds the storefront's coupon rules and discount math as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Storefront UI                                │   │
//! │  │    Cart ──► Coupon box ──► Checkout ──► Order confirmation      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 storefront-checkout                             │   │
//! │  │    quote, place_order, CouponStore (lookup / claim / record)    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ storefront-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  pricing  │  │ validation│  │   │
//! │  │   │  Coupon   │  │   Money   │  │  apply_   │  │   input   │  │   │
//! │  │   │  Result   │  │  rounding │  │  coupon   │  │  contract │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOGGING • NO CLOCK • PURE FUNCTIONS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Coupon, PricingResult, Redemption, etc.)
//! - [`money`] - Money type with integer arithmetic
//! - [`pricing`] - The coupon pricing engine
//! - [`error`] - Domain error types
//! - [`validation`] - Input contract checks
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same subtotal, coupon and `now` = same result
//! 2. **No I/O**: the current time is a parameter, never read here
//! 3. **Integer Money**: all computed amounts are in cents (i64)
//! 4. **Rejections are data**: an expired coupon is a `RejectionReason`,
//!    not an error
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::Utc;
//! use storefront_core::{apply_coupon, Coupon, Money};
//!
//! let mut coupon = Coupon::percent("HALF", 50.0);
//! coupon.max_discount = Some(100.0);
//!
//! let result = apply_coupon(Money::from_cents(100_000), &coupon, Utc::now()).unwrap();
//!
//! // 50% of $1000.00 is $500.00, capped at $100.00
//! assert_eq!(result.discount_cents, 10_000);
//! assert_eq!(result.total_cents, 90_000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::apply_coupon;
pub use types::*;
pub use validation::ValidationResult;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines allowed in a single cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single item in cart.
///
/// Guards against typing 1000 instead of 10.
pub const MAX_ITEM_QUANTITY: i64 = 999;
