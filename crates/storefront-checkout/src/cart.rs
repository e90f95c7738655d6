//! # Cart
//!
//! The cart contents the coupon is priced against.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Storefront Action        Method                  Cart Change           │
//! │  ─────────────────        ──────                  ───────────           │
//! │                                                                         │
//! │  Add to cart ────────────► add_line() ──────────► push or merge qty     │
//! │                                                                         │
//! │  Change quantity ────────► update_quantity() ───► lines[i].qty = n      │
//! │                                                                         │
//! │  Remove ─────────────────► remove_line() ───────► lines.remove(i)       │
//! │                                                                         │
//! │  Checkout ───────────────► subtotal() ──────────► (read only)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Line totals and the subtotal use checked arithmetic. A change that would
//! push either past `i64::MAX` cents is refused with
//! `CoreError::AmountOverflow` and leaves the cart as it was.

use serde::{Deserialize, Serialize};
use storefront_core::validation::{validate_price_cents, validate_quantity};
use storefront_core::{CoreError, CoreResult, Money, MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

/// A line in the shopping cart.
///
/// The unit price is frozen when the product is added, so a price change
/// in the catalog does not move the subtotal under the shopper's feet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: String,
    pub name: String,
    pub unit_price_cents: i64,
    pub quantity: i64,
}

impl CartLine {
    /// Calculates the line total (unit price × quantity).
    pub fn line_total(&self) -> CoreResult<Money> {
        Money::from_cents(self.unit_price_cents)
            .checked_mul(self.quantity)
            .ok_or(CoreError::AmountOverflow)
    }
}

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by `product_id` (adding the same product merges)
/// - Quantity is in 1..=MAX_ITEM_QUANTITY
/// - At most MAX_CART_ITEMS lines
/// - The subtotal fits in i64 cents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds a product or increases its quantity if already present.
    pub fn add_line(
        &mut self,
        product_id: impl Into<String>,
        name: impl Into<String>,
        unit_price_cents: i64,
        quantity: i64,
    ) -> CoreResult<()> {
        validate_price_cents(unit_price_cents)?;
        validate_quantity(quantity)?;

        let product_id = product_id.into();

        if let Some(index) = self.lines.iter().position(|l| l.product_id == product_id) {
            let previous = self.lines[index].quantity;
            let new_qty = previous + quantity;
            if new_qty > MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            self.lines[index].quantity = new_qty;
            if let Err(err) = self.subtotal() {
                self.lines[index].quantity = previous;
                return Err(err);
            }
            return Ok(());
        }

        if self.lines.len() >= MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge { max: MAX_CART_ITEMS });
        }

        self.lines.push(CartLine {
            product_id,
            name: name.into(),
            unit_price_cents,
            quantity,
        });
        if let Err(err) = self.subtotal() {
            self.lines.pop();
            return Err(err);
        }
        Ok(())
    }

    /// Sets the quantity of a line. Zero removes it.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> CoreResult<()> {
        if quantity == 0 {
            return self.remove_line(product_id);
        }

        validate_quantity(quantity)?;

        let index = self
            .lines
            .iter()
            .position(|l| l.product_id == product_id)
            .ok_or_else(|| CoreError::LineNotFound(product_id.to_string()))?;
        let previous = self.lines[index].quantity;
        self.lines[index].quantity = quantity;

        if let Err(err) = self.subtotal() {
            self.lines[index].quantity = previous;
            return Err(err);
        }
        Ok(())
    }

    /// Removes a line by product ID.
    pub fn remove_line(&mut self, product_id: &str) -> CoreResult<()> {
        let initial_len = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);

        if self.lines.len() == initial_len {
            Err(CoreError::LineNotFound(product_id.to_string()))
        } else {
            Ok(())
        }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of line totals, before any coupon.
    ///
    /// Only a cart deserialized from outside can fail here; the mutating
    /// methods keep the subtotal in range.
    pub fn subtotal(&self) -> CoreResult<Money> {
        self.lines.iter().try_fold(Money::zero(), |acc, line| {
            acc.checked_add(line.line_total()?)
                .ok_or(CoreError::AmountOverflow)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_add_line() {
        let mut cart = Cart::new();
        cart.add_line("p1", "Mug", 999, 2).unwrap();

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.subtotal().unwrap().cents(), 1998);
    }

    #[test]
    fn test_cart_add_same_product_merges() {
        let mut cart = Cart::new();
        cart.add_line("p1", "Mug", 999, 2).unwrap();
        cart.add_line("p1", "Mug", 999, 3).unwrap();

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 5);
    }

    #[test]
    fn test_cart_merge_respects_max_quantity() {
        let mut cart = Cart::new();
        cart.add_line("p1", "Mug", 100, 900).unwrap();
        let err = cart.add_line("p1", "Mug", 100, 100).unwrap_err();
        assert!(matches!(err, CoreError::QuantityTooLarge { requested: 1000, .. }));
    }

    #[test]
    fn test_cart_rejects_bad_lines() {
        let mut cart = Cart::new();
        assert!(matches!(
            cart.add_line("p1", "Mug", -1, 1),
            Err(CoreError::Validation(_))
        ));
        assert!(cart.add_line("p1", "Mug", 100, 0).is_err());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_cart_line_limit() {
        let mut cart = Cart::new();
        for i in 0..MAX_CART_ITEMS {
            cart.add_line(format!("p{i}"), "Item", 100, 1).unwrap();
        }
        assert!(matches!(
            cart.add_line("one-more", "Item", 100, 1),
            Err(CoreError::CartTooLarge { .. })
        ));
    }

    #[test]
    fn test_line_total_overflow_is_refused() {
        let mut cart = Cart::new();
        let err = cart.add_line("p1", "Big", i64::MAX / 2, 3).unwrap_err();
        assert!(matches!(err, CoreError::AmountOverflow));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_subtotal_overflow_is_refused_and_cart_unchanged() {
        let mut cart = Cart::new();
        cart.add_line("p1", "Big", i64::MAX / 2, 1).unwrap();
        cart.add_line("p2", "Big", i64::MAX / 2, 1).unwrap();

        let before = cart.clone();
        assert!(matches!(
            cart.add_line("p3", "Big", i64::MAX / 2, 1),
            Err(CoreError::AmountOverflow)
        ));
        assert!(matches!(
            cart.add_line("p1", "Big", i64::MAX / 2, 1),
            Err(CoreError::AmountOverflow)
        ));
        assert!(matches!(
            cart.update_quantity("p2", 2),
            Err(CoreError::AmountOverflow)
        ));
        assert_eq!(cart, before);
        assert_eq!(cart.subtotal().unwrap().cents(), i64::MAX - 1);
    }

    #[test]
    fn test_deserialized_cart_reports_overflow() {
        let json = format!(
            r#"{{"lines":[{{"product_id":"p1","name":"Big","unit_price_cents":{},"quantity":3}}]}}"#,
            i64::MAX / 2
        );
        let cart: Cart = serde_json::from_str(&json).unwrap();
        assert!(matches!(cart.subtotal(), Err(CoreError::AmountOverflow)));
    }

    #[test]
    fn test_update_and_remove() {
        let mut cart = Cart::new();
        cart.add_line("p1", "Mug", 500, 1).unwrap();
        cart.add_line("p2", "Tea", 250, 4).unwrap();
        assert_eq!(cart.subtotal().unwrap().cents(), 1500);

        cart.update_quantity("p1", 3).unwrap();
        assert_eq!(cart.subtotal().unwrap().cents(), 2500);

        cart.update_quantity("p2", 0).unwrap();
        assert_eq!(cart.subtotal().unwrap().cents(), 1500);

        assert!(cart.remove_line("p2").is_err());
        assert!(cart.update_quantity("missing", 1).is_err());
    }
}
