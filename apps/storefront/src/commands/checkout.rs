//! # Checkout Command
//!
//! Turns the cart into an order confirmation.
//!
//! ```text
//! validate name / email / address
//!          │
//!          ▼
//! ┌──────────────── cart lock ────────────────┐
//! │  empty? ──► EMPTY_CART                    │
//! │  snapshot items + totals → confirmation   │
//! │  *cart = cart.clear()                     │
//! └───────────────────────────────────────────┘
//!          │
//!          ▼
//! OrderConfirmation
//! ```
//!
//! Snapshot and clear share one critical section, so an add that races
//! with checkout lands either in the order or in the next cart, never in
//! neither. No payment details are collected.

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::SharedCart;
use storefront_core::validation::validate_checkout_details;
use storefront_core::{CheckoutDetails, CoreError, OrderConfirmation};

/// Places an order for everything in the cart and empties it.
///
/// ## Errors
/// * `VALIDATION_ERROR` - missing name or address, malformed email
/// * `EMPTY_CART` - nothing to order; the cart is left untouched
pub fn checkout(
    cart: &SharedCart,
    details: &CheckoutDetails,
) -> Result<OrderConfirmation, ApiError> {
    debug!(email = %details.email, "checkout command");

    validate_checkout_details(details)?;

    let order = cart.with_cart_mut(|state| {
        if state.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        let order = OrderConfirmation {
            order_number: generate_order_number(),
            customer_name: details.name.trim().to_string(),
            email: details.email.trim().to_string(),
            shipping_address: details.address.trim().to_string(),
            items: state.items().to_vec(),
            total_quantity: state.total_quantity(),
            total_amount: state.total_amount(),
            placed_at: Utc::now(),
        };

        *state = state.clear();
        Ok(order)
    })?;

    info!(
        order_number = %order.order_number,
        items = order.items.len(),
        total = %order.total_amount,
        "Order placed"
    );

    Ok(order)
}

/// Generates a short, human-readable order number (`ORD-XXXXXXXXXXXX`).
fn generate_order_number() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("ORD-{}", id[..12].to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use storefront_core::{CartAction, CartProduct, Money};

    fn details() -> CheckoutDetails {
        CheckoutDetails {
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            address: "123 Main St, City, Country".to_string(),
        }
    }

    fn filled_cart() -> SharedCart {
        let cart = SharedCart::new();
        cart.dispatch(&CartAction::AddOrIncrement {
            product: CartProduct::new("1", Money::from_cents(999)).with_title("Mascara"),
            quantity: Some(2),
        });
        cart.dispatch(&CartAction::AddOrIncrement {
            product: CartProduct::new("5", Money::from_cents(899)).with_title("Nail Polish"),
            quantity: None,
        });
        cart
    }

    #[test]
    fn test_checkout_snapshots_and_clears() {
        let cart = filled_cart();

        let order = checkout(&cart, &details()).unwrap();

        assert!(order.order_number.starts_with("ORD-"));
        assert_eq!(order.order_number.len(), 16);
        assert_eq!(order.customer_name, "John Doe");
        assert_eq!(order.shipping_address, "123 Main St, City, Country");
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.total_quantity, 3);
        assert_eq!(order.total_amount, Money::from_cents(2 * 999 + 899));

        assert!(cart.snapshot().is_empty());
    }

    #[test]
    fn test_checkout_empty_cart() {
        let cart = SharedCart::new();
        let err = checkout(&cart, &details()).unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyCart);
    }

    #[test]
    fn test_checkout_invalid_details_keeps_cart() {
        let cart = filled_cart();
        let before = cart.snapshot();

        let bad_email = CheckoutDetails {
            email: "not-an-email".to_string(),
            ..details()
        };
        let err = checkout(&cart, &bad_email).unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(cart.snapshot(), before);
    }

    #[test]
    fn test_order_numbers_are_unique() {
        assert_ne!(generate_order_number(), generate_order_number());
    }
}
