//! # Cart Commands
//!
//! Cart manipulation for the cart page and the "Add to cart" buttons.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│  Order   │       │
//! │  │  Cart    │     │          │     │   Form   │     │ Placed   │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                                 │              │
//! │                   add_to_cart                       checkout           │
//! │                   update_cart_item                  (checkout.rs)      │
//! │                   remove_from_cart                       │              │
//! │                   delete_from_cart                       │              │
//! │                        │                                 │              │
//! │                        ▼                                 ▼              │
//! │                   clear_cart ─────────────────────► (back to empty)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every command returns the full cart so the UI can re-render from one
//! consistent snapshot.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::error::ApiError;
use crate::state::SharedCart;
use storefront_core::{CartAction, CartProduct, CartState, CartTotals, LineItem};
use storefront_db::Database;

/// Cart response including items and totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartResponse {
    pub items: Vec<LineItem>,
    pub totals: CartTotals,
}

impl From<&CartState> for CartResponse {
    fn from(cart: &CartState) -> Self {
        CartResponse {
            items: cart.items().to_vec(),
            totals: cart.totals(),
        }
    }
}

/// Gets the current cart contents.
pub fn get_cart(cart: &SharedCart) -> CartResponse {
    debug!("get_cart command");
    cart.with_cart(|c| CartResponse::from(c))
}

/// Adds a product to the cart.
///
/// ## Behavior
/// - Product already in cart: quantity increases, unit price stays as first added
/// - Product not in cart: appended as a new line
/// - `quantity` defaults to 1; values below 1 count as 1
///
/// ## Flow
/// ```text
/// 1. Fetch product from the catalog (no cart lock held)
/// 2. Dispatch AddOrIncrement under the cart lock
/// 3. Return the updated cart
/// ```
///
/// ## Errors
/// * `NOT_FOUND` - no product with this id
pub async fn add_to_cart(
    db: &Database,
    cart: &SharedCart,
    product_id: &str,
    quantity: Option<i64>,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, quantity = ?quantity, "add_to_cart command");

    let product = db
        .products()
        .get_by_id(product_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", product_id))?;

    let state = cart.dispatch(&CartAction::AddOrIncrement {
        product: CartProduct::from(&product),
        quantity,
    });

    Ok(CartResponse::from(&state))
}

/// Removes one unit of a product, dropping the line when it reaches zero.
pub fn remove_from_cart(cart: &SharedCart, product_id: &str) -> CartResponse {
    debug!(product_id = %product_id, "remove_from_cart command");

    let state = cart.dispatch(&CartAction::DecrementOrRemove {
        id: product_id.to_string(),
    });
    CartResponse::from(&state)
}

/// Removes a product's line regardless of its quantity.
pub fn delete_from_cart(cart: &SharedCart, product_id: &str) -> CartResponse {
    debug!(product_id = %product_id, "delete_from_cart command");

    let state = cart.dispatch(&CartAction::DeleteLine {
        id: product_id.to_string(),
    });
    CartResponse::from(&state)
}

/// Sets the quantity of a line. Values below 1 count as 1; removal goes
/// through [`delete_from_cart`].
pub fn update_cart_item(cart: &SharedCart, product_id: &str, quantity: i64) -> CartResponse {
    debug!(product_id = %product_id, quantity = %quantity, "update_cart_item command");

    let state = cart.dispatch(&CartAction::SetQuantity {
        id: product_id.to_string(),
        quantity,
    });
    CartResponse::from(&state)
}

/// Clears all items from the cart.
pub fn clear_cart(cart: &SharedCart) -> CartResponse {
    debug!("clear_cart command");

    let state = cart.dispatch(&CartAction::Clear);
    CartResponse::from(&state)
}
