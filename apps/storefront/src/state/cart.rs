//! # Cart State
//!
//! The shopper's cart for the lifetime of the service.
//!
//! ## Thread Safety
//! The cart is wrapped in `Arc<Mutex<T>>` because:
//! 1. Multiple commands may read or replace the cart concurrently
//! 2. Each replacement must be atomic (read state → reduce → store)
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  Command                 Action                    Stored State         │
//! │  ───────                 ──────                    ────────────         │
//! │                                                                         │
//! │  add_to_cart() ────────► AddOrIncrement ────┐                          │
//! │  remove_from_cart() ───► DecrementOrRemove ─┤                          │
//! │  delete_from_cart() ───► DeleteLine ────────┼──► *cart = cart.reduce() │
//! │  update_cart_item() ───► SetQuantity ───────┤                          │
//! │  clear_cart() ─────────► Clear ─────────────┘                          │
//! │                                                                         │
//! │  get_cart() ───────────► (read only)                                   │
//! │                                                                         │
//! │  NOTE: The lock is held only for the pure reduce step. Catalog         │
//! │        lookups happen before it is taken, never across an `.await`.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A poisoned lock is recovered: every stored value is a complete reducer
//! output, so a panic elsewhere can't leave a half-updated cart behind.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use storefront_core::{CartAction, CartState};

/// Cart handle shared between commands.
#[derive(Debug, Clone, Default)]
pub struct SharedCart {
    cart: Arc<Mutex<CartState>>,
}

impl SharedCart {
    /// Creates a handle around an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a handle around an existing cart (e.g. a restored snapshot).
    pub fn from_state(state: CartState) -> Self {
        SharedCart {
            cart: Arc::new(Mutex::new(state)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CartState> {
        self.cart.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Applies an action and returns the new state.
    pub fn dispatch(&self, action: &CartAction) -> CartState {
        let mut cart = self.lock();
        *cart = cart.reduce(action);
        cart.clone()
    }

    /// Returns a copy of the current state.
    pub fn snapshot(&self) -> CartState {
        self.lock().clone()
    }

    /// Executes a function with read access to the cart.
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CartState) -> R,
    {
        let cart = self.lock();
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    ///
    /// The closure sees and replaces the state under one lock, so a
    /// read-then-replace such as checkout is atomic.
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CartState) -> R,
    {
        let mut cart = self.lock();
        f(&mut cart)
    }
}
