//! # storefront-core: Pure Business Logic for the Storefront
//!
//! This crate contains the cart aggregation reducer and the catalog domain
//! types as pure functions and plain data, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (React SPA)                         │   │
//! │  │    Product List ──► Product Detail ──► Cart ──► Checkout       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  apps/storefront (service layer)                │   │
//! │  │    add_to_cart, remove_from_cart, checkout, list_products ...   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ storefront-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │ CartState │  │   rules   │  │   │
//! │  │   │ NewProduct│  │           │  │ LineItem  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                storefront-db (Catalog Store)                    │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`cart`] - The cart aggregation reducer (`CartState`, `LineItem`, `CartAction`)
//! - [`types`] - Catalog types (`Product`, `NewProduct`, `ProductQuery`, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::{CartProduct, CartState, Money};
//!
//! let lipstick = CartProduct::new("4", Money::from_cents(1299));
//!
//! let cart = CartState::new()
//!     .add_or_increment(&lipstick, 2)
//!     .decrement_or_remove("4");
//!
//! assert_eq!(cart.total_quantity(), 1);
//! assert_eq!(cart.total_amount(), Money::from_cents(1299));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{CartAction, CartState, CartTotals, LineItem};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Title shown for a line item whose product arrived without one.
pub const DEFAULT_ITEM_TITLE: &str = "Product";

/// Thumbnail stored for catalog products created without one.
pub const PLACEHOLDER_THUMBNAIL: &str = "https://via.placeholder.com/150";

/// Default number of products returned by a catalog search.
pub const DEFAULT_SEARCH_LIMIT: u32 = 50;

/// Upper bound on a catalog search page.
pub const MAX_SEARCH_LIMIT: u32 = 500;
