//! # Commands Module
//!
//! Every operation the presentation layer can call.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── product.rs   ◄─── Catalog listing, lookup, creation
//! ├── cart.rs      ◄─── Cart manipulation
//! ├── checkout.rs  ◄─── Order placement
//! └── health.rs    ◄─── Liveness / database status
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs database
//! list_products(app.db(), app.config(), query).await?;
//!
//! // Only needs cart
//! get_cart(app.cart());
//!
//! // Needs both
//! add_to_cart(app.db(), app.cart(), "4", Some(2)).await?;
//! ```

pub mod cart;
pub mod checkout;
pub mod health;
pub mod product;
