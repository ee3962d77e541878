//! # Domain Types
//!
//! Catalog and checkout types used throughout the storefront.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   CartProduct   │   │ OrderConfirm.   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │──►│  id             │   │  order_number   │       │
//! │  │  title          │   │  title?         │   │  items          │       │
//! │  │  price_cents    │   │  price          │   │  total_amount   │       │
//! │  │  stock, brand   │   │  thumbnail?     │   │  placed_at      │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   NewProduct    │   │  ProductQuery   │   │ CheckoutDetails │       │
//! │  │  (insert input) │   │ (search input)  │   │ name/email/addr │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::LineItem;
use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name; unique across the catalog.
    pub title: String,

    pub description: String,

    /// Price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Advertised discount, e.g. `10.48` for 10.48%.
    pub discount_percentage: f64,

    /// Average review score (0-5).
    pub rating: f64,

    /// Units available.
    pub stock: i64,

    pub brand: String,

    pub category: String,

    /// Thumbnail URL.
    pub thumbnail: String,

    /// Gallery image URLs.
    pub images: Vec<String>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Price after the advertised discount (display only).
    pub fn discounted_price(&self) -> Money {
        let bps = (self.discount_percentage.clamp(0.0, 100.0) * 100.0).round() as u32;
        self.price().apply_percentage_discount(bps)
    }

    /// Whether at least `quantity` units are in stock.
    pub fn in_stock(&self, quantity: i64) -> bool {
        self.stock >= quantity
    }
}

// =============================================================================
// New Product
// =============================================================================

/// Input for inserting a product into the catalog.
///
/// Optional fields are defaulted on insert: stock to 0, thumbnail to
/// [`crate::PLACEHOLDER_THUMBNAIL`], images to empty, rating and discount
/// to 0.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewProduct {
    pub title: String,
    pub price_cents: i64,
    pub description: String,
    pub category: String,
    pub brand: String,
    pub stock: Option<i64>,
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub discount_percentage: Option<f64>,
    pub rating: Option<f64>,
}

// =============================================================================
// Product Query
// =============================================================================

/// Catalog search parameters. Every filter is optional and they combine
/// with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductQuery {
    /// Free text matched against title, description, brand and category.
    pub search: Option<String>,
    /// Exact category.
    pub category: Option<String>,
    /// Inclusive lower price bound.
    pub min_price_cents: Option<i64>,
    /// Inclusive upper price bound.
    pub max_price_cents: Option<i64>,
    /// Page size; defaults to [`crate::DEFAULT_SEARCH_LIMIT`].
    pub limit: Option<u32>,
}

impl ProductQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn price_range(mut self, min_cents: Option<i64>, max_cents: Option<i64>) -> Self {
        self.min_price_cents = min_cents;
        self.max_price_cents = max_cents;
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

// =============================================================================
// Cart Product
// =============================================================================

/// What the catalog hands to the cart when a product is added.
///
/// Only `id` and `price` are required; a missing title or thumbnail is
/// defaulted by the reducer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartProduct {
    pub id: String,
    pub title: Option<String>,
    pub price: Money,
    pub thumbnail: Option<String>,
}

impl CartProduct {
    /// Creates a cart product with no title or thumbnail.
    pub fn new(id: impl Into<String>, price: Money) -> Self {
        CartProduct {
            id: id.into(),
            title: None,
            price,
            thumbnail: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }
}

impl From<&Product> for CartProduct {
    fn from(product: &Product) -> Self {
        CartProduct {
            id: product.id.clone(),
            title: Some(product.title.clone()),
            price: product.price(),
            thumbnail: Some(product.thumbnail.clone()),
        }
    }
}

// =============================================================================
// Checkout
// =============================================================================

/// Shipping contact collected at checkout. Payment details are never
/// collected here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CheckoutDetails {
    pub name: String,
    pub email: String,
    pub address: String,
}

/// Snapshot of a placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderConfirmation {
    pub order_number: String,
    pub customer_name: String,
    pub email: String,
    pub shipping_address: String,
    pub items: Vec<LineItem>,
    pub total_quantity: i64,
    pub total_amount: Money,
    #[ts(as = "String")]
    pub placed_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================
