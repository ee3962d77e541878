//! # Product Commands
//!
//! Catalog browsing for the product list and product detail pages, plus
//! catalog inserts for back-office tooling.
//!
//! ```text
//! Product List page ──► list_products(query)  ──► ProductRepository::search
//! Product Detail    ──► get_product(id)       ──► ProductRepository::get_by_id
//! Back office       ──► create_product(new)   ──► ProductRepository::insert
//! ```

use std::time::Instant;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::error::ApiError;
use storefront_core::{NewProduct, Product, ProductQuery};
use storefront_db::Database;

/// Lists catalog products matching the query.
///
/// Without an explicit `limit`, the configured search limit applies.
pub async fn list_products(
    db: &Database,
    config: &AppConfig,
    query: ProductQuery,
) -> Result<Vec<Product>, ApiError> {
    let start = Instant::now();
    let query = ProductQuery {
        limit: query.limit.or(Some(config.search_limit)),
        ..query
    };

    debug!(search = ?query.search, category = ?query.category, "list_products command");

    let products = db.products().search(&query).await?;

    info!(
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        count = products.len(),
        "list_products complete"
    );

    Ok(products)
}

/// Gets a single product for the detail page.
pub async fn get_product(db: &Database, id: &str) -> Result<Product, ApiError> {
    debug!(id = %id, "get_product command");

    db.products()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", id))
}

/// Inserts a product into the catalog.
///
/// ## Errors
/// * `VALIDATION_ERROR` - missing fields, non-positive price, negative stock
/// * `CONFLICT` - a product with the same title exists
pub async fn create_product(db: &Database, new: NewProduct) -> Result<Product, ApiError> {
    debug!(title = %new.title, "create_product command");

    let product = db.products().insert(&new).await?;

    info!(id = %product.id, title = %product.title, "Product created");
    Ok(product)
}
