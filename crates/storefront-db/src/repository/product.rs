//! # Product Repository
//!
//! Database operations for the product catalog.
//!
//! ## Key Operations
//! - Full-text search using FTS5, combined with category and price filters
//! - Lookup by id and by title
//! - Inserts with defaults and duplicate-title rejection
//! - Relative stock updates
//!
//! ## FTS5 Search
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How Catalog Search Works                             │
//! │                                                                         │
//! │  User types: "red lip"                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Sanitized to: "red"* "lip"*   (every token is a quoted prefix)        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │ products_fts (title, description,       │                           │
//! │  │               brand, category)          │                           │
//! │  │                                         │                           │
//! │  │ Red Lipstick    | Chic Cosmetics | ... │ ← MATCH                   │
//! │  │ Red Nail Polish | Nail Couture   | ... │   (no "lip" token)        │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  JOIN products, apply category / price bounds, ORDER BY rank, title    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use storefront_core::validation::{validate_new_product, validate_product_query};
use storefront_core::{
    NewProduct, Product, ProductQuery, DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT,
    PLACEHOLDER_THUMBNAIL,
};

/// Column list shared by every product SELECT (table aliased as `p`).
const PRODUCT_COLUMNS: &str = "p.id, p.title, p.description, p.price_cents, \
     p.discount_percentage, p.rating, p.stock, p.brand, p.category, \
     p.thumbnail, p.images, p.created_at, p.updated_at";

// =============================================================================
// Row Mapping
// =============================================================================

/// Raw `products` row. `images` is stored as a JSON array.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: String,
    title: String,
    description: String,
    price_cents: i64,
    discount_percentage: f64,
    rating: f64,
    stock: i64,
    brand: String,
    category: String,
    thumbnail: String,
    images: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = DbError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        Ok(Product {
            images: serde_json::from_str(&row.images)?,
            id: row.id,
            title: row.title,
            description: row.description,
            price_cents: row.price_cents,
            discount_percentage: row.discount_percentage,
            rating: row.rating,
            stock: row.stock,
            brand: row.brand,
            category: row.category,
            thumbnail: row.thumbnail,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let results = repo.search(&ProductQuery::new().search("mascara")).await?;
/// let product = repo.get_by_id("uuid-here").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Searches the catalog.
    ///
    /// ## How It Works
    /// 1. A non-empty `search` goes through the FTS5 index (prefix match on
    ///    every token, ranked by relevance, ties broken by title)
    /// 2. `category`, `min_price_cents` and `max_price_cents` narrow the result
    /// 3. Without a search term the catalog is returned ordered by title
    ///
    /// A search term made only of punctuation matches nothing.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let cheap_beauty = repo
    ///     .search(&ProductQuery::new().category("beauty").price_range(None, Some(1000)))
    ///     .await?;
    /// ```
    pub async fn search(&self, query: &ProductQuery) -> DbResult<Vec<Product>> {
        validate_product_query(query)?;

        let limit = query
            .limit
            .unwrap_or(DEFAULT_SEARCH_LIMIT)
            .min(MAX_SEARCH_LIMIT);

        let search = query.search.as_deref().map(str::trim).unwrap_or_default();

        debug!(search = %search, category = ?query.category, limit = %limit, "Searching products");

        let fts_query = if search.is_empty() {
            None
        } else {
            match fts_match_expression(search) {
                Some(expr) => Some(expr),
                None => return Ok(Vec::new()),
            }
        };

        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {PRODUCT_COLUMNS} FROM products p"));
        let mut has_where = false;

        if let Some(expr) = &fts_query {
            builder.push(" INNER JOIN products_fts ON p.rowid = products_fts.rowid");
            builder.push(" WHERE products_fts MATCH ");
            builder.push_bind(expr.clone());
            has_where = true;
        }

        if let Some(category) = &query.category {
            builder.push(if has_where { " AND " } else { " WHERE " });
            builder.push("p.category = ");
            builder.push_bind(category.trim().to_string());
            has_where = true;
        }

        if let Some(min) = query.min_price_cents {
            builder.push(if has_where { " AND " } else { " WHERE " });
            builder.push("p.price_cents >= ");
            builder.push_bind(min);
            has_where = true;
        }

        if let Some(max) = query.max_price_cents {
            builder.push(if has_where { " AND " } else { " WHERE " });
            builder.push("p.price_cents <= ");
            builder.push_bind(max);
        }

        if fts_query.is_some() {
            builder.push(" ORDER BY rank, p.title");
        } else {
            builder.push(" ORDER BY p.title");
        }

        builder.push(" LIMIT ");
        builder.push_bind(i64::from(limit));

        let rows = builder.build_query_as::<ProductRow>().fetch_all(&self.pool).await?;

        debug!(count = rows.len(), "Search returned products");

        rows.into_iter().map(Product::try_from).collect()
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let row: Option<ProductRow> =
            sqlx::query_as(&format!("SELECT {PRODUCT_COLUMNS} FROM products p WHERE p.id = ?1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        row.map(Product::try_from).transpose()
    }

    /// Gets a product by its exact (trimmed) title.
    pub async fn get_by_title(&self, title: &str) -> DbResult<Option<Product>> {
        let row: Option<ProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products p WHERE p.title = ?1"
        ))
        .bind(title.trim())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Product::try_from).transpose()
    }

    /// Inserts a new product.
    ///
    /// ## Defaults
    /// - stock: 0
    /// - thumbnail: [`PLACEHOLDER_THUMBNAIL`]
    /// - images: empty
    /// - discount and rating: 0
    ///
    /// ## Returns
    /// * `Ok(Product)` - Inserted product with generated id and timestamps
    /// * `Err(DbError::Validation)` - Input failed validation
    /// * `Err(DbError::UniqueViolation)` - Title already exists
    pub async fn insert(&self, new: &NewProduct) -> DbResult<Product> {
        validate_new_product(new)?;

        let title = new.title.trim().to_string();
        debug!(title = %title, "Inserting product");

        if self.get_by_title(&title).await?.is_some() {
            return Err(DbError::duplicate("title", title));
        }

        let now = Utc::now();
        let product = Product {
            id: generate_product_id(),
            title,
            description: new.description.trim().to_string(),
            price_cents: new.price_cents,
            discount_percentage: new.discount_percentage.unwrap_or(0.0),
            rating: new.rating.unwrap_or(0.0),
            stock: new.stock.unwrap_or(0),
            brand: new.brand.trim().to_string(),
            category: new.category.trim().to_string(),
            thumbnail: new
                .thumbnail
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .unwrap_or(PLACEHOLDER_THUMBNAIL)
                .to_string(),
            images: new.images.clone(),
            created_at: now,
            updated_at: now,
        };

        let images = serde_json::to_string(&product.images)?;

        sqlx::query(
            r#"
            INSERT INTO products (
                id, title, description, price_cents,
                discount_percentage, rating, stock, brand, category,
                thumbnail, images, created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4,
                ?5, ?6, ?7, ?8, ?9,
                ?10, ?11, ?12, ?13
            )
            "#,
        )
        .bind(&product.id)
        .bind(&product.title)
        .bind(&product.description)
        .bind(product.price_cents)
        .bind(product.discount_percentage)
        .bind(product.rating)
        .bind(product.stock)
        .bind(&product.brand)
        .bind(&product.category)
        .bind(&product.thumbnail)
        .bind(images)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            // Lost a race with a concurrent insert of the same title.
            DbError::UniqueViolation { .. } => DbError::duplicate("title", &product.title),
            other => other,
        })?;

        Ok(product)
    }

    /// Changes stock by `delta` (negative to sell, positive to restock).
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    /// * `Err(DbError::CheckViolation)` - Stock would go below zero
    pub async fn update_stock(&self, id: &str, delta: i64) -> DbResult<()> {
        debug!(id = %id, delta = %delta, "Updating stock");

        let result = sqlx::query(
            r#"
            UPDATE products
            SET stock = stock + ?2,
                updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(delta)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts products in the catalog.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Removes every product. Returns the number of rows deleted.
    pub async fn delete_all(&self) -> DbResult<u64> {
        debug!("Deleting all products");

        let result = sqlx::query("DELETE FROM products")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

/// Generates a new product ID.
pub fn generate_product_id() -> String {
    Uuid::new_v4().to_string()
}

/// Turns free text into an FTS5 expression of quoted prefix terms.
///
/// Only alphanumeric characters survive, so user input can never inject
/// FTS5 operators (`AND`, `NEAR`, `*`, `"`, `:`). Returns `None` when no
/// token survives.
fn fts_match_expression(text: &str) -> Option<String> {
    let terms: Vec<String> = text
        .split_whitespace()
        .map(|token| token.chars().filter(|c| c.is_alphanumeric()).collect::<String>())
        .filter(|token| !token.is_empty())
        .map(|token| format!("\"{token}\"*"))
        .collect();

    if terms.is_empty() {
        None
    } else {
        Some(terms.join(" "))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    fn new_product(title: &str, price_cents: i64, brand: &str, category: &str) -> NewProduct {
        NewProduct {
            title: title.to_string(),
            price_cents,
            description: format!("{title} by {brand}"),
            category: category.to_string(),
            brand: brand.to_string(),
            stock: Some(10),
            ..Default::default()
        }
    }

    async fn seeded() -> (Database, ProductRepository) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        for product in [
            new_product("Red Lipstick", 1299, "Chic Cosmetics", "beauty"),
            new_product("Red Nail Polish", 899, "Nail Couture", "beauty"),
            new_product("Powder Canister", 1499, "Velvet Touch", "beauty"),
            new_product("Leather Wallet", 2999, "Hide Goods", "accessories"),
        ] {
            repo.insert(&product).await.unwrap();
        }

        (db, repo)
    }

    fn titles(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.title.as_str()).collect()
    }

    #[tokio::test]
    async fn test_insert_applies_defaults() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        let input = NewProduct {
            stock: None,
            title: "  Essence Mascara Lash Princess ".to_string(),
            ..new_product("x", 999, "Essence", "beauty")
        };
        let inserted = repo.insert(&input).await.unwrap();

        assert_eq!(inserted.title, "Essence Mascara Lash Princess");
        assert_eq!(inserted.stock, 0);
        assert_eq!(inserted.thumbnail, PLACEHOLDER_THUMBNAIL);
        assert!(inserted.images.is_empty());
        assert_eq!(inserted.rating, 0.0);

        let fetched = repo.get_by_id(&inserted.id).await.unwrap().unwrap();
        assert_eq!(fetched.title, inserted.title);
        assert_eq!(fetched.price_cents, 999);
        assert_eq!(fetched.thumbnail, PLACEHOLDER_THUMBNAIL);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_insert_keeps_images() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        let input = NewProduct {
            images: vec!["https://cdn.example.com/1.webp".to_string()],
            thumbnail: Some("https://cdn.example.com/t.webp".to_string()),
            ..new_product("Eyeshadow Palette with Mirror", 1999, "Glamour Beauty", "beauty")
        };
        let inserted = repo.insert(&input).await.unwrap();
        let fetched = repo.get_by_title("Eyeshadow Palette with Mirror").await.unwrap().unwrap();

        assert_eq!(fetched.id, inserted.id);
        assert_eq!(fetched.images, vec!["https://cdn.example.com/1.webp".to_string()]);
        assert_eq!(fetched.thumbnail, "https://cdn.example.com/t.webp");
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_title() {
        let (_db, repo) = seeded().await;

        let err = repo
            .insert(&new_product(" Red Lipstick ", 500, "Other", "beauty"))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::UniqueViolation { ref field, .. } if field == "title"));
        assert_eq!(repo.count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_insert_rejects_invalid_input() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        let err = repo
            .insert(&new_product("Free Sample", 0, "Brand", "beauty"))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::Validation(_)));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_get_by_id_missing() {
        let (_db, repo) = seeded().await;
        assert!(repo.get_by_id("no-such-id").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_search_without_term_orders_by_title() {
        let (_db, repo) = seeded().await;

        let all = repo.search(&ProductQuery::new()).await.unwrap();
        assert_eq!(
            titles(&all),
            vec!["Leather Wallet", "Powder Canister", "Red Lipstick", "Red Nail Polish"]
        );

        let blank = repo.search(&ProductQuery::new().search("   ")).await.unwrap();
        assert_eq!(blank.len(), 4);
    }

    #[tokio::test]
    async fn test_search_full_text_prefix() {
        let (_db, repo) = seeded().await;

        let lip = repo.search(&ProductQuery::new().search("lip")).await.unwrap();
        assert_eq!(titles(&lip), vec!["Red Lipstick"]);

        let red = repo.search(&ProductQuery::new().search("RED")).await.unwrap();
        assert_eq!(red.len(), 2);

        // Brand is indexed too.
        let velvet = repo.search(&ProductQuery::new().search("velvet")).await.unwrap();
        assert_eq!(titles(&velvet), vec!["Powder Canister"]);

        // Every token must match.
        let both = repo.search(&ProductQuery::new().search("red nail")).await.unwrap();
        assert_eq!(titles(&both), vec!["Red Nail Polish"]);
    }

    #[tokio::test]
    async fn test_search_ignores_fts_syntax() {
        let (_db, repo) = seeded().await;

        let quoted = repo
            .search(&ProductQuery::new().search("\"lip* OR"))
            .await
            .unwrap();
        assert!(titles(&quoted).is_empty());

        let punctuation = repo.search(&ProductQuery::new().search("***")).await.unwrap();
        assert!(punctuation.is_empty());

        let trailing = repo.search(&ProductQuery::new().search("lip!")).await.unwrap();
        assert_eq!(titles(&trailing), vec!["Red Lipstick"]);
    }

    #[tokio::test]
    async fn test_search_filters() {
        let (_db, repo) = seeded().await;

        let beauty = repo.search(&ProductQuery::new().category("beauty")).await.unwrap();
        assert_eq!(beauty.len(), 3);

        let cheap = repo
            .search(&ProductQuery::new().price_range(None, Some(1299)))
            .await
            .unwrap();
        assert_eq!(titles(&cheap), vec!["Red Lipstick", "Red Nail Polish"]);

        let mid = repo
            .search(&ProductQuery::new().price_range(Some(1000), Some(2000)))
            .await
            .unwrap();
        assert_eq!(titles(&mid), vec!["Powder Canister", "Red Lipstick"]);

        let red_under_ten = repo
            .search(&ProductQuery::new().search("red").price_range(None, Some(1000)))
            .await
            .unwrap();
        assert_eq!(titles(&red_under_ten), vec!["Red Nail Polish"]);

        let limited = repo.search(&ProductQuery::new().limit(2)).await.unwrap();
        assert_eq!(limited.len(), 2);
    }

    #[tokio::test]
    async fn test_search_rejects_inverted_range() {
        let (_db, repo) = seeded().await;

        let err = repo
            .search(&ProductQuery::new().price_range(Some(2000), Some(100)))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_stock() {
        let (_db, repo) = seeded().await;
        let lipstick = repo.get_by_title("Red Lipstick").await.unwrap().unwrap();

        repo.update_stock(&lipstick.id, -3).await.unwrap();
        repo.update_stock(&lipstick.id, 5).await.unwrap();

        let updated = repo.get_by_id(&lipstick.id).await.unwrap().unwrap();
        assert_eq!(updated.stock, 12);

        let err = repo.update_stock(&lipstick.id, -100).await.unwrap_err();
        assert!(matches!(err, DbError::CheckViolation { .. }));

        let err = repo.update_stock("missing", 1).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_search_index_follows_updates_and_deletes() {
        let (_db, repo) = seeded().await;

        assert_eq!(repo.delete_all().await.unwrap(), 4);
        assert_eq!(repo.count().await.unwrap(), 0);

        let red = repo.search(&ProductQuery::new().search("red")).await.unwrap();
        assert!(red.is_empty());

        repo.insert(&new_product("Red Lipstick", 1299, "Chic Cosmetics", "beauty"))
            .await
            .unwrap();
        let red = repo.search(&ProductQuery::new().search("red")).await.unwrap();
        assert_eq!(titles(&red), vec!["Red Lipstick"]);
    }

    #[test]
    fn test_fts_match_expression() {
        assert_eq!(fts_match_expression("lip"), Some("\"lip\"*".to_string()));
        assert_eq!(
            fts_match_expression("  red   NAIL "),
            Some("\"red\"* \"NAIL\"*".to_string())
        );
        assert_eq!(fts_match_expression("\"a\" OR b*"), Some("\"a\"* \"OR\"* \"b\"*".to_string()));
        assert_eq!(fts_match_expression("!!! ***"), None);
    }
}
