//! # Validation Module
//!
//! Input validation for catalog writes, catalog searches and checkout.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (React forms)                                       │
//! │  └── `required` attributes, immediate feedback                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Service layer (Rust)                                         │
//! │  └── THIS MODULE: Business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  └── UNIQUE(title)                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart is deliberately absent: its inputs are normalized, not
//! validated (see [`crate::cart`]).

use crate::error::ValidationError;
use crate::types::{CheckoutDetails, NewProduct, ProductQuery};
use crate::MAX_SEARCH_LIMIT;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_TITLE_LEN: usize = 200;
const MAX_QUERY_LEN: usize = 100;

// =============================================================================
// String Validators
// =============================================================================

fn require(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::required(field));
    }
    Ok(())
}

/// Validates a product title.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters after trimming
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_title;
///
/// assert!(validate_title("Red Lipstick").is_ok());
/// assert!(validate_title("  ").is_err());
/// ```
pub fn validate_title(title: &str) -> ValidationResult<()> {
    require("title", title)?;

    if title.trim().chars().count() > MAX_TITLE_LEN {
        return Err(ValidationError::TooLong {
            field: "title".to_string(),
            max: MAX_TITLE_LEN,
        });
    }

    Ok(())
}

/// Validates a free-text search term and returns it trimmed.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "search".to_string(),
            max: MAX_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

/// Validates an email address (shape only: `local@domain.tld`).
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();
    require("email", email)?;

    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    };

    if !valid {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@example.com".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a catalog price: strictly positive.
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(999).is_ok());
/// assert!(validate_price_cents(0).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }
    Ok(())
}

/// Validates a stock level: non-negative.
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::OutOfRange {
            field: "stock".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }
    Ok(())
}

/// Validates a search page size: `1..=MAX_SEARCH_LIMIT`.
pub fn validate_search_limit(limit: u32) -> ValidationResult<()> {
    if limit == 0 || limit > MAX_SEARCH_LIMIT {
        return Err(ValidationError::OutOfRange {
            field: "limit".to_string(),
            min: 1,
            max: MAX_SEARCH_LIMIT as i64,
        });
    }
    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates a catalog insert.
///
/// ## Rules
/// - title, description, category and brand are required
/// - price is strictly positive
/// - stock, when given, is non-negative
/// - discount, when given, is a percentage in `0..=100`
/// - rating, when given, is in `0..=5`
pub fn validate_new_product(product: &NewProduct) -> ValidationResult<()> {
    validate_title(&product.title)?;
    validate_price_cents(product.price_cents)?;
    require("description", &product.description)?;
    require("category", &product.category)?;
    require("brand", &product.brand)?;

    if let Some(stock) = product.stock {
        validate_stock(stock)?;
    }

    if let Some(discount) = product.discount_percentage {
        if !(0.0..=100.0).contains(&discount) {
            return Err(ValidationError::OutOfRange {
                field: "discountPercentage".to_string(),
                min: 0,
                max: 100,
            });
        }
    }

    if let Some(rating) = product.rating {
        if !(0.0..=5.0).contains(&rating) {
            return Err(ValidationError::OutOfRange {
                field: "rating".to_string(),
                min: 0,
                max: 5,
            });
        }
    }

    Ok(())
}

/// Validates search parameters.
///
/// ## Rules
/// - search term at most 100 characters
/// - price bounds non-negative, `min <= max` when both are set
/// - limit within `1..=MAX_SEARCH_LIMIT` when set
pub fn validate_product_query(query: &ProductQuery) -> ValidationResult<()> {
    if let Some(search) = &query.search {
        validate_search_query(search)?;
    }

    for (field, bound) in [
        ("minPrice", query.min_price_cents),
        ("maxPrice", query.max_price_cents),
    ] {
        if bound.is_some_and(|cents| cents < 0) {
            return Err(ValidationError::OutOfRange {
                field: field.to_string(),
                min: 0,
                max: i64::MAX,
            });
        }
    }

    if let (Some(min), Some(max)) = (query.min_price_cents, query.max_price_cents) {
        if min > max {
            return Err(ValidationError::OutOfRange {
                field: "minPrice".to_string(),
                min: 0,
                max,
            });
        }
    }

    if let Some(limit) = query.limit {
        validate_search_limit(limit)?;
    }

    Ok(())
}

/// Validates the shipping contact entered at checkout.
pub fn validate_checkout_details(details: &CheckoutDetails) -> ValidationResult<()> {
    require("name", &details.name)?;
    validate_email(&details.email)?;
    require("address", &details.address)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
