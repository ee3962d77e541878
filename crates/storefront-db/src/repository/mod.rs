//! # Repository Module
//!
//! Database access behind a small typed API.
//!
//! ```text
//! Storefront service
//!      │  db.products().get_by_id(id)
//!      ▼
//! ProductRepository
//! ├── get_by_id / get_by_title
//! ├── search(&ProductQuery)
//! ├── insert(&NewProduct)
//! └── update_stock / count / delete_all
//!      │  SQL
//!      ▼
//! SQLite
//! ```

pub mod product;
