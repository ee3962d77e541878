//! # State Module
//!
//! Application state owned by [`crate::Storefront`].
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │   Database   │  │  SharedCart  │  │    AppConfig     │              │
//! │  │              │  │              │  │                  │              │
//! │  │  SQLite pool │  │  Arc<Mutex<  │  │  db path         │              │
//! │  │  (catalog)   │  │   CartState  │  │  search limit    │              │
//! │  │              │  │  >>          │  │                  │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • Database: internal connection pool (thread-safe)                    │
//! │  • SharedCart: Arc<Mutex<T>>, state replaced wholesale per action      │
//! │  • AppConfig: read-only after initialization                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;

pub use cart::SharedCart;
