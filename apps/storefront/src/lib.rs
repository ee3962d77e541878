//! # Storefront Service Library
//!
//! The service layer a presentation layer (the React SPA's backend) calls
//! into: catalog browsing, the shopper's cart and checkout.
//!
//! ## Module Organization
//! ```text
//! storefront/
//! ├── lib.rs          ◄─── You are here (startup, Storefront, tracing)
//! ├── config.rs       ◄─── Environment configuration
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   └── cart.rs     ◄─── SharedCart (Arc<Mutex<CartState>>)
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── product.rs  ◄─── Catalog commands
//! │   ├── cart.rs     ◄─── Cart manipulation commands
//! │   ├── checkout.rs ◄─── Order placement
//! │   └── health.rs   ◄─── Health check
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use storefront::{commands, AppConfig, Storefront};
//!
//! storefront::init_tracing();
//! let app = Storefront::open(AppConfig::load()?).await?;
//!
//! let cart = commands::cart::add_to_cart(app.db(), app.cart(), &product_id, Some(2)).await?;
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod state;

use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

pub use config::{AppConfig, ConfigError};
pub use error::{ApiError, ErrorCode};
pub use state::SharedCart;
use storefront_db::Database;

/// Owned application state: the catalog pool, the cart and the config.
///
/// Constructed explicitly and passed to commands; there is no global store.
/// Cloning is cheap and clones share the same cart.
#[derive(Debug, Clone)]
pub struct Storefront {
    db: Database,
    cart: SharedCart,
    config: AppConfig,
}

impl Storefront {
    /// Opens the catalog and starts with an empty cart.
    ///
    /// ## Startup Sequence
    /// ```text
    /// 1. Build pool settings from AppConfig
    /// 2. Connect to SQLite (WAL) and run pending migrations
    /// 3. Create an empty SharedCart
    /// ```
    pub async fn open(config: AppConfig) -> Result<Self, ApiError> {
        info!(path = %config.database_path.display(), "Starting storefront");

        let db = Database::new(config.db_config()).await?;

        info!("Database connected and migrations applied");

        Ok(Storefront {
            db,
            cart: SharedCart::new(),
            config,
        })
    }

    /// Assembles a storefront from already-built parts.
    pub fn from_parts(db: Database, cart: SharedCart, config: AppConfig) -> Self {
        Storefront { db, cart, config }
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    pub fn cart(&self) -> &SharedCart {
        &self.cart
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Closes the catalog pool.
    pub async fn shutdown(&self) {
        info!("Shutting down storefront");
        self.db.close().await;
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=storefront=trace` - Show trace for the service only
/// - Default: `info,storefront=debug,sqlx=warn`
///
/// Calling it again after a subscriber is installed is a no-op.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,storefront=debug,sqlx=warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::TRACE)
        .try_init();
}
